//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions.
//!
//! ```ignore
//! use ironbind::prelude::*;
//! ```

// Schema types
pub use ironbind_schema::{
    ContainerKind, EnumDecl, FieldDecl, Literal, ModuleDecl, ModulePath, ModuleRegistry,
    PrimitiveKind, RecordDecl, RecordKind, SchemaError, TemporalKind, TypeDescriptor, TypeRef,
    collect, validate_module,
};

// Codegen types
pub use ironbind_codegen::{
    CodegenError, GeneratedModule, Generator, GeneratorOptions, generate_module, write_module,
};
