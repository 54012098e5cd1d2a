//! # IronBind Schema
//!
//! In-memory data-model declarations for IronBind.
//!
//! This crate provides:
//! - The recursive type-descriptor algebra for field types
//! - Record, enum and module declarations with captured defaults
//! - The `FieldSource` reflection seam and constructor-parameter collection
//! - A per-invocation module registry
//! - Declaration validation

pub mod decls;
pub mod error;
pub mod fields;
pub mod module;
pub mod types;
pub mod validation;

pub use decls::{EnumDecl, FieldDecl, RecordDecl, RecordKind};
pub use error::SchemaError;
pub use fields::{CollectedBase, CollectedField, CollectedFields, FieldSource, collect};
pub use module::{ModuleDecl, ModulePath, ModuleRegistry};
pub use types::{ContainerKind, Literal, PrimitiveKind, TemporalKind, TypeDescriptor, TypeRef};
pub use validation::validate_module;
