//! # IronBind Codegen
//!
//! C++ struct and pybind11 binding generation from schema declarations.
//!
//! This crate provides:
//! - Type descriptor resolution to C++ type text
//! - Default value literalization
//! - Record struct and enum emission with binding registration blocks
//! - Module assembly into one header and one source artifact

pub mod cpp;
pub mod error;
pub mod generator;

pub use error::CodegenError;
pub use generator::{GeneratedModule, Generator, GeneratorOptions};

use ironbind_schema::ModuleDecl;
use std::path::Path;

/// Generates the header and source documents for a schema module.
///
/// # Errors
/// Returns `CodegenError` if validation or generation fails.
pub fn generate_module(module: &ModuleDecl) -> Result<GeneratedModule, CodegenError> {
    Generator::new().generate(module)
}

/// Generates a schema module and writes `<leaf>.h` / `<leaf>.cpp` into
/// the output directory. A generation failure writes no files.
///
/// # Errors
/// Returns `CodegenError` if generation fails or the artifacts cannot
/// be written.
pub fn write_module(module: &ModuleDecl, out_dir: &Path) -> Result<(), CodegenError> {
    Generator::new().write(module, out_dir)
}
