//! Generation surface and artifact write-out.

use crate::cpp::module::ModuleAssembler;
use crate::error::CodegenError;
use ironbind_schema::{ModuleDecl, ModuleRegistry, validate_module};
use std::fs;
use std::path::Path;

/// Cosmetic formatting options, kept apart from content assembly.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorOptions {
    /// Indent width for nested blocks.
    pub indent: usize,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self { indent: 4 }
    }
}

impl GeneratorOptions {
    /// Creates options with the default formatting.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indent width for nested blocks.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

/// The two generated documents for one schema module.
#[derive(Debug, Clone)]
pub struct GeneratedModule {
    /// Header file name (`<leaf>.h`).
    pub header_name: String,
    /// Source file name (`<leaf>.cpp`).
    pub source_name: String,
    /// Header document contents.
    pub header: String,
    /// Source document contents.
    pub source: String,
}

/// Code generator for schema modules.
///
/// One generator may serve several modules sequentially; each call
/// creates a fresh resolution context, so nothing is cached across
/// module inputs.
#[derive(Debug, Default)]
pub struct Generator {
    options: GeneratorOptions,
}

impl Generator {
    /// Creates a generator with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator with the given options.
    #[must_use]
    pub fn with_options(options: GeneratorOptions) -> Self {
        Self { options }
    }

    /// Generates the header and source documents for a module.
    ///
    /// # Errors
    /// Returns `CodegenError` if the module fails validation or any
    /// declared record fails resolution. Generation is all-or-nothing.
    pub fn generate(&self, module: &ModuleDecl) -> Result<GeneratedModule, CodegenError> {
        validate_module(module)?;
        ModuleAssembler::new(module, self.options).generate()
    }

    /// Generates a module and writes its two artifacts into `out_dir`.
    ///
    /// Both documents are fully generated before anything touches the
    /// filesystem; a generation failure writes no files.
    ///
    /// # Errors
    /// Returns `CodegenError` on generation failure or on IO errors
    /// while writing.
    pub fn write(&self, module: &ModuleDecl, out_dir: &Path) -> Result<(), CodegenError> {
        let generated = self.generate(module)?;

        fs::create_dir_all(out_dir)?;
        fs::write(out_dir.join(&generated.header_name), &generated.header)?;
        fs::write(out_dir.join(&generated.source_name), &generated.source)?;

        tracing::debug!(
            "Wrote '{}' and '{}' to {}",
            generated.header_name,
            generated.source_name,
            out_dir.display()
        );
        Ok(())
    }

    /// Looks a module up in the registry, then generates and writes it.
    ///
    /// # Errors
    /// Returns `SchemaError::MissingModule` (wrapped) if the path is not
    /// registered, otherwise as [`Generator::write`].
    pub fn write_registered(
        &self,
        registry: &ModuleRegistry,
        path: &str,
        out_dir: &Path,
    ) -> Result<(), CodegenError> {
        let module = registry.get(path)?;
        self.write(module, out_dir)
    }
}
