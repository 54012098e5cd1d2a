//! Schema module declarations and the module registry.
//!
//! A [`ModuleDecl`] holds the records and enums *declared* in one schema
//! module (not those merely referenced by it). The [`ModuleRegistry`] is
//! the in-memory stand-in for module loading: one registry is built per
//! generation invocation and nothing is cached across invocations.

use crate::decls::{EnumDecl, RecordDecl};
use crate::error::SchemaError;
use std::collections::HashMap;
use std::fmt;

/// A non-empty dotted schema module path, e.g. `acme.models.orders`.
///
/// All generated naming derives from this path: the header location, the
/// include guard, the C++ namespace and the binding registration entry
/// point.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModulePath {
    parts: Vec<String>,
}

impl ModulePath {
    /// Parses a dotted path. Returns `None` if the path is empty or any
    /// segment is empty.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        if path.is_empty() {
            return None;
        }
        let parts: Vec<String> = path.split('.').map(str::to_string).collect();
        if parts.iter().any(String::is_empty) {
            return None;
        }
        Some(Self { parts })
    }

    /// Returns the path segments.
    #[must_use]
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Returns the leaf segment, which names the generated artifacts.
    #[must_use]
    pub fn leaf(&self) -> &str {
        self.parts.last().map(String::as_str).unwrap_or_default()
    }

    /// Returns the namespace segments (all but the leaf).
    #[must_use]
    pub fn namespace_parts(&self) -> &[String] {
        &self.parts[..self.parts.len() - 1]
    }

    /// Returns the C++ namespace (`acme::models`), empty for a
    /// single-segment path.
    #[must_use]
    pub fn cpp_namespace(&self) -> String {
        self.namespace_parts().join("::")
    }

    /// Returns the header include path (`acme/models/orders.h`).
    #[must_use]
    pub fn header_path(&self) -> String {
        format!("{}.h", self.parts.join("/"))
    }

    /// Returns the include guard macro (`ACME_MODELS_ORDERS_H`).
    #[must_use]
    pub fn include_guard(&self) -> String {
        let mut guard = self.parts.join("_").to_uppercase();
        guard.push_str("_H");
        guard
    }

    /// Returns the binding registration entry point name
    /// (`acme_models_orders`), derived from the full dotted path so that
    /// same-named leaves in different packages do not collide.
    #[must_use]
    pub fn registration_name(&self) -> String {
        self.parts.join("_")
    }

    /// Returns the runtime import path of the generated binding module
    /// (`acme.models.__pybind__.acme_models_orders`). Generated binding
    /// modules live in a `__pybind__` package next to the schema module.
    #[must_use]
    pub fn binding_import_path(&self) -> String {
        let mut parts: Vec<&str> = self
            .namespace_parts()
            .iter()
            .map(String::as_str)
            .collect();
        let registration = self.registration_name();
        parts.push("__pybind__");
        parts.push(&registration);
        parts.join(".")
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.parts.join("."))
    }
}

/// One schema module's declarations.
#[derive(Debug, Clone)]
pub struct ModuleDecl {
    /// Dotted module path.
    pub path: ModulePath,
    /// Records declared in this module, in declaration order.
    pub records: Vec<RecordDecl>,
    /// Enums declared in this module, in declaration order.
    pub enums: Vec<EnumDecl>,
}

impl ModuleDecl {
    /// Creates a new empty module declaration.
    #[must_use]
    pub fn new(path: ModulePath) -> Self {
        Self {
            path,
            records: Vec::new(),
            enums: Vec::new(),
        }
    }

    /// Adds a record declaration.
    pub fn add_record(&mut self, record: RecordDecl) {
        self.records.push(record);
    }

    /// Adds an enum declaration.
    pub fn add_enum(&mut self, decl: EnumDecl) {
        self.enums.push(decl);
    }

    /// Returns true if the module declares nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.enums.is_empty()
    }
}

/// Registry of schema modules for one generation invocation.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: HashMap<String, ModuleDecl>,
}

impl ModuleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a module declaration.
    ///
    /// # Errors
    /// Returns `SchemaError::DuplicateModule` if a module with the same
    /// path was already registered.
    pub fn register(&mut self, module: ModuleDecl) -> Result<(), SchemaError> {
        let key = module.path.to_string();
        if self.modules.contains_key(&key) {
            return Err(SchemaError::DuplicateModule { module: key });
        }
        self.modules.insert(key, module);
        Ok(())
    }

    /// Looks up a module by its dotted path.
    ///
    /// # Errors
    /// Returns `SchemaError::MissingModule` if no module with the given
    /// path is registered.
    pub fn get(&self, path: &str) -> Result<&ModuleDecl, SchemaError> {
        self.modules
            .get(path)
            .ok_or_else(|| SchemaError::MissingModule {
                module: path.to_string(),
            })
    }

    /// Returns true if a module with the given path is registered.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.modules.contains_key(path)
    }
}
