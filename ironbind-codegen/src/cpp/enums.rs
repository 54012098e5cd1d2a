//! Enum emission.

use ironbind_schema::EnumDecl;

/// The emitted texts for one enum.
#[derive(Debug)]
pub struct EmittedEnum {
    /// C++ scoped enumeration definition.
    pub enum_text: String,
    /// pybind11 registration block.
    pub binding_text: String,
}

/// Emitter for enum definition and binding text.
pub struct EnumEmitter<'a> {
    decl: &'a EnumDecl,
}

impl<'a> EnumEmitter<'a> {
    /// Creates a new enum emitter.
    #[must_use]
    pub fn new(decl: &'a EnumDecl) -> Self {
        Self { decl }
    }

    /// Emits the enum and binding text, or `None` for an empty member
    /// set.
    #[must_use]
    pub fn emit(&self) -> Option<EmittedEnum> {
        if self.decl.members.is_empty() {
            tracing::debug!("Skipping enum '{}' with no members", self.decl.name);
            return None;
        }

        let name = &self.decl.name;
        let items: Vec<String> = self
            .decl
            .members
            .iter()
            .map(|(member, value)| format!("{member} = {value}"))
            .collect();
        let enum_text = format!("enum class {name} {{ {} }};", items.join(", "));

        let values: Vec<String> = self
            .decl
            .members
            .iter()
            .map(|(member, _)| format!(".value(\"{member}\", {name}::{member})"))
            .collect();
        let binding_text = format!(
            "py::enum_<{name}>(m, \"{name}\")\n    {};",
            values.join("\n    ")
        );

        Some(EmittedEnum {
            enum_text,
            binding_text,
        })
    }
}
