//! Declaration validation.
//!
//! Catches declaration mistakes before generation: duplicate names within
//! a module, duplicate field names within one record declaration, and
//! duplicate enum members. A field name that collides *across* the
//! inheritance chain is not an error; the collector threads it through
//! the base constructor instead.

use crate::decls::{EnumDecl, RecordDecl};
use crate::error::SchemaError;
use crate::module::ModuleDecl;
use std::collections::HashSet;

/// Validates a module declaration for correctness.
///
/// # Errors
/// Returns `SchemaError::Validation` describing the first problem found.
pub fn validate_module(module: &ModuleDecl) -> Result<(), SchemaError> {
    let mut seen_names = HashSet::new();

    for record in &module.records {
        if !seen_names.insert(&record.name) {
            return Err(SchemaError::validation(format!(
                "duplicate declaration '{}' in module '{}'",
                record.name, module.path
            )));
        }
        validate_record(record)?;
    }

    for decl in &module.enums {
        if !seen_names.insert(&decl.name) {
            return Err(SchemaError::validation(format!(
                "duplicate declaration '{}' in module '{}'",
                decl.name, module.path
            )));
        }
        validate_enum(decl)?;
    }

    Ok(())
}

/// Validates one record declaration, including its bases.
fn validate_record(record: &RecordDecl) -> Result<(), SchemaError> {
    let mut seen_fields = HashSet::new();

    for field in &record.fields {
        if !seen_fields.insert(&field.name) {
            return Err(SchemaError::validation(format!(
                "duplicate field '{}' in record '{}'",
                field.name, record.name
            )));
        }
    }

    for base in &record.bases {
        validate_record(base)?;
    }

    Ok(())
}

/// Validates one enum declaration.
fn validate_enum(decl: &EnumDecl) -> Result<(), SchemaError> {
    let mut seen_names = HashSet::new();
    let mut seen_values = HashSet::new();

    for (name, value) in &decl.members {
        if !seen_names.insert(name) {
            return Err(SchemaError::validation(format!(
                "duplicate member '{}' in enum '{}'",
                name, decl.name
            )));
        }
        if !seen_values.insert(value) {
            return Err(SchemaError::validation(format!(
                "duplicate member value {} in enum '{}'",
                value, decl.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decls::FieldDecl;
    use crate::module::ModulePath;
    use crate::types::{PrimitiveKind, TypeDescriptor};

    fn test_module() -> ModulePath {
        ModulePath::parse("acme.orders").expect("valid path")
    }

    fn int() -> TypeDescriptor {
        TypeDescriptor::Primitive(PrimitiveKind::Int)
    }

    #[test]
    fn test_valid_module() {
        let mut module = ModuleDecl::new(test_module());
        module.add_record(
            RecordDecl::new("Order", test_module()).with_field(FieldDecl::new("qty", int())),
        );
        module.add_enum(
            EnumDecl::new("Side", test_module())
                .with_member("Buy", 1)
                .with_member("Sell", 2),
        );

        assert!(validate_module(&module).is_ok());
    }

    #[test]
    fn test_duplicate_record_name() {
        let mut module = ModuleDecl::new(test_module());
        module.add_record(RecordDecl::new("Order", test_module()));
        module.add_record(RecordDecl::new("Order", test_module()));

        assert!(validate_module(&module).is_err());
    }

    #[test]
    fn test_duplicate_field_name() {
        let mut module = ModuleDecl::new(test_module());
        module.add_record(
            RecordDecl::new("Order", test_module())
                .with_field(FieldDecl::new("qty", int()))
                .with_field(FieldDecl::new("qty", int())),
        );

        assert!(validate_module(&module).is_err());
    }

    #[test]
    fn test_inherited_field_collision_is_allowed() {
        let base =
            RecordDecl::new("Instrument", test_module()).with_field(FieldDecl::new("id", int()));
        let mut module = ModuleDecl::new(test_module());
        module.add_record(
            RecordDecl::new("Order", test_module())
                .with_base(base)
                .with_field(FieldDecl::new("id", int())),
        );

        assert!(validate_module(&module).is_ok());
    }

    #[test]
    fn test_duplicate_enum_member_value() {
        let mut module = ModuleDecl::new(test_module());
        module.add_enum(
            EnumDecl::new("Side", test_module())
                .with_member("Buy", 1)
                .with_member("Sell", 1),
        );

        assert!(validate_module(&module).is_err());
    }
}
