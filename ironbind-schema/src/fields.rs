//! Field enumeration and constructor-parameter collection.
//!
//! The [`FieldSource`] trait is the reflection seam: one implementation
//! per declaration flavor yields `(name, type, default)` triples in
//! natural declaration order, so the collector never branches on
//! [`RecordKind`] inline.
//!
//! The collector produces the full constructor parameter list for a
//! record, including fields provided by its base records, in the order
//! the generated constructors declare them.

use crate::decls::{FieldDecl, RecordDecl, RecordKind};
use crate::types::{Literal, TypeDescriptor};
use std::collections::BTreeSet;

/// Yields a record's own declared fields in natural order.
pub trait FieldSource {
    /// Returns the declared `(name, type, default)` triples, in
    /// declaration order.
    fn declared_fields(&self) -> &[FieldDecl];
}

/// Field source for plain records, backed by the record's field table.
struct PlainFields<'a> {
    record: &'a RecordDecl,
}

impl FieldSource for PlainFields<'_> {
    fn declared_fields(&self) -> &[FieldDecl] {
        &self.record.fields
    }
}

/// Field source for validated models. The declaration layer normalizes
/// the model's computed-field table into the same triple form.
struct ModelFields<'a> {
    record: &'a RecordDecl,
}

impl FieldSource for ModelFields<'_> {
    fn declared_fields(&self) -> &[FieldDecl] {
        &self.record.fields
    }
}

/// Returns the field source matching the record's declaration flavor.
#[must_use]
pub fn field_source(record: &RecordDecl) -> Box<dyn FieldSource + '_> {
    match record.kind {
        RecordKind::Plain => Box::new(PlainFields { record }),
        RecordKind::ValidatedModel => Box::new(ModelFields { record }),
    }
}

/// One collected constructor parameter.
#[derive(Debug, Clone)]
pub struct CollectedField {
    /// Field name.
    pub name: String,
    /// Field type descriptor.
    pub ty: TypeDescriptor,
    /// Captured default value, if any.
    pub default: Option<Literal>,
    /// True if the value should be moved into its member.
    pub move_eligible: bool,
    /// True if the field is provided by a base record rather than stored
    /// on this record.
    pub inherited: bool,
}

/// A base record that contributes fields to the constructor chain.
#[derive(Debug)]
pub struct CollectedBase<'a> {
    /// The base record declaration.
    pub decl: &'a RecordDecl,
    /// The base's own constructor parameter names, in its parameter
    /// order, used to forward arguments in the initializer list.
    pub param_names: Vec<String>,
}

/// The result of collecting a record's fields.
#[derive(Debug)]
pub struct CollectedFields<'a> {
    /// Full constructor parameter list, in generated parameter order:
    /// parameters without defaults first (in reverse encounter order),
    /// then defaulted parameters in encounter order.
    pub params: Vec<CollectedField>,
    /// Every field name provided by the recursive base chain.
    pub base_field_names: BTreeSet<String>,
    /// Bases that contribute at least one field, in declaration order.
    pub bases: Vec<CollectedBase<'a>>,
}

impl<'a> CollectedFields<'a> {
    /// Returns the fields this record stores itself, in parameter order.
    #[must_use]
    pub fn own_fields(&self) -> Vec<&CollectedField> {
        self.params.iter().filter(|f| !f.inherited).collect()
    }

    /// Returns true if the record has no effective fields, own or
    /// inherited. Such records are skipped by emission.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns true if any parameter lacks a declared default, in which
    /// case the generated struct also carries a zero-argument
    /// constructor.
    #[must_use]
    pub fn any_required(&self) -> bool {
        self.params.iter().any(|f| f.default.is_none())
    }
}

/// Inserts a parameter per the generated-constructor ordering policy:
/// parameters without defaults go to the front of the working sequence,
/// defaulted parameters are appended at the end.
///
/// Net effect: required parameters end up in reverse encounter order,
/// followed by defaulted parameters in encounter order. Generated
/// constructor signatures depend on this exact order; every required
/// parameter must sit positionally ahead of every defaulted one.
fn insert_param(params: &mut Vec<CollectedField>, field: CollectedField) {
    let position = if field.default.is_some() {
        params.len()
    } else {
        0
    };
    params.insert(position, field);
}

/// Collects a record's full constructor parameter list and base chain.
///
/// Fields provided by base records come first in the encounter sequence
/// (in base declaration order, each base recursively collected), then the
/// record's own declared fields. An own field whose name is already
/// provided by a base is not stored again; it appears once in the
/// parameter list and is threaded through the base constructor call.
#[must_use]
pub fn collect(record: &RecordDecl) -> CollectedFields<'_> {
    let mut params: Vec<CollectedField> = Vec::new();
    let mut base_field_names = BTreeSet::new();
    let mut bases = Vec::new();

    for base in &record.bases {
        let collected = collect(base);
        if collected.is_empty() {
            continue;
        }
        for field in &collected.params {
            base_field_names.insert(field.name.clone());
            if params.iter().any(|p| p.name == field.name) {
                // Already provided by an earlier base.
                continue;
            }
            insert_param(
                &mut params,
                CollectedField {
                    inherited: true,
                    ..field.clone()
                },
            );
        }
        bases.push(CollectedBase {
            decl: base,
            param_names: collected.params.iter().map(|f| f.name.clone()).collect(),
        });
    }

    for field in field_source(record).declared_fields() {
        if base_field_names.contains(&field.name) {
            // Threaded through the base constructor, not stored here.
            continue;
        }
        insert_param(
            &mut params,
            CollectedField {
                name: field.name.clone(),
                ty: field.ty.clone(),
                default: field.default.clone(),
                move_eligible: field.ty.move_eligible(),
                inherited: false,
            },
        );
    }

    CollectedFields {
        params,
        base_field_names,
        bases,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decls::FieldDecl;
    use crate::module::ModulePath;
    use crate::types::PrimitiveKind;

    fn test_module() -> ModulePath {
        ModulePath::parse("acme.orders").expect("valid path")
    }

    fn int() -> TypeDescriptor {
        TypeDescriptor::Primitive(PrimitiveKind::Int)
    }

    fn text() -> TypeDescriptor {
        TypeDescriptor::Primitive(PrimitiveKind::Text)
    }

    fn param_names<'a>(collected: &'a CollectedFields<'_>) -> Vec<&'a str> {
        collected.params.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_parameter_ordering_policy() {
        // a: int (no default), b: str = "x", c: bool (no default)
        // expected parameter order: c, a, b
        let record = RecordDecl::new("Sample", test_module())
            .with_field(FieldDecl::new("a", int()))
            .with_field(FieldDecl::with_default("b", text(), Literal::str("x")))
            .with_field(FieldDecl::new(
                "c",
                TypeDescriptor::Primitive(PrimitiveKind::Bool),
            ));

        let collected = collect(&record);
        assert_eq!(param_names(&collected), vec!["c", "a", "b"]);
        assert!(collected.any_required());
    }

    #[test]
    fn test_all_defaulted_keeps_declaration_order() {
        let record = RecordDecl::new("Sample", test_module())
            .with_field(FieldDecl::with_default("a", int(), Literal::Int(1)))
            .with_field(FieldDecl::with_default("b", int(), Literal::Int(2)));

        let collected = collect(&record);
        assert_eq!(param_names(&collected), vec!["a", "b"]);
        assert!(!collected.any_required());
    }

    #[test]
    fn test_base_fields_precede_own() {
        let base = RecordDecl::new("Instrument", test_module())
            .with_field(FieldDecl::new("id", int()))
            .with_field(FieldDecl::with_default("venue", text(), Literal::str("XLON")));
        let record = RecordDecl::new("Order", test_module())
            .with_base(base)
            .with_field(FieldDecl::new("qty", int()));

        let collected = collect(&record);
        // Encounter order is id, venue (base), qty (own); required fields
        // reverse to qty, id and defaulted venue trails.
        assert_eq!(param_names(&collected), vec!["qty", "id", "venue"]);
        assert_eq!(collected.bases.len(), 1);
        assert_eq!(collected.bases[0].param_names, vec!["id", "venue"]);
        assert!(collected.base_field_names.contains("id"));
        assert!(collected.base_field_names.contains("venue"));
    }

    #[test]
    fn test_redeclared_field_threads_through_base() {
        let base = RecordDecl::new("Instrument", test_module())
            .with_field(FieldDecl::new("id", int()));
        let record = RecordDecl::new("Order", test_module())
            .with_base(base)
            .with_field(FieldDecl::new("id", int()))
            .with_field(FieldDecl::new("qty", int()));

        let collected = collect(&record);
        // `id` appears exactly once, marked inherited, and is not stored
        // on the derived record.
        assert_eq!(
            collected
                .params
                .iter()
                .filter(|f| f.name == "id")
                .count(),
            1
        );
        let own: Vec<&str> = collected.own_fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(own, vec!["qty"]);
    }

    #[test]
    fn test_zero_field_base_is_dropped() {
        let empty_base = RecordDecl::new("Tag", test_module());
        let record = RecordDecl::new("Order", test_module())
            .with_base(empty_base)
            .with_field(FieldDecl::new("qty", int()));

        let collected = collect(&record);
        assert!(collected.bases.is_empty());
        assert_eq!(param_names(&collected), vec!["qty"]);
    }

    #[test]
    fn test_empty_record_collects_empty() {
        let record = RecordDecl::new("Empty", test_module());
        let collected = collect(&record);
        assert!(collected.is_empty());
    }

    #[test]
    fn test_shared_field_across_bases_collected_once() {
        let base_a = RecordDecl::new("Timestamped", test_module())
            .with_field(FieldDecl::new("id", int()));
        let base_b = RecordDecl::new("Audited", test_module())
            .with_field(FieldDecl::new("id", int()))
            .with_field(FieldDecl::new("actor", text()));
        let record = RecordDecl::new("Event", test_module())
            .with_base(base_a)
            .with_base(base_b);

        let collected = collect(&record);
        assert_eq!(
            collected
                .params
                .iter()
                .filter(|f| f.name == "id")
                .count(),
            1
        );
        // Both bases still chain their full parameter lists.
        assert_eq!(collected.bases.len(), 2);
        assert_eq!(collected.bases[1].param_names, vec!["actor", "id"]);
    }

    #[test]
    fn test_model_flavor_collects_identically() {
        let plain = RecordDecl::new("Sample", test_module())
            .with_field(FieldDecl::new("a", int()))
            .with_field(FieldDecl::with_default("b", text(), Literal::str("x")));
        let model = RecordDecl::new("Sample", test_module())
            .kind(RecordKind::ValidatedModel)
            .with_field(FieldDecl::new("a", int()))
            .with_field(FieldDecl::with_default("b", text(), Literal::str("x")));

        assert_eq!(param_names(&collect(&plain)), param_names(&collect(&model)));
    }
}
