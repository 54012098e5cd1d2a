//! Record and enum declarations.
//!
//! Declarations are the reflected form of the source data model: records
//! with typed, possibly-defaulted fields and single or multiple
//! inheritance, and enumerations with explicit integer values. They are
//! constructed once per generation pass and immutable afterward.

use crate::module::ModulePath;
use crate::types::{Literal, TypeDescriptor};

/// One declared field: name, type descriptor and optional captured default.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    /// Field name, unique within the record's own declaration.
    pub name: String,
    /// Field type descriptor.
    pub ty: TypeDescriptor,
    /// Captured default value; `None` means the field is required.
    pub default: Option<Literal>,
}

impl FieldDecl {
    /// Creates a required field.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
        }
    }

    /// Creates a field with a captured default value.
    #[must_use]
    pub fn with_default(name: impl Into<String>, ty: TypeDescriptor, default: Literal) -> Self {
        Self {
            name: name.into(),
            ty,
            default: Some(default),
        }
    }

    /// Returns true if the field has a declared default.
    #[must_use]
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// The declaration flavor a record was reflected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecordKind {
    /// A plain record with a direct field table.
    #[default]
    Plain,
    /// A validated model whose fields are reflected from its computed
    /// field table.
    ValidatedModel,
}

/// A record declaration.
///
/// `bases` holds only generator-relevant record declarations; framework
/// root types are excluded by the declaration layer before construction.
#[derive(Debug, Clone)]
pub struct RecordDecl {
    /// Record name.
    pub name: String,
    /// Declaring module.
    pub module: ModulePath,
    /// Declaration flavor.
    pub kind: RecordKind,
    /// True if fields are immutable after construction.
    pub frozen: bool,
    /// Direct generator-relevant base records, in declaration order.
    pub bases: Vec<RecordDecl>,
    /// Fields declared directly on this record, in declaration order.
    pub fields: Vec<FieldDecl>,
}

impl RecordDecl {
    /// Creates a new mutable plain record with no bases or fields.
    #[must_use]
    pub fn new(name: impl Into<String>, module: ModulePath) -> Self {
        Self {
            name: name.into(),
            module,
            kind: RecordKind::Plain,
            frozen: false,
            bases: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Sets the declaration flavor.
    #[must_use]
    pub fn kind(mut self, kind: RecordKind) -> Self {
        self.kind = kind;
        self
    }

    /// Marks the record as frozen (read-only accessors).
    #[must_use]
    pub fn frozen(mut self) -> Self {
        self.frozen = true;
        self
    }

    /// Adds a base record.
    #[must_use]
    pub fn with_base(mut self, base: RecordDecl) -> Self {
        self.bases.push(base);
        self
    }

    /// Adds a declared field.
    #[must_use]
    pub fn with_field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }
}

/// An enum declaration with explicit integer member values.
#[derive(Debug, Clone)]
pub struct EnumDecl {
    /// Enum name.
    pub name: String,
    /// Declaring module.
    pub module: ModulePath,
    /// Ordered `(member name, integer value)` pairs.
    pub members: Vec<(String, i64)>,
}

impl EnumDecl {
    /// Creates a new enum declaration with no members.
    #[must_use]
    pub fn new(name: impl Into<String>, module: ModulePath) -> Self {
        Self {
            name: name.into(),
            module,
            members: Vec::new(),
        }
    }

    /// Adds a member with its explicit integer value.
    #[must_use]
    pub fn with_member(mut self, name: impl Into<String>, value: i64) -> Self {
        self.members.push((name.into(), value));
        self
    }
}
