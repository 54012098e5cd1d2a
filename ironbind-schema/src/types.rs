//! Type descriptors and captured default values.
//!
//! This module contains the generator's internal representation of field
//! types, independent of how the original declaration expressed them, and
//! the [`Literal`] form of captured default values.

use crate::module::ModulePath;
use std::fmt;

/// Scalar primitive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Boolean value.
    Bool,
    /// Signed integer.
    Int,
    /// Double-precision floating point.
    Float,
    /// Text string.
    Text,
}

impl PrimitiveKind {
    /// Returns the descriptor name used in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Text => "text",
        }
    }
}

/// Temporal kinds, all backed by the target's clock types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemporalKind {
    /// Calendar date.
    Date,
    /// Date and time of day.
    DateTime,
    /// Time of day without a date.
    TimeOfDay,
    /// Elapsed duration.
    Duration,
}

impl TemporalKind {
    /// Returns the descriptor name used in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::TimeOfDay => "time",
            Self::Duration => "duration",
        }
    }
}

/// Container shapes that can appear without type parameters in a source
/// declaration. An unparameterized container is always a resolution error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// Homogeneous sequence.
    List,
    /// Unordered unique collection.
    SetOf,
    /// Tuple.
    Tuple,
    /// Key-value mapping.
    Mapping,
}

impl ContainerKind {
    /// Returns the descriptor name used in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::SetOf => "set",
            Self::Tuple => "tuple",
            Self::Mapping => "mapping",
        }
    }
}

/// Reference to a record or enum declared in some schema module.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    /// Declared name of the referent.
    pub name: String,
    /// Module the referent is declared in.
    pub module: ModulePath,
}

impl TypeRef {
    /// Creates a new type reference.
    #[must_use]
    pub fn new(name: impl Into<String>, module: ModulePath) -> Self {
        Self {
            name: name.into(),
            module,
        }
    }

    /// Returns the fully-qualified C++ name (`ns::Name`).
    #[must_use]
    pub fn qualified_name(&self) -> String {
        let ns = self.module.cpp_namespace();
        if ns.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", ns, self.name)
        }
    }
}

/// The generator's recursive type algebra.
///
/// Every supported field type shape has exactly one constructor case here,
/// so resolution can match exhaustively and adding a new container kind is
/// a compile error everywhere it is unhandled.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    /// Scalar primitive.
    Primitive(PrimitiveKind),
    /// Temporal value.
    Temporal(TemporalKind),
    /// Reference to a declared enum.
    EnumRef(TypeRef),
    /// Reference to a declared record.
    RecordRef(TypeRef),
    /// Optional wrapper around an inner type.
    Optional(Box<TypeDescriptor>),
    /// Tagged union over variants. `Null` among the variants marks the
    /// whole union as optional.
    Union(Vec<TypeDescriptor>),
    /// Homogeneous ordered sequence.
    List(Box<TypeDescriptor>),
    /// Unordered unique collection.
    SetOf(Box<TypeDescriptor>),
    /// Fixed-length tuple. An `Ellipsis` in the second slot makes the tuple
    /// variadic (sequence semantics).
    FixedTuple(Vec<TypeDescriptor>),
    /// Variable-length tuple, represented as a sequence.
    VarTuple(Box<TypeDescriptor>),
    /// Key-value mapping.
    Mapping(Box<TypeDescriptor>, Box<TypeDescriptor>),
    /// The absence marker. Only meaningful as a union variant.
    Null,
    /// The variadic marker. Only meaningful as the second tuple slot.
    Ellipsis,
    /// A container declared without type parameters. Always rejected.
    Unparameterized(ContainerKind),
}

impl TypeDescriptor {
    /// Convenience constructor for an optional type.
    #[must_use]
    pub fn optional(inner: TypeDescriptor) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// Convenience constructor for a list type.
    #[must_use]
    pub fn list_of(inner: TypeDescriptor) -> Self {
        Self::List(Box::new(inner))
    }

    /// Convenience constructor for a set type.
    #[must_use]
    pub fn set_of(inner: TypeDescriptor) -> Self {
        Self::SetOf(Box::new(inner))
    }

    /// Convenience constructor for a variable-length tuple.
    #[must_use]
    pub fn var_tuple_of(inner: TypeDescriptor) -> Self {
        Self::VarTuple(Box::new(inner))
    }

    /// Convenience constructor for a mapping type.
    #[must_use]
    pub fn mapping_of(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        Self::Mapping(Box::new(key), Box::new(value))
    }

    /// Returns true if constructed values should be moved rather than
    /// copied into generated members.
    ///
    /// Small scalar and temporal kinds are copied; everything else
    /// (strings, containers, record and enum references) is moved.
    #[must_use]
    pub fn move_eligible(&self) -> bool {
        !matches!(
            self,
            Self::Primitive(PrimitiveKind::Bool)
                | Self::Primitive(PrimitiveKind::Int)
                | Self::Primitive(PrimitiveKind::Float)
                | Self::Temporal(_)
        )
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => f.write_str(kind.name()),
            Self::Temporal(kind) => f.write_str(kind.name()),
            Self::EnumRef(r) | Self::RecordRef(r) => {
                write!(f, "{}.{}", r.module, r.name)
            }
            Self::Optional(inner) => write!(f, "optional[{inner}]"),
            Self::Union(variants) => {
                f.write_str("union[")?;
                for (i, v) in variants.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            Self::List(inner) => write!(f, "list[{inner}]"),
            Self::SetOf(inner) => write!(f, "set[{inner}]"),
            Self::FixedTuple(variants) => {
                f.write_str("tuple[")?;
                for (i, v) in variants.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            Self::VarTuple(inner) => write!(f, "tuple[{inner}, ...]"),
            Self::Mapping(key, value) => write!(f, "mapping[{key}, {value}]"),
            Self::Null => f.write_str("none"),
            Self::Ellipsis => f.write_str("..."),
            Self::Unparameterized(kind) => write!(f, "bare {}", kind.name()),
        }
    }
}

/// A default value captured from a field declaration.
///
/// `Opaque` carries the textual repr of a runtime value the declaration
/// layer could not represent; literalizing it is always an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Explicit null default (an empty optional).
    Null,
    /// Boolean default.
    Bool(bool),
    /// Integer default.
    Int(i64),
    /// Floating point default.
    Float(f64),
    /// String default.
    Str(String),
    /// Enum member default, qualified by the declaring enum's name.
    EnumMember {
        /// Declaring enum name.
        enum_name: String,
        /// Member name.
        member: String,
    },
    /// Sequence default (list, set or tuple).
    Seq(Vec<Literal>),
    /// Mapping default as ordered key-value pairs.
    Map(Vec<(Literal, Literal)>),
    /// A captured value with no literal representation.
    Opaque(String),
}

impl Literal {
    /// Creates a string literal.
    #[must_use]
    pub fn str(value: impl Into<String>) -> Self {
        Self::Str(value.into())
    }

    /// Creates an enum member literal.
    #[must_use]
    pub fn enum_member(enum_name: impl Into<String>, member: impl Into<String>) -> Self {
        Self::EnumMember {
            enum_name: enum_name.into(),
            member: member.into(),
        }
    }
}
