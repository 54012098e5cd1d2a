//! Error types for code generation.

use ironbind_schema::{SchemaError, TypeDescriptor};
use thiserror::Error;

/// Error type for code generation operations.
///
/// Generation is fail-fast: the first error aborts the whole module and
/// no output files are written.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema declaration or lookup error.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// IO error while writing artifacts.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No C++ mapping exists for a type descriptor.
    #[error("unsupported type '{descriptor}'")]
    UnsupportedType {
        /// Display form of the offending descriptor.
        descriptor: String,
    },

    /// A captured default value has no literal representation.
    #[error("unsupported default value '{value}'")]
    UnsupportedDefault {
        /// Display form of the offending value.
        value: String,
    },

    /// An error attributed to a specific record field.
    #[error("field '{field}' of record '{record}': {source}")]
    Field {
        /// Record name.
        record: String,
        /// Field name.
        field: String,
        /// The originating error.
        #[source]
        source: Box<CodegenError>,
    },
}

impl CodegenError {
    /// Creates an unsupported-type error naming the descriptor.
    #[must_use]
    pub fn unsupported_type(descriptor: &TypeDescriptor) -> Self {
        Self::UnsupportedType {
            descriptor: descriptor.to_string(),
        }
    }

    /// Creates an unsupported-default error naming the captured value.
    pub fn unsupported_default(value: impl Into<String>) -> Self {
        Self::UnsupportedDefault {
            value: value.into(),
        }
    }

    /// Attaches record and field context to this error.
    pub fn in_field(self, record: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Field {
            record: record.into(),
            field: field.into(),
            source: Box::new(self),
        }
    }
}
