//! Error types for schema declarations.

use thiserror::Error;

/// Error type for schema declaration and lookup operations.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The requested schema module is not registered.
    #[error("schema module '{module}' not found")]
    MissingModule {
        /// Dotted module path.
        module: String,
    },

    /// A module with the same path was already registered.
    #[error("duplicate schema module '{module}'")]
    DuplicateModule {
        /// Dotted module path.
        module: String,
    },

    /// A declaration failed validation.
    #[error("invalid declaration: {message}")]
    Validation {
        /// Error message.
        message: String,
    },
}

impl SchemaError {
    /// Creates a validation error with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
