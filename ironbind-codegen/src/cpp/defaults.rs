//! Default value literalization.
//!
//! Converts captured default values into C++ literal expressions for
//! constructor parameter defaults and binding argument defaults.

use crate::error::CodegenError;
use ironbind_schema::Literal;

/// Literalizes an optional captured default.
///
/// Absence of a default yields `Ok(None)`; an explicit null default
/// yields the empty-optional literal.
///
/// # Errors
/// Returns `CodegenError::UnsupportedDefault` if the captured value has
/// no literal representation.
pub fn default_literal(default: Option<&Literal>) -> Result<Option<String>, CodegenError> {
    default.map(literal_text).transpose()
}

/// Literalizes one captured value.
///
/// String literals carry surrounding quotes only; embedded quotes are
/// not escaped.
///
/// # Errors
/// Returns `CodegenError::UnsupportedDefault` for opaque captured values.
pub fn literal_text(value: &Literal) -> Result<String, CodegenError> {
    match value {
        Literal::Null => Ok("std::nullopt".to_string()),
        Literal::Bool(true) => Ok("true".to_string()),
        Literal::Bool(false) => Ok("false".to_string()),
        Literal::Int(v) => Ok(v.to_string()),
        Literal::Float(v) => Ok(v.to_string()),
        Literal::Str(s) => Ok(format!("\"{s}\"")),
        Literal::EnumMember { enum_name, member } => Ok(format!("{enum_name}::{member}")),
        Literal::Seq(items) => {
            let parts = items
                .iter()
                .map(literal_text)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(format!("{{{}}}", parts.join(", ")))
        }
        Literal::Map(pairs) => {
            let parts = pairs
                .iter()
                .map(|(key, value)| {
                    Ok(format!("{{{}, {}}}", literal_text(key)?, literal_text(value)?))
                })
                .collect::<Result<Vec<_>, CodegenError>>()?;
            Ok(format!("{{{}}}", parts.join(", ")))
        }
        Literal::Opaque(repr) => Err(CodegenError::unsupported_default(repr.clone())),
    }
}
