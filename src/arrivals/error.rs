//! Error types for feed parsing.

use thiserror::Error;

/// Structural problems with a feed document.
///
/// An absent station or an empty arrival list is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Top-level value is not a JSON object
    #[error("feed document is not an object")]
    NotAnObject,

    /// Required top-level field is missing
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Field has the wrong JSON type
    #[error("field '{field}' must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
}
