//! Fatal generation errors and recoverable per-field diagnostics.
//!
//! Fatal errors abort the run before any class is produced. Diagnostics are
//! recorded on the generator and the affected field is skipped or nulled;
//! generation of the remaining shapes continues.

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    /// The input did not parse as JSON; `path` points at the offending token.
    #[error("malformed JSON at {path}: {message}")]
    MalformedJson { path: String, message: String },

    /// The document root must be an object or an array.
    #[error("unsupported top-level JSON value: expected object or array, found {found}")]
    UnsupportedRoot { found: &'static str },

    #[error("invalid namespace: {0}")]
    InvalidNamespace(String),

    #[error("empty input")]
    EmptyInput,
}

pub type Result<T> = std::result::Result<T, GenerateError>;

/// One recoverable inference defect. The run keeps going; the caller decides
/// whether to surface these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Raw key is not a valid identifier; the field was dropped.
    InvalidFieldName { class: String, key: String },
    /// A merged-array field was observed with more than one value kind; its
    /// type is left unresolved (nullable/unknown).
    AmbiguousField { key: String, kinds: Vec<&'static str> },
    /// Array elements could not be merged into one shape; the field fell
    /// back to an opaque untyped array.
    OpaqueArray { key: String },
    /// A non-object element inside an array of objects was left out of the
    /// merged shape.
    UnmergeableElement { key: String, found: &'static str },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::InvalidFieldName { class, key } => {
                write!(f, "{class}: skipped field with invalid name `{key}`")
            }
            Diagnostic::AmbiguousField { key, kinds } => {
                write!(f, "`{key}`: ambiguous element type ({}), left unresolved", kinds.join(", "))
            }
            Diagnostic::OpaqueArray { key } => {
                write!(f, "`{key}`: array elements cannot be merged, falling back to untyped array")
            }
            Diagnostic::UnmergeableElement { key, found } => {
                write!(f, "`{key}`: skipped {found} element while merging array of objects")
            }
        }
    }
}
