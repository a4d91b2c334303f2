//! Error types for parsing, narrowing, and indexing JSON values.

use crate::value::Kind;
use thiserror::Error;

/// Errors that can occur while parsing text or reading a [`Value`](crate::Value).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JsonError {
    /// The input was not valid JSON: unexpected character, premature end of
    /// input, malformed number, or invalid UTF-8.
    /// `offset` is the byte offset where the error was detected.
    #[error("syntax error at byte {offset}: {message}")]
    Syntax { offset: usize, message: String },

    /// A numeric literal does not fit the variant its grammar selected.
    #[error("range error at byte {offset}: {message}")]
    Range { offset: usize, message: String },

    /// A narrowing accessor was called on a value of a different kind.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: Kind, found: Kind },

    /// An argument was outside the domain of the operation (negative index).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Containers were nested deeper than the parser's configured limit.
    #[error("nesting depth exceeds {limit} at byte {offset}")]
    DepthLimit { offset: usize, limit: usize },
}

impl JsonError {
    pub(crate) fn syntax(offset: usize, message: impl Into<String>) -> Self {
        JsonError::Syntax {
            offset,
            message: message.into(),
        }
    }

    pub(crate) fn range(offset: usize, message: impl Into<String>) -> Self {
        JsonError::Range {
            offset,
            message: message.into(),
        }
    }

    pub(crate) fn mismatch(expected: Kind, found: Kind) -> Self {
        JsonError::TypeMismatch { expected, found }
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, JsonError::Syntax { .. })
    }

    pub fn is_range(&self) -> bool {
        matches!(self, JsonError::Range { .. })
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, JsonError::TypeMismatch { .. })
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, JsonError::InvalidArgument(_))
    }

    /// Byte offset into the parsed input, for errors raised by the parser.
    pub fn offset(&self) -> Option<usize> {
        match self {
            JsonError::Syntax { offset, .. }
            | JsonError::Range { offset, .. }
            | JsonError::DepthLimit { offset, .. } => Some(*offset),
            JsonError::TypeMismatch { .. } | JsonError::InvalidArgument(_) => None,
        }
    }
}

/// Convenience alias used throughout dynjson.
pub type Result<T> = std::result::Result<T, JsonError>;
