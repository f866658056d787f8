//! Error types for TOON encoding, decoding and validation.
//!
//! ## Error Categories
//!
//! - [`EncodeError`]: a value cannot be rendered (unsupported type, or a
//!   structure so deep it is indistinguishable from a cycle)
//! - [`DecodeError`]: input text violates the grammar; every variant carries
//!   a 1-based line number and, where it can be pinned down, a column
//! - [`Diagnostic`]: a non-fatal finding with a line number, used for
//!   lenient-mode warnings and validator reports
//!
//! Encode errors are programmer errors and always surface immediately; the
//! encoder never emits a partial or garbled document. Strict decoding aborts
//! on the first violation. Lenient decoding records deviations as
//! [`Diagnostic`]s and keeps going, hard-failing only when continuation would
//! be ambiguous.
//!
//! ## Examples
//!
//! ```rust
//! use toon_codec::{decode, DecodeError};
//!
//! let err = decode("\tkey: 1").unwrap_err();
//! assert!(matches!(err, DecodeError::Indentation { line: 1, .. }));
//! ```

use std::fmt;
use thiserror::Error;

/// Errors produced while rendering a [`Value`](crate::Value) to text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    /// The value cannot be mapped into the TOON value model, e.g. a
    /// non-finite float or a map with non-string keys.
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// Nesting exceeded the configured depth bound. An owned value tree this
    /// deep almost always comes from a cyclic or heavily shared host object
    /// graph flattened through the serde bridge.
    #[error("cyclic or unboundedly nested structure: depth exceeds {max_depth}")]
    CyclicStructure { max_depth: usize },

    /// Error raised by a `Serialize` implementation during `to_value`.
    #[error("{0}")]
    Message(String),
}

impl EncodeError {
    /// Creates an unsupported type error.
    pub fn unsupported(what: impl fmt::Display) -> Self {
        EncodeError::UnsupportedType(what.to_string())
    }
}

impl serde::ser::Error for EncodeError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        EncodeError::Message(msg.to_string())
    }
}

/// Errors produced while parsing TOON text.
///
/// Lines are 1-based; columns are 1-based and refer to the byte offset on
/// the line where the violation was detected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// Tabs in indentation, or (strict mode) a leading-space run that is not
    /// a whole multiple of the indentation unit.
    #[error("indentation error at line {line}, column {column}: {msg}")]
    Indentation {
        line: usize,
        column: usize,
        msg: String,
    },

    /// A length marker `[N]` that disagrees with the actual element count
    /// (strict mode only; lenient mode warns and uses the actual count).
    #[error("length mismatch at line {line}: marker declares {declared} elements, found {actual}")]
    LengthMismatch {
        line: usize,
        declared: usize,
        actual: usize,
    },

    /// A quoted string with no closing quote. Fatal in both modes, since
    /// everything after it is ambiguous.
    #[error("unterminated quote at line {line}, column {column}")]
    UnterminatedQuote { line: usize, column: usize },

    /// An unreadable array header, or a tabular row whose cell count differs
    /// from the header's column count.
    #[error("malformed array header at line {line}: {msg}")]
    MalformedArrayHeader { line: usize, msg: String },

    /// An unquoted value that matches no literal rule, e.g. a case variant
    /// of `true`/`false`/`null` (strict mode only; lenient mode warns and
    /// takes the intended reading).
    #[error("ambiguous literal at line {line}, column {column}: {token:?}")]
    AmbiguousLiteral {
        line: usize,
        column: usize,
        token: String,
    },

    /// Nesting went past the configured bound.
    #[error("maximum nesting depth {max_depth} exceeded at line {line}")]
    MaxDepthExceeded { line: usize, max_depth: usize },

    /// Error raised by a `Deserialize` implementation during `from_value`.
    #[error("{0}")]
    Message(String),
}

impl DecodeError {
    pub fn indentation(line: usize, column: usize, msg: impl fmt::Display) -> Self {
        DecodeError::Indentation {
            line,
            column,
            msg: msg.to_string(),
        }
    }

    pub fn length_mismatch(line: usize, declared: usize, actual: usize) -> Self {
        DecodeError::LengthMismatch {
            line,
            declared,
            actual,
        }
    }

    pub fn unterminated_quote(line: usize, column: usize) -> Self {
        DecodeError::UnterminatedQuote { line, column }
    }

    pub fn malformed_header(line: usize, msg: impl fmt::Display) -> Self {
        DecodeError::MalformedArrayHeader {
            line,
            msg: msg.to_string(),
        }
    }

    pub fn ambiguous_literal(line: usize, column: usize, token: impl Into<String>) -> Self {
        DecodeError::AmbiguousLiteral {
            line,
            column,
            token: token.into(),
        }
    }

    pub fn max_depth(line: usize, max_depth: usize) -> Self {
        DecodeError::MaxDepthExceeded { line, max_depth }
    }

    /// The line the error points at, where one applies.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            DecodeError::Indentation { line, .. }
            | DecodeError::LengthMismatch { line, .. }
            | DecodeError::UnterminatedQuote { line, .. }
            | DecodeError::MalformedArrayHeader { line, .. }
            | DecodeError::AmbiguousLiteral { line, .. }
            | DecodeError::MaxDepthExceeded { line, .. } => Some(*line),
            DecodeError::Message(_) => None,
        }
    }
}

impl serde::de::Error for DecodeError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        DecodeError::Message(msg.to_string())
    }
}

/// A non-fatal finding: a grammar deviation tolerated by lenient decoding,
/// or a validator error/warning.
///
/// Carries the 1-based line it refers to and a human-readable message, so
/// callers running lenient mode in production can record how often input
/// deviates from the ideal grammar.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub line: usize,
    pub message: String,
}

impl Diagnostic {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Diagnostic {
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::length_mismatch(3, 2, 5);
        assert_eq!(
            err.to_string(),
            "length mismatch at line 3: marker declares 2 elements, found 5"
        );
        assert_eq!(err.line(), Some(3));

        let err = DecodeError::indentation(7, 1, "tab character in indentation");
        assert!(err.to_string().contains("line 7"));
    }

    #[test]
    fn test_encode_error_display() {
        let err = EncodeError::unsupported("non-finite float NaN");
        assert_eq!(err.to_string(), "unsupported type: non-finite float NaN");

        let err = EncodeError::CyclicStructure { max_depth: 64 };
        assert!(err.to_string().contains("64"));
    }

    #[test]
    fn test_diagnostic_display() {
        let d = Diagnostic::new(12, "marker declares 3 rows, found 2");
        assert_eq!(d.to_string(), "line 12: marker declares 3 rows, found 2");
    }
}
