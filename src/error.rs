//! Error types for TOML reading and writing.
//!
//! This module provides error reporting with positional context: every failure
//! raised while parsing carries the 1-based line (and column) at which the
//! reader gave up.
//!
//! ## Error Categories
//!
//! - **Lexical/Syntactic**: malformed TOML text, with line/column information
//! - **Semantic**: duplicate keys, mixed array element types, scalar text that
//!   matches none of the integer/float/date grammars
//! - **Writer**: values that cannot be represented in TOML output
//! - **I/O**: reading/writing failures at the stream boundary
//!
//! A single error aborts the whole call: the reader never returns a partial
//! tree and the writer never returns a partial document.
//!
//! ## Examples
//!
//! ```rust
//! use tomlio::{parse, Error};
//!
//! let result = parse("x = 1\nx = 2");
//! match result {
//!     Err(Error::DuplicateKey { line, key }) => {
//!         assert_eq!(line, 2);
//!         assert_eq!(key, "x");
//!     }
//!     other => panic!("expected a duplicate-key error, got {:?}", other),
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while reading or writing TOML.
///
/// Parsing errors carry the 1-based line number at which they were raised.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Malformed TOML text
    #[error("syntax error at line {line}, column {col}: {msg}")]
    Syntax {
        line: usize,
        col: usize,
        msg: String,
    },

    /// The input ended in the middle of a construct
    #[error("unexpected end of input at line {line}: expected {expected}")]
    UnexpectedEof { line: usize, expected: String },

    /// The same key was defined twice in one table
    #[error("duplicate key '{key}' at line {line}")]
    DuplicateKey { line: usize, key: String },

    /// An array element does not have the same type as the first element
    #[error("mixed array at line {line}: expected {expected}, found {found}")]
    MixedArray {
        line: usize,
        expected: &'static str,
        found: &'static str,
    },

    /// Scalar text that is neither an integer, a float nor a date
    #[error("invalid value at line {line}: '{text}'")]
    InvalidValue { line: usize, text: String },

    /// A value that cannot be represented in TOML output
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates a syntax error with line and column information.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlio::Error;
    ///
    /// let err = Error::syntax(10, 5, "unexpected token");
    /// assert!(err.to_string().contains("line 10"));
    /// ```
    pub fn syntax(line: usize, col: usize, msg: impl Into<String>) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.into(),
        }
    }

    /// Creates an unexpected end-of-input error.
    pub fn unexpected_eof(line: usize, expected: impl Into<String>) -> Self {
        Error::UnexpectedEof {
            line,
            expected: expected.into(),
        }
    }

    /// Creates a duplicate-key error for a key defined twice in one table.
    pub fn duplicate_key(line: usize, key: impl Into<String>) -> Self {
        Error::DuplicateKey {
            line,
            key: key.into(),
        }
    }

    /// Creates a mixed-array error for a heterogeneous array element.
    pub fn mixed_array(line: usize, expected: &'static str, found: &'static str) -> Self {
        Error::MixedArray {
            line,
            expected,
            found,
        }
    }

    /// Creates an invalid-value error for scalar text that matches none of the
    /// integer, float and date grammars.
    pub fn invalid_value(line: usize, text: impl Into<String>) -> Self {
        Error::InvalidValue {
            line,
            text: text.into(),
        }
    }

    /// Creates an unsupported-type error for values that cannot be written as TOML.
    pub fn unsupported_type(msg: impl Into<String>) -> Self {
        Error::UnsupportedType(msg.into())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlio::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for stream reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the 1-based line number attached to this error, if any.
    ///
    /// Writer-side and I/O errors have no position.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Syntax { line, .. }
            | Error::UnexpectedEof { line, .. }
            | Error::DuplicateKey { line, .. }
            | Error::MixedArray { line, .. }
            | Error::InvalidValue { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
