// Copyright 2025 Pgscribe Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for pgscribe
//!
//! All fallible operations in the crate return [`Result`]. Parsing failures
//! surface as [`Error::Syntax`] carrying the source position of the first
//! offending token; everything else is programmatic misuse or an internal
//! invariant violation.

use crate::parser::token::Position;
use thiserror::Error;

/// Result type alias for pgscribe operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The lexer or parser could not match a required production
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// Programmatic misuse: wrong node kind for a typed list, string
    /// assignment without an attached parser, index out of range
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A walker was asked to handle a node it does not support
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// Internal invariant violation
    #[error("internal error: {0}")]
    Internal(String),
}

/// A syntax error with source position
///
/// `expected` and `got` are filled in when the parser knows what token it
/// was looking for; lexer errors usually carry only a message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at {position}")]
pub struct SyntaxError {
    /// Human-readable description
    pub message: String,
    /// Position of the first offending character or token
    pub position: Position,
    /// What the parser required at this point, if known
    pub expected: Option<String>,
    /// What was actually found, if known
    pub got: Option<String>,
}

impl SyntaxError {
    /// Create a syntax error with only a message
    pub fn new(message: impl Into<String>, position: Position) -> Self {
        Self {
            message: message.into(),
            position,
            expected: None,
            got: None,
        }
    }

    /// Create a syntax error from an expectation mismatch
    pub fn expected(
        expected: impl Into<String>,
        got: impl Into<String>,
        position: Position,
    ) -> Self {
        let expected = expected.into();
        let got = got.into();
        Self {
            message: format!("expected {}, got {}", expected, got),
            position,
            expected: Some(expected),
            got: Some(got),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_display() {
        let err = SyntaxError::new("unterminated string literal", Position::new(10, 1, 11));
        assert_eq!(
            err.to_string(),
            "unterminated string literal at line 1, column 11"
        );
    }

    #[test]
    fn test_expected_error() {
        let err = SyntaxError::expected("')'", "FROM", Position::new(7, 1, 8));
        assert_eq!(err.expected.as_deref(), Some("')'"));
        assert_eq!(err.got.as_deref(), Some("FROM"));
        assert!(err.to_string().contains("expected ')', got FROM"));
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = SyntaxError::new("bad token", Position::default()).into();
        assert!(matches!(err, Error::Syntax(_)));
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = Error::InvalidArgument("list has no parser attached".to_string());
        assert_eq!(
            err.to_string(),
            "invalid argument: list has no parser attached"
        );
    }
}
