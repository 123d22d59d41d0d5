//! Syntax error types.

use oxide_sql_segment::Span;

use crate::lexer::TokenKind;

/// A syntax error raised while building the grammar tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at position {span}")]
pub struct SyntaxError {
    /// The error message.
    pub message: String,
    /// The location of the error.
    pub span: Span,
    /// Expected tokens (if applicable).
    pub expected: Option<String>,
    /// The actual token found.
    pub found: Option<TokenKind>,
}

impl SyntaxError {
    /// Creates a new syntax error.
    #[must_use]
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            expected: None,
            found: None,
        }
    }

    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: TokenKind, span: Span) -> Self {
        let expected: String = expected.into();
        Self {
            message: format!("Unexpected token: expected {expected}, found {found:?}"),
            span,
            expected: Some(expected),
            found: Some(found),
        }
    }

    /// Creates an "unexpected end of input" error.
    #[must_use]
    pub fn unexpected_eof(expected: impl Into<String>, span: Span) -> Self {
        let expected: String = expected.into();
        Self {
            message: format!("Unexpected end of input: expected {expected}"),
            span,
            expected: Some(expected),
            found: Some(TokenKind::Eof),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_message() {
        let err = SyntaxError::unexpected("FROM", TokenKind::Comma, Span::new(9, 9));
        assert_eq!(
            err.to_string(),
            "Unexpected token: expected FROM, found Comma at position 9..=9"
        );
        assert_eq!(err.expected.as_deref(), Some("FROM"));
    }

    #[test]
    fn test_unexpected_eof() {
        let err = SyntaxError::unexpected_eof("expression", Span::new(6, 6));
        assert_eq!(err.found, Some(TokenKind::Eof));
        assert!(err.to_string().starts_with("Unexpected end of input"));
    }
}
