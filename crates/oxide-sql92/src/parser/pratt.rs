//! Binding powers for the two operator-precedence levels of the grammar.
//!
//! The logical level (`expr`) joins boolean primaries; the bit level
//! (`bitExpr`) joins simple expressions. Comparisons and predicates sit
//! between the two and are parsed by recursive descent.

use crate::lexer::{Keyword, TokenKind};

/// Prefix binding power of `NOT` / `!` at the logical level.
pub const NOT_BINDING_POWER: u8 = 7;

/// Returns the infix binding power of a logical connective.
///
/// Returns `(left_bp, right_bp)`; all connectives are left associative.
#[must_use]
pub const fn logical_binding_power(kind: &TokenKind) -> Option<(u8, u8)> {
    match kind {
        TokenKind::Keyword(Keyword::Or) | TokenKind::DoublePipe => Some((1, 2)),
        TokenKind::Keyword(Keyword::Xor) => Some((3, 4)),
        TokenKind::Keyword(Keyword::And) | TokenKind::DoubleAmpersand => Some((5, 6)),
        _ => None,
    }
}

/// Returns the infix binding power of a bit-expression operator.
#[must_use]
pub const fn bit_binding_power(kind: &TokenKind) -> Option<(u8, u8)> {
    match kind {
        TokenKind::BitOr => Some((1, 2)),
        TokenKind::BitAnd => Some((3, 4)),
        TokenKind::LeftShift | TokenKind::RightShift => Some((5, 6)),
        TokenKind::Plus | TokenKind::Minus => Some((7, 8)),
        TokenKind::Star
        | TokenKind::Slash
        | TokenKind::Percent
        | TokenKind::Keyword(Keyword::Div | Keyword::Mod) => Some((9, 10)),
        TokenKind::Caret => Some((11, 12)),
        _ => None,
    }
}

/// Returns true for `comparisonOperator` tokens and `<=>`.
#[must_use]
pub const fn is_comparison_operator(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Eq
            | TokenKind::NotEq
            | TokenKind::Lt
            | TokenKind::LtEq
            | TokenKind::Gt
            | TokenKind::GtEq
            | TokenKind::SafeEq
    )
}

/// Returns true for tokens that start a unary `simpleExpr`.
#[must_use]
pub const fn is_unary_operator(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Tilde
            | TokenKind::Bang
            | TokenKind::Keyword(Keyword::Not)
    )
}
