//! Predicates and the lowered-expression root type.

use serde::Serialize;

use super::expr::{CommonExpressionSegment, ExpressionSegment};
use super::generic::ColumnSegment;
use crate::constant::LogicalOperator;
use crate::span::Span;

/// Positions of the parentheses around an IN candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PredicateBracketValue {
    pub left: Span,
    pub right: Span,
}

/// The value side of a predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PredicateRightValue {
    /// `column <op> expr`
    Compare {
        operator: String,
        expr: ExpressionSegment,
    },
    /// `column IN (a, b, ...)` or `column IN (SELECT ...)`
    In {
        bracket: PredicateBracketValue,
        candidates: Vec<ExpressionSegment>,
    },
    /// `column BETWEEN lower AND upper`
    Between {
        lower: ExpressionSegment,
        upper: ExpressionSegment,
    },
    /// `column <op> other_column`
    Column(ColumnSegment),
}

/// A predicate on a single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredicateSegment {
    pub span: Span,
    pub column: ColumnSegment,
    pub right_value: PredicateRightValue,
}

/// Lowered expressions joined by one boolean connective, left to right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogicalPredicateSegment {
    pub span: Span,
    pub operator: LogicalOperator,
    pub predicates: Vec<Segment>,
}

/// The result of lowering any expression-level grammar node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Segment {
    Expression(ExpressionSegment),
    Predicate(PredicateSegment),
    Logical(LogicalPredicateSegment),
}

impl Segment {
    /// Returns the source span of the segment.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Expression(expression) => expression.span(),
            Self::Predicate(predicate) => predicate.span,
            Self::Logical(logical) => logical.span,
        }
    }

    /// Returns the column when this segment is a bare column reference.
    #[must_use]
    pub const fn as_column(&self) -> Option<&ColumnSegment> {
        match self {
            Self::Expression(ExpressionSegment::Column(column)) => Some(column),
            _ => None,
        }
    }

    /// Merges `right` into `self` with a boolean connective.
    ///
    /// A left side that is already a chain for the same operator is
    /// extended, so `a AND b AND c` yields one chain of three.
    #[must_use]
    pub fn merge(self, operator: LogicalOperator, right: Self, span: Span) -> Self {
        let mut predicates = match self {
            Self::Logical(left) if left.operator == operator => left.predicates,
            other => vec![other],
        };
        predicates.push(right);
        Self::Logical(LogicalPredicateSegment {
            span,
            operator,
            predicates,
        })
    }

    /// Converts the segment into an expression, degrading predicates to
    /// their source text.
    #[must_use]
    pub fn into_expression(self, source: &str) -> ExpressionSegment {
        match self {
            Self::Expression(expression) => expression,
            other => {
                let span = other.span();
                ExpressionSegment::Common(CommonExpressionSegment {
                    span,
                    text: span.slice(source).to_string(),
                })
            }
        }
    }
}

impl From<ExpressionSegment> for Segment {
    fn from(expression: ExpressionSegment) -> Self {
        Self::Expression(expression)
    }
}
