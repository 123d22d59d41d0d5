//! Function-call projections and SELECT items.

use serde::Serialize;

use super::generic::{AliasSegment, OwnerSegment};
use super::predicate::Segment;
use crate::constant::AggregationType;
use crate::span::Span;

/// A recognised aggregate call such as `COUNT(DISTINCT x)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregationProjectionSegment {
    pub span: Span,
    pub aggregation_type: AggregationType,
    /// Offset of the opening parenthesis following the function name.
    pub inner_expression_start: usize,
    /// Text between `DISTINCT` and the closing parenthesis, when the call
    /// is distinct-qualified.
    pub distinct_expression: Option<String>,
}

impl AggregationProjectionSegment {
    /// Returns true for `AGG(DISTINCT ...)`.
    #[must_use]
    pub const fn is_distinct(&self) -> bool {
        self.distinct_expression.is_some()
    }

    /// Returns the parenthesised argument text, `(...)`.
    #[must_use]
    pub fn inner_expression<'s>(&self, source: &'s str) -> &'s str {
        Span::new(self.inner_expression_start, self.span.stop).slice(source)
    }
}

/// Any other function call, kept as verbatim text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpressionProjectionSegment {
    pub span: Span,
    pub text: String,
}

/// A function call lowered to a projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ProjectionSegment {
    Aggregation(AggregationProjectionSegment),
    Expression(ExpressionProjectionSegment),
}

impl ProjectionSegment {
    /// Returns the source span of the call.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Aggregation(aggregation) => aggregation.span,
            Self::Expression(expression) => expression.span,
        }
    }
}

/// One item of a SELECT list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SelectItem {
    /// `*` or `owner.*`.
    Shorthand {
        span: Span,
        owner: Option<OwnerSegment>,
    },
    /// Any expression, optionally aliased.
    Expression {
        span: Span,
        segment: Segment,
        alias: Option<AliasSegment>,
    },
}

impl SelectItem {
    /// Returns the span of the item, alias included.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Shorthand { span, .. } | Self::Expression { span, .. } => *span,
        }
    }
}

/// The SELECT list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectionsSegment {
    pub span: Span,
    pub distinct_row: bool,
    pub items: Vec<SelectItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_expression() {
        let sql = "COUNT(DISTINCT x)";
        let aggregation = AggregationProjectionSegment {
            span: Span::new(0, 16),
            aggregation_type: AggregationType::Count,
            inner_expression_start: 5,
            distinct_expression: Some(String::from("x")),
        };
        assert!(aggregation.is_distinct());
        assert_eq!(aggregation.inner_expression(sql), "(DISTINCT x)");
    }
}
