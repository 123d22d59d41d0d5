//! Expression segments.

use serde::Serialize;

use super::generic::ColumnSegment;
use super::projection::ProjectionSegment;
use crate::span::Span;
use crate::statement::SelectStatement;
use crate::value::LiteralValue;

/// A scalar literal re-tagged as an expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiteralExpressionSegment {
    pub span: Span,
    pub value: LiteralValue,
}

/// A `?` marker used as an expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterMarkerExpressionSegment {
    pub span: Span,
    /// Zero-based ordinal among all markers of the statement.
    pub index: usize,
}

/// A subtree kept as verbatim source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommonExpressionSegment {
    pub span: Span,
    /// Exactly the source text covered by `span`.
    pub text: String,
}

/// A nested, fully lowered SELECT.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubquerySegment {
    pub span: Span,
    pub select: Box<SelectStatement>,
}

/// An expression-level segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ExpressionSegment {
    Literal(LiteralExpressionSegment),
    ParameterMarker(ParameterMarkerExpressionSegment),
    Column(ColumnSegment),
    Common(CommonExpressionSegment),
    Subquery(SubquerySegment),
    Projection(ProjectionSegment),
}

impl ExpressionSegment {
    /// Returns the source span of the expression.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Literal(literal) => literal.span,
            Self::ParameterMarker(marker) => marker.span,
            Self::Column(column) => column.span,
            Self::Common(common) => common.span,
            Self::Subquery(subquery) => subquery.span,
            Self::Projection(projection) => projection.span(),
        }
    }
}
