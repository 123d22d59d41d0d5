//! ORDER BY and GROUP BY items.

use serde::Serialize;

use super::generic::ColumnSegment;
use crate::constant::OrderDirection;
use crate::span::Span;

/// One ordering item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum OrderByItemSegment {
    /// `ORDER BY col`
    Column {
        column: ColumnSegment,
        direction: OrderDirection,
    },
    /// `ORDER BY 2`
    Index {
        span: Span,
        position: i64,
        direction: OrderDirection,
    },
    /// `ORDER BY a + b`, kept as text.
    Expression {
        span: Span,
        text: String,
        direction: OrderDirection,
    },
}

impl OrderByItemSegment {
    /// Returns the ordering direction.
    #[must_use]
    pub const fn direction(&self) -> OrderDirection {
        match self {
            Self::Column { direction, .. }
            | Self::Index { direction, .. }
            | Self::Expression { direction, .. } => *direction,
        }
    }
}

/// An ORDER BY clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderBySegment {
    pub span: Span,
    pub items: Vec<OrderByItemSegment>,
}

/// A GROUP BY clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupBySegment {
    pub span: Span,
    pub items: Vec<OrderByItemSegment>,
}
