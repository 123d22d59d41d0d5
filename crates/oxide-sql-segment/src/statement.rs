//! The lowered SELECT statement.

use serde::Serialize;

use crate::segment::{
    GroupBySegment, OrderBySegment, ProjectionsSegment, Segment, SimpleTableSegment,
};
use crate::span::Span;

/// A WHERE clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WhereSegment {
    pub span: Span,
    pub expr: Segment,
}

/// A HAVING clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HavingSegment {
    pub span: Span,
    pub expr: Segment,
}

/// A lowered SELECT, either top-level or nested in a subquery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectStatement {
    pub span: Span,
    pub projections: ProjectionsSegment,
    pub tables: Vec<SimpleTableSegment>,
    pub where_segment: Option<WhereSegment>,
    pub group_by: Option<GroupBySegment>,
    pub having: Option<HavingSegment>,
    pub order_by: Option<OrderBySegment>,
    /// Number of parameter markers seen in the statement walk so far.
    ///
    /// For a top-level statement this is the total marker count.
    pub parameters_count: usize,
}
