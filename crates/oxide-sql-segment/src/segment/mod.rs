//! Lowered SQL segments.

mod expr;
mod generic;
mod order;
mod predicate;
mod projection;

pub use expr::{
    CommonExpressionSegment, ExpressionSegment, LiteralExpressionSegment,
    ParameterMarkerExpressionSegment, SubquerySegment,
};
pub use generic::{AliasSegment, ColumnSegment, OwnerSegment, SimpleTableSegment, TableNameSegment};
pub use order::{GroupBySegment, OrderByItemSegment, OrderBySegment};
pub use predicate::{
    LogicalPredicateSegment, PredicateBracketValue, PredicateRightValue, PredicateSegment, Segment,
};
pub use projection::{
    AggregationProjectionSegment, ExpressionProjectionSegment, ProjectionSegment,
    ProjectionsSegment, SelectItem,
};
