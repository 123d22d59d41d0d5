#![allow(dead_code)]

use oxide_sql92::{Error, SyntaxError};
use oxide_sql_segment::segment::{
    ColumnSegment, ExpressionSegment, PredicateSegment, ProjectionSegment, SelectItem,
};
use oxide_sql_segment::{SelectStatement, Segment};

pub fn lower(sql: &str) -> SelectStatement {
    oxide_sql92::lower(sql).unwrap_or_else(|e| panic!("Failed to lower: {sql}\nError: {e:?}"))
}

pub fn lower_err(sql: &str) -> Error {
    oxide_sql92::lower(sql).expect_err(&format!("Expected lowering error for: {sql}"))
}

pub fn syntax_err(sql: &str) -> SyntaxError {
    oxide_sql92::parse_select(sql).expect_err(&format!("Expected syntax error for: {sql}"))
}

/// Returns the lowered WHERE expression.
pub fn lower_where(sql: &str) -> Segment {
    lower(sql)
        .where_segment
        .unwrap_or_else(|| panic!("Expected WHERE clause in: {sql}"))
        .expr
}

pub fn lower_predicate(sql: &str) -> PredicateSegment {
    match lower_where(sql) {
        Segment::Predicate(predicate) => predicate,
        other => panic!("Expected predicate, got {other:?}"),
    }
}

/// Returns the lowered segment of the `index`-th SELECT item.
pub fn lower_item(sql: &str, index: usize) -> Segment {
    match lower(sql).projections.items.into_iter().nth(index) {
        Some(SelectItem::Expression { segment, .. }) => segment,
        other => panic!("Expected expression item, got {other:?}"),
    }
}

pub fn lower_projection(sql: &str, index: usize) -> ProjectionSegment {
    match lower_item(sql, index) {
        Segment::Expression(ExpressionSegment::Projection(projection)) => projection,
        other => panic!("Expected function projection, got {other:?}"),
    }
}

pub fn column_name(column: &ColumnSegment) -> &str {
    &column.identifier.value
}

/// Asserts that a segment is a text capture of exactly `text`, and that
/// its span reproduces that text from `sql`.
pub fn assert_common(sql: &str, segment: &ExpressionSegment, text: &str) {
    let ExpressionSegment::Common(common) = segment else {
        panic!("Expected common expression, got {segment:?}");
    };
    assert_eq!(common.text, text);
    assert_eq!(common.span.slice(sql), text);
}
