//! Tests for aggregate, special and regular function classification.

mod common;
use common::*;

use oxide_sql_segment::segment::ProjectionSegment;
use oxide_sql_segment::AggregationType;

#[test]
fn count_distinct() {
    let sql = "SELECT COUNT(DISTINCT x) FROM t";
    let ProjectionSegment::Aggregation(aggregation) = lower_projection(sql, 0) else {
        panic!("Expected aggregation");
    };
    assert_eq!(aggregation.aggregation_type, AggregationType::Count);
    assert_eq!(aggregation.inner_expression_start, 12);
    assert_eq!(aggregation.distinct_expression.as_deref(), Some("x"));
    assert!(aggregation.is_distinct());
    assert_eq!(aggregation.inner_expression(sql), "(DISTINCT x)");
    assert_eq!(aggregation.span.slice(sql), "COUNT(DISTINCT x)");
}

#[test]
fn distinct_over_several_arguments_concatenates_children() {
    let sql = "SELECT COUNT(DISTINCT a, b) FROM t";
    let ProjectionSegment::Aggregation(aggregation) = lower_projection(sql, 0) else {
        panic!("Expected aggregation");
    };
    assert_eq!(aggregation.distinct_expression.as_deref(), Some("a,b"));
}

#[test]
fn count_star() {
    let sql = "SELECT COUNT(*) FROM t";
    let ProjectionSegment::Aggregation(aggregation) = lower_projection(sql, 0) else {
        panic!("Expected aggregation");
    };
    assert_eq!(aggregation.aggregation_type, AggregationType::Count);
    assert!(!aggregation.is_distinct());
    assert_eq!(aggregation.inner_expression(sql), "(*)");
}

#[test]
fn aggregate_names_are_case_insensitive() {
    for (sql, expected) in [
        ("SELECT sum(a) FROM t", AggregationType::Sum),
        ("SELECT Avg(a) FROM t", AggregationType::Avg),
        ("SELECT max(a) FROM t", AggregationType::Max),
        ("SELECT MIN(a) FROM t", AggregationType::Min),
        ("SELECT bit_xor(a) FROM t", AggregationType::BitXor),
        ("SELECT STDDEV(a) FROM t", AggregationType::Stddev),
        ("SELECT variance(a) FROM t", AggregationType::Variance),
    ] {
        let ProjectionSegment::Aggregation(aggregation) = lower_projection(sql, 0) else {
            panic!("Expected aggregation for {sql}");
        };
        assert_eq!(aggregation.aggregation_type, expected);
    }
}

#[test]
fn inner_expression_starts_at_paren_after_spaces() {
    let sql = "SELECT SUM (price) FROM t";
    let ProjectionSegment::Aggregation(aggregation) = lower_projection(sql, 0) else {
        panic!("Expected aggregation");
    };
    assert_eq!(aggregation.inner_expression_start, 11);
    assert_eq!(aggregation.inner_expression(sql), "(price)");
}

#[test]
fn unrecognised_aggregate_is_expression() {
    let sql = "SELECT every(a > 1) FROM t";
    let ProjectionSegment::Expression(projection) = lower_projection(sql, 0) else {
        panic!("Expected expression projection");
    };
    assert_eq!(projection.text, "every(a > 1)");
}

#[test]
fn cast_is_expression() {
    let sql = "SELECT CAST(a AS DECIMAL(10, 2)) FROM t";
    let ProjectionSegment::Expression(projection) = lower_projection(sql, 0) else {
        panic!("Expected expression projection");
    };
    assert_eq!(projection.text, "CAST(a AS DECIMAL(10, 2))");
    assert_eq!(projection.span.slice(sql), projection.text);
}

#[test]
fn special_functions_are_expressions() {
    for (sql, text) in [
        ("SELECT SUBSTRING(name FROM 1 FOR 3) FROM t", "SUBSTRING(name FROM 1 FOR 3)"),
        ("SELECT SUBSTRING(name, 1) FROM t", "SUBSTRING(name, 1)"),
        ("SELECT EXTRACT(YEAR FROM created) FROM t", "EXTRACT(YEAR FROM created)"),
        ("SELECT TRIM(LEADING 'x' FROM name) FROM t", "TRIM(LEADING 'x' FROM name)"),
    ] {
        let ProjectionSegment::Expression(projection) = lower_projection(sql, 0) else {
            panic!("Expected expression projection for {sql}");
        };
        assert_eq!(projection.text, text);
    }
}

#[test]
fn regular_function_is_expression() {
    let sql = "SELECT concat(first, ' ', last) AS full_name FROM t";
    let ProjectionSegment::Expression(projection) = lower_projection(sql, 0) else {
        panic!("Expected expression projection");
    };
    assert_eq!(projection.text, "concat(first, ' ', last)");
}

#[test]
fn regular_function_with_star_and_no_arguments() {
    for (sql, text) in [
        ("SELECT now() FROM t", "now()"),
        ("SELECT f(*) FROM t", "f(*)"),
    ] {
        let ProjectionSegment::Expression(projection) = lower_projection(sql, 0) else {
            panic!("Expected expression projection for {sql}");
        };
        assert_eq!(projection.text, text);
    }
}

#[test]
fn aggregate_in_having_is_kept_as_left_side() {
    let sql = "SELECT a, COUNT(*) FROM t GROUP BY a HAVING COUNT(*) > 1";
    let statement = lower(sql);
    let Some(having) = statement.having else {
        panic!("Expected HAVING clause");
    };
    assert_eq!(having.span.slice(sql), "HAVING COUNT(*) > 1");
    let oxide_sql_segment::Segment::Expression(
        oxide_sql_segment::ExpressionSegment::Projection(ProjectionSegment::Aggregation(
            aggregation,
        )),
    ) = having.expr
    else {
        panic!("Expected aggregation");
    };
    assert_eq!(aggregation.span.slice(sql), "COUNT(*)");
}
