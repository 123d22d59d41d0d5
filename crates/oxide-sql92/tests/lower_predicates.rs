//! Tests for comparison, IN, BETWEEN and logical lowering, and for the
//! shapes that degrade to text.

mod common;
use common::*;

use oxide_sql_segment::segment::{
    ExpressionSegment, LiteralExpressionSegment, ParameterMarkerExpressionSegment,
    PredicateRightValue, ProjectionSegment,
};
use oxide_sql_segment::{LiteralValue, LogicalOperator, Segment, Span};

// ===================================================================
// Comparisons
// ===================================================================

#[test]
fn compare_column_with_number() {
    let sql = "SELECT * FROM t WHERE a > 5";
    let predicate = lower_predicate(sql);
    assert_eq!(column_name(&predicate.column), "a");
    assert_eq!(predicate.span.slice(sql), "a > 5");
    let PredicateRightValue::Compare { operator, expr } = predicate.right_value else {
        panic!("Expected compare right value");
    };
    assert_eq!(operator, ">");
    assert!(matches!(
        expr,
        ExpressionSegment::Literal(LiteralExpressionSegment {
            value: LiteralValue::Number(ref n),
            ..
        }) if n == "5"
    ));
}

#[test]
fn compare_column_with_column() {
    let sql = "SELECT * FROM t WHERE t.a = u.b";
    let predicate = lower_predicate(sql);
    assert_eq!(predicate.column.qualified_name(), "t.a");
    let PredicateRightValue::Column(right) = predicate.right_value else {
        panic!("Expected column right value");
    };
    assert_eq!(right.qualified_name(), "u.b");
    assert_eq!(right.span.slice(sql), "u.b");
}

#[test]
fn compare_with_parameter_marker() {
    let predicate = lower_predicate("SELECT * FROM t WHERE id = ?");
    assert!(matches!(
        predicate.right_value,
        PredicateRightValue::Compare {
            expr: ExpressionSegment::ParameterMarker(ParameterMarkerExpressionSegment {
                index: 0,
                ..
            }),
            ..
        }
    ));
}

#[test]
fn compare_all_operators() {
    for op in ["=", "<>", "!=", "<", ">", "<=", ">=", "<=>"] {
        let sql = format!("SELECT * FROM t WHERE a {op} 1");
        let predicate = lower_predicate(&sql);
        assert!(matches!(
            predicate.right_value,
            PredicateRightValue::Compare { ref operator, .. } if operator == op
        ));
    }
}

#[test]
fn compare_non_column_left_keeps_left_only() {
    let sql = "SELECT * FROM t WHERE f(a) = ?";
    let statement = lower(sql);
    let Some(where_segment) = statement.where_segment else {
        panic!("Expected WHERE clause");
    };
    let Segment::Expression(ExpressionSegment::Projection(ProjectionSegment::Expression(
        projection,
    ))) = where_segment.expr
    else {
        panic!("Expected function projection");
    };
    assert_eq!(projection.text, "f(a)");
    // The discarded right side still consumed its marker.
    assert_eq!(statement.parameters_count, 1);
}

#[test]
fn compare_literal_kinds() {
    let sql = "SELECT * FROM t WHERE a = 'it''s'";
    let PredicateRightValue::Compare { expr, .. } = lower_predicate(sql).right_value else {
        panic!("Expected compare right value");
    };
    let ExpressionSegment::Literal(literal) = expr else {
        panic!("Expected literal");
    };
    assert_eq!(literal.value, LiteralValue::String(String::from("it's")));
    assert_eq!(literal.span.slice(sql), "'it''s'");

    let sql = "SELECT * FROM t WHERE a = TRUE";
    assert!(matches!(
        lower_predicate(sql).right_value,
        PredicateRightValue::Compare {
            expr: ExpressionSegment::Literal(LiteralExpressionSegment {
                value: LiteralValue::Boolean(_),
                ..
            }),
            ..
        }
    ));

    let sql = "SELECT * FROM t WHERE a = -5";
    assert!(matches!(
        lower_predicate(sql).right_value,
        PredicateRightValue::Compare {
            expr: ExpressionSegment::Literal(LiteralExpressionSegment {
                value: LiteralValue::Number(ref n),
                ..
            }),
            ..
        } if n == "-5"
    ));
}

#[test]
fn compare_with_unhandled_literal_is_text() {
    for (sql, text) in [
        ("SELECT * FROM t WHERE a = NULL", "NULL"),
        ("SELECT * FROM t WHERE a = X'1F'", "X'1F'"),
        ("SELECT * FROM t WHERE a = B'01'", "B'01'"),
    ] {
        let PredicateRightValue::Compare { expr, .. } = lower_predicate(sql).right_value else {
            panic!("Expected compare right value");
        };
        assert_common(sql, &expr, text);
    }
}

#[test]
fn compare_with_arithmetic_is_text() {
    let sql = "SELECT * FROM t WHERE a = b + 1";
    let PredicateRightValue::Compare { expr, .. } = lower_predicate(sql).right_value else {
        panic!("Expected compare right value");
    };
    assert_common(sql, &expr, "b + 1");
}

// ===================================================================
// IN
// ===================================================================

#[test]
fn in_list() {
    let sql = "SELECT * FROM t WHERE a IN (1, 2, 3)";
    let predicate = lower_predicate(sql);
    assert_eq!(predicate.span.slice(sql), "a IN (1, 2, 3)");
    let PredicateRightValue::In {
        bracket,
        candidates,
    } = predicate.right_value
    else {
        panic!("Expected IN right value");
    };
    assert_eq!(bracket.left.slice(sql), "(");
    assert_eq!(bracket.right.slice(sql), ")");
    assert_eq!(bracket.left, Span::new(27, 27));
    assert_eq!(bracket.right, Span::new(35, 35));
    let values: Vec<_> = candidates
        .iter()
        .map(|candidate| match candidate {
            ExpressionSegment::Literal(literal) => literal.value.clone(),
            other => panic!("Expected literal, got {other:?}"),
        })
        .collect();
    assert_eq!(
        values,
        ["1", "2", "3"].map(|n| LiteralValue::Number(String::from(n)))
    );
}

#[test]
fn in_subquery() {
    let sql = "SELECT * FROM t WHERE a IN (SELECT b FROM u)";
    let PredicateRightValue::In {
        bracket,
        candidates,
    } = lower_predicate(sql).right_value
    else {
        panic!("Expected IN right value");
    };
    assert_eq!(Span::new(bracket.left.start, bracket.right.stop).slice(sql), "(SELECT b FROM u)");
    let [ExpressionSegment::Subquery(subquery)] = candidates.as_slice() else {
        panic!("Expected one subquery candidate");
    };
    assert_eq!(subquery.span.slice(sql), "(SELECT b FROM u)");
    assert_eq!(subquery.select.tables[0].table_name.identifier.value, "u");
}

#[test]
fn not_in_is_text() {
    let sql = "SELECT * FROM t WHERE a NOT IN (1, 2)";
    let Segment::Expression(expr) = lower_where(sql) else {
        panic!("Expected expression");
    };
    assert_common(sql, &expr, "a NOT IN (1, 2)");
}

#[test]
fn in_over_non_column_is_text() {
    let sql = "SELECT * FROM t WHERE a + 1 IN (1, ?)";
    let statement = lower(sql);
    let Some(Segment::Expression(expr)) = statement.where_segment.map(|w| w.expr) else {
        panic!("Expected expression");
    };
    assert_common(sql, &expr, "a + 1 IN (1, ?)");
    assert_eq!(statement.parameters_count, 1);
}

// ===================================================================
// BETWEEN
// ===================================================================

#[test]
fn between() {
    let sql = "SELECT * FROM t WHERE a BETWEEN 1 AND 10";
    let predicate = lower_predicate(sql);
    let PredicateRightValue::Between { lower, upper } = predicate.right_value else {
        panic!("Expected BETWEEN right value");
    };
    assert!(matches!(
        lower,
        ExpressionSegment::Literal(LiteralExpressionSegment { value: LiteralValue::Number(ref n), .. })
            if n == "1"
    ));
    assert!(matches!(
        upper,
        ExpressionSegment::Literal(LiteralExpressionSegment { value: LiteralValue::Number(ref n), .. })
            if n == "10"
    ));
    assert_eq!(predicate.span.slice(sql), "a BETWEEN 1 AND 10");
}

#[test]
fn not_between_is_text() {
    let sql = "SELECT * FROM t WHERE a NOT BETWEEN ? AND ?";
    let statement = lower(sql);
    let Some(Segment::Expression(expr)) = statement.where_segment.map(|w| w.expr) else {
        panic!("Expected expression");
    };
    assert_common(sql, &expr, "a NOT BETWEEN ? AND ?");
    assert_eq!(statement.parameters_count, 2);
}

// ===================================================================
// LIKE, IS, subqueries
// ===================================================================

#[test]
fn like_is_text() {
    let sql = "SELECT * FROM t WHERE name LIKE 'a%' ESCAPE '!'";
    let Segment::Expression(expr) = lower_where(sql) else {
        panic!("Expected expression");
    };
    assert_common(sql, &expr, "name LIKE 'a%' ESCAPE '!'");
}

#[test]
fn is_not_null_is_text() {
    let sql = "SELECT * FROM t WHERE a IS NOT NULL";
    let Segment::Expression(expr) = lower_where(sql) else {
        panic!("Expected expression");
    };
    assert_common(sql, &expr, "a IS NOT NULL");
}

#[test]
fn exists_subquery() {
    let sql = "SELECT a FROM t WHERE EXISTS (SELECT b FROM u WHERE u.c = ?)";
    let Segment::Expression(ExpressionSegment::Subquery(subquery)) = lower_where(sql) else {
        panic!("Expected subquery");
    };
    assert_eq!(subquery.span.slice(sql), "EXISTS (SELECT b FROM u WHERE u.c = ?)");
    assert_eq!(subquery.select.parameters_count, 1);
}

#[test]
fn quantified_comparison_is_subquery() {
    let sql = "SELECT a FROM t WHERE a > ALL (SELECT b FROM u)";
    let Segment::Expression(ExpressionSegment::Subquery(subquery)) = lower_where(sql) else {
        panic!("Expected subquery");
    };
    assert_eq!(subquery.span.slice(sql), "a > ALL (SELECT b FROM u)");
}

// ===================================================================
// Logical connectives
// ===================================================================

#[test]
fn and_chain_is_flattened() {
    let sql = "SELECT * FROM t WHERE a = 1 AND b = 2 AND c = 3";
    let Segment::Logical(logical) = lower_where(sql) else {
        panic!("Expected logical segment");
    };
    assert_eq!(logical.operator, LogicalOperator::And);
    assert_eq!(logical.predicates.len(), 3);
    assert_eq!(logical.span.slice(sql), "a = 1 AND b = 2 AND c = 3");
    assert!(logical
        .predicates
        .iter()
        .all(|predicate| matches!(predicate, Segment::Predicate(_))));
}

#[test]
fn or_binds_looser_than_and() {
    let sql = "SELECT * FROM t WHERE a = 1 OR b = 2 AND c = 3";
    let Segment::Logical(logical) = lower_where(sql) else {
        panic!("Expected logical segment");
    };
    assert_eq!(logical.operator, LogicalOperator::Or);
    assert_eq!(logical.predicates.len(), 2);
    let Segment::Logical(inner) = &logical.predicates[1] else {
        panic!("Expected nested AND");
    };
    assert_eq!(inner.operator, LogicalOperator::And);
    assert_eq!(inner.span.slice(sql), "b = 2 AND c = 3");
}

#[test]
fn parenthesised_or() {
    let sql = "SELECT * FROM t WHERE (a = 1 OR b = 2) AND c = 3";
    let Segment::Logical(logical) = lower_where(sql) else {
        panic!("Expected logical segment");
    };
    assert_eq!(logical.operator, LogicalOperator::And);
    assert!(matches!(
        &logical.predicates[0],
        Segment::Logical(inner) if inner.operator == LogicalOperator::Or
    ));
}

#[test]
fn symbolic_connectives() {
    let Segment::Logical(logical) = lower_where("SELECT * FROM t WHERE a = 1 && b = 2") else {
        panic!("Expected logical segment");
    };
    assert_eq!(logical.operator, LogicalOperator::And);

    let Segment::Logical(logical) = lower_where("SELECT * FROM t WHERE a = 1 || b = 2") else {
        panic!("Expected logical segment");
    };
    assert_eq!(logical.operator, LogicalOperator::Or);
}

#[test]
fn xor_keeps_left_operand() {
    let sql = "SELECT * FROM t WHERE a = 1 XOR b = ?";
    let statement = lower(sql);
    let Some(Segment::Predicate(predicate)) = statement.where_segment.map(|w| w.expr) else {
        panic!("Expected predicate");
    };
    assert_eq!(column_name(&predicate.column), "a");
    assert_eq!(statement.parameters_count, 1);
}

#[test]
fn not_lowers_its_operand() {
    let predicate = lower_predicate("SELECT * FROM t WHERE NOT a = 1");
    assert_eq!(column_name(&predicate.column), "a");
}

#[test]
fn deeply_nested_arithmetic_is_text() {
    let depth = 30;
    let right = format!("{}? {}", "(".repeat(depth), ") + 1".repeat(depth));
    let sql = format!("SELECT * FROM t WHERE a = {right} AND b = ?");
    let statement = lower(&sql);
    assert_eq!(statement.parameters_count, 2);
    let Some(Segment::Logical(logical)) = statement.where_segment.map(|w| w.expr) else {
        panic!("Expected logical WHERE");
    };
    let Segment::Predicate(predicate) = &logical.predicates[0] else {
        panic!("Expected predicate");
    };
    let PredicateRightValue::Compare { expr, .. } = &predicate.right_value else {
        panic!("Expected compare right value");
    };
    assert_common(&sql, expr, &right);
}
