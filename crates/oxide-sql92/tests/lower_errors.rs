//! Tests for syntax errors and for lowering errors raised by trees that
//! break a structural invariant.

mod common;
use common::*;

use oxide_sql92::tree::{
    BitExprNode, BooleanPrimaryNode, ExprNode, LiteralsNode, PredicateNode, ProjectionNode,
    SelectNode, SimpleExprNode, Terminal,
};
use oxide_sql92::{Error, Sql92Lowerer};
use oxide_sql_segment::{LowerError, NodeKind, Span};

fn parse(sql: &str) -> SelectNode {
    oxide_sql92::parse_select(sql).unwrap_or_else(|e| panic!("Failed to parse: {sql}\n{e}"))
}

fn first_simple_expr(select: &mut SelectNode) -> &mut SimpleExprNode {
    let ProjectionNode::Expr { expr, .. } = &mut select.projections.items[0] else {
        panic!("Expected expression projection");
    };
    let ExprNode::BooleanPrimary(primary) = expr else {
        panic!("Expected boolean primary");
    };
    let BooleanPrimaryNode::Predicate(predicate) = primary.as_mut() else {
        panic!("Expected predicate");
    };
    let PredicateNode::BitExpr(BitExprNode::Simple(simple)) = predicate.as_mut() else {
        panic!("Expected simple expression");
    };
    simple.as_mut()
}

// ===================================================================
// Syntax errors
// ===================================================================

#[test]
fn syntax_errors_are_reported() {
    for sql in [
        "SELECT FROM t",
        "SELECT a FROM",
        "SELECT a FROM t WHERE",
        "SELECT a FROM t u",
        "SELECT a, FROM t",
        "SELECT COUNT( FROM t",
        "SELECT a FROM t WHERE a IN ()",
        "SELECT a FROM t ORDER a",
        "UPDATE t SET a = 1",
        "",
    ] {
        assert!(
            matches!(lower_err(sql), Error::Syntax(_)),
            "Expected syntax error for: {sql}"
        );
    }
}

#[test]
fn syntax_error_points_at_token() {
    let sql = "SELECT a FROM t WHERE a = = 1";
    let error = syntax_err(sql);
    assert_eq!(error.span.slice(sql), "=");
    assert_eq!(error.span.start, 26);
    assert!(error.to_string().contains("at position 26..=26"));
}

#[test]
fn unterminated_string_is_a_syntax_error() {
    let error = syntax_err("SELECT 'abc FROM t");
    assert!(error.message.contains("Unterminated string literal"));
}

#[test]
fn unexpected_end_of_input() {
    let error = syntax_err("SELECT a FROM t WHERE a =");
    assert!(error.message.contains("end of input"));
}

// ===================================================================
// Lowering errors
// ===================================================================

#[test]
fn empty_literals_node_is_malformed() {
    let sql = "SELECT 1 FROM t";
    let mut select = parse(sql);
    *first_simple_expr(&mut select) = SimpleExprNode::Literals(LiteralsNode::new(Span::new(7, 7)));

    let error = Sql92Lowerer::new(sql).lower_statement(&select).unwrap_err();
    assert_eq!(
        error,
        LowerError::MalformedLiteral {
            span: Span::new(7, 7)
        }
    );
    assert!(error.to_string().starts_with("Malformed literal at 7..=7"));
}

#[test]
fn empty_function_call_is_a_structural_violation() {
    let sql = "SELECT f(a) FROM t";
    let mut select = parse(sql);
    let SimpleExprNode::FunctionCall(call) = first_simple_expr(&mut select) else {
        panic!("Expected function call");
    };
    call.regular_function = None;

    let error = Sql92Lowerer::new(sql).lower_statement(&select).unwrap_err();
    assert_eq!(
        error,
        LowerError::StructuralViolation {
            kind: NodeKind::FunctionCall,
            span: Span::new(7, 10),
        }
    );
    assert!(error.to_string().contains("functionCall"));
}

#[test]
fn unknown_logical_operator_is_a_structural_violation() {
    let sql = "SELECT a FROM t WHERE a = 1 AND b = 2";
    let mut select = parse(sql);
    let Some(clause) = select.where_clause.as_mut() else {
        panic!("Expected WHERE clause");
    };
    let ExprNode::Logical { operator, .. } = &mut clause.expr else {
        panic!("Expected logical expression");
    };
    // Points the operator at the `a` of the select list.
    *operator = Terminal::new(Span::new(7, 7));

    let error = Sql92Lowerer::new(sql).lower_statement(&select).unwrap_err();
    assert!(matches!(
        error,
        LowerError::StructuralViolation {
            kind: NodeKind::Expr,
            ..
        }
    ));
}

#[test]
fn errors_in_subqueries_propagate() {
    let sql = "SELECT (SELECT 1 FROM u) FROM t";
    let mut select = parse(sql);
    let SimpleExprNode::Subquery { subquery, .. } = first_simple_expr(&mut select) else {
        panic!("Expected subquery");
    };
    *first_simple_expr(&mut subquery.select) =
        SimpleExprNode::Literals(LiteralsNode::new(Span::new(15, 15)));

    let error = oxide_sql92::Error::from(
        Sql92Lowerer::new(sql).lower_statement(&select).unwrap_err(),
    );
    assert!(matches!(
        error,
        Error::Lower(LowerError::MalformedLiteral { .. })
    ));
}

#[test]
fn unreadable_ordinal_is_rejected() {
    let sql = "SELECT a FROM t ORDER BY 1e999";
    assert!(matches!(
        lower_err(sql),
        Error::Lower(LowerError::InvalidOrdinal { ref text, .. }) if text == "1e999"
    ));
}

#[test]
fn ordinal_beyond_integer_range_is_rejected() {
    let sql = "SELECT a FROM t ORDER BY 99999999999999999999";
    let Error::Lower(LowerError::InvalidOrdinal { text, span }) = lower_err(sql) else {
        panic!("Expected invalid ordinal");
    };
    assert_eq!(text, "99999999999999999999");
    assert_eq!(span, Span::new(25, 44));
}
