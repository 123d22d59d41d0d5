//! Expression, predicate and simple-expression lowering.

use oxide_sql_segment::error::Result;
use oxide_sql_segment::segment::{
    ColumnSegment, ExpressionSegment, LiteralExpressionSegment, ParameterMarkerExpressionSegment,
    PredicateBracketValue, PredicateRightValue, PredicateSegment, Segment, SubquerySegment,
};
use oxide_sql_segment::{LiteralValue, LogicalOperator, LowerError, NodeKind, Span};
use tracing::debug;

use super::Sql92Lowerer;
use crate::tree::{
    BitExprNode, BooleanPrimaryNode, ExprNode, PredicateNode, SimpleExprNode, SubqueryNode,
    Terminal, TreeNode,
};

/// The result of lowering a simple expression.
///
/// Literals and parameter markers stay leaf values until the enclosing
/// bit expression re-tags them as expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lowered {
    Value(LiteralValue),
    Segment(Segment),
}

impl Sql92Lowerer<'_> {
    /// Lowers `expr`, merging boolean connectives into predicate chains.
    ///
    /// # Errors
    ///
    /// Propagates the first [`LowerError`] raised beneath the node.
    pub fn lower_expr(&mut self, node: &ExprNode) -> Result<Segment> {
        match node {
            ExprNode::BooleanPrimary(primary) => self.lower_boolean_primary(primary),
            ExprNode::Logical {
                span,
                left,
                operator,
                right,
            } => {
                let left = self.lower_expr(left)?;
                let right = self.lower_expr(right)?;
                let operator = LogicalOperator::from_text(operator.text(self.source)).ok_or(
                    LowerError::StructuralViolation {
                        kind: NodeKind::Expr,
                        span: *span,
                    },
                )?;
                Ok(left.merge(operator, right, *span))
            }
            ExprNode::Xor { span, left, right } => {
                let left = self.lower_expr(left)?;
                self.lower_expr(right)?;
                debug!(span = %span, "XOR keeps only its left operand");
                Ok(left)
            }
            ExprNode::Not { expr, .. } | ExprNode::Paren { expr, .. } => self.lower_expr(expr),
        }
    }

    /// Lowers comparisons, quantified comparisons and IS tests.
    ///
    /// # Errors
    ///
    /// Propagates the first [`LowerError`] raised beneath the node.
    pub fn lower_boolean_primary(&mut self, node: &BooleanPrimaryNode) -> Result<Segment> {
        match node {
            BooleanPrimaryNode::QuantifiedComparison {
                span,
                left,
                subquery,
                ..
            } => {
                self.lower_boolean_primary(left)?;
                let select = self.lower_subquery(subquery)?;
                Ok(Segment::Expression(ExpressionSegment::Subquery(
                    SubquerySegment {
                        span: *span,
                        select: Box::new(select),
                    },
                )))
            }
            BooleanPrimaryNode::Comparison {
                span,
                left,
                operator,
                right,
            } => self.lower_comparison(*span, left, *operator, right),
            BooleanPrimaryNode::Predicate(predicate) => self.lower_predicate(predicate),
            BooleanPrimaryNode::Is { span, operand, .. } => {
                self.lower_boolean_primary(operand)?;
                debug!(span = %span, "IS test kept as text");
                Ok(self.common(*span).into())
            }
        }
    }

    fn lower_comparison(
        &mut self,
        span: Span,
        left: &BooleanPrimaryNode,
        operator: Terminal,
        right: &PredicateNode,
    ) -> Result<Segment> {
        let column = match self.lower_boolean_primary(left)? {
            Segment::Expression(ExpressionSegment::Column(column)) => column,
            other => {
                self.lower_predicate(right)?;
                debug!(span = %span, "Comparison on a non-column keeps only its left operand");
                return Ok(other);
            }
        };

        let right_value = match self.lower_predicate(right)? {
            Segment::Expression(ExpressionSegment::Column(other)) => {
                PredicateRightValue::Column(other)
            }
            other => PredicateRightValue::Compare {
                operator: operator.text(self.source).to_string(),
                expr: other.into_expression(self.source),
            },
        };

        Ok(Segment::Predicate(PredicateSegment {
            span,
            column,
            right_value,
        }))
    }

    /// Lowers IN, BETWEEN and LIKE predicates.
    ///
    /// Only the positive IN and BETWEEN forms over a column become
    /// predicate segments; every other shape is walked and kept as text.
    ///
    /// # Errors
    ///
    /// Propagates the first [`LowerError`] raised beneath the node.
    pub fn lower_predicate(&mut self, node: &PredicateNode) -> Result<Segment> {
        match node {
            PredicateNode::InSubquery {
                span,
                operand,
                not: None,
                subquery,
            } => {
                let Some(column) = self.lower_operand_column(operand)? else {
                    return self.lower_predicate_rest(node);
                };
                let select = self.lower_subquery(subquery)?;
                let candidate = ExpressionSegment::Subquery(SubquerySegment {
                    span: subquery.span,
                    select: Box::new(select),
                });
                let bracket = subquery_bracket(subquery);
                Ok(Self::in_predicate(*span, column, bracket, vec![candidate]))
            }
            PredicateNode::InList {
                span,
                operand,
                not: None,
                left_paren,
                items,
                right_paren,
            } => {
                let Some(column) = self.lower_operand_column(operand)? else {
                    return self.lower_predicate_rest(node);
                };
                let source = self.source;
                let candidates = items
                    .iter()
                    .map(|item| {
                        self.lower_expr(item)
                            .map(|segment| segment.into_expression(source))
                    })
                    .collect::<Result<Vec<_>>>()?;
                let bracket = PredicateBracketValue {
                    left: left_paren.span,
                    right: right_paren.span,
                };
                Ok(Self::in_predicate(*span, column, bracket, candidates))
            }
            PredicateNode::Between {
                span,
                operand,
                not: None,
                lower,
                upper,
            } => {
                let Some(column) = self.lower_operand_column(operand)? else {
                    return self.lower_predicate_rest(node);
                };
                let lower = self.lower_bit_expr(lower)?.into_expression(self.source);
                let upper = self.lower_predicate(upper)?.into_expression(self.source);
                Ok(Segment::Predicate(PredicateSegment {
                    span: *span,
                    column,
                    right_value: PredicateRightValue::Between { lower, upper },
                }))
            }
            PredicateNode::BitExpr(bit_expr) => self.lower_bit_expr(bit_expr),
            PredicateNode::InSubquery { operand, .. }
            | PredicateNode::InList { operand, .. }
            | PredicateNode::Between { operand, .. }
            | PredicateNode::Like { operand, .. } => {
                self.lower_bit_expr(operand)?;
                self.lower_predicate_rest(node)
            }
        }
    }

    fn in_predicate(
        span: Span,
        column: ColumnSegment,
        bracket: PredicateBracketValue,
        candidates: Vec<ExpressionSegment>,
    ) -> Segment {
        Segment::Predicate(PredicateSegment {
            span,
            column,
            right_value: PredicateRightValue::In {
                bracket,
                candidates,
            },
        })
    }

    /// Lowers the operand of IN or BETWEEN, keeping it only when it is a
    /// column.
    fn lower_operand_column(&mut self, operand: &BitExprNode) -> Result<Option<ColumnSegment>> {
        match self.lower_bit_expr(operand)? {
            Segment::Expression(ExpressionSegment::Column(column)) => Ok(Some(column)),
            _ => Ok(None),
        }
    }

    /// Walks the children after the operand in source order and captures
    /// the whole predicate as text.
    fn lower_predicate_rest(&mut self, node: &PredicateNode) -> Result<Segment> {
        match node {
            PredicateNode::InSubquery { subquery, .. } => {
                self.lower_subquery(subquery)?;
            }
            PredicateNode::InList { items, .. } => {
                for item in items {
                    self.lower_expr(item)?;
                }
            }
            PredicateNode::Between { lower, upper, .. } => {
                self.lower_bit_expr(lower)?;
                self.lower_predicate(upper)?;
            }
            PredicateNode::Like {
                pattern, escape, ..
            } => {
                self.lower_simple_expr(pattern)?;
                if let Some(escape) = escape {
                    self.lower_simple_expr(escape)?;
                }
            }
            PredicateNode::BitExpr(_) => {}
        }
        debug!(span = %node.span(), "Predicate kept as text");
        Ok(self.common(node.span()).into())
    }

    /// Lowers a bit expression, re-tagging leaf values as expressions.
    ///
    /// # Errors
    ///
    /// Propagates the first [`LowerError`] raised beneath the node.
    pub fn lower_bit_expr(&mut self, node: &BitExprNode) -> Result<Segment> {
        match node {
            BitExprNode::Simple(simple) => {
                let lowered = self.lower_simple_expr(simple)?;
                Ok(self.wrap_simple(lowered, simple.span()))
            }
            BitExprNode::Binary {
                span, left, right, ..
            } => {
                self.lower_bit_expr(left)?;
                self.lower_bit_expr(right)?;
                Ok(self.common(*span).into())
            }
        }
    }

    fn wrap_simple(&self, lowered: Lowered, span: Span) -> Segment {
        let expression = match lowered {
            Lowered::Segment(segment) => return segment,
            Lowered::Value(LiteralValue::ParameterMarker(index)) => {
                ExpressionSegment::ParameterMarker(ParameterMarkerExpressionSegment { span, index })
            }
            Lowered::Value(value) if value.is_scalar() => {
                ExpressionSegment::Literal(LiteralExpressionSegment { span, value })
            }
            Lowered::Value(_) => self.common(span),
        };
        expression.into()
    }

    /// Lowers a simple expression.
    ///
    /// Alternatives are tried in the order subquery, parameter marker,
    /// literals, function call, column name; anything else is walked and
    /// captured as text.
    ///
    /// # Errors
    ///
    /// Propagates the first [`LowerError`] raised beneath the node.
    pub fn lower_simple_expr(&mut self, node: &SimpleExprNode) -> Result<Lowered> {
        let segment = match node {
            SimpleExprNode::Subquery { span, subquery, .. } => {
                let select = self.lower_subquery(subquery)?;
                ExpressionSegment::Subquery(SubquerySegment {
                    span: *span,
                    select: Box::new(select),
                })
            }
            SimpleExprNode::ParameterMarker(marker) => {
                return Ok(Lowered::Value(self.lower_parameter_marker(marker)));
            }
            SimpleExprNode::Literals(literals) => {
                return Ok(Lowered::Value(self.lower_literals(literals)?));
            }
            SimpleExprNode::FunctionCall(function) => {
                ExpressionSegment::Projection(self.lower_function_call(function)?)
            }
            SimpleExprNode::ColumnName(column) => {
                ExpressionSegment::Column(self.lower_column_name(column))
            }
            SimpleExprNode::Unary { span, operand, .. } => {
                self.lower_simple_expr(operand)?;
                self.common(*span)
            }
            SimpleExprNode::Row { span, items } => {
                for item in items {
                    self.lower_expr(item)?;
                }
                self.common(*span)
            }
            SimpleExprNode::Case {
                span,
                operand,
                branches,
                otherwise,
            } => {
                if let Some(operand) = operand {
                    self.lower_simple_expr(operand)?;
                }
                for branch in branches {
                    self.lower_expr(&branch.condition)?;
                    self.lower_expr(&branch.result)?;
                }
                if let Some(otherwise) = otherwise {
                    self.lower_expr(otherwise)?;
                }
                self.common(*span)
            }
        };
        Ok(Lowered::Segment(segment.into()))
    }
}

fn subquery_bracket(subquery: &SubqueryNode) -> PredicateBracketValue {
    PredicateBracketValue {
        left: subquery.left_paren.span,
        right: subquery.right_paren.span,
    }
}
