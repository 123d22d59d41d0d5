//! ORDER BY, projection and SELECT lowering.

use oxide_sql_segment::error::Result;
use oxide_sql_segment::segment::{
    AliasSegment, GroupBySegment, OrderByItemSegment, OrderBySegment, ProjectionsSegment,
    SelectItem,
};
use oxide_sql_segment::statement::{HavingSegment, WhereSegment};
use oxide_sql_segment::{LowerError, NodeKind, OrderDirection, SelectStatement, Span};
use tracing::{debug, trace};

use super::Sql92Lowerer;
use crate::tree::{
    GroupByClauseNode, OrderByClauseNode, OrderByItemAlternative, OrderByItemNode,
    ProjectionNode, ProjectionsNode, SelectNode, SubqueryNode, TreeNode,
};

/// Magnitude of the first `f64` outside the `i64` range, 2^63.
const ORDINAL_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Parses an ordinal position the way numeric literals are read: exact
/// integers first, otherwise a decimal truncated toward zero. Values
/// outside the `i64` range are rejected.
#[allow(clippy::cast_possible_truncation)]
fn parse_ordinal(text: &str, span: Span) -> Result<i64> {
    let invalid = || LowerError::InvalidOrdinal {
        text: text.to_string(),
        span,
    };
    let digits: String = text.split_whitespace().collect();
    if let Ok(position) = digits.parse::<i64>() {
        return Ok(position);
    }
    let unsigned = digits.strip_prefix(['-', '+']).unwrap_or(&digits);
    if !unsigned.is_empty() && unsigned.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match digits.parse::<f64>() {
        Ok(value) if (-ORDINAL_LIMIT..ORDINAL_LIMIT).contains(&value.trunc()) => {
            Ok(value.trunc() as i64)
        }
        _ => Err(invalid()),
    }
}

impl Sql92Lowerer<'_> {
    /// Lowers one ORDER BY or GROUP BY item.
    ///
    /// # Errors
    ///
    /// Returns [`LowerError::InvalidOrdinal`] for an unreadable position and
    /// [`LowerError::StructuralViolation`] for an item with no alternative.
    pub fn lower_order_by_item(&mut self, node: &OrderByItemNode) -> Result<OrderByItemSegment> {
        let direction = if node.desc.is_some() {
            OrderDirection::Desc
        } else {
            OrderDirection::Asc
        };

        match node.alternative() {
            Some(OrderByItemAlternative::ColumnName(column)) => Ok(OrderByItemSegment::Column {
                column: self.lower_column_name(column),
                direction,
            }),
            Some(OrderByItemAlternative::NumberLiterals(literal)) => {
                let position = parse_ordinal(literal.text(self.source), literal.span)?;
                Ok(OrderByItemSegment::Index {
                    span: literal.span,
                    position,
                    direction,
                })
            }
            Some(OrderByItemAlternative::Expr(expr)) => {
                self.lower_expr(expr)?;
                let span = expr.span();
                Ok(OrderByItemSegment::Expression {
                    span,
                    text: self.text(span).to_string(),
                    direction,
                })
            }
            None => Err(LowerError::StructuralViolation {
                kind: NodeKind::OrderByItem,
                span: node.span,
            }),
        }
    }

    fn lower_order_by_items(
        &mut self,
        items: &[OrderByItemNode],
    ) -> Result<Vec<OrderByItemSegment>> {
        items
            .iter()
            .map(|item| self.lower_order_by_item(item))
            .collect()
    }

    /// Lowers an ORDER BY clause.
    ///
    /// # Errors
    ///
    /// Propagates the first error raised by an item.
    pub fn lower_order_by_clause(&mut self, node: &OrderByClauseNode) -> Result<OrderBySegment> {
        Ok(OrderBySegment {
            span: node.span,
            items: self.lower_order_by_items(&node.items)?,
        })
    }

    /// Lowers a GROUP BY clause.
    ///
    /// # Errors
    ///
    /// Propagates the first error raised by an item.
    pub fn lower_group_by_clause(&mut self, node: &GroupByClauseNode) -> Result<GroupBySegment> {
        Ok(GroupBySegment {
            span: node.span,
            items: self.lower_order_by_items(&node.items)?,
        })
    }

    fn lower_projections(
        &mut self,
        node: &ProjectionsNode,
        distinct_row: bool,
    ) -> Result<ProjectionsSegment> {
        let mut items = Vec::with_capacity(node.items.len());
        for projection in &node.items {
            let item = match projection {
                ProjectionNode::Shorthand(star) => SelectItem::Shorthand {
                    span: star.span,
                    owner: None,
                },
                ProjectionNode::QualifiedShorthand { span, owner } => SelectItem::Shorthand {
                    span: *span,
                    owner: Some(self.lower_owner(owner)),
                },
                ProjectionNode::Expr { span, expr, alias } => SelectItem::Expression {
                    span: *span,
                    segment: self.lower_expr(expr)?,
                    alias: alias.as_ref().map(|alias| AliasSegment {
                        span: alias.span,
                        identifier: self.identifier_value(&alias.identifier),
                    }),
                },
            };
            items.push(item);
        }
        Ok(ProjectionsSegment {
            span: node.span,
            distinct_row,
            items,
        })
    }

    /// Lowers a SELECT, clause by clause in source order.
    ///
    /// The parameter counter is not reset, so this also serves nested
    /// selects.
    ///
    /// # Errors
    ///
    /// Propagates the first [`LowerError`] raised in any clause.
    pub fn lower_select(&mut self, node: &SelectNode) -> Result<SelectStatement> {
        let projections = self.lower_projections(&node.projections, node.distinct.is_some())?;

        let tables = node
            .from
            .as_ref()
            .map(|from| self.lower_table_names(from))
            .unwrap_or_default();

        let where_segment = match &node.where_clause {
            Some(clause) => Some(WhereSegment {
                span: clause.span,
                expr: self.lower_expr(&clause.expr)?,
            }),
            None => None,
        };

        let group_by = match &node.group_by {
            Some(clause) => Some(self.lower_group_by_clause(clause)?),
            None => None,
        };

        let having = match &node.having {
            Some(clause) => Some(HavingSegment {
                span: clause.span,
                expr: self.lower_expr(&clause.expr)?,
            }),
            None => None,
        };

        let order_by = match &node.order_by {
            Some(clause) => Some(self.lower_order_by_clause(clause)?),
            None => None,
        };

        Ok(SelectStatement {
            span: node.span,
            projections,
            tables,
            where_segment,
            group_by,
            having,
            order_by,
            parameters_count: self.parameter_index,
        })
    }

    /// Lowers `( select )`, sharing the statement's parameter counter.
    ///
    /// # Errors
    ///
    /// Propagates the first [`LowerError`] raised in the nested select.
    pub fn lower_subquery(&mut self, node: &SubqueryNode) -> Result<SelectStatement> {
        trace!(span = %node.span, "Lowering subquery");
        self.lower_select(&node.select)
    }

    /// Lowers a top-level statement, restarting parameter numbering.
    ///
    /// # Errors
    ///
    /// Returns the first [`LowerError`] raised anywhere in the statement;
    /// no partial result is produced.
    pub fn lower_statement(&mut self, node: &SelectNode) -> Result<SelectStatement> {
        self.parameter_index = 0;
        debug!(span = %node.span, "Lowering statement");
        let statement = self.lower_select(node)?;
        debug!(parameters = statement.parameters_count, "Statement lowered");
        Ok(statement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ordinal() {
        let span = Span::new(0, 0);
        assert_eq!(parse_ordinal("2", span), Ok(2));
        assert_eq!(parse_ordinal("-1", span), Ok(-1));
        assert_eq!(parse_ordinal("2.9", span), Ok(2));
        assert_eq!(parse_ordinal("1e2", span), Ok(100));
        assert_eq!(parse_ordinal("9223372036854775807", span), Ok(i64::MAX));
        assert_eq!(parse_ordinal("-9223372036854775808", span), Ok(i64::MIN));
        for text in ["x", "99999999999999999999", "-99999999999999999999", "1e19", "1e999"] {
            assert!(
                matches!(
                    parse_ordinal(text, span),
                    Err(LowerError::InvalidOrdinal { .. })
                ),
                "{text} should be rejected"
            );
        }
    }

    #[test]
    fn test_order_by_item_without_alternative() {
        let mut lowerer = Sql92Lowerer::new("DESC");
        let node = OrderByItemNode {
            span: Span::new(0, 3),
            column_name: None,
            number_literals: None,
            expr: None,
            asc: None,
            desc: None,
        };
        assert_eq!(
            lowerer.lower_order_by_item(&node),
            Err(LowerError::StructuralViolation {
                kind: NodeKind::OrderByItem,
                span: Span::new(0, 3),
            })
        );
    }
}
