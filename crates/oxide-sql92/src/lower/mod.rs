//! Lowering of SQL-92 grammar trees into segments.
//!
//! [`Sql92Lowerer`] walks a grammar tree depth-first, left to right, and
//! builds the position-annotated segments of `oxide-sql-segment`. One
//! `lower_*` method exists per grammar node kind. Constructs the segment
//! model does not decompose (XOR, negated IN/BETWEEN, LIKE, bitwise
//! arithmetic, most special functions) degrade to verbatim text captures,
//! but their children are still walked so that every `?` marker receives
//! its ordinal.

mod expr;
mod function;
mod statement;

pub use expr::Lowered;

use oxide_sql_segment::error::Result;
use oxide_sql_segment::segment::{
    ColumnSegment, CommonExpressionSegment, ExpressionSegment, OwnerSegment, SimpleTableSegment,
    TableNameSegment,
};
use oxide_sql_segment::{IdentifierValue, LiteralValue, LowerError, Span};
use tracing::trace;

use crate::tree::{
    ColumnNameNode, ColumnNamesNode, DataTypeNameNode, IdentifierNode, LiteralAlternative,
    LiteralsNode, OwnerNode, ParameterMarkerNode, SchemaNameNode, TableNameNode, TableNamesNode,
    TreeNode,
};

/// A lowering session over one source text.
///
/// The session owns the parameter-marker counter. It is reset by
/// [`Sql92Lowerer::lower_statement`] and shared by every subquery lowered
/// beneath it, so marker indices follow source order across nesting.
#[derive(Debug, Clone)]
pub struct Sql92Lowerer<'a> {
    source: &'a str,
    parameter_index: usize,
}

impl<'a> Sql92Lowerer<'a> {
    /// Creates a session for trees built from `source`.
    #[must_use]
    pub const fn new(source: &'a str) -> Self {
        Self {
            source,
            parameter_index: 0,
        }
    }

    /// Returns the source text node spans index into.
    #[must_use]
    pub const fn source(&self) -> &'a str {
        self.source
    }

    /// Returns the number of parameter markers lowered so far.
    #[must_use]
    pub const fn parameter_index(&self) -> usize {
        self.parameter_index
    }

    fn text(&self, span: Span) -> &'a str {
        span.slice(self.source)
    }

    /// Captures a span as verbatim text.
    fn common(&self, span: Span) -> ExpressionSegment {
        ExpressionSegment::Common(CommonExpressionSegment {
            span,
            text: self.text(span).to_string(),
        })
    }

    /// Lowers `?` to its ordinal and advances the counter.
    pub fn lower_parameter_marker(&mut self, node: &ParameterMarkerNode) -> LiteralValue {
        let index = self.parameter_index;
        self.parameter_index += 1;
        trace!(index, span = %node.span, "Lowered parameter marker");
        LiteralValue::ParameterMarker(index)
    }

    /// Lowers a literal by its populated alternative.
    ///
    /// # Errors
    ///
    /// Returns [`LowerError::MalformedLiteral`] when no alternative is set.
    pub fn lower_literals(&self, node: &LiteralsNode) -> Result<LiteralValue> {
        let value = match node.alternative() {
            Some(LiteralAlternative::String(terminal)) => {
                LiteralValue::string(terminal.text(self.source))
            }
            Some(LiteralAlternative::Number(terminal)) => {
                LiteralValue::Number(terminal.text(self.source).to_string())
            }
            Some(LiteralAlternative::Boolean(terminal)) => {
                LiteralValue::Boolean(terminal.text(self.source).to_string())
            }
            Some(
                LiteralAlternative::Hexadecimal(terminal)
                | LiteralAlternative::BitValue(terminal)
                | LiteralAlternative::Null(terminal),
            ) => LiteralValue::Other(terminal.text(self.source).to_string()),
            None => return Err(LowerError::MalformedLiteral { span: node.span }),
        };
        Ok(value)
    }

    /// Lowers an identifier, preferring its non-reserved keyword slot.
    #[must_use]
    pub fn lower_identifier(&self, node: &IdentifierNode) -> LiteralValue {
        LiteralValue::Identifier(self.identifier_value(node))
    }

    fn identifier_value(&self, node: &IdentifierNode) -> IdentifierValue {
        let span = node.unreserved_word.map_or(node.span, |word| word.span);
        IdentifierValue::new(self.text(span))
    }

    /// Lowers a schema name to its identifier.
    #[must_use]
    pub fn lower_schema_name(&self, node: &SchemaNameNode) -> LiteralValue {
        self.lower_identifier(&node.identifier)
    }

    /// Lowers a data type name to a keyword value.
    #[must_use]
    pub fn lower_data_type_name(&self, node: &DataTypeNameNode) -> LiteralValue {
        LiteralValue::Keyword(node.text(self.source).to_string())
    }

    fn lower_owner(&self, node: &OwnerNode) -> OwnerSegment {
        OwnerSegment {
            span: node.span,
            identifier: self.identifier_value(&node.identifier),
        }
    }

    /// Lowers `(owner .)? name` in table position.
    #[must_use]
    pub fn lower_table_name(&self, node: &TableNameNode) -> SimpleTableSegment {
        SimpleTableSegment {
            table_name: TableNameSegment {
                span: node.span,
                identifier: self.identifier_value(&node.name),
            },
            owner: node.owner.as_ref().map(|owner| self.lower_owner(owner)),
        }
    }

    /// Lowers `(owner .)? name` in column position.
    #[must_use]
    pub fn lower_column_name(&self, node: &ColumnNameNode) -> ColumnSegment {
        ColumnSegment {
            span: node.span,
            identifier: self.identifier_value(&node.name),
            owner: node.owner.as_ref().map(|owner| self.lower_owner(owner)),
        }
    }

    /// Lowers a table list in source order.
    #[must_use]
    pub fn lower_table_names(&self, node: &TableNamesNode) -> Vec<SimpleTableSegment> {
        node.table_names
            .iter()
            .map(|table| self.lower_table_name(table))
            .collect()
    }

    /// Lowers a column list in source order.
    #[must_use]
    pub fn lower_column_names(&self, node: &ColumnNamesNode) -> Vec<ColumnSegment> {
        node.column_names
            .iter()
            .map(|column| self.lower_column_name(column))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Terminal;
    use oxide_sql_segment::QuoteCharacter;

    fn identifier(start: usize, stop: usize) -> IdentifierNode {
        IdentifierNode {
            span: Span::new(start, stop),
            unreserved_word: None,
        }
    }

    #[test]
    fn test_parameter_markers_count_up() {
        let mut lowerer = Sql92Lowerer::new("?, ?");
        let first = lowerer.lower_parameter_marker(&ParameterMarkerNode {
            span: Span::new(0, 0),
        });
        let second = lowerer.lower_parameter_marker(&ParameterMarkerNode {
            span: Span::new(3, 3),
        });
        assert_eq!(first, LiteralValue::ParameterMarker(0));
        assert_eq!(second, LiteralValue::ParameterMarker(1));
        assert_eq!(lowerer.parameter_index(), 2);
    }

    #[test]
    fn test_literal_alternatives() {
        let source = "NULL";
        let lowerer = Sql92Lowerer::new(source);
        let mut node = LiteralsNode::new(Span::new(0, 3));
        node.null_value_literals = Some(Terminal::new(Span::new(0, 3)));
        assert_eq!(
            lowerer.lower_literals(&node).unwrap(),
            LiteralValue::Other(String::from("NULL"))
        );
    }

    #[test]
    fn test_empty_literal_is_malformed() {
        let lowerer = Sql92Lowerer::new("x");
        let node = LiteralsNode::new(Span::new(0, 0));
        assert_eq!(
            lowerer.lower_literals(&node),
            Err(LowerError::MalformedLiteral {
                span: Span::new(0, 0)
            })
        );
    }

    #[test]
    fn test_quoted_column_with_owner() {
        let source = "u.\"Name\"";
        let lowerer = Sql92Lowerer::new(source);
        let column = lowerer.lower_column_name(&ColumnNameNode {
            span: Span::new(0, 7),
            owner: Some(OwnerNode {
                span: Span::new(0, 0),
                identifier: identifier(0, 0),
            }),
            name: identifier(2, 7),
        });
        assert_eq!(column.identifier.value, "Name");
        assert_eq!(column.identifier.quote, QuoteCharacter::Quote);
        assert_eq!(column.owner.unwrap().identifier.value, "u");
        assert_eq!(column.span.slice(source), source);
    }

    #[test]
    fn test_table_names_keep_order_and_duplicates() {
        let source = "b, a, b";
        let lowerer = Sql92Lowerer::new(source);
        let table = |start| TableNameNode {
            span: Span::new(start, start),
            owner: None,
            name: identifier(start, start),
        };
        let tables = lowerer.lower_table_names(&TableNamesNode {
            span: Span::new(0, 6),
            table_names: vec![table(0), table(3), table(6)],
        });
        let names: Vec<_> = tables
            .iter()
            .map(|table| table.table_name.identifier.value.as_str())
            .collect();
        assert_eq!(names, ["b", "a", "b"]);
    }

    #[test]
    fn test_schema_and_data_type_names() {
        let source = "sales DECIMAL";
        let lowerer = Sql92Lowerer::new(source);
        let schema = lowerer.lower_schema_name(&SchemaNameNode {
            span: Span::new(0, 4),
            identifier: identifier(0, 4),
        });
        assert!(matches!(schema, LiteralValue::Identifier(ref id) if id.value == "sales"));
        let data_type = lowerer.lower_data_type_name(&DataTypeNameNode {
            span: Span::new(6, 12),
        });
        assert_eq!(data_type, LiteralValue::Keyword(String::from("DECIMAL")));
    }
}
