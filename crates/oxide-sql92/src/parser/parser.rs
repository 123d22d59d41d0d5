//! Grammar tree builder.

use std::collections::HashSet;

use oxide_sql_segment::Span;

use super::error::SyntaxError;
use super::pratt::{
    bit_binding_power, is_comparison_operator, is_unary_operator, logical_binding_power,
    NOT_BINDING_POWER,
};
use crate::lexer::{Keyword, Lexer, Token, TokenKind};
use crate::tree::{
    AggregationArgument, AggregationFunctionNode, AliasNode, BitExprNode, BooleanPrimaryNode,
    CaseWhenNode, CastFunctionNode, ColumnNameNode, DataTypeNameNode, DataTypeNode, ExprNode,
    FunctionCallNode, GroupByClauseNode, HavingClauseNode, IdentifierNode, LiteralsNode,
    OrderByClauseNode, OrderByItemNode, OwnerNode, ParameterMarkerNode, PredicateNode,
    ProjectionNode, ProjectionsNode, RegularFunctionNode, SelectNode, SimpleExprNode,
    SpecialFunctionNode, SubqueryNode, TableNameNode, TableNamesNode, Terminal, TreeNode,
    WhereClauseNode,
};

type Result<T> = std::result::Result<T, SyntaxError>;

/// Aggregate names the grammar lexes as plain identifiers.
const IDENTIFIER_AGGREGATES: [&str; 4] = ["EVERY", "BIT_XOR", "STDDEV", "VARIANCE"];

/// SQL-92 grammar tree builder.
///
/// A recursive descent parser over a pre-scanned token vector. Operator
/// levels use Pratt parsing; a parenthesised expression is tried first and
/// abandoned by rewinding when the closing parenthesis is followed by an
/// operator that makes it a row value instead. Abandoned positions are
/// remembered so nested parentheses are not retried at every level.
pub struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    /// Token positions of `(` already known not to open a whole operand.
    rejected_parens: HashSet<usize>,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given input.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        let tokens = Lexer::new(source).tokenize();
        Self {
            source,
            tokens,
            pos: 0,
            rejected_parens: HashSet::new(),
        }
    }

    /// Parses a single SELECT statement, optionally terminated by `;`.
    ///
    /// # Errors
    ///
    /// Returns a `SyntaxError` at the first token that does not fit the
    /// grammar.
    pub fn parse_statement(&mut self) -> Result<SelectNode> {
        let select = self.parse_select()?;
        if self.check(&TokenKind::Semicolon) {
            self.advance();
        }
        if !self.current().is_eof() {
            return Err(self.unexpected("end of input"));
        }
        Ok(select)
    }

    /// Parses `SELECT DISTINCT? projections FROM? WHERE? GROUP BY? HAVING?
    /// ORDER BY?`.
    fn parse_select(&mut self) -> Result<SelectNode> {
        let start = self.current().span.start;
        self.expect_keyword(Keyword::Select)?;

        // DISTINCT or ALL
        let distinct = if self.check_keyword(Keyword::Distinct) {
            Some(self.terminal())
        } else {
            if self.check_keyword(Keyword::All) {
                self.advance();
            }
            None
        };

        let projections = self.parse_projections()?;

        let from = if self.check_keyword(Keyword::From) {
            self.advance();
            Some(self.parse_table_names()?)
        } else {
            None
        };

        let where_clause = if self.check_keyword(Keyword::Where) {
            let clause_start = self.current().span.start;
            self.advance();
            let expr = self.parse_expr(0)?;
            Some(WhereClauseNode {
                span: self.span_from(clause_start),
                expr,
            })
        } else {
            None
        };

        let group_by = if self.check_keyword(Keyword::Group) {
            let clause_start = self.current().span.start;
            self.advance();
            self.expect_keyword(Keyword::By)?;
            let items = self.parse_order_by_items()?;
            Some(GroupByClauseNode {
                span: self.span_from(clause_start),
                items,
            })
        } else {
            None
        };

        let having = if self.check_keyword(Keyword::Having) {
            let clause_start = self.current().span.start;
            self.advance();
            let expr = self.parse_expr(0)?;
            Some(HavingClauseNode {
                span: self.span_from(clause_start),
                expr,
            })
        } else {
            None
        };

        let order_by = if self.check_keyword(Keyword::Order) {
            let clause_start = self.current().span.start;
            self.advance();
            self.expect_keyword(Keyword::By)?;
            let items = self.parse_order_by_items()?;
            Some(OrderByClauseNode {
                span: self.span_from(clause_start),
                items,
            })
        } else {
            None
        };

        Ok(SelectNode {
            span: self.span_from(start),
            distinct,
            projections,
            from,
            where_clause,
            group_by,
            having,
            order_by,
        })
    }

    /// Parses the SELECT list.
    fn parse_projections(&mut self) -> Result<ProjectionsNode> {
        let start = self.current().span.start;
        let mut items = vec![];
        loop {
            items.push(self.parse_projection()?);
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        Ok(ProjectionsNode {
            span: self.span_from(start),
            items,
        })
    }

    /// Parses `*`, `owner.*` or `expr alias?`.
    fn parse_projection(&mut self) -> Result<ProjectionNode> {
        let start = self.current().span.start;
        if self.check(&TokenKind::Star) {
            return Ok(ProjectionNode::Shorthand(self.terminal()));
        }
        if self.is_identifier_start(0)
            && self.peek(1).kind == TokenKind::Dot
            && self.peek(2).kind == TokenKind::Star
        {
            let identifier = self.parse_identifier()?;
            self.advance();
            self.advance();
            return Ok(ProjectionNode::QualifiedShorthand {
                span: self.span_from(start),
                owner: OwnerNode {
                    span: identifier.span,
                    identifier,
                },
            });
        }

        let expr = self.parse_expr(0)?;
        let alias = self.parse_optional_alias()?;
        Ok(ProjectionNode::Expr {
            span: self.span_from(start),
            expr,
            alias,
        })
    }

    /// Parses an optional alias (AS name or just name).
    fn parse_optional_alias(&mut self) -> Result<Option<AliasNode>> {
        if self.check_keyword(Keyword::As) {
            self.advance();
        } else if !self.is_identifier_start(0) {
            return Ok(None);
        }
        let identifier = self.parse_identifier()?;
        Ok(Some(AliasNode {
            span: identifier.span,
            identifier,
        }))
    }

    /// Parses `tableName (, tableName)*`.
    fn parse_table_names(&mut self) -> Result<TableNamesNode> {
        let start = self.current().span.start;
        let mut table_names = vec![];
        loop {
            let (span, owner, name) = self.parse_qualified_name()?;
            table_names.push(TableNameNode { span, owner, name });
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        Ok(TableNamesNode {
            span: self.span_from(start),
            table_names,
        })
    }

    /// Parses an ORDER BY or GROUP BY item list.
    fn parse_order_by_items(&mut self) -> Result<Vec<OrderByItemNode>> {
        let mut items = vec![];
        loop {
            items.push(self.parse_order_by_item()?);
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        Ok(items)
    }

    /// Parses `(columnName | numberLiterals | expr) (ASC | DESC)?`.
    ///
    /// The column and number alternatives only apply when the name or
    /// number makes up the whole item.
    fn parse_order_by_item(&mut self) -> Result<OrderByItemNode> {
        let start = self.current().span.start;
        let mut column_name = None;
        let mut number_literals = None;
        let mut expr = None;

        if self.check(&TokenKind::Number) && Self::ends_order_by_item(&self.peek(1).kind) {
            number_literals = Some(self.terminal());
        } else {
            let checkpoint = self.pos;
            if self.is_identifier_start(0) {
                let (span, owner, name) = self.parse_qualified_name()?;
                if Self::ends_order_by_item(&self.current().kind) {
                    column_name = Some(ColumnNameNode { span, owner, name });
                } else {
                    self.pos = checkpoint;
                }
            }
            if column_name.is_none() {
                expr = Some(self.parse_expr(0)?);
            }
        }

        let mut asc = None;
        let mut desc = None;
        if self.check_keyword(Keyword::Asc) {
            asc = Some(self.terminal());
        } else if self.check_keyword(Keyword::Desc) {
            desc = Some(self.terminal());
        }

        Ok(OrderByItemNode {
            span: self.span_from(start),
            column_name,
            number_literals,
            expr,
            asc,
            desc,
        })
    }

    fn ends_order_by_item(kind: &TokenKind) -> bool {
        matches!(
            kind,
            TokenKind::Comma
                | TokenKind::RightParen
                | TokenKind::Semicolon
                | TokenKind::Eof
                | TokenKind::Keyword(
                    Keyword::Asc | Keyword::Desc | Keyword::Having | Keyword::Order
                )
        )
    }

    /// Parses the logical level with Pratt parsing.
    fn parse_expr(&mut self, min_bp: u8) -> Result<ExprNode> {
        let start = self.current().span.start;
        let mut lhs = self.parse_expr_prefix()?;

        loop {
            let Some((l_bp, r_bp)) = logical_binding_power(&self.current().kind) else {
                break;
            };
            if l_bp < min_bp {
                break;
            }

            let is_xor = self.check_keyword(Keyword::Xor);
            let operator = self.terminal();
            let rhs = self.parse_expr(r_bp)?;
            let span = self.span_from(start);
            lhs = if is_xor {
                ExprNode::Xor {
                    span,
                    left: Box::new(lhs),
                    right: Box::new(rhs),
                }
            } else {
                ExprNode::Logical {
                    span,
                    left: Box::new(lhs),
                    operator,
                    right: Box::new(rhs),
                }
            };
        }

        Ok(lhs)
    }

    /// Parses `NOT expr`, `(expr)` or a boolean primary.
    fn parse_expr_prefix(&mut self) -> Result<ExprNode> {
        let start = self.current().span.start;
        match self.current().kind {
            TokenKind::Keyword(Keyword::Not) | TokenKind::Bang => {
                let operator = self.terminal();
                let expr = self.parse_expr(NOT_BINDING_POWER)?;
                return Ok(ExprNode::Not {
                    span: self.span_from(start),
                    operator,
                    expr: Box::new(expr),
                });
            }
            TokenKind::LeftParen if !self.peek_is_keyword(1, Keyword::Select) => {
                if let Some(paren) = self.try_parse_paren_expr() {
                    return Ok(paren);
                }
            }
            _ => {}
        }
        Ok(ExprNode::BooleanPrimary(Box::new(
            self.parse_boolean_primary()?,
        )))
    }

    /// Tries `( expr )` as a whole logical operand; rewinds when it fails
    /// or when an operator follows the closing parenthesis.
    fn try_parse_paren_expr(&mut self) -> Option<ExprNode> {
        let checkpoint = self.pos;
        if self.rejected_parens.contains(&checkpoint) {
            return None;
        }
        let start = self.current().span.start;
        self.advance();
        if let Ok(expr) = self.parse_expr(0) {
            if self.check(&TokenKind::RightParen) {
                self.advance();
                if !Self::continues_operand(&self.current().kind) {
                    return Some(ExprNode::Paren {
                        span: self.span_from(start),
                        expr: Box::new(expr),
                    });
                }
            }
        }
        self.pos = checkpoint;
        self.rejected_parens.insert(checkpoint);
        None
    }

    /// Returns true for tokens that extend an operand below the logical
    /// level.
    fn continues_operand(kind: &TokenKind) -> bool {
        is_comparison_operator(kind)
            || bit_binding_power(kind).is_some()
            || matches!(
                kind,
                TokenKind::Keyword(
                    Keyword::Is | Keyword::In | Keyword::Between | Keyword::Like | Keyword::Not
                )
            )
    }

    /// Parses comparisons and IS tests over predicates.
    fn parse_boolean_primary(&mut self) -> Result<BooleanPrimaryNode> {
        let start = self.current().span.start;
        let mut lhs = BooleanPrimaryNode::Predicate(Box::new(self.parse_predicate()?));

        loop {
            if self.check_keyword(Keyword::Is) {
                self.advance();
                let not = if self.check_keyword(Keyword::Not) {
                    Some(self.terminal())
                } else {
                    None
                };
                let value = match self.current().as_keyword() {
                    Some(Keyword::True | Keyword::False | Keyword::Unknown | Keyword::Null) => {
                        self.terminal()
                    }
                    _ => return Err(self.unexpected("TRUE, FALSE, UNKNOWN, or NULL")),
                };
                lhs = BooleanPrimaryNode::Is {
                    span: self.span_from(start),
                    operand: Box::new(lhs),
                    not,
                    value,
                };
            } else if is_comparison_operator(&self.current().kind) {
                let operator = self.terminal();
                if matches!(
                    self.current().as_keyword(),
                    Some(Keyword::All | Keyword::Any | Keyword::Some)
                ) {
                    let quantifier = self.terminal();
                    let subquery = self.parse_subquery()?;
                    lhs = BooleanPrimaryNode::QuantifiedComparison {
                        span: self.span_from(start),
                        left: Box::new(lhs),
                        operator,
                        quantifier,
                        subquery: Box::new(subquery),
                    };
                } else {
                    let right = self.parse_predicate()?;
                    lhs = BooleanPrimaryNode::Comparison {
                        span: self.span_from(start),
                        left: Box::new(lhs),
                        operator,
                        right: Box::new(right),
                    };
                }
            } else {
                break;
            }
        }

        Ok(lhs)
    }

    /// Parses IN, BETWEEN and LIKE over a bit expression.
    fn parse_predicate(&mut self) -> Result<PredicateNode> {
        let start = self.current().span.start;
        let operand = self.parse_bit_expr(0)?;

        let not = if self.check_keyword(Keyword::Not)
            && matches!(
                self.peek(1).as_keyword(),
                Some(Keyword::In | Keyword::Between | Keyword::Like)
            ) {
            Some(self.terminal())
        } else {
            None
        };

        match self.current().as_keyword() {
            Some(Keyword::In) => {
                self.advance();
                if self.check(&TokenKind::LeftParen) && self.peek_is_keyword(1, Keyword::Select) {
                    let subquery = self.parse_subquery()?;
                    return Ok(PredicateNode::InSubquery {
                        span: self.span_from(start),
                        operand,
                        not,
                        subquery: Box::new(subquery),
                    });
                }
                let left_paren = self.expect(&TokenKind::LeftParen)?;
                let items = self.parse_expr_list()?;
                let right_paren = self.expect(&TokenKind::RightParen)?;
                Ok(PredicateNode::InList {
                    span: self.span_from(start),
                    operand,
                    not,
                    left_paren,
                    items,
                    right_paren,
                })
            }
            Some(Keyword::Between) => {
                self.advance();
                let lower = self.parse_bit_expr(0)?;
                self.expect_keyword(Keyword::And)?;
                let upper = self.parse_predicate()?;
                Ok(PredicateNode::Between {
                    span: self.span_from(start),
                    operand,
                    not,
                    lower,
                    upper: Box::new(upper),
                })
            }
            Some(Keyword::Like) => {
                self.advance();
                let pattern = self.parse_simple_expr()?;
                let escape = if self.check_keyword(Keyword::Escape) {
                    self.advance();
                    Some(self.parse_simple_expr()?)
                } else {
                    None
                };
                Ok(PredicateNode::Like {
                    span: self.span_from(start),
                    operand,
                    not,
                    pattern,
                    escape,
                })
            }
            _ => Ok(PredicateNode::BitExpr(operand)),
        }
    }

    /// Parses the bit-expression level with Pratt parsing.
    fn parse_bit_expr(&mut self, min_bp: u8) -> Result<BitExprNode> {
        let start = self.current().span.start;
        let mut lhs = BitExprNode::Simple(Box::new(self.parse_simple_expr()?));

        loop {
            let Some((l_bp, r_bp)) = bit_binding_power(&self.current().kind) else {
                break;
            };
            if l_bp < min_bp {
                break;
            }

            let operator = self.terminal();
            let rhs = self.parse_bit_expr(r_bp)?;
            lhs = BitExprNode::Binary {
                span: self.span_from(start),
                left: Box::new(lhs),
                operator,
                right: Box::new(rhs),
            };
        }

        Ok(lhs)
    }

    /// Parses a simple expression.
    fn parse_simple_expr(&mut self) -> Result<SimpleExprNode> {
        let token = self.current().clone();
        let start = token.span.start;

        match &token.kind {
            TokenKind::Question => {
                self.advance();
                Ok(SimpleExprNode::ParameterMarker(ParameterMarkerNode {
                    span: token.span,
                }))
            }

            // A sign directly before a number belongs to the literal.
            TokenKind::Minus if self.peek(1).kind == TokenKind::Number => {
                self.advance();
                self.advance();
                let span = self.span_from(start);
                let mut literals = LiteralsNode::new(span);
                literals.number_literals = Some(Terminal::new(span));
                Ok(SimpleExprNode::Literals(literals))
            }

            TokenKind::String
            | TokenKind::Number
            | TokenKind::Hexadecimal
            | TokenKind::BitValue
            | TokenKind::Keyword(Keyword::True | Keyword::False | Keyword::Null) => {
                let terminal = self.terminal();
                let mut literals = LiteralsNode::new(token.span);
                match token.kind {
                    TokenKind::String => literals.string_literals = Some(terminal),
                    TokenKind::Number => literals.number_literals = Some(terminal),
                    TokenKind::Hexadecimal => literals.hexadecimal_literals = Some(terminal),
                    TokenKind::BitValue => literals.bit_value_literals = Some(terminal),
                    TokenKind::Keyword(Keyword::Null) => {
                        literals.null_value_literals = Some(terminal);
                    }
                    _ => literals.boolean_literals = Some(terminal),
                }
                Ok(SimpleExprNode::Literals(literals))
            }

            TokenKind::Keyword(Keyword::Exists) => {
                let exists = self.terminal();
                let subquery = self.parse_subquery()?;
                Ok(SimpleExprNode::Subquery {
                    span: self.span_from(start),
                    exists: Some(exists),
                    subquery: Box::new(subquery),
                })
            }

            TokenKind::LeftParen if self.peek_is_keyword(1, Keyword::Select) => {
                let subquery = self.parse_subquery()?;
                Ok(SimpleExprNode::Subquery {
                    span: subquery.span,
                    exists: None,
                    subquery: Box::new(subquery),
                })
            }

            TokenKind::LeftParen => {
                self.advance();
                let items = self.parse_expr_list()?;
                self.expect(&TokenKind::RightParen)?;
                Ok(SimpleExprNode::Row {
                    span: self.span_from(start),
                    items,
                })
            }

            TokenKind::Keyword(Keyword::Case) => self.parse_case_expression(),

            TokenKind::Keyword(
                Keyword::Cast | Keyword::Substring | Keyword::Extract | Keyword::Trim,
            ) if self.peek(1).kind == TokenKind::LeftParen => {
                let special = self.parse_special_function()?;
                Ok(SimpleExprNode::FunctionCall(Box::new(FunctionCallNode {
                    span: special.span(),
                    aggregation_function: None,
                    special_function: Some(special),
                    regular_function: None,
                })))
            }

            _ if self.is_aggregation_start() => {
                let aggregation = self.parse_aggregation_function()?;
                Ok(SimpleExprNode::FunctionCall(Box::new(FunctionCallNode {
                    span: aggregation.span,
                    aggregation_function: Some(aggregation),
                    special_function: None,
                    regular_function: None,
                })))
            }

            _ if self.is_identifier_start(0) && self.peek(1).kind == TokenKind::LeftParen => {
                let regular = self.parse_regular_function()?;
                Ok(SimpleExprNode::FunctionCall(Box::new(FunctionCallNode {
                    span: regular.span,
                    aggregation_function: None,
                    special_function: None,
                    regular_function: Some(regular),
                })))
            }

            _ if self.is_identifier_start(0) => {
                let (span, owner, name) = self.parse_qualified_name()?;
                Ok(SimpleExprNode::ColumnName(ColumnNameNode { span, owner, name }))
            }

            kind if is_unary_operator(kind) => {
                let operator = self.terminal();
                let operand = self.parse_simple_expr()?;
                Ok(SimpleExprNode::Unary {
                    span: self.span_from(start),
                    operator,
                    operand: Box::new(operand),
                })
            }

            _ => Err(self.unexpected("expression")),
        }
    }

    /// Parses `CASE simpleExpr? (WHEN expr THEN expr)+ (ELSE expr)? END`.
    fn parse_case_expression(&mut self) -> Result<SimpleExprNode> {
        let start = self.current().span.start;
        self.expect_keyword(Keyword::Case)?;

        let operand = if self.check_keyword(Keyword::When) {
            None
        } else {
            Some(Box::new(self.parse_simple_expr()?))
        };

        let mut branches = vec![];
        while self.check_keyword(Keyword::When) {
            let branch_start = self.current().span.start;
            self.advance();
            let condition = self.parse_expr(0)?;
            self.expect_keyword(Keyword::Then)?;
            let result = self.parse_expr(0)?;
            branches.push(CaseWhenNode {
                span: self.span_from(branch_start),
                condition,
                result,
            });
        }
        if branches.is_empty() {
            return Err(self.unexpected("WHEN"));
        }

        let otherwise = if self.check_keyword(Keyword::Else) {
            self.advance();
            Some(Box::new(self.parse_expr(0)?))
        } else {
            None
        };

        self.expect_keyword(Keyword::End)?;

        Ok(SimpleExprNode::Case {
            span: self.span_from(start),
            operand,
            branches,
            otherwise,
        })
    }

    fn is_aggregation_start(&self) -> bool {
        if self.peek(1).kind != TokenKind::LeftParen {
            return false;
        }
        let token = self.current();
        match token.kind {
            TokenKind::Keyword(
                Keyword::Count | Keyword::Sum | Keyword::Avg | Keyword::Max | Keyword::Min,
            ) => true,
            TokenKind::Identifier => {
                let name = token.span.slice(self.source);
                IDENTIFIER_AGGREGATES
                    .iter()
                    .any(|aggregate| aggregate.eq_ignore_ascii_case(name))
            }
            _ => false,
        }
    }

    /// Parses `name ( DISTINCT? (expr (, expr)* | *)? )`.
    fn parse_aggregation_function(&mut self) -> Result<AggregationFunctionNode> {
        let start = self.current().span.start;
        let name = self.terminal();
        let left_paren = self.expect(&TokenKind::LeftParen)?;
        let distinct = if self.check_keyword(Keyword::Distinct) {
            Some(self.terminal())
        } else {
            None
        };

        let mut arguments = vec![];
        if self.check(&TokenKind::Star) {
            arguments.push(AggregationArgument::Asterisk(self.terminal()));
        } else if !self.check(&TokenKind::RightParen) {
            loop {
                arguments.push(AggregationArgument::Expr(self.parse_expr(0)?));
                if !self.check(&TokenKind::Comma) {
                    break;
                }
                arguments.push(AggregationArgument::Comma(self.terminal()));
            }
        }

        let right_paren = self.expect(&TokenKind::RightParen)?;
        Ok(AggregationFunctionNode {
            span: self.span_from(start),
            name,
            left_paren,
            distinct,
            arguments,
            right_paren,
        })
    }

    /// Parses CAST, SUBSTRING, EXTRACT and TRIM.
    fn parse_special_function(&mut self) -> Result<SpecialFunctionNode> {
        let start = self.current().span.start;
        let Some(keyword) = self.current().as_keyword() else {
            return Err(self.unexpected("special function"));
        };
        self.advance();
        self.expect(&TokenKind::LeftParen)?;

        let special = match keyword {
            Keyword::Cast => {
                let expr = self.parse_expr(0)?;
                self.expect_keyword(Keyword::As)?;
                let data_type = self.parse_data_type()?;
                self.expect(&TokenKind::RightParen)?;
                SpecialFunctionNode::Cast(CastFunctionNode {
                    span: self.span_from(start),
                    expr,
                    data_type,
                })
            }
            Keyword::Substring => {
                let mut arguments = vec![self.parse_expr(0)?];
                if self.check_keyword(Keyword::From) || self.check(&TokenKind::Comma) {
                    self.advance();
                    arguments.push(self.parse_expr(0)?);
                    if self.check_keyword(Keyword::For) || self.check(&TokenKind::Comma) {
                        self.advance();
                        arguments.push(self.parse_expr(0)?);
                    }
                }
                self.expect(&TokenKind::RightParen)?;
                SpecialFunctionNode::Substring {
                    span: self.span_from(start),
                    arguments,
                }
            }
            Keyword::Extract => {
                let field = self.parse_identifier()?;
                self.expect_keyword(Keyword::From)?;
                let source = self.parse_expr(0)?;
                self.expect(&TokenKind::RightParen)?;
                SpecialFunctionNode::Extract {
                    span: self.span_from(start),
                    field,
                    source,
                }
            }
            Keyword::Trim => {
                if matches!(
                    self.current().as_keyword(),
                    Some(Keyword::Leading | Keyword::Trailing | Keyword::Both)
                ) {
                    self.advance();
                }
                let mut arguments = vec![];
                if !self.check_keyword(Keyword::From) && !self.check(&TokenKind::RightParen) {
                    arguments.push(self.parse_expr(0)?);
                }
                if self.check_keyword(Keyword::From) {
                    self.advance();
                    arguments.push(self.parse_expr(0)?);
                }
                self.expect(&TokenKind::RightParen)?;
                SpecialFunctionNode::Trim {
                    span: self.span_from(start),
                    arguments,
                }
            }
            _ => return Err(self.unexpected("special function")),
        };
        Ok(special)
    }

    /// Parses `dataTypeName (( length (, scale)? ))?`.
    fn parse_data_type(&mut self) -> Result<DataTypeNode> {
        let start = self.current().span.start;
        if self.current().kind != TokenKind::Identifier {
            return Err(self.unexpected("data type"));
        }
        // Multi-word names such as DOUBLE PRECISION.
        while self.current().kind == TokenKind::Identifier {
            self.advance();
        }
        let name = DataTypeNameNode {
            span: self.span_from(start),
        };

        if self.check(&TokenKind::LeftParen) {
            self.advance();
            self.expect(&TokenKind::Number)?;
            if self.check(&TokenKind::Comma) {
                self.advance();
                self.expect(&TokenKind::Number)?;
            }
            self.expect(&TokenKind::RightParen)?;
        }

        Ok(DataTypeNode {
            span: self.span_from(start),
            name,
        })
    }

    /// Parses `identifier ( (expr (, expr)* | *)? )`.
    fn parse_regular_function(&mut self) -> Result<RegularFunctionNode> {
        let start = self.current().span.start;
        let name = self.parse_identifier()?;
        self.expect(&TokenKind::LeftParen)?;

        let mut arguments = vec![];
        let mut asterisk = None;
        if self.check(&TokenKind::Star) {
            asterisk = Some(self.terminal());
        } else if !self.check(&TokenKind::RightParen) {
            arguments = self.parse_expr_list()?;
        }

        self.expect(&TokenKind::RightParen)?;
        Ok(RegularFunctionNode {
            span: self.span_from(start),
            name,
            arguments,
            asterisk,
        })
    }

    /// Parses `( select )`.
    fn parse_subquery(&mut self) -> Result<SubqueryNode> {
        let start = self.current().span.start;
        let left_paren = self.expect(&TokenKind::LeftParen)?;
        let select = self.parse_select()?;
        let right_paren = self.expect(&TokenKind::RightParen)?;
        Ok(SubqueryNode {
            span: self.span_from(start),
            left_paren,
            select: Box::new(select),
            right_paren,
        })
    }

    /// Parses a comma-separated expression list.
    fn parse_expr_list(&mut self) -> Result<Vec<ExprNode>> {
        let mut exprs = vec![self.parse_expr(0)?];
        while self.check(&TokenKind::Comma) {
            self.advance();
            exprs.push(self.parse_expr(0)?);
        }
        Ok(exprs)
    }

    /// Parses `(owner .)? name`.
    fn parse_qualified_name(&mut self) -> Result<(Span, Option<OwnerNode>, IdentifierNode)> {
        let start = self.current().span.start;
        let first = self.parse_identifier()?;
        if self.check(&TokenKind::Dot) && self.is_identifier_start(1) {
            self.advance();
            let name = self.parse_identifier()?;
            let owner = OwnerNode {
                span: first.span,
                identifier: first,
            };
            return Ok((self.span_from(start), Some(owner), name));
        }
        Ok((first.span, None, first))
    }

    /// Parses an identifier, accepting non-reserved keywords.
    fn parse_identifier(&mut self) -> Result<IdentifierNode> {
        let token = self.current().clone();
        match token.kind {
            TokenKind::Identifier | TokenKind::QuotedIdentifier => {
                self.advance();
                Ok(IdentifierNode {
                    span: token.span,
                    unreserved_word: None,
                })
            }
            TokenKind::Keyword(keyword) if keyword.is_unreserved() => {
                let unreserved_word = self.terminal();
                Ok(IdentifierNode {
                    span: token.span,
                    unreserved_word: Some(unreserved_word),
                })
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    // Token helpers

    fn current(&self) -> &Token {
        self.peek(0)
    }

    /// Returns the token `offset` positions ahead, clamped to EOF.
    fn peek(&self, offset: usize) -> &Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[(self.pos + offset).min(last)]
    }

    fn peek_is_keyword(&self, offset: usize, keyword: Keyword) -> bool {
        self.peek(offset).as_keyword() == Some(keyword)
    }

    fn is_identifier_start(&self, offset: usize) -> bool {
        match &self.peek(offset).kind {
            TokenKind::Identifier | TokenKind::QuotedIdentifier => true,
            TokenKind::Keyword(keyword) => keyword.is_unreserved(),
            _ => false,
        }
    }

    /// Advances to the next token, never past EOF.
    fn advance(&mut self) {
        if !self.current().is_eof() {
            self.pos += 1;
        }
    }

    /// Consumes the current token as a terminal.
    fn terminal(&mut self) -> Terminal {
        let span = self.current().span;
        self.advance();
        Terminal::new(span)
    }

    /// Checks if the current token matches the given kind.
    fn check(&self, kind: &TokenKind) -> bool {
        &self.current().kind == kind
    }

    /// Checks if the current token is the given keyword.
    fn check_keyword(&self, keyword: Keyword) -> bool {
        self.current().as_keyword() == Some(keyword)
    }

    /// Expects the current token to be of the given kind.
    fn expect(&mut self, kind: &TokenKind) -> Result<Terminal> {
        if self.check(kind) {
            Ok(self.terminal())
        } else {
            Err(self.unexpected(format!("{kind:?}")))
        }
    }

    /// Expects the current token to be the given keyword.
    fn expect_keyword(&mut self, keyword: Keyword) -> Result<Terminal> {
        if self.check_keyword(keyword) {
            Ok(self.terminal())
        } else {
            Err(self.unexpected(keyword.as_str()))
        }
    }

    /// Returns the span from `start` to the end of the last consumed token.
    fn span_from(&self, start: usize) -> Span {
        let stop = self
            .pos
            .checked_sub(1)
            .map_or(start, |previous| self.tokens[previous].span.stop);
        Span::new(start, stop.max(start))
    }

    fn unexpected(&self, expected: impl Into<String>) -> SyntaxError {
        let token = self.current();
        match &token.kind {
            TokenKind::Eof => SyntaxError::unexpected_eof(expected, token.span),
            TokenKind::Error(message) => SyntaxError::new(message.clone(), token.span),
            kind => SyntaxError::unexpected(expected, kind.clone(), token.span),
        }
    }
}
