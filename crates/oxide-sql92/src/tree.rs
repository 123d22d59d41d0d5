//! The SQL-92 grammar tree.
//!
//! These types are the concrete syntax the lowering consumes. Each type
//! corresponds to one grammar rule; rules with several alternatives are
//! closed enums, and the few rules that expose independent optional slots
//! (`literals`, `functionCall`, `orderByItem`) keep those slots as
//! `Option` fields and classify them through an `alternative()` method
//! that fixes the priority order.
//!
//! Every node carries the inclusive span of the tokens it matched. Node
//! text is always the source slice under that span.

use oxide_sql_segment::Span;

/// Common behaviour of grammar nodes.
pub trait TreeNode {
    /// Returns the span of the tokens the node matched.
    fn span(&self) -> Span;

    /// Returns the source text of the node.
    fn text<'s>(&self, source: &'s str) -> &'s str {
        self.span().slice(source)
    }
}

macro_rules! spanned_nodes {
    ($($node:ty),* $(,)?) => {
        $(
            impl TreeNode for $node {
                fn span(&self) -> Span {
                    self.span
                }
            }
        )*
    };
}

/// A single matched token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Terminal {
    pub span: Span,
}

impl Terminal {
    #[must_use]
    pub const fn new(span: Span) -> Self {
        Self { span }
    }
}

/// `?`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterMarkerNode {
    pub span: Span,
}

/// `literals: stringLiterals | numberLiterals | hexadecimalLiterals
///  | bitValueLiterals | booleanLiterals | nullValueLiterals`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralsNode {
    pub span: Span,
    pub string_literals: Option<Terminal>,
    pub number_literals: Option<Terminal>,
    pub hexadecimal_literals: Option<Terminal>,
    pub bit_value_literals: Option<Terminal>,
    pub boolean_literals: Option<Terminal>,
    pub null_value_literals: Option<Terminal>,
}

/// The populated alternative of a [`LiteralsNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralAlternative {
    String(Terminal),
    Number(Terminal),
    Hexadecimal(Terminal),
    BitValue(Terminal),
    Boolean(Terminal),
    Null(Terminal),
}

impl LiteralsNode {
    /// Creates a literals node with no alternative populated.
    #[must_use]
    pub const fn new(span: Span) -> Self {
        Self {
            span,
            string_literals: None,
            number_literals: None,
            hexadecimal_literals: None,
            bit_value_literals: None,
            boolean_literals: None,
            null_value_literals: None,
        }
    }

    /// Returns the first populated alternative in grammar order.
    #[must_use]
    pub fn alternative(&self) -> Option<LiteralAlternative> {
        self.string_literals
            .map(LiteralAlternative::String)
            .or_else(|| self.number_literals.map(LiteralAlternative::Number))
            .or_else(|| self.hexadecimal_literals.map(LiteralAlternative::Hexadecimal))
            .or_else(|| self.bit_value_literals.map(LiteralAlternative::BitValue))
            .or_else(|| self.boolean_literals.map(LiteralAlternative::Boolean))
            .or_else(|| self.null_value_literals.map(LiteralAlternative::Null))
    }
}

/// `identifier: IDENTIFIER_ | unreservedWord`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierNode {
    pub span: Span,
    /// Set when the identifier was written as a non-reserved keyword.
    pub unreserved_word: Option<Terminal>,
}

/// `owner: identifier`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerNode {
    pub span: Span,
    pub identifier: IdentifierNode,
}

/// `schemaName: identifier`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaNameNode {
    pub span: Span,
    pub identifier: IdentifierNode,
}

/// `tableName: (owner DOT_)? name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNameNode {
    pub span: Span,
    pub owner: Option<OwnerNode>,
    pub name: IdentifierNode,
}

/// `columnName: (owner DOT_)? name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNameNode {
    pub span: Span,
    pub owner: Option<OwnerNode>,
    pub name: IdentifierNode,
}

/// `tableNames: tableName (COMMA_ tableName)*`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNamesNode {
    pub span: Span,
    pub table_names: Vec<TableNameNode>,
}

/// `columnNames: LP_ columnName (COMMA_ columnName)* RP_`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNamesNode {
    pub span: Span,
    pub column_names: Vec<ColumnNameNode>,
}

/// `expr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprNode {
    /// `expr (AND | && | OR | ||) expr`
    Logical {
        span: Span,
        left: Box<ExprNode>,
        operator: Terminal,
        right: Box<ExprNode>,
    },
    /// `expr XOR expr`
    Xor {
        span: Span,
        left: Box<ExprNode>,
        right: Box<ExprNode>,
    },
    /// `(NOT | !) expr`
    Not {
        span: Span,
        operator: Terminal,
        expr: Box<ExprNode>,
    },
    /// `LP_ expr RP_`
    Paren { span: Span, expr: Box<ExprNode> },
    BooleanPrimary(Box<BooleanPrimaryNode>),
}

/// `booleanPrimary`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BooleanPrimaryNode {
    /// `booleanPrimary IS NOT? (TRUE | FALSE | UNKNOWN | NULL)`
    Is {
        span: Span,
        operand: Box<BooleanPrimaryNode>,
        not: Option<Terminal>,
        value: Terminal,
    },
    /// `booleanPrimary (comparisonOperator | SAFE_EQ_) predicate`
    Comparison {
        span: Span,
        left: Box<BooleanPrimaryNode>,
        operator: Terminal,
        right: Box<PredicateNode>,
    },
    /// `booleanPrimary comparisonOperator (ALL | ANY | SOME) subquery`
    QuantifiedComparison {
        span: Span,
        left: Box<BooleanPrimaryNode>,
        operator: Terminal,
        quantifier: Terminal,
        subquery: Box<SubqueryNode>,
    },
    Predicate(Box<PredicateNode>),
}

/// `predicate`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredicateNode {
    /// `bitExpr NOT? IN subquery`
    InSubquery {
        span: Span,
        operand: BitExprNode,
        not: Option<Terminal>,
        subquery: Box<SubqueryNode>,
    },
    /// `bitExpr NOT? IN LP_ expr (COMMA_ expr)* RP_`
    InList {
        span: Span,
        operand: BitExprNode,
        not: Option<Terminal>,
        left_paren: Terminal,
        items: Vec<ExprNode>,
        right_paren: Terminal,
    },
    /// `bitExpr NOT? BETWEEN bitExpr AND predicate`
    Between {
        span: Span,
        operand: BitExprNode,
        not: Option<Terminal>,
        lower: BitExprNode,
        upper: Box<PredicateNode>,
    },
    /// `bitExpr NOT? LIKE simpleExpr (ESCAPE simpleExpr)?`
    Like {
        span: Span,
        operand: BitExprNode,
        not: Option<Terminal>,
        pattern: SimpleExprNode,
        escape: Option<SimpleExprNode>,
    },
    BitExpr(BitExprNode),
}

/// `bitExpr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitExprNode {
    /// `bitExpr (| & << >> + - * / % DIV MOD ^) bitExpr`
    Binary {
        span: Span,
        left: Box<BitExprNode>,
        operator: Terminal,
        right: Box<BitExprNode>,
    },
    Simple(Box<SimpleExprNode>),
}

/// One `WHEN ... THEN ...` branch of a CASE expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseWhenNode {
    pub span: Span,
    pub condition: ExprNode,
    pub result: ExprNode,
}

/// `simpleExpr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleExprNode {
    /// `EXISTS? subquery`
    Subquery {
        span: Span,
        exists: Option<Terminal>,
        subquery: Box<SubqueryNode>,
    },
    ParameterMarker(ParameterMarkerNode),
    Literals(LiteralsNode),
    FunctionCall(Box<FunctionCallNode>),
    ColumnName(ColumnNameNode),
    /// `(+ | - | ~ | ! | NOT) simpleExpr`
    Unary {
        span: Span,
        operator: Terminal,
        operand: Box<SimpleExprNode>,
    },
    /// `LP_ expr (COMMA_ expr)* RP_`
    Row { span: Span, items: Vec<ExprNode> },
    /// `CASE simpleExpr? caseWhen+ (ELSE expr)? END`
    Case {
        span: Span,
        operand: Option<Box<SimpleExprNode>>,
        branches: Vec<CaseWhenNode>,
        otherwise: Option<Box<ExprNode>>,
    },
}

/// `functionCall: aggregationFunction | specialFunction | regularFunction`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCallNode {
    pub span: Span,
    pub aggregation_function: Option<AggregationFunctionNode>,
    pub special_function: Option<SpecialFunctionNode>,
    pub regular_function: Option<RegularFunctionNode>,
}

/// The populated alternative of a [`FunctionCallNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionAlternative<'n> {
    Aggregation(&'n AggregationFunctionNode),
    Special(&'n SpecialFunctionNode),
    Regular(&'n RegularFunctionNode),
}

impl FunctionCallNode {
    /// Returns the first populated alternative in grammar order.
    #[must_use]
    pub fn alternative(&self) -> Option<FunctionAlternative<'_>> {
        self.aggregation_function
            .as_ref()
            .map(FunctionAlternative::Aggregation)
            .or_else(|| self.special_function.as_ref().map(FunctionAlternative::Special))
            .or_else(|| self.regular_function.as_ref().map(FunctionAlternative::Regular))
    }
}

/// A positional child of an aggregation call after the optional DISTINCT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregationArgument {
    Expr(ExprNode),
    Asterisk(Terminal),
    Comma(Terminal),
}

impl TreeNode for AggregationArgument {
    fn span(&self) -> Span {
        match self {
            Self::Expr(expr) => expr.span(),
            Self::Asterisk(terminal) | Self::Comma(terminal) => terminal.span,
        }
    }
}

/// `aggregationFunction: aggregationFunctionName LP_ distinct?
///  (expr (COMMA_ expr)* | ASTERISK_)? RP_`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationFunctionNode {
    pub span: Span,
    pub name: Terminal,
    pub left_paren: Terminal,
    pub distinct: Option<Terminal>,
    pub arguments: Vec<AggregationArgument>,
    pub right_paren: Terminal,
}

impl AggregationFunctionNode {
    /// Returns the spans of the node's children in grammar order: name,
    /// `(`, `DISTINCT` when present, each argument and comma, `)`.
    #[must_use]
    pub fn positional_children(&self) -> Vec<Span> {
        let mut children = vec![self.name.span, self.left_paren.span];
        children.extend(self.distinct.map(|distinct| distinct.span));
        children.extend(self.arguments.iter().map(TreeNode::span));
        children.push(self.right_paren.span);
        children
    }

    /// Returns the argument expressions, skipping `*` and commas.
    pub fn expressions(&self) -> impl Iterator<Item = &ExprNode> {
        self.arguments.iter().filter_map(|argument| match argument {
            AggregationArgument::Expr(expr) => Some(expr),
            AggregationArgument::Asterisk(_) | AggregationArgument::Comma(_) => None,
        })
    }
}

/// `dataTypeName`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTypeNameNode {
    pub span: Span,
}

/// `dataType: dataTypeName dataTypeLength?`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTypeNode {
    pub span: Span,
    pub name: DataTypeNameNode,
}

/// `castFunction: CAST LP_ expr AS dataType RP_`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastFunctionNode {
    pub span: Span,
    pub expr: ExprNode,
    pub data_type: DataTypeNode,
}

/// `specialFunction`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialFunctionNode {
    Cast(CastFunctionNode),
    /// `SUBSTRING LP_ expr ((FROM | COMMA_) expr ((FOR | COMMA_) expr)?)? RP_`
    Substring { span: Span, arguments: Vec<ExprNode> },
    /// `EXTRACT LP_ identifier FROM expr RP_`
    Extract {
        span: Span,
        field: IdentifierNode,
        source: ExprNode,
    },
    /// `TRIM LP_ (LEADING | TRAILING | BOTH)? expr? FROM? expr? RP_`
    Trim { span: Span, arguments: Vec<ExprNode> },
}

/// `regularFunction: identifier LP_ (expr (COMMA_ expr)* | ASTERISK_)? RP_`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegularFunctionNode {
    pub span: Span,
    pub name: IdentifierNode,
    pub arguments: Vec<ExprNode>,
    pub asterisk: Option<Terminal>,
}

/// `orderByItem: (columnName | numberLiterals | expr) (ASC | DESC)?`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderByItemNode {
    pub span: Span,
    pub column_name: Option<ColumnNameNode>,
    pub number_literals: Option<Terminal>,
    pub expr: Option<ExprNode>,
    pub asc: Option<Terminal>,
    pub desc: Option<Terminal>,
}

/// The populated alternative of an [`OrderByItemNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderByItemAlternative<'n> {
    ColumnName(&'n ColumnNameNode),
    NumberLiterals(Terminal),
    Expr(&'n ExprNode),
}

impl OrderByItemNode {
    /// Returns the first populated alternative in grammar order.
    #[must_use]
    pub fn alternative(&self) -> Option<OrderByItemAlternative<'_>> {
        self.column_name
            .as_ref()
            .map(OrderByItemAlternative::ColumnName)
            .or_else(|| self.number_literals.map(OrderByItemAlternative::NumberLiterals))
            .or_else(|| self.expr.as_ref().map(OrderByItemAlternative::Expr))
    }
}

/// `orderByClause: ORDER BY orderByItem (COMMA_ orderByItem)*`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderByClauseNode {
    pub span: Span,
    pub items: Vec<OrderByItemNode>,
}

/// `groupByClause: GROUP BY orderByItem (COMMA_ orderByItem)*`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupByClauseNode {
    pub span: Span,
    pub items: Vec<OrderByItemNode>,
}

/// `whereClause: WHERE expr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhereClauseNode {
    pub span: Span,
    pub expr: ExprNode,
}

/// `havingClause: HAVING expr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HavingClauseNode {
    pub span: Span,
    pub expr: ExprNode,
}

/// `alias: AS? identifier`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasNode {
    pub span: Span,
    pub identifier: IdentifierNode,
}

/// `projection`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectionNode {
    /// `*`
    Shorthand(Terminal),
    /// `owner DOT_ ASTERISK_`
    QualifiedShorthand { span: Span, owner: OwnerNode },
    /// `expr alias?`
    Expr {
        span: Span,
        expr: ExprNode,
        alias: Option<AliasNode>,
    },
}

/// `projections: projection (COMMA_ projection)*`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionsNode {
    pub span: Span,
    pub items: Vec<ProjectionNode>,
}

/// `select: SELECT DISTINCT? projections fromClause? whereClause?
///  groupByClause? havingClause? orderByClause?`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectNode {
    pub span: Span,
    pub distinct: Option<Terminal>,
    pub projections: ProjectionsNode,
    pub from: Option<TableNamesNode>,
    pub where_clause: Option<WhereClauseNode>,
    pub group_by: Option<GroupByClauseNode>,
    pub having: Option<HavingClauseNode>,
    pub order_by: Option<OrderByClauseNode>,
}

/// `subquery: LP_ select RP_`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubqueryNode {
    pub span: Span,
    pub left_paren: Terminal,
    pub select: Box<SelectNode>,
    pub right_paren: Terminal,
}

spanned_nodes!(
    Terminal,
    ParameterMarkerNode,
    LiteralsNode,
    IdentifierNode,
    OwnerNode,
    SchemaNameNode,
    TableNameNode,
    ColumnNameNode,
    TableNamesNode,
    ColumnNamesNode,
    CaseWhenNode,
    FunctionCallNode,
    AggregationFunctionNode,
    DataTypeNameNode,
    DataTypeNode,
    CastFunctionNode,
    RegularFunctionNode,
    OrderByItemNode,
    OrderByClauseNode,
    GroupByClauseNode,
    WhereClauseNode,
    HavingClauseNode,
    AliasNode,
    ProjectionsNode,
    SelectNode,
    SubqueryNode,
);

impl TreeNode for ExprNode {
    fn span(&self) -> Span {
        match self {
            Self::Logical { span, .. }
            | Self::Xor { span, .. }
            | Self::Not { span, .. }
            | Self::Paren { span, .. } => *span,
            Self::BooleanPrimary(primary) => primary.span(),
        }
    }
}

impl TreeNode for BooleanPrimaryNode {
    fn span(&self) -> Span {
        match self {
            Self::Is { span, .. }
            | Self::Comparison { span, .. }
            | Self::QuantifiedComparison { span, .. } => *span,
            Self::Predicate(predicate) => predicate.span(),
        }
    }
}

impl TreeNode for PredicateNode {
    fn span(&self) -> Span {
        match self {
            Self::InSubquery { span, .. }
            | Self::InList { span, .. }
            | Self::Between { span, .. }
            | Self::Like { span, .. } => *span,
            Self::BitExpr(bit_expr) => bit_expr.span(),
        }
    }
}

impl TreeNode for BitExprNode {
    fn span(&self) -> Span {
        match self {
            Self::Binary { span, .. } => *span,
            Self::Simple(simple) => simple.span(),
        }
    }
}

impl TreeNode for SimpleExprNode {
    fn span(&self) -> Span {
        match self {
            Self::Subquery { span, .. }
            | Self::Unary { span, .. }
            | Self::Row { span, .. }
            | Self::Case { span, .. } => *span,
            Self::ParameterMarker(marker) => marker.span,
            Self::Literals(literals) => literals.span,
            Self::FunctionCall(function) => function.span,
            Self::ColumnName(column) => column.span,
        }
    }
}

impl TreeNode for SpecialFunctionNode {
    fn span(&self) -> Span {
        match self {
            Self::Cast(cast) => cast.span,
            Self::Substring { span, .. } | Self::Extract { span, .. } | Self::Trim { span, .. } => {
                *span
            }
        }
    }
}

impl TreeNode for ProjectionNode {
    fn span(&self) -> Span {
        match self {
            Self::Shorthand(terminal) => terminal.span,
            Self::QualifiedShorthand { span, .. } | Self::Expr { span, .. } => *span,
        }
    }
}
