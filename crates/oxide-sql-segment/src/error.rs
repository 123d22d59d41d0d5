//! Lowering error types.

use core::fmt;

use crate::span::Span;

/// Grammar node kinds, as named by the SQL-92 grammar.
///
/// Used to report which node broke a structural invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    ParameterMarker,
    Literals,
    Identifier,
    SchemaName,
    TableName,
    ColumnName,
    TableNames,
    ColumnNames,
    Expr,
    BooleanPrimary,
    Predicate,
    BitExpr,
    SimpleExpr,
    FunctionCall,
    AggregationFunction,
    SpecialFunction,
    CastFunction,
    RegularFunction,
    DataTypeName,
    OrderByClause,
    OrderByItem,
    Subquery,
    Select,
}

impl NodeKind {
    /// Returns the grammar rule name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ParameterMarker => "parameterMarker",
            Self::Literals => "literals",
            Self::Identifier => "identifier",
            Self::SchemaName => "schemaName",
            Self::TableName => "tableName",
            Self::ColumnName => "columnName",
            Self::TableNames => "tableNames",
            Self::ColumnNames => "columnNames",
            Self::Expr => "expr",
            Self::BooleanPrimary => "booleanPrimary",
            Self::Predicate => "predicate",
            Self::BitExpr => "bitExpr",
            Self::SimpleExpr => "simpleExpr",
            Self::FunctionCall => "functionCall",
            Self::AggregationFunction => "aggregationFunction",
            Self::SpecialFunction => "specialFunction",
            Self::CastFunction => "castFunction",
            Self::RegularFunction => "regularFunction",
            Self::DataTypeName => "dataTypeName",
            Self::OrderByClause => "orderByClause",
            Self::OrderByItem => "orderByItem",
            Self::Subquery => "subquery",
            Self::Select => "select",
        }
    }

    /// Returns the named child slots the lowering inspects for this node
    /// kind, in the priority order they are checked.
    #[must_use]
    pub const fn slots(&self) -> &'static [&'static str] {
        match self {
            Self::ParameterMarker | Self::DataTypeName => &[],
            Self::Literals => &[
                "stringLiterals",
                "numberLiterals",
                "hexadecimalLiterals",
                "bitValueLiterals",
                "booleanLiterals",
                "nullValueLiterals",
            ],
            Self::Identifier => &["unreservedWord"],
            Self::SchemaName => &["identifier"],
            Self::TableName | Self::ColumnName => &["owner", "name"],
            Self::TableNames => &["tableName"],
            Self::ColumnNames => &["columnName"],
            Self::Expr => &["booleanPrimary", "logicalOperator", "expr"],
            Self::BooleanPrimary => &["subquery", "comparisonOperator", "predicate"],
            Self::Predicate => &[
                "subquery",
                "IN",
                "BETWEEN",
                "NOT",
                "bitExpr",
                "expr",
                "simpleExpr",
                "predicate",
            ],
            Self::BitExpr => &["simpleExpr", "bitExpr"],
            Self::SimpleExpr => &[
                "subquery",
                "parameterMarker",
                "literals",
                "functionCall",
                "columnName",
            ],
            Self::FunctionCall => &["aggregationFunction", "specialFunction", "regularFunction"],
            Self::AggregationFunction => &["aggregationFunctionName", "distinct", "expr"],
            Self::SpecialFunction => &["castFunction"],
            Self::CastFunction => &["expr", "dataType"],
            Self::RegularFunction => &["expr"],
            Self::OrderByClause => &["orderByItem"],
            Self::OrderByItem => &["columnName", "numberLiterals", "expr", "DESC"],
            Self::Subquery => &["select"],
            Self::Select => &[
                "projections",
                "tableNames",
                "whereClause",
                "groupByClause",
                "havingClause",
                "orderByClause",
            ],
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised when a grammar tree breaks an invariant the lowering
/// relies on. All of them abort the statement being lowered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LowerError {
    /// A literals node with none of its alternatives populated.
    #[error("Malformed literal at {span}: expected one of {}", NodeKind::Literals.slots().join(", "))]
    MalformedLiteral {
        /// Location of the literals node.
        span: Span,
    },

    /// A node with none of its mandatory alternatives populated.
    #[error("Structural violation in {kind} at {span}: expected one of {}", .kind.slots().join(", "))]
    StructuralViolation {
        /// The offending node kind.
        kind: NodeKind,
        /// Location of the node.
        span: Span,
    },

    /// An ORDER BY ordinal that is not a representable integer.
    #[error("Invalid ordinal position '{text}' at {span}")]
    InvalidOrdinal {
        /// The literal text.
        text: String,
        /// Location of the literal.
        span: Span,
    },
}

/// Result type for lowering operations.
pub type Result<T> = std::result::Result<T, LowerError>;
