//! Closed keyword sets shared by the segment model.

use serde::Serialize;

/// Aggregate functions recognised by the function classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AggregationType {
    Max,
    Min,
    Sum,
    Count,
    Avg,
    BitXor,
    Stddev,
    Variance,
}

impl AggregationType {
    /// Looks up an aggregate by function name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "MAX" => Some(Self::Max),
            "MIN" => Some(Self::Min),
            "SUM" => Some(Self::Sum),
            "COUNT" => Some(Self::Count),
            "AVG" => Some(Self::Avg),
            "BIT_XOR" => Some(Self::BitXor),
            "STDDEV" => Some(Self::Stddev),
            "VARIANCE" => Some(Self::Variance),
            _ => None,
        }
    }

    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Max => "MAX",
            Self::Min => "MIN",
            Self::Sum => "SUM",
            Self::Count => "COUNT",
            Self::Avg => "AVG",
            Self::BitXor => "BIT_XOR",
            Self::Stddev => "STDDEV",
            Self::Variance => "VARIANCE",
        }
    }
}

/// Order direction for ORDER BY and GROUP BY items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum OrderDirection {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl OrderDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Boolean connective joining two lowered expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogicalOperator {
    /// `AND` or `&&`.
    And,
    /// `OR` or `||`.
    Or,
}

impl LogicalOperator {
    /// Parses the operator token text (case-insensitive).
    #[must_use]
    pub fn from_text(text: &str) -> Option<Self> {
        match text.to_ascii_uppercase().as_str() {
            "AND" | "&&" => Some(Self::And),
            "OR" | "||" => Some(Self::Or),
            _ => None,
        }
    }

    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}
