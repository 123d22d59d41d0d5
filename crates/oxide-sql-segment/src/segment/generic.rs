//! Names, owners and aliases.

use serde::Serialize;

use crate::span::Span;
use crate::value::IdentifierValue;

/// The qualifier in `owner.name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerSegment {
    pub span: Span,
    pub identifier: IdentifierValue,
}

/// A projection alias (`AS name`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasSegment {
    pub span: Span,
    pub identifier: IdentifierValue,
}

/// The name part of a table reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableNameSegment {
    pub span: Span,
    pub identifier: IdentifierValue,
}

/// A table reference: a name with an optional owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimpleTableSegment {
    pub table_name: TableNameSegment,
    pub owner: Option<OwnerSegment>,
}

impl SimpleTableSegment {
    /// Returns the span of the whole reference, owner included.
    #[must_use]
    pub fn span(&self) -> Span {
        self.owner
            .as_ref()
            .map_or(self.table_name.span, |owner| owner.span.merge(self.table_name.span))
    }
}

/// A column reference: a name with an optional owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSegment {
    /// Span of the whole reference, owner included.
    pub span: Span,
    pub identifier: IdentifierValue,
    pub owner: Option<OwnerSegment>,
}

impl ColumnSegment {
    /// Returns the column name, qualified by its owner when present.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.owner {
            Some(owner) => format!("{}.{}", owner.identifier.value, self.identifier.value),
            None => self.identifier.value.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_name() {
        let column = ColumnSegment {
            span: Span::new(0, 2),
            identifier: IdentifierValue::new("id"),
            owner: Some(OwnerSegment {
                span: Span::new(0, 0),
                identifier: IdentifierValue::new("u"),
            }),
        };
        assert_eq!(column.qualified_name(), "u.id");
    }

    #[test]
    fn test_table_span_includes_owner() {
        let table = SimpleTableSegment {
            table_name: TableNameSegment {
                span: Span::new(4, 8),
                identifier: IdentifierValue::new("users"),
            },
            owner: Some(OwnerSegment {
                span: Span::new(0, 2),
                identifier: IdentifierValue::new("app"),
            }),
        };
        assert_eq!(table.span(), Span::new(0, 8));
    }
}
