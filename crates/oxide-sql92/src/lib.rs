//! # oxide-sql92
//!
//! Lowers SQL-92 grammar trees into the position-annotated segments of
//! [`oxide_sql_segment`].
//!
//! The crate has three layers:
//!
//! - [`tree`]: the grammar tree node types, one per grammar rule.
//! - [`parser`]: a lexer and recursive descent builder that produce those
//!   trees from SQL text.
//! - [`lower`]: [`Sql92Lowerer`], which walks a tree and classifies every
//!   construct as an expression, predicate, projection or reference.
//!
//! ```rust
//! use oxide_sql_segment::segment::PredicateRightValue;
//! use oxide_sql_segment::Segment;
//!
//! let sql = "SELECT name FROM users WHERE id = ?";
//! let statement = oxide_sql92::lower(sql).unwrap();
//!
//! let Some(Segment::Predicate(predicate)) = statement.where_segment.map(|w| w.expr) else {
//!     panic!("Expected a predicate");
//! };
//! assert_eq!(predicate.column.identifier.value, "id");
//! assert!(matches!(predicate.right_value, PredicateRightValue::Compare { .. }));
//! assert_eq!(statement.parameters_count, 1);
//! ```

pub mod lexer;
pub mod lower;
pub mod parser;
pub mod tree;

pub use lower::{Lowered, Sql92Lowerer};
pub use parser::{Parser, SyntaxError};

use oxide_sql_segment::{LowerError, SelectStatement};

/// Errors raised while turning SQL text into segments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The text does not match the grammar.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// The grammar tree breaks an invariant of the lowering.
    #[error(transparent)]
    Lower(#[from] LowerError),
}

/// Builds the grammar tree of a single SELECT statement.
///
/// # Errors
///
/// Returns a [`SyntaxError`] at the first token that does not fit.
pub fn parse_select(sql: &str) -> Result<tree::SelectNode, SyntaxError> {
    Parser::new(sql).parse_statement()
}

/// Parses and lowers a single SELECT statement.
///
/// # Errors
///
/// Returns [`Error::Syntax`] for malformed SQL and [`Error::Lower`] when
/// lowering fails.
pub fn lower(sql: &str) -> Result<SelectStatement, Error> {
    let select = parse_select(sql)?;
    Ok(Sql92Lowerer::new(sql).lower_statement(&select)?)
}
