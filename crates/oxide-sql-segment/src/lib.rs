//! # oxide-sql-segment
//!
//! The position-annotated SQL segment model produced by lowering a SQL
//! grammar tree.
//!
//! Every segment carries an inclusive [`Span`] of byte offsets into the
//! source text. Consumers rewrite SQL by replacing those ranges rather than
//! re-serializing the tree, so a span always covers exactly the text the
//! grammar matched:
//!
//! ```rust
//! use oxide_sql_segment::Span;
//!
//! let sql = "SELECT name FROM users";
//! let column = Span::new(7, 10);
//! assert_eq!(column.slice(sql), "name");
//! ```

pub mod constant;
pub mod error;
pub mod segment;
pub mod span;
pub mod statement;
pub mod value;

pub use constant::{AggregationType, LogicalOperator, OrderDirection};
pub use error::{LowerError, NodeKind};
pub use segment::{ExpressionSegment, PredicateRightValue, PredicateSegment, Segment};
pub use span::Span;
pub use statement::SelectStatement;
pub use value::{IdentifierValue, LiteralValue, QuoteCharacter};
