//! SQL-92 grammar tree builder.
//!
//! A hand-written recursive descent parser with Pratt parsing for the
//! logical and bit-expression operator levels. It produces the nodes in
//! [`crate::tree`] and stops at the first syntax error.

mod error;
mod parser;
mod pratt;

pub use error::SyntaxError;
pub use parser::Parser;
