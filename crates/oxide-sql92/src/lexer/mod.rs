//! SQL-92 lexer.
//!
//! Produces the token stream the tree builder consumes. Spans are inclusive
//! byte offsets, matching the spans carried by grammar nodes.

mod token;
mod tokenizer;

pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;
