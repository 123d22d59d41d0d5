//! Leaf values produced while lowering literals, identifiers and markers.

use serde::Serialize;

/// How an identifier was quoted in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum QuoteCharacter {
    /// Bare identifier.
    #[default]
    None,
    /// `"name"`
    Quote,
    /// `` `name` ``
    BackQuote,
    /// `[name]`
    Bracket,
}

impl QuoteCharacter {
    /// Returns the opening and closing characters, if any.
    #[must_use]
    pub const fn delimiters(&self) -> Option<(char, char)> {
        match self {
            Self::None => None,
            Self::Quote => Some(('"', '"')),
            Self::BackQuote => Some(('`', '`')),
            Self::Bracket => Some(('[', ']')),
        }
    }

    fn detect(text: &str) -> Self {
        [Self::Quote, Self::BackQuote, Self::Bracket]
            .into_iter()
            .find(|quote| {
                quote.delimiters().is_some_and(|(open, close)| {
                    text.len() >= 2 && text.starts_with(open) && text.ends_with(close)
                })
            })
            .unwrap_or_default()
    }
}

/// An identifier with its quoting removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentifierValue {
    /// The identifier without surrounding quotes.
    pub value: String,
    /// The quote style it was written with.
    pub quote: QuoteCharacter,
}

impl IdentifierValue {
    /// Builds an identifier from its source text, stripping one level of
    /// quoting and collapsing doubled closing quotes.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let quote = QuoteCharacter::detect(text);
        let value = match quote.delimiters() {
            Some((_, close)) => {
                let inner = &text[1..text.len() - 1];
                inner.replace(&format!("{close}{close}"), &close.to_string())
            }
            None => text.to_string(),
        };
        Self { value, quote }
    }
}

/// A lowered leaf value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LiteralValue {
    /// String literal contents, quotes removed.
    String(String),
    /// Numeric literal text.
    Number(String),
    /// `TRUE` / `FALSE`.
    Boolean(String),
    /// Hexadecimal, bit-value and `NULL` literals, kept as raw text.
    Other(String),
    /// An identifier.
    Identifier(IdentifierValue),
    /// A keyword such as a data type name.
    Keyword(String),
    /// A `?` marker with its zero-based ordinal in the statement.
    ParameterMarker(usize),
}

impl LiteralValue {
    /// Builds a string value from a quoted literal such as `'it''s'`.
    #[must_use]
    pub fn string(text: &str) -> Self {
        let inner = text
            .strip_prefix('\'')
            .and_then(|rest| rest.strip_suffix('\''))
            .unwrap_or(text);
        Self::String(inner.replace("''", "'"))
    }

    /// Returns true for values that re-tag as a literal expression.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::String(_) | Self::Number(_) | Self::Boolean(_))
    }
}
