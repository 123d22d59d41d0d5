//! Token types for the SQL-92 lexer.

use oxide_sql_segment::Span;

/// SQL-92 keywords understood by the tree builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    // Query clauses
    Select,
    From,
    Where,
    Group,
    By,
    Having,
    Order,
    Asc,
    Desc,
    Distinct,
    All,
    As,

    // Logical operators
    And,
    Or,
    Xor,
    Not,

    // Predicates
    In,
    Between,
    Like,
    Escape,
    Is,
    Null,
    True,
    False,
    Unknown,
    Exists,
    Any,
    Some,

    // Arithmetic
    Div,
    Mod,

    // Special functions
    Case,
    When,
    Then,
    Else,
    End,
    Cast,
    Substring,
    Extract,
    Trim,
    For,
    Leading,
    Trailing,
    Both,

    // Aggregates (usable as identifiers)
    Count,
    Sum,
    Avg,
    Max,
    Min,
}

/// Spelling of every keyword, in declaration order.
const KEYWORDS: &[(&str, Keyword)] = &[
    ("SELECT", Keyword::Select),
    ("FROM", Keyword::From),
    ("WHERE", Keyword::Where),
    ("GROUP", Keyword::Group),
    ("BY", Keyword::By),
    ("HAVING", Keyword::Having),
    ("ORDER", Keyword::Order),
    ("ASC", Keyword::Asc),
    ("DESC", Keyword::Desc),
    ("DISTINCT", Keyword::Distinct),
    ("ALL", Keyword::All),
    ("AS", Keyword::As),
    ("AND", Keyword::And),
    ("OR", Keyword::Or),
    ("XOR", Keyword::Xor),
    ("NOT", Keyword::Not),
    ("IN", Keyword::In),
    ("BETWEEN", Keyword::Between),
    ("LIKE", Keyword::Like),
    ("ESCAPE", Keyword::Escape),
    ("IS", Keyword::Is),
    ("NULL", Keyword::Null),
    ("TRUE", Keyword::True),
    ("FALSE", Keyword::False),
    ("UNKNOWN", Keyword::Unknown),
    ("EXISTS", Keyword::Exists),
    ("ANY", Keyword::Any),
    ("SOME", Keyword::Some),
    ("DIV", Keyword::Div),
    ("MOD", Keyword::Mod),
    ("CASE", Keyword::Case),
    ("WHEN", Keyword::When),
    ("THEN", Keyword::Then),
    ("ELSE", Keyword::Else),
    ("END", Keyword::End),
    ("CAST", Keyword::Cast),
    ("SUBSTRING", Keyword::Substring),
    ("EXTRACT", Keyword::Extract),
    ("TRIM", Keyword::Trim),
    ("FOR", Keyword::For),
    ("LEADING", Keyword::Leading),
    ("TRAILING", Keyword::Trailing),
    ("BOTH", Keyword::Both),
    ("COUNT", Keyword::Count),
    ("SUM", Keyword::Sum),
    ("AVG", Keyword::Avg),
    ("MAX", Keyword::Max),
    ("MIN", Keyword::Min),
];

impl Keyword {
    /// Looks up a keyword by its spelling, ignoring case.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        KEYWORDS
            .iter()
            .find(|(text, _)| text.eq_ignore_ascii_case(s))
            .map(|(_, keyword)| *keyword)
    }

    /// Returns the upper-case spelling.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        KEYWORDS
            .iter()
            .find(|(_, keyword)| keyword == self)
            .map_or("", |(text, _)| text)
    }

    /// Returns true for keywords the grammar also accepts as identifiers.
    #[must_use]
    pub const fn is_unreserved(&self) -> bool {
        matches!(
            self,
            Self::Count | Self::Sum | Self::Avg | Self::Max | Self::Min
        )
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Literals
    /// Numeric literal (e.g., 42, 3.14, 1e10)
    Number,
    /// String literal (e.g., 'hello')
    String,
    /// Hexadecimal literal (e.g., X'1F', 0x1F)
    Hexadecimal,
    /// Bit-value literal (e.g., B'0101', 0b0101)
    BitValue,

    // Identifiers and keywords
    /// Bare identifier (e.g., column_name)
    Identifier,
    /// Quoted identifier (e.g., "column name", `t`, [t])
    QuotedIdentifier,
    /// SQL keyword
    Keyword(Keyword),

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// =
    Eq,
    /// != or <>
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// <=>
    SafeEq,
    /// ||
    DoublePipe,
    /// &&
    DoubleAmpersand,
    /// &
    BitAnd,
    /// |
    BitOr,
    /// ^
    Caret,
    /// ~
    Tilde,
    /// !
    Bang,
    /// <<
    LeftShift,
    /// >>
    RightShift,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,
    /// ?
    Question,

    // Special
    /// End of input
    Eof,
    /// Invalid/unknown token
    Error(String),
}

/// A token with its span in the source code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the source code.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }
}
