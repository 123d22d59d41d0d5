//! SQL-92 tokenizer.

use oxide_sql_segment::Span;

use super::{Keyword, Token, TokenKind};

/// A lexer that tokenizes SQL input.
///
/// Tokens carry inclusive byte spans; their text is recovered by slicing
/// the input, so no token owns a copy of the source.
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skips whitespace and comments.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            // -- line comment
            if self.peek() == Some('-') && self.peek_next() == Some('-') {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.advance();
                }
                continue;
            }

            // /* block comment */
            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                self.advance();
                self.advance();
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        None => break,
                        _ => {}
                    }
                }
                continue;
            }

            break;
        }
    }

    /// Creates a token spanning from the token start to the current position.
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, Span::from_range(self.start, self.pos))
    }

    /// Consumes `expected` if it is the current character.
    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Scans an identifier or keyword.
    fn scan_identifier(&mut self) -> Token {
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$') {
            self.advance();
        }

        let text = &self.input[self.start..self.pos];
        match Keyword::from_str(text) {
            Some(keyword) => self.make_token(TokenKind::Keyword(keyword)),
            None => self.make_token(TokenKind::Identifier),
        }
    }

    /// Scans a delimited token whose closing delimiter is escaped by doubling.
    fn scan_delimited(&mut self, close: char, kind: TokenKind, what: &str) -> Token {
        loop {
            match self.advance() {
                Some(c) if c == close => {
                    if self.peek() == Some(close) {
                        self.advance();
                    } else {
                        return self.make_token(kind);
                    }
                }
                Some(_) => {}
                None => return self.make_token(TokenKind::Error(format!("Unterminated {what}"))),
            }
        }
    }

    /// Scans the digits of a prefixed literal such as `X'1F'` or `B'01'`.
    fn scan_prefixed_literal(&mut self, kind: TokenKind, valid: fn(char) -> bool) -> Token {
        self.advance(); // prefix letter
        self.advance(); // opening quote
        while self.peek().is_some_and(valid) {
            self.advance();
        }
        if self.eat('\'') {
            self.make_token(kind)
        } else {
            self.make_token(TokenKind::Error(String::from("Malformed prefixed literal")))
        }
    }

    /// Scans a number (integer, decimal, exponent, `0x..` or `0b..`).
    fn scan_number(&mut self, first: char) -> Token {
        if first == '0' {
            if self.peek().is_some_and(|c| c == 'x' || c == 'X')
                && self.peek_next().is_some_and(|c| c.is_ascii_hexdigit())
            {
                self.advance();
                while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                    self.advance();
                }
                return self.make_token(TokenKind::Hexadecimal);
            }
            if self.peek().is_some_and(|c| c == 'b' || c == 'B')
                && self.peek_next().is_some_and(|c| c == '0' || c == '1')
            {
                self.advance();
                while self.peek().is_some_and(|c| c == '0' || c == '1') {
                    self.advance();
                }
                return self.make_token(TokenKind::BitValue);
            }
        }

        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        if self.peek().is_some_and(|c| c == 'e' || c == 'E') {
            self.advance();
            if self.peek().is_some_and(|c| c == '+' || c == '-') {
                self.advance();
            }
            if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
                return self.make_token(TokenKind::Error(String::from("Malformed exponent")));
            }
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        self.make_token(TokenKind::Number)
    }

    /// Scans the next token.
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();
        self.start = self.pos;

        let Some(c) = self.advance() else {
            return Token::new(TokenKind::Eof, Span::new(self.pos, self.pos));
        };

        match c {
            '(' => self.make_token(TokenKind::LeftParen),
            ')' => self.make_token(TokenKind::RightParen),
            ',' => self.make_token(TokenKind::Comma),
            ';' => self.make_token(TokenKind::Semicolon),
            '.' => self.make_token(TokenKind::Dot),
            '+' => self.make_token(TokenKind::Plus),
            '-' => self.make_token(TokenKind::Minus),
            '*' => self.make_token(TokenKind::Star),
            '/' => self.make_token(TokenKind::Slash),
            '%' => self.make_token(TokenKind::Percent),
            '^' => self.make_token(TokenKind::Caret),
            '~' => self.make_token(TokenKind::Tilde),
            '?' => self.make_token(TokenKind::Question),
            '=' => self.make_token(TokenKind::Eq),
            '<' => {
                if self.eat('=') {
                    if self.eat('>') {
                        self.make_token(TokenKind::SafeEq)
                    } else {
                        self.make_token(TokenKind::LtEq)
                    }
                } else if self.eat('>') {
                    self.make_token(TokenKind::NotEq)
                } else if self.eat('<') {
                    self.make_token(TokenKind::LeftShift)
                } else {
                    self.make_token(TokenKind::Lt)
                }
            }
            '>' => {
                if self.eat('=') {
                    self.make_token(TokenKind::GtEq)
                } else if self.eat('>') {
                    self.make_token(TokenKind::RightShift)
                } else {
                    self.make_token(TokenKind::Gt)
                }
            }
            '!' => {
                if self.eat('=') {
                    self.make_token(TokenKind::NotEq)
                } else {
                    self.make_token(TokenKind::Bang)
                }
            }
            '|' => {
                if self.eat('|') {
                    self.make_token(TokenKind::DoublePipe)
                } else {
                    self.make_token(TokenKind::BitOr)
                }
            }
            '&' => {
                if self.eat('&') {
                    self.make_token(TokenKind::DoubleAmpersand)
                } else {
                    self.make_token(TokenKind::BitAnd)
                }
            }

            '\'' => self.scan_delimited('\'', TokenKind::String, "string literal"),
            '"' => self.scan_delimited('"', TokenKind::QuotedIdentifier, "quoted identifier"),
            '`' => self.scan_delimited('`', TokenKind::QuotedIdentifier, "quoted identifier"),
            '[' => self.scan_delimited(']', TokenKind::QuotedIdentifier, "quoted identifier"),

            'X' | 'x' if self.peek() == Some('\'') => {
                self.pos = self.start;
                self.scan_prefixed_literal(TokenKind::Hexadecimal, |c| c.is_ascii_hexdigit())
            }
            'B' | 'b' if self.peek() == Some('\'') => {
                self.pos = self.start;
                self.scan_prefixed_literal(TokenKind::BitValue, |c| c == '0' || c == '1')
            }

            c if c.is_ascii_digit() => self.scan_number(c),

            c if c.is_alphabetic() || c == '_' => self.scan_identifier(),

            _ => self.make_token(TokenKind::Error(format!("Unexpected character: {c}"))),
        }
    }

    /// Tokenizes the entire input and returns all tokens, ending with EOF.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}
