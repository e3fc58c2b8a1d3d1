//! Recursive-descent parser for RPAL.
//!
//! One function per grammar production, all operating on a [`ParseState`]
//! that hands out tokens with one-token lookahead. Errors are structured:
//! they carry what was expected, what was found, and the source line.

mod grammar;

pub use grammar::parse;

use std::fmt;

use crate::lexer::{Token, TokenKind};

/// Structured parse error with context information.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub expected: Vec<String>,
    pub found: Option<String>,
    pub line: Option<usize>,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            expected: vec![],
            found: None,
            line: None,
        }
    }

    /// Add an expected token/construct to this error.
    pub fn expected(mut self, what: impl Into<String>) -> Self {
        self.expected.push(what.into());
        self
    }

    /// Set what was actually found.
    pub fn found(mut self, what: impl Into<String>) -> Self {
        self.found = Some(what.into());
        self
    }

    /// Set the source line for this error.
    pub fn at(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = if !self.expected.is_empty() {
            let expected_str = if self.expected.len() == 1 {
                self.expected[0].clone()
            } else {
                let (last, rest) = self.expected.split_last().unwrap();
                format!("{} or {}", rest.join(", "), last)
            };
            match &self.found {
                Some(found) => format!("expected {expected_str}, found {found}"),
                None => format!("expected {expected_str}"),
            }
        } else {
            self.message.clone()
        };

        match self.line {
            Some(line) => write!(f, "line {line}: parse error: {msg}"),
            None => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ParseError {}

pub type ParseResult<T> = Result<T, ParseError>;

/// Parser state: token stream and current position.
pub struct ParseState {
    tokens: Vec<Token>,
    index: usize,
}

impl ParseState {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, index: 0 }
    }

    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    pub fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.index).cloned();
        if token.is_some() {
            self.index += 1;
        }
        token
    }

    pub fn peek_kind(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    pub fn peek_keyword(&self, word: &str) -> bool {
        self.peek().is_some_and(|t| t.is_keyword(word))
    }

    pub fn peek_operator(&self, symbol: &str) -> bool {
        self.peek().is_some_and(|t| t.is_operator(symbol))
    }

    /// Consume the next token if it is the given keyword.
    pub fn take_keyword(&mut self, word: &str) -> bool {
        if self.peek_keyword(word) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Consume the next token if it is the given operator cluster.
    pub fn take_operator(&mut self, symbol: &str) -> bool {
        if self.peek_operator(symbol) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    pub fn expect_keyword(&mut self, word: &str) -> ParseResult<Token> {
        if self.peek_keyword(word) {
            Ok(self.advance().unwrap())
        } else {
            Err(self.unexpected(&format!("'{word}'")))
        }
    }

    pub fn expect_operator(&mut self, symbol: &str) -> ParseResult<Token> {
        if self.peek_operator(symbol) {
            Ok(self.advance().unwrap())
        } else {
            Err(self.unexpected(&format!("'{symbol}'")))
        }
    }

    pub fn expect_kind(&mut self, kind: TokenKind, what: &str) -> ParseResult<Token> {
        if self.peek_kind(kind) {
            Ok(self.advance().unwrap())
        } else {
            Err(self.unexpected(what))
        }
    }

    /// Build an "expected X, found Y" error at the current position.
    pub fn unexpected(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::new("unexpected token")
                .expected(expected)
                .found(token.describe())
                .at(token.line),
            None => ParseError::new("unexpected end of input")
                .expected(expected)
                .found("end of input"),
        }
    }
}
