//! Lexical analysis for RPAL source text.
//!
//! The scanner works character by character and produces a flat token
//! stream. Whitespace and `//` comments never surface as tokens. Every
//! token carries the 1-based line it started on, which later stages use
//! for diagnostics.

use thiserror::Error;

/// Keywords of the language. Lexed with the same scan as identifiers but
/// tagged separately so the parser never confuses `let` with a variable.
pub const KEYWORDS: &[&str] = &[
    "let", "in", "within", "fn", "where", "aug", "or", "not", "gr", "ge", "ls", "le", "eq", "ne",
    "true", "false", "nil", "dummy", "rec", "and",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    Keyword,
    Integer,
    Str,
    Operator,
    LParen,
    RParen,
    Semicolon,
    Comma,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub line: usize,
}

impl Token {
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.value == word
    }

    pub fn is_operator(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Operator && self.value == symbol
    }

    /// Human-readable form for error messages.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Identifier => format!("identifier '{}'", self.value),
            TokenKind::Keyword => format!("'{}'", self.value),
            TokenKind::Integer => format!("integer '{}'", self.value),
            TokenKind::Str => "string literal".to_string(),
            TokenKind::Operator => format!("'{}'", self.value),
            TokenKind::LParen => "'('".to_string(),
            TokenKind::RParen => "')'".to_string(),
            TokenKind::Semicolon => "';'".to_string(),
            TokenKind::Comma => "','".to_string(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LexError {
    #[error("line {line}: unexpected character '{found}'")]
    UnexpectedChar { found: char, line: usize },
    #[error("line {line}: unterminated string literal")]
    UnterminatedString { line: usize },
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Operator symbols cluster into a single token by maximal munch; the
/// parser picks apart the specific clusters it understands (`->`, `**`).
fn is_op_symbol(c: char) -> bool {
    matches!(
        c,
        '+' | '-'
            | '/'
            | '~'
            | ':'
            | '='
            | '|'
            | '!'
            | '#'
            | '%'
            | '_'
            | '{'
            | '}'
            | '"'
            | '*'
            | '<'
            | '>'
            | '.'
            | '&'
            | '$'
            | '^'
            | '['
            | ']'
            | '?'
            | '@'
    )
}

struct Lexer<'input> {
    chars: std::str::Chars<'input>,
    current: Option<char>,
    line: usize,
}

impl<'input> Lexer<'input> {
    fn new(input: &'input str) -> Self {
        let mut chars = input.chars();
        let current = chars.next();
        Lexer {
            chars,
            current,
            line: 1,
        }
    }

    fn consume(&mut self) -> Option<char> {
        let c = self.current;
        if c == Some('\n') {
            self.line += 1;
        }
        self.current = self.chars.next();
        c
    }

    fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        loop {
            match self.current {
                None => return Ok(None),
                Some(c) if c.is_whitespace() => {
                    self.consume();
                }
                Some('/') if self.peek_is_comment() => {
                    while let Some(c) = self.current {
                        if c == '\n' {
                            break;
                        }
                        self.consume();
                    }
                }
                Some(c) => return self.scan(c).map(Some),
            }
        }
    }

    /// A comment starts only where an operator cluster would start; `//`
    /// inside a cluster (e.g. `+//`) stays part of the cluster.
    fn peek_is_comment(&self) -> bool {
        self.chars.as_str().starts_with('/')
    }

    fn scan(&mut self, first: char) -> Result<Token, LexError> {
        let line = self.line;
        if is_ident_start(first) {
            let mut value = String::new();
            while let Some(c) = self.current {
                if !is_ident_continue(c) {
                    break;
                }
                value.push(c);
                self.consume();
            }
            let kind = if KEYWORDS.contains(&value.as_str()) {
                TokenKind::Keyword
            } else {
                TokenKind::Identifier
            };
            return Ok(Token { kind, value, line });
        }

        if first.is_ascii_digit() {
            let mut value = String::new();
            while let Some(c) = self.current {
                if !c.is_ascii_digit() {
                    break;
                }
                value.push(c);
                self.consume();
            }
            return Ok(Token {
                kind: TokenKind::Integer,
                value,
                line,
            });
        }

        if first == '\'' {
            return self.scan_string(line);
        }

        if is_op_symbol(first) {
            let mut value = String::new();
            while let Some(c) = self.current {
                if !is_op_symbol(c) {
                    break;
                }
                value.push(c);
                self.consume();
            }
            return Ok(Token {
                kind: TokenKind::Operator,
                value,
                line,
            });
        }

        let kind = match first {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            other => {
                return Err(LexError::UnexpectedChar { found: other, line });
            }
        };
        self.consume();
        Ok(Token {
            kind,
            value: first.to_string(),
            line,
        })
    }

    /// Single-quoted string. Escape sequences are kept verbatim (they are
    /// expanded by `Print` at evaluation time, not here); a backslash only
    /// shields the following character from terminating the literal.
    fn scan_string(&mut self, line: usize) -> Result<Token, LexError> {
        self.consume(); // opening quote
        let mut value = String::new();
        loop {
            match self.current {
                None => return Err(LexError::UnterminatedString { line }),
                Some('\'') => {
                    self.consume();
                    return Ok(Token {
                        kind: TokenKind::Str,
                        value,
                        line,
                    });
                }
                Some('\\') => {
                    value.push('\\');
                    self.consume();
                    match self.current {
                        None => return Err(LexError::UnterminatedString { line }),
                        Some(c) => {
                            value.push(c);
                            self.consume();
                        }
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.consume();
                }
            }
        }
    }
}

/// Tokenize a complete source text.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_at_cluster_start_only() {
        let tokens = tokenize("1 // gone\n+ 2").unwrap();
        let values: Vec<_> = tokens.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(values, vec!["1", "+", "2"]);
    }

    #[test]
    fn operator_cluster_is_maximal() {
        let tokens = tokenize("a->b").unwrap();
        assert_eq!(tokens[1].value, "->");
        assert_eq!(tokens[1].kind, TokenKind::Operator);
    }

    #[test]
    fn escaped_quote_does_not_terminate() {
        let tokens = tokenize(r"'don\'t'").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].value, r"don\'t");
    }
}
