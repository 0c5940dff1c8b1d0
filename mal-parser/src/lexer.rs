// mal-parser - Lexer for mal
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Lexer (tokeniser) for mal source code.
//!
//! Splits source text into token strings. Tokens are left uninterpreted:
//! the reader decides what each one means. Tokenising never fails; an
//! unterminated string is emitted as-is and rejected later by the reader.

use std::iter::Peekable;
use std::str::Chars;

/// Characters that end a bare token.
fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '[' | ']' | '{' | '}' | '(' | ')' | '\'' | '"' | '`' | ',' | ';')
}

/// Lexer that converts source text to tokens.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            chars: input.chars().peekable(),
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn advance(&mut self) -> Option<char> {
        self.chars.next()
    }

    /// Skip whitespace, commas and `;` comments.
    fn skip_whitespace_and_comments(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() || c == ',' {
                self.advance();
            } else if c == ';' {
                while let Some(c) = self.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    /// Read the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Option<String> {
        self.skip_whitespace_and_comments();
        let c = self.advance()?;

        let token = match c {
            '~' if self.peek() == Some('@') => {
                self.advance();
                "~@".to_string()
            }
            '[' | ']' | '{' | '}' | '(' | ')' | '\'' | '`' | '~' | '^' | '@' => c.to_string(),
            '"' => self.read_string(),
            _ => self.read_bare(c),
        };
        Some(token)
    }

    /// Read a string token, quotes and escapes included verbatim.
    fn read_string(&mut self) -> String {
        let mut token = String::from('"');
        while let Some(c) = self.peek() {
            match c {
                '"' => {
                    self.advance();
                    token.push('"');
                    break;
                }
                '\\' => {
                    // A backslash escapes any following character except a newline.
                    let mut ahead = self.chars.clone();
                    ahead.next();
                    match ahead.next() {
                        Some(escaped) if escaped != '\n' => {
                            self.advance();
                            self.advance();
                            token.push('\\');
                            token.push(escaped);
                        }
                        _ => break,
                    }
                }
                _ => {
                    self.advance();
                    token.push(c);
                }
            }
        }
        token
    }

    fn read_bare(&mut self, first: char) -> String {
        let mut token = String::from(first);
        while let Some(c) = self.peek() {
            if is_delimiter(c) {
                break;
            }
            self.advance();
            token.push(c);
        }
        token
    }

    /// Tokenize the entire input.
    pub fn tokenize(self) -> Vec<String> {
        self.collect()
    }
}

impl Iterator for Lexer<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.next_token()
    }
}

/// Split `input` into tokens.
pub fn tokenize(input: &str) -> Vec<String> {
    Lexer::new(input).tokenize()
}
