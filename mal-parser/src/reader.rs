// mal-parser - Reader for mal
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Recursive-descent reader producing [`Value`] trees from tokens.

use std::fmt;

use thiserror::Error;

use crate::lexer::tokenize;
use crate::symbol::Symbol;
use crate::value::{MapError, MetaError, ReaderMacro, Value};

/// Default limit on form nesting.
pub const DEFAULT_MAX_READ_DEPTH: usize = 512;

/// Result type for reading.
pub type Result<T> = std::result::Result<T, ReaderError>;

/// The delimited collection being read when input ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    List,
    Vector,
    HashMap,
}

impl CollectionKind {
    fn closer(self) -> &'static str {
        match self {
            CollectionKind::List => ")",
            CollectionKind::Vector => "]",
            CollectionKind::HashMap => "}",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CollectionKind::List => "list",
            CollectionKind::Vector => "vector",
            CollectionKind::HashMap => "hashmap",
        })
    }
}

/// Errors that can occur while reading.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReaderError {
    #[error("unexpected EOF")]
    UnexpectedEnd,
    #[error("EOF while reading {kind}")]
    UnterminatedCollection { kind: CollectionKind },
    #[error("EOF while reading string {0}")]
    MalformedString(String),
    #[error(transparent)]
    InvalidMapKey(#[from] MapError),
    #[error("cannot attach metadata: {0}")]
    Metadata(#[from] MetaError),
    #[error("forms nested deeper than {limit} levels")]
    TooDeeplyNested { limit: usize },
}

/// Reader over a token sequence.
pub struct Reader {
    tokens: Vec<String>,
    position: usize,
    depth: usize,
    max_depth: usize,
}

impl Reader {
    pub fn new(tokens: Vec<String>) -> Self {
        Self::with_max_depth(tokens, DEFAULT_MAX_READ_DEPTH)
    }

    pub fn with_max_depth(tokens: Vec<String>, max_depth: usize) -> Self {
        Reader {
            tokens,
            position: 0,
            depth: 0,
            max_depth,
        }
    }

    /// Tokenize `input` and build a reader over it.
    pub fn from_source(input: &str) -> Self {
        Self::new(tokenize(input))
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.position < self.tokens.len()
    }

    /// The current token, without consuming it.
    pub fn peek(&self) -> Result<&str> {
        self.tokens
            .get(self.position)
            .map(String::as_str)
            .ok_or(ReaderError::UnexpectedEnd)
    }

    /// Consume and return the current token.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<String> {
        let token = self.peek()?.to_string();
        self.position += 1;
        Ok(token)
    }

    /// Read one form.
    pub fn read_form(&mut self) -> Result<Value> {
        if self.depth >= self.max_depth {
            return Err(ReaderError::TooDeeplyNested {
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        let result = self.read_nested_form();
        self.depth -= 1;
        result
    }

    fn read_nested_form(&mut self) -> Result<Value> {
        let opener = match self.peek()? {
            "(" => Some(CollectionKind::List),
            "[" => Some(CollectionKind::Vector),
            "{" => Some(CollectionKind::HashMap),
            _ => None,
        };
        match opener {
            Some(CollectionKind::List) => self.read_list(),
            Some(CollectionKind::Vector) => self.read_vector(),
            Some(CollectionKind::HashMap) => self.read_hash_map(),
            None => self.read_atom(),
        }
    }

    /// Read a list. `()` reads as [`Value::Unit`].
    pub fn read_list(&mut self) -> Result<Value> {
        let items = self.read_collection(CollectionKind::List)?;
        if items.is_empty() {
            Ok(Value::Unit)
        } else {
            Ok(Value::list(items))
        }
    }

    pub fn read_vector(&mut self) -> Result<Value> {
        let items = self.read_collection(CollectionKind::Vector)?;
        Ok(Value::vector(items))
    }

    pub fn read_hash_map(&mut self) -> Result<Value> {
        let items = self.read_collection(CollectionKind::HashMap)?;
        Ok(Value::hash_map_from_elements(items)?)
    }

    /// Consume an opening delimiter and the forms up to its closer.
    fn read_collection(&mut self, kind: CollectionKind) -> Result<Vec<Value>> {
        self.next()?;
        let mut items = Vec::new();
        loop {
            if !self.has_next() {
                return Err(ReaderError::UnterminatedCollection { kind });
            }
            if self.peek()? == kind.closer() {
                self.next()?;
                return Ok(items);
            }
            items.push(self.read_form()?);
        }
    }

    fn read_wrapped(&mut self, tag: &str) -> Result<Value> {
        let form = self.read_form()?;
        Ok(Value::reader_macro(ReaderMacro::new(Symbol::new(tag), form)))
    }

    /// Read an atom or a reader macro.
    pub fn read_atom(&mut self) -> Result<Value> {
        let token = self.next()?;

        if let Some(name) = token.strip_prefix(':') {
            return Ok(Value::keyword(name));
        }
        if token.starts_with('"') {
            return Ok(Value::string(unescape_string(&token)?));
        }

        match token.as_str() {
            "'" => self.read_wrapped("quote"),
            "`" => self.read_wrapped("quasiquote"),
            "~@" => self.read_wrapped("splice-unquote"),
            "~" => self.read_wrapped("unquote"),
            "^" => {
                let meta = self.read_form()?;
                let value = self.read_form()?.with_meta(meta.clone())?;
                Ok(Value::reader_macro(ReaderMacro::with_meta(value, meta)))
            }
            "@" => self.read_wrapped("deref"),
            _ => Ok(parse_scalar(&token)),
        }
    }
}

/// Numbers, booleans and nil; anything else is a symbol.
fn parse_scalar(token: &str) -> Value {
    if let Ok(n) = token.parse::<i64>() {
        return Value::int(n);
    }
    if looks_like_float(token)
        && let Ok(n) = token.parse::<f64>()
    {
        return Value::float(n);
    }
    match token {
        "true" => Value::bool(true),
        "false" => Value::bool(false),
        "nil" => Value::Nil,
        _ => Value::symbol(token),
    }
}

/// `f64::from_str` also accepts `inf` and `NaN`; those stay symbols.
fn looks_like_float(token: &str) -> bool {
    token.bytes().any(|b| b.is_ascii_digit())
        && token
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
}

/// Validate a string token and decode its escapes.
///
/// The token must start and end with an unescaped `"`. `\\`, `\"` and `\n`
/// are decoded; any other backslash sequence is kept verbatim.
pub fn unescape_string(token: &str) -> Result<String> {
    let malformed = || ReaderError::MalformedString(token.to_string());

    let inner = token
        .strip_prefix('"')
        .ok_or_else(malformed)?;

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    let mut closed = false;
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('\\') => out.push('\\'),
                Some('"') => out.push('"'),
                Some('n') => out.push('\n'),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => return Err(malformed()),
            },
            '"' => {
                closed = true;
                break;
            }
            c => out.push(c),
        }
    }

    if closed && chars.next().is_none() {
        Ok(out)
    } else {
        Err(malformed())
    }
}

/// Read the first form in `input`.
///
/// Empty input (or input holding only whitespace and comments) reads as
/// [`Value::Unit`]. Tokens after the first form are ignored.
pub fn read_str(input: &str) -> Result<Value> {
    let mut reader = Reader::from_source(input);
    if !reader.has_next() {
        return Ok(Value::Unit);
    }
    reader.read_form()
}

/// Read every form in `input`.
pub fn read_all(input: &str) -> Result<Vec<Value>> {
    let mut reader = Reader::from_source(input);
    let mut forms = Vec::new();
    while reader.has_next() {
        forms.push(reader.read_form()?);
    }
    Ok(forms)
}
