// mal-parser - Tokenizer, reader and value model for mal
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # mal-parser
//!
//! Tokenizer and reader for mal, a small Lisp.
//! Produces [`Value`] trees from source text and prints them back.

mod intern;
pub mod keyword;
pub mod lexer;
pub mod reader;
pub mod symbol;
pub mod value;

pub use im::{OrdMap, Vector};
pub use keyword::Keyword;
pub use lexer::{Lexer, tokenize};
pub use reader::{
    CollectionKind, DEFAULT_MAX_READ_DEPTH, Reader, ReaderError, read_all, read_str,
};
pub use symbol::Symbol;
pub use value::{MapError, MapKey, Meta, MetaError, NativeFn, Printer, ReaderMacro, Value};
