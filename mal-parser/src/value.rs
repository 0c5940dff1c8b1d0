// mal-parser - Value representation for mal
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Core value types for mal.
//!
//! Every value the reader produces and the evaluator consumes is a
//! [`Value`]. Values are immutable; "changing" one (attaching metadata, for
//! instance) produces a new value.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use im::{OrdMap, Vector};
use thiserror::Error;

use crate::keyword::Keyword;
use crate::symbol::Symbol;

/// Metadata attached to a value.
pub type Meta = Rc<Value>;

/// A mal value.
///
/// All variants except `Nil` and `Unit` carry an optional metadata slot.
/// Metadata never takes part in equality or printing.
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    /// The empty list, as produced by reading `()` or empty input.
    Unit,
    Bool(bool, Option<Meta>),
    Int(i64, Option<Meta>),
    Float(f64, Option<Meta>),
    Symbol(Symbol, Option<Meta>),
    String(Rc<str>, Option<Meta>),
    Keyword(Keyword, Option<Meta>),
    List(Vector<Value>, Option<Meta>),
    Vector(Vector<Value>, Option<Meta>),
    HashMap(OrdMap<MapKey, Value>, Option<Meta>),
    Function(NativeFn, Option<Meta>),
    Macro(ReaderMacro, Option<Meta>),
}

// ============================================================================
// Map keys
// ============================================================================

/// A hash-map key. Only strings and keywords may be used as keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MapKey {
    String(Rc<str>),
    Keyword(Keyword),
}

impl MapKey {
    /// Convert the key back into a value (without metadata).
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            MapKey::String(s) => Value::String(Rc::clone(s), None),
            MapKey::Keyword(k) => Value::Keyword(k.clone(), None),
        }
    }
}

impl TryFrom<&Value> for MapKey {
    type Error = MapError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s, _) => Ok(MapKey::String(Rc::clone(s))),
            Value::Keyword(k, _) => Ok(MapKey::Keyword(k.clone())),
            other => Err(MapError::InvalidKey(other.type_name())),
        }
    }
}

impl TryFrom<Value> for MapKey {
    type Error = MapError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        MapKey::try_from(&value)
    }
}

/// Failure to build a hash-map from a flat sequence of forms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("hash-map requires an even number of forms, got {0}")]
    OddElementCount(usize),
    #[error("hash-map keys must be strings or keywords, got {0}")]
    InvalidKey(&'static str),
}

/// Failure to attach metadata.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetaError {
    #[error("{0} does not support metadata")]
    Unsupported(&'static str),
    #[error("{0} already has metadata attached")]
    AlreadyAttached(&'static str),
}

// ============================================================================
// Native functions
// ============================================================================

/// A primitive function supplied by the host.
///
/// The callable itself is type-erased; the evaluator knows its concrete
/// signature and downcasts it when applying.
#[derive(Clone)]
pub struct NativeFn {
    name: Symbol,
    func: Rc<dyn Any>,
}

impl NativeFn {
    pub fn new(name: Symbol, func: Rc<dyn Any>) -> Self {
        NativeFn { name, func }
    }

    #[must_use]
    pub fn name(&self) -> &Symbol {
        &self.name
    }

    #[must_use]
    pub fn func(&self) -> &Rc<dyn Any> {
        &self.func
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<native-fn {}>", self.name)
    }
}

impl PartialEq for NativeFn {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

// ============================================================================
// Reader macros
// ============================================================================

/// The result of reader sugar such as `'x` or `^meta form`.
///
/// A reader macro is a tag symbol plus one argument, or two for
/// `with-meta`. It is never expanded; the evaluator treats it as the list
/// `(tag value)` or `(tag value meta)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReaderMacro {
    tag: Symbol,
    value: Rc<Value>,
    meta_form: Option<Rc<Value>>,
}

impl ReaderMacro {
    pub fn new(tag: Symbol, value: Value) -> Self {
        ReaderMacro {
            tag,
            value: Rc::new(value),
            meta_form: None,
        }
    }

    /// Build the `(with-meta value meta)` wrapper.
    pub fn with_meta(value: Value, meta: Value) -> Self {
        ReaderMacro {
            tag: Symbol::new("with-meta"),
            value: Rc::new(value),
            meta_form: Some(Rc::new(meta)),
        }
    }

    #[must_use]
    pub fn tag(&self) -> &Symbol {
        &self.tag
    }

    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    #[must_use]
    pub fn meta_form(&self) -> Option<&Value> {
        self.meta_form.as_deref()
    }

    /// The wrapper viewed as a list: tag symbol, value, then metadata form if any.
    #[must_use]
    pub fn elements(&self) -> Vec<Value> {
        let mut elements = vec![Value::Symbol(self.tag.clone(), None), (*self.value).clone()];
        if let Some(meta) = &self.meta_form {
            elements.push((**meta).clone());
        }
        elements
    }
}

// ============================================================================
// Constructors and accessors
// ============================================================================

impl Value {
    #[must_use]
    pub fn bool(b: bool) -> Self {
        Value::Bool(b, None)
    }

    #[must_use]
    pub fn int(n: i64) -> Self {
        Value::Int(n, None)
    }

    #[must_use]
    pub fn float(n: f64) -> Self {
        Value::Float(n, None)
    }

    pub fn string(s: impl AsRef<str>) -> Self {
        Value::String(Rc::from(s.as_ref()), None)
    }

    pub fn symbol(name: &str) -> Self {
        Value::Symbol(Symbol::new(name), None)
    }

    pub fn keyword(name: &str) -> Self {
        Value::Keyword(Keyword::new(name), None)
    }

    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Value::List(items.into_iter().collect(), None)
    }

    pub fn vector(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Vector(items.into_iter().collect(), None)
    }

    pub fn hash_map(entries: impl IntoIterator<Item = (MapKey, Value)>) -> Self {
        Value::HashMap(entries.into_iter().collect(), None)
    }

    pub fn function(func: NativeFn) -> Self {
        Value::Function(func, None)
    }

    pub fn reader_macro(wrapper: ReaderMacro) -> Self {
        Value::Macro(wrapper, None)
    }

    /// Build a hash-map from alternating keys and values.
    ///
    /// Later duplicates of a key replace earlier ones.
    pub fn hash_map_from_elements(elements: Vec<Value>) -> Result<Self, MapError> {
        if elements.len() % 2 != 0 {
            return Err(MapError::OddElementCount(elements.len()));
        }
        let mut map = OrdMap::new();
        let mut iter = elements.into_iter();
        while let (Some(key), Some(value)) = (iter.next(), iter.next()) {
            map.insert(MapKey::try_from(&key)?, value);
        }
        Ok(Value::HashMap(map, None))
    }

    /// Returns a type name for error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Unit => "unit",
            Value::Bool(..) => "bool",
            Value::Int(..) => "int",
            Value::Float(..) => "float",
            Value::Symbol(..) => "symbol",
            Value::String(..) => "string",
            Value::Keyword(..) => "keyword",
            Value::List(..) => "list",
            Value::Vector(..) => "vector",
            Value::HashMap(..) => "hash-map",
            Value::Function(..) => "function",
            Value::Macro(..) => "macro",
        }
    }

    /// The attached metadata, if any.
    #[must_use]
    pub fn meta(&self) -> Option<&Value> {
        match self {
            Value::Nil | Value::Unit => None,
            Value::Bool(_, m)
            | Value::Int(_, m)
            | Value::Float(_, m)
            | Value::Symbol(_, m)
            | Value::String(_, m)
            | Value::Keyword(_, m)
            | Value::List(_, m)
            | Value::Vector(_, m)
            | Value::HashMap(_, m)
            | Value::Function(_, m)
            | Value::Macro(_, m) => m.as_deref(),
        }
    }

    /// Return a copy of this value carrying `meta`.
    ///
    /// Metadata can be attached once: values that already carry metadata,
    /// and `Nil`/`Unit` which have no slot, are rejected.
    pub fn with_meta(&self, meta: Value) -> Result<Value, MetaError> {
        if self.meta().is_some() {
            return Err(MetaError::AlreadyAttached(self.type_name()));
        }
        let meta = Some(Rc::new(meta));
        match self {
            Value::Nil | Value::Unit => Err(MetaError::Unsupported(self.type_name())),
            Value::Bool(b, _) => Ok(Value::Bool(*b, meta)),
            Value::Int(n, _) => Ok(Value::Int(*n, meta)),
            Value::Float(n, _) => Ok(Value::Float(*n, meta)),
            Value::Symbol(s, _) => Ok(Value::Symbol(s.clone(), meta)),
            Value::String(s, _) => Ok(Value::String(Rc::clone(s), meta)),
            Value::Keyword(k, _) => Ok(Value::Keyword(k.clone(), meta)),
            Value::List(items, _) => Ok(Value::List(items.clone(), meta)),
            Value::Vector(items, _) => Ok(Value::Vector(items.clone(), meta)),
            Value::HashMap(map, _) => Ok(Value::HashMap(map.clone(), meta)),
            Value::Function(f, _) => Ok(Value::Function(f.clone(), meta)),
            Value::Macro(m, _) => Ok(Value::Macro(m.clone(), meta)),
        }
    }

    /// A display adapter printing this value readably (strings quoted and
    /// escaped) or raw.
    #[must_use]
    pub fn display(&self, readably: bool) -> Printer<'_> {
        Printer {
            value: self,
            readably,
        }
    }

    /// Print to a string.
    #[must_use]
    pub fn pr_str(&self, readably: bool) -> String {
        self.display(readably).to_string()
    }
}

// ============================================================================
// Printing
// ============================================================================

/// Formats a [`Value`]; see [`Value::display`].
pub struct Printer<'a> {
    value: &'a Value,
    readably: bool,
}

impl Printer<'_> {
    fn nested<'b>(&self, value: &'b Value) -> Printer<'b> {
        Printer {
            value,
            readably: self.readably,
        }
    }

    fn write_seq<'v>(
        &self,
        f: &mut fmt::Formatter<'_>,
        open: &str,
        items: impl IntoIterator<Item = &'v Value>,
        close: &str,
    ) -> fmt::Result {
        f.write_str(open)?;
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", self.nested(item))?;
        }
        f.write_str(close)
    }

    fn write_string(&self, f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
        if self.readably {
            write!(f, "\"{}\"", escape_string(s))
        } else {
            f.write_str(s)
        }
    }
}

impl fmt::Display for Printer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Value::Nil => f.write_str("nil"),
            Value::Unit => f.write_str("()"),
            Value::Bool(b, _) => write!(f, "{}", b),
            Value::Int(n, _) => write!(f, "{}", n),
            Value::Float(n, _) => write_float(f, *n),
            Value::Symbol(s, _) => write!(f, "{}", s),
            Value::String(s, _) => self.write_string(f, s),
            Value::Keyword(k, _) => write!(f, "{}", k),
            Value::List(items, _) => self.write_seq(f, "(", items, ")"),
            Value::Vector(items, _) => self.write_seq(f, "[", items, "]"),
            Value::HashMap(map, _) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    // String keys print quoted in both modes.
                    match key {
                        MapKey::String(s) => write!(f, "\"{}\"", escape_string(s))?,
                        MapKey::Keyword(k) => write!(f, "{}", k)?,
                    }
                    write!(f, " {}", self.nested(value))?;
                }
                f.write_str("}")
            }
            Value::Function(func, _) => write!(f, "#<native-fn {}>", func.name()),
            Value::Macro(wrapper, _) => {
                write!(f, "({} {}", wrapper.tag(), self.nested(wrapper.value()))?;
                if let Some(meta) = wrapper.meta_form() {
                    write!(f, " {}", self.nested(meta))?;
                }
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display(true))
    }
}

fn write_float(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n.fract() == 0.0 {
        write!(f, "{}.0", n)
    } else {
        write!(f, "{}", n)
    }
}

/// Escape a string for readable printing.
pub fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out
}

// ============================================================================
// Equality
// ============================================================================

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        // Metadata is ignored: [1 2] equals ^{:a 1} [1 2].
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Unit, Value::Unit) => true,
            (Value::Bool(a, _), Value::Bool(b, _)) => a == b,
            (Value::Int(a, _), Value::Int(b, _)) => a == b,
            (Value::Float(a, _), Value::Float(b, _)) => a.to_bits() == b.to_bits(),
            (Value::Symbol(a, _), Value::Symbol(b, _)) => a == b,
            (Value::String(a, _), Value::String(b, _)) => a == b,
            (Value::Keyword(a, _), Value::Keyword(b, _)) => a == b,
            (Value::List(a, _), Value::List(b, _)) => a == b,
            (Value::Vector(a, _), Value::Vector(b, _)) => a == b,
            (Value::HashMap(a, _), Value::HashMap(b, _)) => a == b,
            (Value::Function(a, _), Value::Function(b, _)) => a == b,
            (Value::Macro(a, _), Value::Macro(b, _)) => a == b,
            _ => false,
        }
    }
}
