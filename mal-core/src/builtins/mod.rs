// mal-core - Built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! The standard library: native functions bound in the root frame.

pub mod arithmetic;

use mal_parser::{Symbol, Value};
use tracing::debug;

use crate::env::Env;
use crate::error::Result;
use crate::eval::make_native_fn;

use arithmetic::{builtin_add, builtin_div, builtin_mul, builtin_sub};

/// Native functions making up the standard library, by name.
const BUILTINS: &[(&str, fn(&[Value]) -> Result<Value>)] = &[
    ("+", builtin_add),
    ("-", builtin_sub),
    ("*", builtin_mul),
    ("/", builtin_div),
];

/// Register all built-in functions in the current frame of `env`.
pub fn register_builtins(env: &mut Env) {
    for (name, func) in BUILTINS {
        env.define_native(name, *func);
    }
    debug!(count = BUILTINS.len(), "registered builtins");
}

/// Helper trait to define native functions more easily.
pub trait EnvExt {
    fn define_native(&mut self, name: &str, func: fn(&[Value]) -> Result<Value>);
}

impl EnvExt for Env {
    fn define_native(&mut self, name: &str, func: fn(&[Value]) -> Result<Value>) {
        let native = make_native_fn(name, func);
        self.set(Symbol::new(name), native);
    }
}
