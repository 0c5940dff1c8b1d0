// mal-core - Evaluator for mal
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Evaluator for mal expressions.
//!
//! There are no special forms: a non-empty list (or a reader macro, which
//! behaves as the list `(tag value ...)`) evaluates every element and
//! applies the first to the rest. Symbols resolve through the
//! environment, collections evaluate their elements and everything else
//! evaluates to itself.

mod apply;

pub use apply::{NativeFnImpl, apply, apply_native, make_native_fn};

use std::cell::Cell;

use mal_parser::{OrdMap, Value, Vector};

use crate::env::Env;
use crate::error::{EvalError, Result};

/// Default limit on nested evaluation.
pub const DEFAULT_MAX_EVAL_DEPTH: usize = 2_048;

thread_local! {
    static EVAL_DEPTH: Cell<usize> = const { Cell::new(0) };
    static MAX_EVAL_DEPTH: Cell<usize> = const { Cell::new(DEFAULT_MAX_EVAL_DEPTH) };
}

/// Set the maximum eval recursion depth. Returns the previous value.
#[inline]
pub fn set_max_eval_depth(depth: usize) -> usize {
    MAX_EVAL_DEPTH.with(|d| d.replace(depth))
}

/// Get the current maximum eval recursion depth.
#[inline]
#[must_use]
pub fn get_max_eval_depth() -> usize {
    MAX_EVAL_DEPTH.with(|d| d.get())
}

/// Get the current eval recursion depth.
#[inline]
#[must_use]
pub fn get_eval_depth() -> usize {
    EVAL_DEPTH.with(|d| d.get())
}

/// Counts one level of evaluation for as long as it lives.
struct EvalDepthGuard;

impl EvalDepthGuard {
    fn new() -> Result<Self> {
        let (current, max) = EVAL_DEPTH.with(|d| {
            let current = d.get() + 1;
            d.set(current);
            (current, get_max_eval_depth())
        });
        if current > max {
            EVAL_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
            Err(EvalError::DepthExceeded { limit: max })
        } else {
            Ok(EvalDepthGuard)
        }
    }
}

impl Drop for EvalDepthGuard {
    fn drop(&mut self) {
        EVAL_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

/// Evaluate an expression in an environment.
pub fn eval(expr: &Value, env: &Env) -> Result<Value> {
    let _guard = EvalDepthGuard::new()?;

    match expr {
        Value::List(items, _) if !items.is_empty() => eval_application(items.iter(), env),
        Value::Macro(wrapper, _) => eval_application(wrapper.elements().iter(), env),
        _ => eval_form(expr, env),
    }
}

/// Evaluate every form, then apply the head to the rest.
fn eval_application<'a>(
    forms: impl Iterator<Item = &'a Value>,
    env: &Env,
) -> Result<Value> {
    let evaluated = forms
        .map(|form| eval(form, env))
        .collect::<Result<Vec<_>>>()?;

    match evaluated.split_first() {
        Some((Value::Function(func, _), args)) => apply_native(func, args),
        Some((head, _)) => Err(EvalError::NotCallable(head.to_string())),
        None => Ok(Value::Unit),
    }
}

/// Evaluate a form that is not an application.
fn eval_form(expr: &Value, env: &Env) -> Result<Value> {
    match expr {
        Value::Symbol(sym, _) => env
            .get(sym)
            .map(|func| Value::function(func.clone()))
            .ok_or_else(|| EvalError::SymbolNotFound(sym.clone())),
        Value::List(items, _) => Ok(Value::List(eval_items(items, env)?, None)),
        Value::Vector(items, _) => Ok(Value::Vector(eval_items(items, env)?, None)),
        Value::HashMap(map, _) => {
            let mut evaluated = OrdMap::new();
            for (key, value) in map.iter() {
                evaluated.insert(key.clone(), eval(value, env)?);
            }
            Ok(Value::HashMap(evaluated, None))
        }
        _ => Ok(expr.clone()),
    }
}

fn eval_items(items: &Vector<Value>, env: &Env) -> Result<Vector<Value>> {
    items.iter().map(|item| eval(item, env)).collect()
}
