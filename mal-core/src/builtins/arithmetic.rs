// mal-core - Arithmetic built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Arithmetic operations: +, -, *, /
//!
//! Each operation folds its arguments left to right in `f64`, starting
//! from the first argument. If every argument was an integer the result
//! is truncated toward zero back to an integer; otherwise it stays a
//! float. So `(/ 7 2)` is `3` and `(/ 7.0 2)` is `3.5`.
//!
//! ## Precision and range
//!
//! Integers above 2^53 lose precision on the way through `f64`, and
//! finite integer results outside the `i64` range saturate. An all-integer
//! fold that ends up infinite or NaN is an error: `DivisionByZero` for
//! `/`, `IntegerOverflow` otherwise. With a float operand the non-finite
//! value is returned as-is.

use mal_parser::Value;

use crate::error::{EvalError, Result};

/// Convert a numeric argument to f64, reporting whether it was a float.
fn to_float(function: &str, val: &Value) -> Result<(f64, bool)> {
    match val {
        Value::Int(n, _) => Ok((*n as f64, false)),
        Value::Float(n, _) => Ok((*n, true)),
        other => Err(EvalError::NotANumber {
            function: function.to_string(),
            got: other.type_name(),
        }),
    }
}

/// Left fold of `op` over `args` with integer/float result selection.
fn numeric_reduction(function: &str, args: &[Value], op: fn(f64, f64) -> f64) -> Result<Value> {
    let (first, rest) = args.split_first().ok_or_else(|| EvalError::EmptyArguments {
        function: function.to_string(),
    })?;

    let (mut acc, mut any_float) = to_float(function, first)?;
    for arg in rest {
        let (n, is_float) = to_float(function, arg)?;
        any_float |= is_float;
        acc = op(acc, n);
    }

    if any_float {
        Ok(Value::float(acc))
    } else if acc.is_finite() {
        Ok(Value::int(acc.trunc() as i64))
    } else {
        Err(EvalError::IntegerOverflow {
            function: function.to_string(),
        })
    }
}

pub fn builtin_add(args: &[Value]) -> Result<Value> {
    numeric_reduction("+", args, |a, b| a + b)
}

pub fn builtin_sub(args: &[Value]) -> Result<Value> {
    numeric_reduction("-", args, |a, b| a - b)
}

pub fn builtin_mul(args: &[Value]) -> Result<Value> {
    numeric_reduction("*", args, |a, b| a * b)
}

/// Integer quotients only shrink, so a non-finite one means a zero divisor.
pub fn builtin_div(args: &[Value]) -> Result<Value> {
    numeric_reduction("/", args, |a, b| a / b).map_err(|e| match e {
        EvalError::IntegerOverflow { function } => EvalError::DivisionByZero { function },
        other => other,
    })
}
