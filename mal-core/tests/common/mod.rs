// mal-core - Common test utilities
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Shared test helpers and utilities for mal integration tests.
//!
//! # Usage
//!
//! In your test file, add:
//! ```ignore
//! mod common;
//! use common::*;
//! ```
//!
//! # Available Helpers
//!
//! - [`eval_str`] - Evaluate code in a fresh environment with the stdlib
//! - [`eval_str_with_env`] - Evaluate code in an existing environment
//! - [`read_print`] - Read code and print it back readably
//! - [`new_env`] - Create a new environment with the stdlib registered
//! - [`fixture`] - Conformance tables of input/expected-output lines
//!
//! # Macros
//!
//! - [`assert_eval!`] - Assert that code evaluates to an expected value
//! - [`assert_eval_err!`] - Assert that code fails with a message matching a pattern

#![allow(dead_code)]

pub mod fixture;

#[allow(unused_imports)]
pub use mal_core::{Env, Error, EvalError, eval, rep};
#[allow(unused_imports)]
pub use mal_parser::{MapKey, ReaderError, Symbol, Value, read_str};

/// Evaluate a mal expression string in a fresh environment.
///
/// # Returns
///
/// Returns the evaluated value, or an error message string.
#[must_use]
pub fn eval_str(s: &str) -> Result<Value, String> {
    eval_str_with_env(s, &new_env())
}

/// Evaluate a mal expression string in the given environment.
#[must_use]
pub fn eval_str_with_env(s: &str, env: &Env) -> Result<Value, String> {
    let form = read_str(s).map_err(|e| e.to_string())?;
    eval(&form, env).map_err(|e| e.to_string())
}

/// Read the first form of `s` and print it readably.
#[must_use]
pub fn read_print(s: &str) -> Result<String, String> {
    read_str(s)
        .map(|v| v.pr_str(true))
        .map_err(|e| e.to_string())
}

/// Create a new environment with the standard library registered.
#[must_use]
pub fn new_env() -> Env {
    Env::with_stdlib()
}

/// Assert that evaluating `input` produces the expected value.
///
/// # Example
///
/// ```ignore
/// assert_eval!("(+ 1 2)", Value::int(3));
/// ```
#[macro_export]
macro_rules! assert_eval {
    ($input:expr, $expected:expr) => {
        let result = $crate::common::eval_str($input);
        assert!(
            result.is_ok(),
            "Failed to evaluate '{}': {:?}",
            $input,
            result.err()
        );
        assert_eq!(
            result.unwrap(),
            $expected,
            "Evaluation of '{}' did not match expected",
            $input
        );
    };
}

/// Assert that evaluating `input` fails with a message containing `fragment`.
///
/// # Example
///
/// ```ignore
/// assert_eval_err!("(+ 1 :a)", "cannot perform arithmetic");
/// ```
#[macro_export]
macro_rules! assert_eval_err {
    ($input:expr, $fragment:expr) => {
        match $crate::common::eval_str($input) {
            Ok(v) => panic!("Expected error for '{}' but got {:?}", $input, v),
            Err(msg) => assert!(
                msg.contains($fragment),
                "Error for '{}' was {:?}, expected it to contain {:?}",
                $input,
                msg,
                $fragment
            ),
        }
    };
}
