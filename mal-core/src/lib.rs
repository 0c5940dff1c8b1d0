// mal-core - Evaluator and runtime for mal
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # mal-core
//!
//! Environment, evaluator and standard library for mal.
//!
//! ```
//! use mal_core::{Env, rep};
//!
//! let env = Env::with_stdlib();
//! assert_eq!(rep("(+ 1 2)", &env).unwrap(), "3");
//! assert_eq!(rep("(/ 7.0 2)", &env).unwrap(), "3.5");
//! ```

pub mod builtins;
pub mod env;
pub mod error;
pub mod eval;

pub use builtins::{EnvExt, register_builtins};
pub use env::{Env, FrameId};
pub use error::{Error, EvalError, Result};
pub use eval::{
    DEFAULT_MAX_EVAL_DEPTH, apply, apply_native, eval, get_max_eval_depth, make_native_fn,
    set_max_eval_depth,
};

use mal_parser::read_str;

/// Read one form from `input`, evaluate it and print the result readably.
pub fn rep(input: &str, env: &Env) -> std::result::Result<String, Error> {
    let form = read_str(input)?;
    let value = eval(&form, env)?;
    Ok(value.pr_str(true))
}
