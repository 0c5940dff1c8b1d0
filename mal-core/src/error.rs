// mal-core - Error types for the mal evaluator
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Error types for mal evaluation.

use mal_parser::{ReaderError, Symbol};
use thiserror::Error;

/// Result type for mal evaluation.
pub type Result<T> = std::result::Result<T, EvalError>;

/// Errors that can occur during evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Symbol has no binding in any visible frame
    #[error("'{0}' not found")]
    SymbolNotFound(Symbol),
    /// Head of an application did not evaluate to a function
    #[error("{0} is not a function")]
    NotCallable(String),
    #[error("{function}: cannot perform arithmetic on {got}")]
    NotANumber {
        function: String,
        got: &'static str,
    },
    #[error("{function}: requires at least one argument")]
    EmptyArguments { function: String },
    /// Integer division with a zero divisor
    #[error("{function}: division by zero")]
    DivisionByZero { function: String },
    /// All-integer result too large to represent, even as a float
    #[error("{function}: integer overflow")]
    IntegerOverflow { function: String },
    #[error("maximum evaluation depth ({limit}) exceeded")]
    DepthExceeded { limit: usize },
    /// Internal error - a native function value holding the wrong callable type
    #[error("native function {0} has an invalid implementation")]
    InvalidNativeFn(Symbol),
}

/// Any failure of a read-eval-print step.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Read(#[from] ReaderError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}
