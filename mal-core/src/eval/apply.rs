// mal-core - Function application
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Applying native functions to evaluated arguments.

use std::any::Any;
use std::rc::Rc;

use mal_parser::{NativeFn, Symbol, Value};
use tracing::trace;

use crate::error::{EvalError, Result};

/// Type alias for native function signature.
pub type NativeFnImpl = dyn Fn(&[Value]) -> Result<Value>;

/// Apply a function value to arguments.
pub fn apply(func: &Value, args: &[Value]) -> Result<Value> {
    match func {
        Value::Function(f, _) => apply_native(f, args),
        other => Err(EvalError::NotCallable(other.to_string())),
    }
}

/// Apply a native function. Failures from the callable propagate unchanged.
pub fn apply_native(func: &NativeFn, args: &[Value]) -> Result<Value> {
    let f = func
        .func()
        .downcast_ref::<Rc<NativeFnImpl>>()
        .ok_or_else(|| EvalError::InvalidNativeFn(func.name().clone()))?;
    trace!(function = %func.name(), argc = args.len(), "apply");
    f(args)
}

/// Create a native function value.
pub fn make_native_fn(
    name: &str,
    func: impl Fn(&[Value]) -> Result<Value> + 'static,
) -> NativeFn {
    let func_rc: Rc<NativeFnImpl> = Rc::new(func);
    let func_any: Rc<dyn Any> = Rc::new(func_rc);
    NativeFn::new(Symbol::new(name), func_any)
}
