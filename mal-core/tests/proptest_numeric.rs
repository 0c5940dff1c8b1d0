// mal-core - Property-based tests for arithmetic and printing
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Property-based tests for numeric reductions and the printer.
//!
//! Tests the following properties:
//! - All-integer reductions agree with i64 arithmetic on small operands
//! - A single float operand makes the result a float
//! - Integer division truncates toward zero
//! - Printed integers, floats and strings read back as the same value

mod common;

use common::{Value, eval_str, read_str};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// Small integers that stay exact through f64
fn arb_small_int() -> impl Strategy<Value = i64> {
    -1_000_000i64..1_000_000i64
}

fn arb_nonzero_int() -> impl Strategy<Value = i64> {
    arb_small_int().prop_filter("non-zero divisor", |n| *n != 0)
}

fn arb_float() -> impl Strategy<Value = f64> {
    any::<f64>().prop_filter("must be finite", |f| f.is_finite())
}

/// Printable strings including the characters that need escaping
fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just('\\'),
            Just('"'),
            Just('\n'),
            Just(';'),
            prop::char::range('a', 'z'),
            prop::char::range('0', '9'),
        ],
        0..20,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

fn call(op: &str, args: &[String]) -> Result<Value, String> {
    eval_str(&format!("({} {})", op, args.join(" ")))
}

// =============================================================================
// Integer reductions
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// (+ a b c ...) equals the i64 sum
    #[test]
    fn sum_matches_i64(xs in prop::collection::vec(arb_small_int(), 1..8)) {
        let args: Vec<String> = xs.iter().map(ToString::to_string).collect();
        prop_assert_eq!(call("+", &args), Ok(Value::int(xs.iter().sum())));
    }

    /// (- a b ...) folds left from the first operand
    #[test]
    fn difference_folds_left(first in arb_small_int(), rest in prop::collection::vec(arb_small_int(), 0..6)) {
        let mut args = vec![first.to_string()];
        args.extend(rest.iter().map(ToString::to_string));
        let expected = rest.iter().fold(first, |acc, n| acc - n);
        prop_assert_eq!(call("-", &args), Ok(Value::int(expected)));
    }

    /// (* a b) equals the i64 product for operands whose product is exact in f64
    #[test]
    fn product_matches_i64(a in -10_000i64..10_000, b in -10_000i64..10_000) {
        prop_assert_eq!(
            call("*", &[a.to_string(), b.to_string()]),
            Ok(Value::int(a * b))
        );
    }

    /// Integer division truncates toward zero, like i64 division
    #[test]
    fn division_truncates(a in arb_small_int(), b in arb_nonzero_int()) {
        prop_assert_eq!(
            call("/", &[a.to_string(), b.to_string()]),
            Ok(Value::int(a / b))
        );
    }

    /// Any float operand makes the result a float
    #[test]
    fn float_is_contagious(a in arb_small_int(), b in arb_small_int()) {
        let result = call("+", &[a.to_string(), format!("{}.5", b)]).unwrap();
        prop_assert!(matches!(result, Value::Float(..)), "got {:?}", result);
    }
}

// =============================================================================
// Printing
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Printed integers read back unchanged
    #[test]
    fn int_print_reads_back(n in any::<i64>()) {
        let printed = Value::int(n).to_string();
        prop_assert_eq!(read_str(&printed).unwrap(), Value::int(n));
    }

    /// Printed floats read back as floats with the same value
    #[test]
    fn float_print_reads_back(f in arb_float()) {
        let printed = Value::float(f).to_string();
        prop_assert_eq!(read_str(&printed).unwrap(), Value::float(f));
    }

    /// Readably printed strings read back as the same string
    #[test]
    fn string_print_reads_back(s in arb_text()) {
        let printed = Value::string(&s).pr_str(true);
        prop_assert_eq!(read_str(&printed).unwrap(), Value::string(&s));
    }

    /// Raw printing of a string is the string itself
    #[test]
    fn raw_string_print_is_identity(s in arb_text()) {
        prop_assert_eq!(Value::string(&s).pr_str(false), s);
    }
}
