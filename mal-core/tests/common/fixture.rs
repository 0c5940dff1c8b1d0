// mal-core - Conformance fixture tables
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Loader and runner for `.mal` conformance tables.
//!
//! A table is a sequence of lines:
//!
//! - blank lines, `;;` comments and `;>>>` directives are ignored;
//! - any line not starting with `;` is an input;
//! - an input followed by a line starting with `;=>` must print exactly
//!   the rest of that line; one followed by `;/` must match the rest of
//!   that line as a regex (braces are literal);
//! - an input followed by another input is a setup step: it runs, but its
//!   output is not checked.
//!
//! A failed step is compared through its error message.

use std::fmt;
use std::path::PathBuf;

use regex::Regex;

/// What an input line must produce.
#[derive(Debug, Clone, PartialEq)]
pub enum Expectation {
    Exact(String),
    Matches(String),
}

impl Expectation {
    fn parse(line: &str) -> Result<Self, String> {
        if let Some(rest) = line.strip_prefix(";=>") {
            Ok(Expectation::Exact(rest.to_string()))
        } else if let Some(rest) = line.strip_prefix(";/") {
            Ok(Expectation::Matches(rest.to_string()))
        } else {
            Err(format!("invalid expected output: {line}"))
        }
    }

    /// Check `output` against the expectation.
    pub fn check(&self, output: &str) -> Result<(), String> {
        match self {
            Expectation::Exact(expected) if output == expected => Ok(()),
            Expectation::Exact(expected) => {
                Err(format!("expected {expected:?}, got {output:?}"))
            }
            Expectation::Matches(pattern) => {
                let escaped = pattern.replace('{', "\\{").replace('}', "\\}");
                let re = Regex::new(&format!("^(?:{escaped})$"))
                    .map_err(|e| format!("bad pattern {pattern:?}: {e}"))?;
                if re.is_match(output) {
                    Ok(())
                } else {
                    Err(format!("{output:?} does not match /{pattern}/"))
                }
            }
        }
    }
}

/// One input line and what it must produce, if anything.
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    /// 1-based line number in the source table
    pub line: usize,
    pub input: String,
    pub expected: Option<Expectation>,
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.input)
    }
}

fn is_ignored(line: &str) -> bool {
    line.trim().is_empty() || line.starts_with(";;") || line.starts_with(";>>>")
}

/// Parse a table. Fails on an expectation line with an unknown prefix.
pub fn parse(text: &str) -> Result<Vec<Case>, String> {
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !is_ignored(line))
        .collect();

    let mut cases = Vec::new();
    for (i, &(line, input)) in lines.iter().enumerate() {
        if input.starts_with(';') {
            continue;
        }
        let expected = match lines.get(i + 1) {
            Some(&(at, next)) if next.starts_with(';') => {
                Some(Expectation::parse(next).map_err(|e| format!("line {at}: {e}"))?)
            }
            _ => None,
        };
        cases.push(Case {
            line,
            input: input.to_string(),
            expected,
        });
    }
    Ok(cases)
}

/// Read a table from `tests/fixtures/`.
pub fn load(name: &str) -> String {
    let path: PathBuf = [env!("CARGO_MANIFEST_DIR"), "tests", "fixtures", name]
        .iter()
        .collect();
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read fixture {}: {e}", path.display()))
}

/// Run every case of the named table through `process`, panicking with a
/// report of all failures.
pub fn run(name: &str, mut process: impl FnMut(&str) -> Result<String, String>) {
    let cases = parse(&load(name)).unwrap_or_else(|e| panic!("{name}: {e}"));
    assert!(!cases.is_empty(), "{name}: no cases");

    let failures: Vec<String> = cases
        .iter()
        .filter_map(|case| {
            let output = process(&case.input).unwrap_or_else(|message| message);
            let expected = case.expected.as_ref()?;
            expected.check(&output).err().map(|e| format!("{case}\n    {e}"))
        })
        .collect();

    assert!(
        failures.is_empty(),
        "{name}: {} of {} cases failed:\n{}",
        failures.len(),
        cases.len(),
        failures.join("\n")
    );
}
