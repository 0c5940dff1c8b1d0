// mal - A small Lisp reader and evaluator
// Copyright (c) 2025 Tom Waddington. MIT licensed.

use std::env;
use std::process;

use mal_core::{Env, rep};
use mal_parser::read_str;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const PROMPT: &str = "user> ";
const EXIT_COMMAND: &str = "\\exit";

const USAGE: &str = "\
Usage: mal [--mode echo|read|eval]

Options:
  -m, --mode <MODE>  echo input, read and print it, or evaluate it (default: eval)
  -v, --version      print the version and exit
  -h, --help         print this help and exit

Type \\exit or press Ctrl-D to leave the REPL. Set RUST_LOG to enable logging.";

/// How each input line is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Echo,
    Read,
    Eval,
}

impl Mode {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "echo" => Some(Mode::Echo),
            "read" => Some(Mode::Read),
            "eval" => Some(Mode::Eval),
            _ => None,
        }
    }

    /// Produce the output line for `input`. Errors are reported as their message.
    fn process(self, input: &str, env: &Env) -> String {
        match self {
            Mode::Echo => input.to_string(),
            Mode::Read => read_str(input)
                .map(|form| form.pr_str(true))
                .unwrap_or_else(|e| e.to_string()),
            Mode::Eval => rep(input, env).unwrap_or_else(|e| e.to_string()),
        }
    }
}

/// What the command line asked for.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Repl(Mode),
    Version,
    Help,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Command, String> {
    let mut mode = Mode::Eval;
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-v" => return Ok(Command::Version),
            "--help" | "-h" => return Ok(Command::Help),
            "--mode" | "-m" => {
                let name = args
                    .next()
                    .ok_or_else(|| format!("missing value for {arg}"))?;
                mode = Mode::parse(&name).ok_or_else(|| format!("unknown mode '{name}'"))?;
            }
            other => return Err(format!("unexpected argument '{other}'")),
        }
    }
    Ok(Command::Repl(mode))
}

/// Install a log subscriber, only when `RUST_LOG` is set.
fn init_tracing() {
    if env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() {
    init_tracing();

    let mode = match parse_args(env::args().skip(1)) {
        Ok(Command::Repl(mode)) => mode,
        Ok(Command::Version) => {
            println!("mal v{}", env!("CARGO_PKG_VERSION"));
            return;
        }
        Ok(Command::Help) => {
            println!("{USAGE}");
            return;
        }
        Err(message) => {
            eprintln!("Error: {message}\n\n{USAGE}");
            process::exit(2);
        }
    };

    let env = Env::with_stdlib();
    if let Err(e) = run_repl(mode, &env) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Run the interactive read-eval-print loop until `\exit` or end of input.
fn run_repl(mode: Mode, env: &Env) -> rustyline::Result<()> {
    debug!(?mode, "starting REPL");
    let mut rl = DefaultEditor::new()?;

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                if line.trim() == EXIT_COMMAND {
                    break;
                }
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());
                println!("{}", mode.process(&line, env));
            }
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => break,
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
