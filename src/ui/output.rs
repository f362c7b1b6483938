//! ui::output
//!
//! User-facing printing for the CLI.
//!
//! Results go to stdout; warnings and errors go to stderr. `--quiet` hides
//! chatter but never the value a command was asked for ([`result`]).
//! Engine diagnostics are `tracing` events and never pass through here.

use std::fmt::Display;

use serde::Serialize;

/// How much the CLI says besides its results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// `--quiet`: results and errors only
    Quiet,
    Normal,
    /// `--debug`
    Debug,
}

impl Verbosity {
    /// `--quiet` wins over `--debug`.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        match (quiet, debug) {
            (true, _) => Verbosity::Quiet,
            (false, true) => Verbosity::Debug,
            (false, false) => Verbosity::Normal,
        }
    }

    /// Whether informational lines and warnings are shown.
    pub fn chatty(self) -> bool {
        self != Verbosity::Quiet
    }
}

/// Informational line on stdout, hidden under `--quiet`.
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity.chatty() {
        println!("{}", message);
    }
}

/// Print a result line, shown even in quiet mode.
///
/// Used for the single value a command exists to produce, so scripts can
/// run with `--quiet` and still read it.
pub fn result(message: impl Display) {
    println!("{}", message);
}

/// Pretty-printed JSON document on stdout.
pub fn json<T: Serialize>(value: &T) -> serde_json::Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    println!("{}", text);
    Ok(())
}

/// `error: ...` on stderr, regardless of verbosity.
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// `warning: ...` on stderr, hidden under `--quiet`.
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity.chatty() {
        eprintln!("warning: {}", message);
    }
}
