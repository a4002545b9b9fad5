//! Terminal diagnostics.
//!
//! Informational lines go to stdout prefixed with `[i]`, warnings and
//! errors go to stderr prefixed with `[!]` and `[-]`. Raw command echo
//! is gated behind [`Echo`] so it only appears with `--echo`.

use colored::*;

pub const INFO_PREFIX: &str = "[i]";
pub const WARN_PREFIX: &str = "[!]";
pub const ERROR_PREFIX: &str = "[-]";

pub fn info(msg: &str) {
    println!("{} {}", INFO_PREFIX.blue(), msg);
}

pub fn warn(msg: &str) {
    eprintln!("{} {}", WARN_PREFIX.yellow(), msg);
}

pub fn error(msg: &str) {
    eprintln!("{} {}", ERROR_PREFIX.red(), msg);
}

pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Prints raw command lines when enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct Echo {
    enabled: bool,
}

impl Echo {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn line(&self, raw: &str) {
        if self.enabled {
            println!("{}", raw.dimmed());
        }
    }
}

/// Renders an error and its causes as one line, `outer: inner: root`.
pub fn chain(err: &dyn std::error::Error) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}
