// copywacht/src/ui/output.rs
//! Console message helpers.
//!
//! Reports go to stdout, plain and machine-comparable. These helpers write
//! status messages to stderr, colored only when stderr is a terminal.

use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use std::io::{self, Write};

/// Prints an informational message to stderr.
pub fn info_msg(msg: impl AsRef<str>) {
    let msg = msg.as_ref();
    if io::stderr().is_terminal() {
        let _ = writeln!(io::stderr(), "{}", msg.cyan());
    } else {
        let _ = writeln!(io::stderr(), "{msg}");
    }
}

/// Prints a warning message to stderr.
pub fn warn_msg(msg: impl AsRef<str>) {
    let msg = msg.as_ref();
    if io::stderr().is_terminal() {
        let _ = writeln!(io::stderr(), "{}", msg.yellow());
    } else {
        let _ = writeln!(io::stderr(), "{msg}");
    }
}

/// Prints an error message to stderr.
pub fn error_msg(msg: impl AsRef<str>) {
    let msg = msg.as_ref();
    if io::stderr().is_terminal() {
        let _ = writeln!(io::stderr(), "{} {}", "error:".red().bold(), msg);
    } else {
        let _ = writeln!(io::stderr(), "error: {msg}");
    }
}
