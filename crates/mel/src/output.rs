//! Output helpers for the `mel` CLI.

use serde::Serialize;
use std::io::{self, Write};

/// Print a value as pretty JSON to stdout.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            // Ignore broken pipe errors (e.g., piped to `head`)
            let _ = writeln!(handle, "{}", json);
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Write captured command output to stdout, adding a trailing newline when
/// the command did not print one.
pub fn print_captured(output: &str) {
    if output.is_empty() {
        return;
    }
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let _ = handle.write_all(output.as_bytes());
    if !output.ends_with('\n') {
        let _ = writeln!(handle);
    }
    let _ = handle.flush();
}
