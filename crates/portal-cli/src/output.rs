//! Output formatting helpers.
//!
//! Data goes to stdout as JSON; status lines and failures go to stderr.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

/// Print a success message.
pub fn success(msg: &str) {
    eprintln!("{} {}", "✓".green(), msg);
}

/// Print a failed item without aborting the command.
pub fn failure(item: &str, reason: impl std::fmt::Display) {
    eprintln!("{} {}: {}", "✗".red(), item, reason);
}

/// Print a labeled field.
pub fn field(label: &str, value: impl std::fmt::Display) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as JSON, one line unless `pretty`.
pub fn json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}
