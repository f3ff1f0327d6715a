//! Shared CLI output helpers for consistent terminal output.
//!
//! Styling goes through the console crate, which disables color on
//! non-terminals and when NO_COLOR is set.
//!
//! Color scheme:
//! - Green: success, checkmarks
//! - Red: errors
//! - Yellow: warnings
//! - Cyan: hints, keys
//! - Dimmed: secondary info

use console::{style, Style};
use std::fmt::Display;

/// Print a success message with checkmark (green).
///
/// Example: `✓ injected 2 secrets`
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green(), msg);
}

/// Print an error message to stderr (red).
///
/// Example: `✗ unresolved secrets: db.password (not found)`
pub fn error(msg: &str) {
    eprintln!("{} {}", Style::new().red().for_stderr().apply_to("✗"), msg);
}

/// Print a warning message (yellow).
///
/// Example: `⚠ secret store unavailable`
pub fn warn(msg: &str) {
    println!("{} {}", style("⚠").yellow(), msg);
}

/// Print a hint message (cyan).
///
/// Example: `→ run: hoist init`
pub fn hint(msg: &str) {
    println!("{} {}", style("→").cyan(), style(msg).cyan());
}

/// Print a key-value pair (label dimmed, value bold).
///
/// Example: `  project  my-gcp-project`
pub fn kv(label: &str, value: impl Display) {
    println!(
        "  {}  {}",
        style(label).dim(),
        style(value.to_string()).bold()
    );
}

/// Print a list item with bullet.
///
/// Example: `  • db.password`
pub fn list_item(item: &str) {
    println!("  • {}", item);
}

/// Print a dimmed/secondary message.
///
/// Example: `no secrets configured`
pub fn dimmed(msg: &str) {
    println!("{}", style(msg).dim());
}
