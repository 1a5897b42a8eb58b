//! Astral-style CLI output formatting.
//!
//! Human output goes to stdout with colored symbols and indented fields.
//! In JSON mode each command emits one JSON document through
//! [`json_output`] and the human helpers stay silent, so stdout remains
//! machine-parseable. Errors always go to stderr.

use std::fmt::Display;
use std::io::IsTerminal;
use std::sync::{OnceLock, RwLock};

use owo_colors::OwoColorize;
use serde_json::json;
use tabled::{settings::Style, Table, Tabled};

use super::command::ColorChoice;

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON output instead of human-readable text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Verbosity level (0 = normal, 1+ = increasingly verbose).
    pub verbose: u8,
    /// Paint output with ANSI colors.
    pub color: bool,
}

impl OutputConfig {
    /// Create a new output configuration.
    #[must_use]
    pub const fn new(json: bool, quiet: bool, verbose: u8, color: bool) -> Self {
        Self {
            json,
            quiet,
            verbose,
            color,
        }
    }
}

/// Resolve `--color` against the terminal and `NO_COLOR`.
#[must_use]
pub fn color_enabled(choice: &ColorChoice) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
        }
    }
}

/// Global output configuration singleton.
static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn read_config() -> OutputConfig {
    match config_cell().read() {
        Ok(config) => *config,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

fn write_config(config: OutputConfig) {
    match config_cell().write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

/// Human output is skipped in JSON mode and in quiet mode.
fn human_suppressed(config: OutputConfig) -> bool {
    config.json || config.quiet
}

fn paint(value: impl Display, style: impl FnOnce(&str) -> String) -> String {
    let value = value.to_string();
    if read_config().color {
        style(&value)
    } else {
        value
    }
}

/// Apply output settings from global CLI flags.
///
/// Call this early in the CLI entry point.
pub fn configure(config: OutputConfig) {
    write_config(config);
}

/// Return whether machine-readable JSON output is enabled.
#[must_use]
pub fn is_json() -> bool {
    read_config().json
}

/// Return whether quiet mode is enabled.
#[must_use]
pub fn is_quiet() -> bool {
    read_config().quiet
}

/// Return the global verbosity level from `-v` flags.
#[must_use]
pub fn verbosity() -> u8 {
    read_config().verbose
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    let config = read_config();
    if human_suppressed(config) {
        return;
    }

    println!("  {:<16} {}", paint(label, |s| s.dimmed().to_string()), value);
}

/// Print a labeled value only when it is present.
pub fn optional_field(label: &str, value: Option<impl Display>) {
    if let Some(value) = value {
        field(label, value);
    }
}

/// Print a success line.
pub fn success(message: &str) {
    let config = read_config();
    if human_suppressed(config) {
        return;
    }

    println!("  {} {}", paint("✓", |s| s.green().to_string()), message);
}

/// Print a warning line.
///
/// Warnings survive quiet mode; in JSON mode they go to stderr.
pub fn warning(message: &str) {
    let config = read_config();

    if config.json {
        eprintln!(
            "{}",
            json!({
                "type": "warning",
                "payload": { "message": message },
            })
        );
        return;
    }

    println!("  {} {}", paint("⚠", |s| s.yellow().to_string()), message);
}

/// Print an error line to stderr.
pub fn error(message: &str) {
    let config = read_config();

    if config.json {
        eprintln!(
            "{}",
            json!({
                "type": "error",
                "payload": { "message": message },
            })
        );
        return;
    }

    eprintln!("  {} {}", paint("×", |s| s.red().to_string()), message);
}

/// Print an error with its category as a JSON line on stdout.
///
/// Used by the entry point in JSON mode so scripts can read the failure
/// from the same stream as results.
pub fn json_error(kind: &str, message: &str) {
    println!(
        "{}",
        json!({
            "error": {
                "kind": kind,
                "message": message,
            }
        })
    );
}

/// Print a section header.
pub fn section(title: &str) {
    let config = read_config();
    if human_suppressed(config) {
        return;
    }

    println!();
    println!("{}", paint(title, |s| s.bold().to_string()));
}

/// Format a positive value in green.
pub fn positive(value: impl Display) -> String {
    paint(value, |s| s.green().to_string())
}

/// Format a negative value in red.
pub fn negative(value: impl Display) -> String {
    paint(value, |s| s.red().to_string())
}

/// Format a highlighted value in cyan.
pub fn highlight(value: impl Display) -> String {
    paint(value, |s| s.cyan().to_string())
}

/// Format a dimmed/muted value.
pub fn muted(value: impl Display) -> String {
    paint(value, |s| s.dimmed().to_string())
}

/// Print a note.
pub fn note(message: &str) {
    let config = read_config();
    if human_suppressed(config) {
        return;
    }

    println!("  {}", paint(message, |s| s.dimmed().to_string()));
}

/// Print a hint with "hint:" prefix (Astral-style).
pub fn hint(message: &str) {
    let config = read_config();
    if human_suppressed(config) {
        return;
    }

    println!(
        "  {}: {}",
        paint("hint", |s| s.cyan().dimmed().to_string()),
        paint(message, |s| s.dimmed().to_string())
    );
}

/// Print an action in progress (Astral-style "Submitting...").
pub fn action(verb: &str, target: &str) {
    let config = read_config();
    if human_suppressed(config) {
        return;
    }

    println!("  {} {}...", paint(verb, |s| s.bold().cyan().to_string()), target);
}

/// Print multiple lines of content, each indented.
pub fn lines(content: &str) {
    let config = read_config();
    if human_suppressed(config) {
        return;
    }

    for line in content.lines() {
        println!("  {}", line);
    }
}

/// Render rows as a rounded table.
pub fn table<T: Tabled>(rows: impl IntoIterator<Item = T>) {
    let config = read_config();
    if human_suppressed(config) {
        return;
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    lines(&table.to_string());
}

/// Emit a JSON value directly.
pub fn json_output(value: serde_json::Value) {
    println!("{}", value);
}
