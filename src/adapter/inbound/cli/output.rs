//! Terminal rendering for the CLI.
//!
//! The process picks one [`Mode`] from its global flags. Handlers branch on
//! it once; the text helpers below assume human mode. Errors always go to
//! stderr, as a JSON line in JSON mode.

use std::fmt::Display;
use std::sync::OnceLock;

use owo_colors::OwoColorize;
use serde_json::json;

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Colored text and tables.
    #[default]
    Human,
    /// One JSON document per command.
    Json,
    /// Nothing on success.
    Quiet,
}

impl Mode {
    /// `--json` wins over `--quiet`: scripts still get their document.
    #[must_use]
    pub const fn from_flags(json: bool, quiet: bool) -> Self {
        match (json, quiet) {
            (true, _) => Self::Json,
            (false, true) => Self::Quiet,
            (false, false) => Self::Human,
        }
    }
}

static MODE: OnceLock<Mode> = OnceLock::new();

/// Fix the output mode for this process. Only the first call takes effect.
pub fn configure(mode: Mode) {
    let _ = MODE.set(mode);
}

/// The configured mode, human when never configured.
#[must_use]
pub fn mode() -> Mode {
    MODE.get().copied().unwrap_or_default()
}

pub fn json_output(value: serde_json::Value) {
    println!("{value}");
}

/// Tool name and version, then the address the output is about.
pub fn header(address: impl Display) {
    println!("{} {}", "walletlens".bold(), env!("CARGO_PKG_VERSION").dimmed());
    field("Address", address.cyan());
}

pub fn section(title: &str) {
    println!();
    println!("{}", title.bold());
}

pub fn field(label: &str, value: impl Display) {
    println!("  {:<12} {}", label.dimmed(), value);
}

/// Indent a pre-rendered table.
pub fn block(text: impl Display) {
    for line in text.to_string().lines() {
        println!("  {line}");
    }
}

pub fn note(message: &str) {
    println!("  {}", message.dimmed());
}

pub fn error(message: &str) {
    if mode() == Mode::Json {
        eprintln!("{}", json!({ "type": "error", "payload": { "message": message } }));
        return;
    }
    eprintln!("  {} {}", "×".red(), message);
}
