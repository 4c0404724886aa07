//! Human-facing status output. Everything goes to stderr so stdout stays
//! machine-readable JSON.

use colored::{ColoredString, Colorize};
use std::fmt::Display;

/// Severity of a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Info,
    Warn,
    Error,
}

impl Status {
    fn marker(self) -> ColoredString {
        match self {
            Status::Ok => "ok".green().bold(),
            Status::Info => "info".blue().bold(),
            Status::Warn => "warn".yellow().bold(),
            Status::Error => "error".red().bold(),
        }
    }

    fn paint(self, message: &str) -> ColoredString {
        match self {
            Status::Ok => message.green(),
            Status::Info => message.normal(),
            Status::Warn => message.yellow(),
            Status::Error => message.red(),
        }
    }
}

/// Print one status line, e.g. `warn: config already exists`
pub fn status(status: Status, message: &str) {
    eprintln!("{}: {}", status.marker(), status.paint(message));
}

pub fn section(title: &str) {
    eprintln!("\n{}", title.cyan().bold().underline());
}

/// Print a labelled value, indented under a section
pub fn field(key: &str, value: impl Display) {
    eprintln!("  {:<18} {}", key.cyan(), value);
}
