//! Terminal output for task listings and reports.
//!
//! Status lines are colored when the stream supports it; `--format json`
//! bypasses all of this and prints a single pretty-printed document.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const ARROW: &str = "→";
  pub const INFO: &str = "•";
}

/// Wall-clock duration of a task: milliseconds below a second, then seconds
/// with two decimals, then minutes and whole seconds.
pub fn format_duration(duration: Duration) -> String {
  match duration.as_secs() {
    0 => format!("{}ms", duration.as_millis()),
    1..60 => format!("{:.2}s", duration.as_secs_f64()),
    secs => format!("{}m {}s", secs / 60, secs % 60),
  }
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

/// One row of `jig --list`, name padded to `width`.
pub fn print_task(name: &str, description: &str, width: usize) {
  println!(
    "  {} {}  {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    format!("{name:width$}").if_supports_color(Stream::Stdout, |s| s.bold()),
    description.if_supports_color(Stream::Stdout, |s| s.dimmed())
  );
}

pub fn print_artifact(path: &Path) {
  println!(
    "  {} {}",
    symbols::ARROW.if_supports_color(Stream::Stdout, |s| s.cyan()),
    path.display()
  );
}

pub fn print_stat(label: &str, value: &str) {
  println!(
    "  {}: {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}
