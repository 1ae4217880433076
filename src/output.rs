//! # Output Module
//!
//! This module centralizes all user-facing output for the headerfix tool.
//! Stdout carries the per-file result lines that pre-commit and scripts
//! consume; colors and the closing summary are decoration on top.

use std::path::Path;
use std::time::Duration;

use owo_colors::{OwoColorize, Stream};

use crate::header::YearWarning;
use crate::logging::is_quiet;

/// Symbols used in output
pub mod symbols {
  /// Success/header already canonical
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Header rewritten
  pub const UPDATED: &str = "\u{21bb}"; // ↻
}

/// Print the result line for a file whose header was rewritten.
///
/// In dry-run mode the file was left untouched and the wording says so.
/// Always printed, even in quiet mode: this line is the tool's contract
/// with its caller.
pub fn print_updated_file(path: &Path, dry_run: bool) {
  let verb = if dry_run { "Would update" } else { "Updated" };
  println!(
    "{} {} license header in {}",
    symbols::UPDATED.if_supports_color(Stream::Stdout, |s| s.yellow()),
    verb,
    path.display()
  );
}

/// Print the all-clear line when no file needed changes.
pub fn print_all_files_ok() {
  if is_quiet() {
    return;
  }
  println!(
    "{} All headers already canonical",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green())
  );
}

/// Print the end-of-run summary.
pub fn print_summary(checked: usize, updated: usize, elapsed: Duration, dry_run: bool) {
  if is_quiet() {
    return;
  }

  let files_word = if checked == 1 { "file" } else { "files" };
  let verb = if dry_run { "would change" } else { "updated" };
  println!(
    "{} {} checked, {} {} ({}ms)",
    checked,
    files_word,
    updated,
    verb,
    elapsed.as_millis()
  );
}

/// Print a stale-copyright-year advisory to stderr.
///
/// Advisory only: the run continues and the modification outcome is
/// unaffected.
pub fn print_year_warning(warning: &YearWarning, current_year: i32) {
  eprintln!(
    "{} copyright end year {} is not the current year {}: {}",
    "warning:".if_supports_color(Stream::Stderr, |s| s.yellow()),
    warning.end_year,
    current_year,
    warning.line
  );
}
