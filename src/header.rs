//! # Header Module
//!
//! This module assembles the canonical license header from a license-file
//! excerpt plus literal extra lines, and provides the copyright-year
//! advisory check that warns about stale end years.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;

use crate::verbose_log;

/// The ordered sequence of header lines a file should carry.
///
/// Lines are stored as bytes without trailing line endings; equality is
/// sequence equality, byte for byte. The header is built once per run and
/// passed to the rewriter unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalHeader {
  lines: Vec<Vec<u8>>,
}

impl CanonicalHeader {
  /// Creates a canonical header from pre-stripped lines.
  pub const fn new(lines: Vec<Vec<u8>>) -> Self {
    Self { lines }
  }

  /// The header lines, in order.
  pub fn lines(&self) -> &[Vec<u8>] {
    &self.lines
  }

  /// Whether the header has no lines at all.
  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }
}

/// Builds the canonical header for a run.
///
/// When a license file is given, `start` lines are skipped and `num` lines
/// are copied from it, each stripped of surrounding whitespace. A license
/// file shorter than `start + num` lines contributes empty lines for the
/// missing tail. The `add` lines are then appended as given, without
/// stripping.
///
/// # Errors
///
/// Returns an error if the license file cannot be read. This is a
/// configuration error and aborts the run before any target file is touched.
pub fn build_header(license_file: Option<&Path>, start: usize, num: usize, add: &[String]) -> Result<CanonicalHeader> {
  let mut lines: Vec<Vec<u8>> = Vec::with_capacity(num + add.len());

  if let Some(path) = license_file {
    verbose_log!("Reading header lines from: {}", path.display());

    let content =
      fs::read(path).with_context(|| format!("Failed to read license file: {}", path.display()))?;

    let mut file_lines = content.split(|&b| b == b'\n').skip(start);
    for _ in 0..num {
      let line = file_lines.next().unwrap_or(b"");
      lines.push(line.trim_ascii().to_vec());
    }
  }

  for line in add {
    lines.push(line.clone().into_bytes());
  }

  Ok(CanonicalHeader::new(lines))
}

/// A header line whose copyright end year is not the current year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearWarning {
  /// The offending header line, lossily decoded for display.
  pub line: String,

  /// The end year found in the line.
  pub end_year: i32,
}

/// Matches "copyright <year>" and "copyright <start>-<end>" patterns,
/// case-insensitively, with an optional (c) or © symbol.
static COPYRIGHT_YEAR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?i)copyright\s+(?:\(c\)\s+|©\s+)?(\d{4})(?:\s*-\s*(\d{4}))?").expect("year regex must compile")
});

/// Scans the canonical header for copyright lines whose end year differs
/// from `current_year`.
///
/// Purely advisory: callers report the warnings on stderr and continue; the
/// result never affects whether a file is rewritten.
pub fn stale_copyright_years(header: &CanonicalHeader, current_year: i32) -> Vec<YearWarning> {
  let mut warnings = Vec::new();

  for raw in header.lines() {
    let line = String::from_utf8_lossy(raw);
    if let Some(caps) = COPYRIGHT_YEAR_REGEX.captures(&line) {
      let end = caps
        .get(2)
        .or_else(|| caps.get(1))
        .and_then(|m| m.as_str().parse::<i32>().ok());
      if let Some(end_year) = end
        && end_year != current_year
      {
        warnings.push(YearWarning {
          line: line.into_owned(),
          end_year,
        });
      }
    }
  }

  warnings
}
