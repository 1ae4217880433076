//! # Diff Module
//!
//! Renders line diffs between a file's current contents and the planned
//! rewrite, for `--show-diff` and `--save-diff` in dry-run workflows.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use similar::{ChangeTag, TextDiff};

/// Manages diff rendering for pending header changes.
pub struct DiffManager {
  /// Whether to print diffs to stderr.
  pub show_diff: bool,

  /// Path of a consolidated diff file to append to, if any.
  pub save_diff_path: Option<PathBuf>,
}

impl DiffManager {
  /// Creates a new DiffManager.
  pub const fn new(show_diff: bool, save_diff_path: Option<PathBuf>) -> Self {
    Self {
      show_diff,
      save_diff_path,
    }
  }

  /// Whether any diff output was requested.
  pub const fn is_active(&self) -> bool {
    self.show_diff || self.save_diff_path.is_some()
  }

  /// Render and emit the diff for one file.
  ///
  /// Prints to stderr when `show_diff` is set and appends to the
  /// consolidated diff file when one was configured. Multiple files append
  /// to the same file within a run.
  pub fn emit(&self, path: &Path, original: &str, new: &str) -> Result<()> {
    if !self.is_active() {
      return Ok(());
    }

    let rendered = render_diff(path, original, new);

    if self.show_diff {
      eprint!("{rendered}");
    }

    if let Some(ref diff_path) = self.save_diff_path {
      let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(diff_path)
        .with_context(|| format!("Failed to open diff file: {}", diff_path.display()))?;
      file
        .write_all(rendered.as_bytes())
        .with_context(|| format!("Failed to write diff file: {}", diff_path.display()))?;
    }

    Ok(())
  }
}

/// Render a unified-style line diff with +/-/space gutters.
fn render_diff(path: &Path, original: &str, new: &str) -> String {
  let diff = TextDiff::from_lines(original, new);

  let mut out = format!("Diff for {}:\n", path.display());
  for change in diff.iter_all_changes() {
    let sign = match change.tag() {
      ChangeTag::Delete => "-",
      ChangeTag::Insert => "+",
      ChangeTag::Equal => " ",
    };
    out.push_str(sign);
    out.push_str(change.value());
    if !change.value().ends_with('\n') {
      out.push('\n');
    }
  }
  out.push('\n');

  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn renders_insertions_and_deletions() {
    let rendered = render_diff(Path::new("a.py"), "# old\nbody\n", "# new\n\nbody\n");
    assert!(rendered.starts_with("Diff for a.py:\n"));
    assert!(rendered.contains("-# old\n"));
    assert!(rendered.contains("+# new\n"));
    assert!(rendered.contains(" body\n"));
  }

  #[test]
  fn inactive_manager_emits_nothing() {
    let manager = DiffManager::new(false, None);
    // No panic, no I/O
    manager.emit(Path::new("a.py"), "x", "y").expect("emit");
  }
}
