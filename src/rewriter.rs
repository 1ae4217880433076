//! # Rewriter Module
//!
//! This module contains the core engine that normalizes the leading comment
//! block of a file to a canonical license header.
//!
//! The engine works on raw bytes. It scans the leading run of lines that
//! belong to the comment block, partitions them into three classes
//! (keep-before, header, keep-after), and compares the observed header lines
//! against the canonical header. When they differ, the file is truncated and
//! rewritten in place: preserved lines first, then the canonical header, then
//! the preserved trailer and the untouched body.
//!
//! The scan and render steps are pure functions over `&[u8]`; the only I/O
//! happens when a [`RewritePlan`] is committed to an open file handle.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::trace;

use crate::header::CanonicalHeader;

/// Line ending used by a file, detected once from its first physical line.
///
/// Every line the rewriter emits uses the detected ending, even if later
/// lines of the original file used a different one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
  /// Unix-style `\n`.
  Lf,
  /// Windows-style `\r\n`.
  CrLf,
}

impl LineEnding {
  /// Detect the line ending from the first raw line of a file.
  ///
  /// An empty file (empty first line) detects as [`LineEnding::Lf`] by
  /// convention.
  pub fn detect(first_line: &[u8]) -> Self {
    if first_line.ends_with(b"\r\n") { Self::CrLf } else { Self::Lf }
  }

  /// The byte sequence for this line ending.
  pub const fn as_bytes(self) -> &'static [u8] {
    match self {
      Self::Lf => b"\n",
      Self::CrLf => b"\r\n",
    }
  }
}

/// Iterator over the raw physical lines of a byte buffer.
///
/// Each yielded line includes its trailing `\n` (and `\r` for CRLF files)
/// when present; the final line of a file without a trailing newline is
/// yielded without one.
struct RawLines<'a> {
  buf: &'a [u8],
  pos: usize,
}

impl<'a> RawLines<'a> {
  const fn new(buf: &'a [u8]) -> Self {
    Self { buf, pos: 0 }
  }

  /// Byte offset of the next unread line.
  const fn offset(&self) -> usize {
    self.pos
  }
}

impl<'a> Iterator for RawLines<'a> {
  type Item = &'a [u8];

  fn next(&mut self) -> Option<&'a [u8]> {
    if self.pos >= self.buf.len() {
      return None;
    }
    let rest = &self.buf[self.pos..];
    let end = match rest.iter().position(|&b| b == b'\n') {
      Some(i) => i + 1,
      None => rest.len(),
    };
    self.pos += end;
    Some(&rest[..end])
  }
}

/// Classification of a single leading line.
///
/// Classification is mutually exclusive and ordered: a keep-before match wins
/// over keep-after, which wins over treating the line as header content. All
/// checks run against the raw line, before the comment prefix is stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineClass {
  KeepBefore,
  KeepAfter,
  Header,
}

/// Partition of a file's leading region.
///
/// `before`, `after`, and the body starting at `remainder_start` are never
/// altered in content, only repositioned; the observed header lines are the
/// only content subject to replacement.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FileRegion {
  /// Verbatim bytes of keep-before lines, in original order.
  pub before: Vec<u8>,

  /// Observed header lines with the prefix and surrounding whitespace
  /// stripped, in original order.
  pub observed_header: Vec<Vec<u8>>,

  /// Verbatim bytes of keep-after lines, in original order.
  pub after: Vec<u8>,

  /// Byte offset where the remainder begins: the first line that matched
  /// neither the comment prefix nor a keep prefix, plus everything after it.
  pub remainder_start: usize,
}

/// Outcome of fixing a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixStatus {
  /// The file already carried the canonical header and was not touched.
  Unchanged,
  /// The file was rewritten with the canonical header.
  Updated,
}

impl FixStatus {
  /// Whether the file was modified.
  #[allow(dead_code)] // Used by library consumers and tests, not in the CLI binary
  pub const fn modified(self) -> bool {
    matches!(self, Self::Updated)
  }
}

/// The decision reached for a file's contents.
#[derive(Debug, PartialEq, Eq)]
pub enum RewritePlan {
  /// The leading region already conforms; no write is needed.
  Unchanged,
  /// The full replacement contents of the file.
  Replace(Vec<u8>),
}

impl RewritePlan {
  /// Apply the plan to an open read+write file handle.
  ///
  /// For [`RewritePlan::Replace`] the handle is rewound, truncated, and the
  /// planned contents written out. The handle is left open; its cursor ends
  /// up past the written bytes. [`RewritePlan::Unchanged`] performs no I/O.
  pub fn commit(&self, file: &mut File) -> Result<FixStatus> {
    match self {
      Self::Unchanged => Ok(FixStatus::Unchanged),
      Self::Replace(contents) => {
        file.rewind().context("Failed to seek to start of file")?;
        file.set_len(0).context("Failed to truncate file")?;
        file.write_all(contents).context("Failed to write rewritten contents")?;
        Ok(FixStatus::Updated)
      }
    }
  }
}

/// Engine that checks and rewrites the leading comment block of files.
///
/// A `HeaderRewriter` is built from the canonical header, the comment prefix
/// each written header line carries, and the two sets of keep prefixes. It
/// holds no per-file state; the same instance can fix any number of files.
pub struct HeaderRewriter {
  header: CanonicalHeader,
  prefix: Vec<u8>,
  keep_before: Vec<Vec<u8>>,
  keep_after: Vec<Vec<u8>>,
}

impl HeaderRewriter {
  /// Creates a new rewriter.
  ///
  /// # Parameters
  ///
  /// * `header` - The canonical header lines the file should carry
  /// * `prefix` - The comment prefix written before each header line (e.g. `"# "`)
  /// * `keep_before` - Prefixes of lines preserved ahead of the header
  /// * `keep_after` - Prefixes of lines preserved after the header
  pub const fn new(
    header: CanonicalHeader,
    prefix: Vec<u8>,
    keep_before: Vec<Vec<u8>>,
    keep_after: Vec<Vec<u8>>,
  ) -> Self {
    Self {
      header,
      prefix,
      keep_before,
      keep_after,
    }
  }

  /// Decide what to do with the given file contents.
  ///
  /// This is a pure function: it scans the leading region, checks it against
  /// the canonical header, and either reports the file as conforming or
  /// returns the full replacement bytes.
  pub fn plan(&self, content: &[u8]) -> RewritePlan {
    let (region, ending) = self.scan(content);
    if self.conforms(&region, content, ending) {
      RewritePlan::Unchanged
    } else {
      RewritePlan::Replace(self.render(&region, content, ending))
    }
  }

  /// Fix the header of an open read+write file handle, in place.
  ///
  /// Reads the handle from the start, plans the rewrite, and commits it.
  /// The handle is mutated (contents and cursor) but never closed or
  /// reopened.
  #[allow(dead_code)] // Used by library consumers and tests, not in the CLI binary
  pub fn fix_file(&self, file: &mut File) -> Result<FixStatus> {
    let mut content = Vec::new();
    file.rewind().context("Failed to seek to start of file")?;
    file.read_to_end(&mut content).context("Failed to read file")?;
    self.plan(&content).commit(file)
  }

  /// Open the file at `path` for read+write and fix its header in place.
  #[allow(dead_code)] // Used by library consumers and tests, not in the CLI binary
  pub fn fix_path(&self, path: &Path) -> Result<FixStatus> {
    let mut file = OpenOptions::new()
      .read(true)
      .write(true)
      .open(path)
      .with_context(|| format!("Failed to open file: {}", path.display()))?;

    self
      .fix_file(&mut file)
      .with_context(|| format!("Failed to fix header in {}", path.display()))
  }

  /// Scan the leading region of `content` into a [`FileRegion`].
  ///
  /// The loop consumes lines while they start with the comment prefix or any
  /// keep-before prefix, classifying each one. It stops at the first line
  /// that matches neither condition, or at end of input; everything from
  /// that point on is the remainder.
  fn scan(&self, content: &[u8]) -> (FileRegion, LineEnding) {
    let mut lines = RawLines::new(content);
    let mut region = FileRegion {
      remainder_start: content.len(),
      ..FileRegion::default()
    };
    let mut ending = LineEnding::Lf;
    let mut first = true;

    loop {
      let offset = lines.offset();
      let Some(line) = lines.next() else {
        break;
      };
      if first {
        ending = LineEnding::detect(line);
        first = false;
      }
      match self.classify(line) {
        Some(LineClass::KeepBefore) => region.before.extend_from_slice(line),
        Some(LineClass::KeepAfter) => region.after.extend_from_slice(line),
        Some(LineClass::Header) => {
          let stripped = line[self.prefix.len()..].trim_ascii();
          region.observed_header.push(stripped.to_vec());
        }
        None => {
          region.remainder_start = offset;
          break;
        }
      }
    }

    (region, ending)
  }

  /// Classify one raw leading line, or `None` when it ends the leading
  /// region.
  fn classify(&self, line: &[u8]) -> Option<LineClass> {
    let keep_before = self.keep_before.iter().any(|p| line.starts_with(p));
    if !keep_before && !line.starts_with(&self.prefix) {
      return None;
    }
    if keep_before {
      Some(LineClass::KeepBefore)
    } else if self.keep_after.iter().any(|p| line.starts_with(p)) {
      Some(LineClass::KeepAfter)
    } else {
      Some(LineClass::Header)
    }
  }

  /// The idempotence check: a file conforms when its observed header lines
  /// equal the canonical header and the remainder is empty or opens with a
  /// blank separator line.
  ///
  /// A file whose body runs immediately after a matching header is not yet
  /// conforming and will be rewritten; after that rewrite exactly one blank
  /// separator exists and subsequent runs are no-ops.
  fn conforms(&self, region: &FileRegion, content: &[u8], ending: LineEnding) -> bool {
    let remainder = &content[region.remainder_start..];
    region.observed_header == self.header.lines()
      && (remainder.is_empty() || remainder.starts_with(ending.as_bytes()))
  }

  /// Render the replacement contents for a non-conforming file.
  fn render(&self, region: &FileRegion, content: &[u8], ending: LineEnding) -> Vec<u8> {
    let remainder = &content[region.remainder_start..];
    let eol = ending.as_bytes();

    let mut out = Vec::with_capacity(content.len() + 256);
    out.extend_from_slice(&region.before);
    for line in self.header.lines() {
      out.extend_from_slice(&self.prefix);
      out.extend_from_slice(line);
      out.extend_from_slice(eol);
    }
    if !region.after.is_empty() {
      out.extend_from_slice(eol);
      out.extend_from_slice(&region.after);
    }
    if !remainder.is_empty() && !remainder.starts_with(eol) {
      out.extend_from_slice(eol);
    }
    out.extend_from_slice(remainder);

    trace!(
      before = region.before.len(),
      after = region.after.len(),
      remainder = remainder.len(),
      "rendered replacement contents"
    );

    out
  }
}
