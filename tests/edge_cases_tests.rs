use std::fs;

use anyhow::Result;
use headerfix::header::CanonicalHeader;
use headerfix::rewriter::{FixStatus, HeaderRewriter, RewritePlan};
use tempfile::tempdir;

fn make_rewriter(lines: &[&str], prefix: &str, keep_before: &[&str], keep_after: &[&str]) -> HeaderRewriter {
  HeaderRewriter::new(
    CanonicalHeader::new(lines.iter().map(|l| l.as_bytes().to_vec()).collect()),
    prefix.as_bytes().to_vec(),
    keep_before.iter().map(|p| p.as_bytes().to_vec()).collect(),
    keep_after.iter().map(|p| p.as_bytes().to_vec()).collect(),
  )
}

#[test]
fn empty_header_strips_the_comment_block() -> Result<()> {
  let dir = tempdir()?;
  let path = dir.path().join("script.py");
  fs::write(&path, "# old junk\n\nbody\n")?;

  let rewriter = make_rewriter(&[], "# ", &[], &[]);
  assert_eq!(rewriter.fix_path(&path)?, FixStatus::Updated);
  assert_eq!(fs::read(&path)?, b"\nbody\n");

  // Stripping is itself idempotent
  assert_eq!(rewriter.fix_path(&path)?, FixStatus::Unchanged);
  Ok(())
}

#[test]
fn file_containing_only_keep_before_lines() -> Result<()> {
  let dir = tempdir()?;
  let path = dir.path().join("run.sh");
  fs::write(&path, "#!/bin/sh\n")?;

  let rewriter = make_rewriter(&["the header"], "# ", &["#!"], &[]);
  assert_eq!(rewriter.fix_path(&path)?, FixStatus::Updated);
  assert_eq!(fs::read(&path)?, b"#!/bin/sh\n# the header\n");
  Ok(())
}

#[test]
fn file_starting_with_a_blank_line() -> Result<()> {
  let dir = tempdir()?;
  let path = dir.path().join("script.py");
  fs::write(&path, "\nbody\n")?;

  let rewriter = make_rewriter(&["the header"], "# ", &[], &[]);
  assert_eq!(rewriter.fix_path(&path)?, FixStatus::Updated);
  // The remainder already begins with the line ending, so no extra
  // separator is added
  assert_eq!(fs::read(&path)?, b"# the header\n\nbody\n");
  Ok(())
}

#[test]
fn keep_after_requires_the_comment_prefix_to_enter_the_region() {
  // A keep-after line that does not itself start with the comment prefix
  // terminates the scan instead of being captured.
  let rewriter = make_rewriter(&["hdr"], "# ", &[], &["MARKER"]);
  match rewriter.plan(b"# old\nMARKER here\nbody\n") {
    RewritePlan::Replace(out) => {
      assert_eq!(out, b"# hdr\n\nMARKER here\nbody\n");
    }
    RewritePlan::Unchanged => panic!("expected a rewrite"),
  }
}

#[test]
fn empty_prefix_consumes_every_line() {
  // Degenerate but well-defined: with an empty prefix every line is header
  // content, so a file with an empty canonical header is emptied.
  let rewriter = make_rewriter(&[], "", &[], &[]);
  match rewriter.plan(b"a\nb\n") {
    RewritePlan::Replace(out) => assert_eq!(out, b""),
    RewritePlan::Unchanged => panic!("expected a rewrite"),
  }
}

#[test]
fn mixed_line_endings_follow_the_first_line() {
  // The ending is detected once, from the first line; later lines do not
  // change it.
  let rewriter = make_rewriter(&["hdr"], "# ", &[], &[]);
  match rewriter.plan(b"# old\r\nbody\nmore\n") {
    RewritePlan::Replace(out) => {
      assert!(out.starts_with(b"# hdr\r\n"));
      assert!(out.ends_with(b"body\nmore\n"));
    }
    RewritePlan::Unchanged => panic!("expected a rewrite"),
  }
}

#[test]
fn header_with_blank_canonical_line() -> Result<()> {
  let dir = tempdir()?;
  let path = dir.path().join("script.py");
  fs::write(&path, "body\n")?;

  let rewriter = make_rewriter(&["first", "", "third"], "# ", &[], &[]);
  assert_eq!(rewriter.fix_path(&path)?, FixStatus::Updated);
  assert_eq!(fs::read(&path)?, b"# first\n# \n# third\n\nbody\n");

  // A blank canonical line still round-trips: "# " strips back to ""
  assert_eq!(rewriter.fix_path(&path)?, FixStatus::Unchanged);
  Ok(())
}
