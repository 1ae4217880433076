//! # headerfix
//!
//! A tool that normalizes the leading comment block of text files to match a
//! canonical license header, designed to run as a pre-commit hook.
//!
//! For each file it is given, `headerfix` scans the leading run of comment
//! lines, compares them byte-for-byte against the canonical header built
//! from a license-file excerpt plus configured extra lines, and rewrites the
//! file in place when they differ. Designated lines (shebangs, markers) are
//! preserved verbatim before or after the written header.
//!
//! ## Usage as a Library
//!
//! This crate can be used as a library in your Rust projects:
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use headerfix::header::CanonicalHeader;
//! use headerfix::rewriter::HeaderRewriter;
//!
//! fn main() -> anyhow::Result<()> {
//!   let header = CanonicalHeader::new(vec![b"Copyright (c) 2026 Example Co.".to_vec()]);
//!
//!   // "# " prefixed header lines; keep shebang lines in front
//!   let rewriter = HeaderRewriter::new(
//!     header,
//!     b"# ".to_vec(),
//!     vec![b"#!".to_vec()],
//!     vec![],
//!   );
//!
//!   let status = rewriter.fix_path(Path::new("scripts/run.py"))?;
//!   if status.modified() {
//!     println!("Updated license header in scripts/run.py");
//!   }
//!
//!   Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`rewriter`] - The core scan/compare/rewrite engine
//! * [`header`] - Canonical header assembly and the copyright-year advisory
//! * [`prefixes`] - Extension-based comment prefix resolution
//! * [`logging`] - Logging utilities for verbose output
//!
//! [`rewriter`]: crate::rewriter
//! [`header`]: crate::header
//! [`prefixes`]: crate::prefixes
//! [`logging`]: crate::logging

// Re-export modules for public API
pub mod config;
pub mod diff;
pub mod header;
pub mod logging;
pub mod output;
pub mod prefixes;
pub mod rewriter;
