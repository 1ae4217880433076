//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing.

mod fix;

use std::sync::LazyLock;

use clap::Parser;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
pub use fix::{FixArgs, run_fix};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Version string including the git commit when built from a checkout.
static LONG_VERSION: LazyLock<String> = LazyLock::new(|| match option_env!("GIT_HASH") {
  Some(hash) if !hash.is_empty() => format!("{} (commit {hash})", env!("CARGO_PKG_VERSION")),
  _ => env!("CARGO_PKG_VERSION").to_string(),
});

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  long_version = LONG_VERSION.as_str(),
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Normalize headers from the first line of LICENSE, preserving shebangs
  headerfix --license-file LICENSE --keep-before '#!' script.py tool.py

  # Copy two lines starting at the third line of the license file
  headerfix --license-file LICENSE --start 2 --num 2 src/lib.rs

  # Append literal lines after the license excerpt
  headerfix --license-file LICENSE --add 'Part of example-project.' src/main.rs

  # Explicit comment prefix instead of extension-based lookup
  headerfix --comment-prefix '//' --add 'Copyright 2026 Example Co.' weird.xyz

  # See what would change without touching anything
  headerfix --dry-run --show-diff --license-file LICENSE src/*.rs
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(flatten)]
  pub fix_args: FixArgs,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
