//! # headerfix
//!
//! A pre-commit tool that normalizes the leading comment block of files to
//! a canonical license header.

mod cli;
mod config;
mod diff;
mod header;
mod logging;
mod output;
mod prefixes;
mod rewriter;

use anyhow::Result;

use crate::cli::{Cli, run_fix};

fn main() -> Result<()> {
  let cli = Cli::parse_args();
  run_fix(cli.fix_args)
}
