//! # Fix Command
//!
//! This module implements the single headerfix command: check every file
//! named on the command line against the canonical header and rewrite the
//! ones that do not conform.

use std::fs::OpenOptions;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use chrono::Datelike;
use clap::Args;
use tracing::debug;

use crate::config::load_config;
use crate::diff::DiffManager;
use crate::header::{CanonicalHeader, build_header, stale_copyright_years};
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::output::{print_all_files_ok, print_summary, print_updated_file, print_year_warning};
use crate::prefixes::{PrefixResolver, create_resolver};
use crate::rewriter::{HeaderRewriter, RewritePlan};
use crate::{info_log, verbose_log};

/// Arguments for the fix command
#[derive(Args, Debug, Default)]
pub struct FixArgs {
  /// Files to fix
  #[arg(required = true, value_name = "FILES")]
  pub files: Vec<PathBuf>,

  /// License file to copy header lines from
  #[arg(long, short = 'f', value_name = "FILE")]
  pub license_file: Option<PathBuf>,

  /// Number of license-file lines to skip
  #[arg(long, value_name = "N", default_value_t = 0)]
  pub start: usize,

  /// Number of license-file lines to copy
  #[arg(long, value_name = "N", default_value_t = 1)]
  pub num: usize,

  /// Literal line appended to the header after the license excerpt (repeatable)
  #[arg(long, value_name = "LINE")]
  pub add: Vec<String>,

  /// Keep lines starting with this prefix before the header (repeatable)
  #[arg(long, value_name = "PREFIX")]
  pub keep_before: Vec<String>,

  /// Keep lines starting with this prefix after the header (repeatable)
  #[arg(long, value_name = "PREFIX")]
  pub keep_after: Vec<String>,

  /// Explicit comment prefix (a single space is appended). When omitted,
  /// the prefix is resolved per file from the extension table.
  #[arg(long, value_name = "STRING")]
  pub comment_prefix: Option<String>,

  /// Path to config file (default: .headerfix.toml in the current directory)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config files even if present
  #[arg(long)]
  pub no_config: bool,

  /// Report files that would change without writing anything
  #[arg(long)]
  pub dry_run: bool,

  /// Print a diff of pending changes to stderr
  #[arg(long)]
  pub show_diff: bool,

  /// Append diffs of pending changes to a file
  #[arg(long, short = 'o', value_name = "FILE")]
  pub save_diff: Option<PathBuf>,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors and result lines
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

/// Where the comment prefix for a file comes from: a single explicit
/// `--comment-prefix` value, or per-file resolution through the extension
/// table and config overrides.
enum PrefixSource {
  Explicit(String),
  Resolved(Box<dyn PrefixResolver>),
}

impl PrefixSource {
  /// The prefix token for `path`, without the trailing space.
  ///
  /// An unresolvable file is a configuration error that aborts the run.
  fn token_for(&self, path: &Path) -> Result<String> {
    match self {
      Self::Explicit(token) => Ok(token.clone()),
      Self::Resolved(resolver) => resolver.resolve(path).ok_or_else(|| {
        anyhow!(
          "No comment prefix known for {} (unrecognized extension; pass --comment-prefix)",
          path.display()
        )
      }),
    }
  }
}

/// Run the fix command with the given arguments
pub fn run_fix(args: FixArgs) -> Result<()> {
  // Initialize tracing subscriber for structured logging
  init_tracing(args.quiet, args.verbose);

  // Set verbose mode for output formatting and the info_log!/verbose_log! macros
  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  // Build the canonical header; an unreadable license file aborts the run
  // before any target file is touched
  let header = build_header(args.license_file.as_deref(), args.start, args.num, &args.add)?;
  if header.is_empty() {
    debug!("canonical header is empty; leading comment blocks will be stripped");
  }

  // Copyright-year advisory
  let current_year = chrono::Local::now().year();
  for warning in stale_copyright_years(&header, current_year) {
    print_year_warning(&warning, current_year);
  }

  // Prefix source: explicit flag, or config + builtin table per file
  let prefix_source = match args.comment_prefix {
    Some(token) => PrefixSource::Explicit(token),
    None => {
      let config = load_config(args.config.as_deref(), args.no_config)?;
      if config.is_some() {
        debug!("using configuration file for comment prefix overrides");
      }
      PrefixSource::Resolved(create_resolver(config))
    }
  };

  let keep_before: Vec<Vec<u8>> = args.keep_before.iter().map(|s| s.clone().into_bytes()).collect();
  let keep_after: Vec<Vec<u8>> = args.keep_after.iter().map(|s| s.clone().into_bytes()).collect();

  let diff_manager = DiffManager::new(args.show_diff, args.save_diff.clone());

  let files_word = if args.files.len() == 1 { "file" } else { "files" };
  info_log!("Checking {} {}...", args.files.len(), files_word);

  let start_time = Instant::now();
  let mut updated = 0usize;

  for path in &args.files {
    let modified = process_file(
      path,
      &header,
      &prefix_source,
      &keep_before,
      &keep_after,
      &diff_manager,
      args.dry_run,
    )?;
    if modified {
      updated += 1;
    }
  }

  if updated == 0 {
    print_all_files_ok();
  }
  print_summary(args.files.len(), updated, start_time.elapsed(), args.dry_run);

  // Pre-commit contract: nonzero exit when anything was (or would be) changed
  if updated > 0 {
    process::exit(1);
  }

  Ok(())
}

/// Check one file and rewrite it when its header does not conform.
///
/// Returns whether the file was modified (or, in dry-run mode, would be).
fn process_file(
  path: &Path,
  header: &CanonicalHeader,
  prefix_source: &PrefixSource,
  keep_before: &[Vec<u8>],
  keep_after: &[Vec<u8>],
  diff_manager: &DiffManager,
  dry_run: bool,
) -> Result<bool> {
  let token = prefix_source.token_for(path)?;
  let mut prefix = token.into_bytes();
  prefix.push(b' ');

  let rewriter = HeaderRewriter::new(header.clone(), prefix, keep_before.to_vec(), keep_after.to_vec());

  // Dry-run never needs write access; otherwise hold one read+write handle
  // for the whole check-then-rewrite sequence
  let (content, mut file) = if dry_run {
    let content = std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    (content, None)
  } else {
    let mut file = OpenOptions::new()
      .read(true)
      .write(true)
      .open(path)
      .with_context(|| format!("Failed to open file: {}", path.display()))?;
    let mut content = Vec::new();
    file
      .read_to_end(&mut content)
      .with_context(|| format!("Failed to read file: {}", path.display()))?;
    (content, Some(file))
  };

  let plan = rewriter.plan(&content);

  if let RewritePlan::Replace(ref new_contents) = plan {
    // Diff output is best-effort and never fails the run
    if diff_manager.is_active()
      && let Err(e) = diff_manager.emit(
        path,
        &String::from_utf8_lossy(&content),
        &String::from_utf8_lossy(new_contents),
      )
    {
      eprintln!("Warning: Failed to render diff for {}: {}", path.display(), e);
    }

    if let Some(ref mut file) = file {
      plan
        .commit(file)
        .with_context(|| format!("Failed to rewrite {}", path.display()))?;
    }

    print_updated_file(path, dry_run);
    return Ok(true);
  }

  verbose_log!("Header already canonical in {}", path.display());
  Ok(false)
}
