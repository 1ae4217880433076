//! # Prefixes Module
//!
//! This module resolves the comment prefix to use for a file when no
//! explicit `--comment-prefix` was given. Resolution is based on a static
//! extension table covering common line-comment languages, with filename
//! special cases, and can be overridden through the configuration file.
//!
//! Prefixes are stored as bare tokens (`"#"`, `"//"`); a single space is
//! appended at write time. Languages that only support block comments are
//! deliberately absent from the table: a file the tool cannot express a
//! line-comment header for is a configuration error, not a silent fallback.

use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::verbose_log;

/// Trait for resolving comment prefixes for file paths.
///
/// Implementations can use the built-in table, user configuration, or both.
/// Returning `None` means no prefix is known for the file, which callers
/// treat as a configuration error.
pub trait PrefixResolver: Send + Sync {
  /// Resolve the comment prefix token for the given file path.
  fn resolve(&self, path: &Path) -> Option<String>;
}

/// Default resolver using the built-in extension table.
#[derive(Debug, Default)]
pub struct BuiltinResolver;

impl PrefixResolver for BuiltinResolver {
  fn resolve(&self, path: &Path) -> Option<String> {
    builtin_prefix_for(path).map(str::to_string)
  }
}

/// Resolver that checks user configuration first, then falls back to the
/// built-in table.
pub struct ConfigurableResolver {
  config: Arc<Config>,
}

impl std::fmt::Debug for ConfigurableResolver {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ConfigurableResolver").field("config", &"<config>").finish()
  }
}

impl ConfigurableResolver {
  /// Create a new configurable resolver with the given config.
  pub fn new(config: Config) -> Self {
    Self {
      config: Arc::new(config),
    }
  }
}

impl PrefixResolver for ConfigurableResolver {
  fn resolve(&self, path: &Path) -> Option<String> {
    let file_name = path
      .file_name()
      .and_then(|name| name.to_str())
      .unwrap_or("")
      .to_lowercase();

    // 1. Exact filename overrides from config
    if let Some(prefix) = self.config.filenames.get(&file_name) {
      verbose_log!("Using config filename override for: {}", file_name);
      return Some(prefix.clone());
    }

    // 2. Filename glob overrides from config
    for (pattern, prefix) in &self.config.filenames {
      if pattern.contains('*')
        && let Ok(glob_pattern) = glob::Pattern::new(&pattern.to_lowercase())
        && glob_pattern.matches(&file_name)
      {
        verbose_log!("Using config filename glob override '{}' for: {}", pattern, file_name);
        return Some(prefix.clone());
      }
    }

    // 3. Extension overrides from config
    let extension = path
      .extension()
      .and_then(|ext| ext.to_str())
      .unwrap_or("")
      .to_lowercase();

    if let Some(prefix) = self.config.comment_prefixes.get(&extension) {
      verbose_log!("Using config extension override for: .{}", extension);
      return Some(prefix.clone());
    }

    // 4. Fall back to the built-in table
    builtin_prefix_for(path).map(str::to_string)
  }
}

/// Create a prefix resolver based on the provided configuration.
pub fn create_resolver(config: Option<Config>) -> Box<dyn PrefixResolver> {
  match config {
    Some(cfg) => Box::new(ConfigurableResolver::new(cfg)),
    None => Box::new(BuiltinResolver),
  }
}

/// The built-in extension table.
///
/// Returns `None` for unknown extensions and for file types whose comment
/// syntax the tool cannot write as leading line comments.
fn builtin_prefix_for(path: &Path) -> Option<&'static str> {
  let file_name = path
    .file_name()
    .and_then(|name| name.to_str())
    .unwrap_or("")
    .to_lowercase();

  let extension = path
    .extension()
    .and_then(|ext| ext.to_str())
    .unwrap_or("")
    .to_lowercase();

  match extension.as_str() {
    "c" | "h" | "cc" | "cpp" | "cs" | "gv" | "go" | "hcl" | "hh" | "hpp" | "m" | "mm" | "proto" | "rs" | "swift"
    | "dart" | "groovy" | "v" | "sv" | "java" | "scala" | "kt" | "kts" | "js" | "mjs" | "cjs" | "jsx" | "ts"
    | "tsx" | "scss" | "php" => Some("//"),
    "py" | "pyi" | "sh" | "bash" | "yaml" | "yml" | "rb" | "tcl" | "tf" | "bzl" | "pl" | "pp" | "toml" | "cfg"
    | "ini" | "mk" | "cmake" => Some("#"),
    "el" | "lisp" | "scm" => Some(";;"),
    "erl" => Some("%"),
    "hs" | "sql" | "lua" | "sdl" => Some("--"),
    _ => {
      // Extensionless build files commonly fed to the tool by pre-commit
      if file_name == "cmakelists.txt"
        || file_name.ends_with(".cmake.in")
        || file_name == "dockerfile"
        || file_name.ends_with(".dockerfile")
        || file_name == "makefile"
        || file_name == "justfile"
      {
        Some("#")
      } else {
        None
      }
    }
  }
}
