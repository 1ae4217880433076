//! # Logging Module
//!
//! This module provides logging utilities for the headerfix tool, including:
//! - Verbose logging that can be enabled/disabled
//! - Standard info logging with color support
//!
//! Verbose logs go to stderr and info logs to stdout for better pipeline
//! integration: pre-commit consumes stdout, humans read stderr.
//!
//! ## Example
//!
//! ```rust
//! use headerfix::logging::{ColorMode, set_verbose};
//! use headerfix::{info_log, verbose_log};
//!
//! // Enable verbose logging
//! set_verbose();
//!
//! // Set color mode to Auto (uses owo-colors' automatic TTY detection)
//! ColorMode::Auto.apply();
//!
//! // Log a verbose message (goes to stderr)
//! verbose_log!("Scanning file: {}", "example.rs");
//!
//! // Log an info message (goes to stdout)
//! info_log!("Updated license header in {}", "example.rs");
//! ```

mod modes;

pub use modes::{ColorMode, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose};
use owo_colors::{OwoColorize, Stream};

/// Logs a message to stderr if verbose mode is enabled.
///
/// Uses the same format string syntax as the standard [`eprintln!`] macro.
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Logs a message to stdout unless quiet mode is enabled.
///
/// Uses the same format string syntax as the standard [`println!`] macro.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            $crate::logging::print_info_log(&format!($($arg)*));
        }
    };
}

/// Internal function to print info log messages with formatting.
///
/// Used by the [`info_log!`] macro to format and print messages with colors
/// if enabled.
///
/// [`info_log!`]: crate::info_log
pub fn print_info_log(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.yellow()));
}
