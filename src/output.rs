//! # Output
//!
//! This module owns everything mrpatch prints: the per-entry `TARGET:` and
//! per-patch `PATCH:` headers, the coloured OK/NG lines, separators between
//! entries and patches, and the final `RESULT:` line.
//!
//! ## Respecting User Preferences
//!
//! Colour is decided once, from the `--color` flag and the environment:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! Regular progress goes to stdout, interleaved with whatever `git show`,
//! `git log` or a `forall` command writes there. Failure diagnostics go to
//! stderr.

use std::env;
use std::path::Path;

use console::{style, Color};

use crate::executor::CommandOutcome;

/// Width of the separator lines.
pub const SEPARATOR_WIDTH: usize = 128;

pub const TITLE_TARGET: &str = "TARGET: ";
pub const TITLE_PATCH: &str = "PATCH: ";
pub const OK: &str = "OK";
pub const NG: &str = "NG";
pub const OK_RESULT: &str = "RESULT: OK";
pub const NG_RESULT: &str = "RESULT: NG";

/// Output configuration for controlling colors.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// # Arguments
    /// * `color_flag` - The value of the --color CLI flag: "always", "never", or "auto"
    ///
    /// In auto mode, colors are disabled if:
    /// - `NO_COLOR` environment variable is set (any value, including empty)
    /// - `CLICOLOR=0` is set
    /// - `TERM=dumb` is set
    /// - stdout is not a TTY (unless `CLICOLOR_FORCE=1`)
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    /// Detect whether color output is supported based on environment.
    fn detect_color_support() -> bool {
        // The presence of the variable (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Create a configuration with colors always enabled.
    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Prints run progress in the agreed format.
#[derive(Debug, Clone, Default)]
pub struct Reporter {
    config: OutputConfig,
}

impl Reporter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    fn paint(&self, text: &str, color: Color, bright: bool) -> String {
        if !self.config.use_color {
            return text.to_string();
        }
        let styled = style(text).fg(color).force_styling(true);
        if bright {
            styled.bright().to_string()
        } else {
            styled.to_string()
        }
    }

    /// The separator printed before every entry and before the summary.
    pub fn entry_separator_line(&self) -> String {
        self.paint(&"=".repeat(SEPARATOR_WIDTH), Color::Cyan, true)
    }

    /// The separator printed before every patch.
    pub fn patch_separator_line(&self) -> String {
        self.paint(&"-".repeat(SEPARATOR_WIDTH), Color::Red, true)
    }

    pub fn status_line(&self, succeeded: bool) -> String {
        if succeeded {
            self.paint(OK, Color::Green, false)
        } else {
            self.paint(NG, Color::Red, false)
        }
    }

    pub fn summary_line(&self, succeeded: bool) -> String {
        if succeeded {
            self.paint(OK_RESULT, Color::Green, false)
        } else {
            self.paint(NG_RESULT, Color::Red, false)
        }
    }

    pub fn entry_separator(&self) {
        println!("{}", self.entry_separator_line());
    }

    pub fn patch_separator(&self) {
        println!("{}", self.patch_separator_line());
    }

    pub fn target(&self, path: &Path) {
        println!("{}{}", TITLE_TARGET, path.display());
    }

    pub fn patch(&self, path: &Path) {
        println!("{}{}", TITLE_PATCH, path.display());
    }

    /// Announce a non-patch operation such as a reset or a log.
    pub fn operation(&self, description: &str) {
        println!("{}", description);
    }

    /// Print OK or NG for `outcome` and return whether it succeeded.
    pub fn outcome(&self, outcome: &CommandOutcome) -> bool {
        println!("{}", self.status_line(outcome.succeeded));
        if let Some(diagnostic) = outcome.diagnostic.as_deref() {
            self.diagnostic(diagnostic);
        }
        outcome.succeeded
    }

    pub fn diagnostic(&self, message: &str) {
        eprintln!("{}", self.paint(message, Color::Red, false));
    }

    pub fn skipped(&self, remaining: usize) {
        println!(
            "{}",
            self.paint(
                &format!("skipping {} remaining patch(es)", remaining),
                Color::Yellow,
                false
            )
        );
    }

    pub fn summary(&self, succeeded: bool) {
        self.entry_separator();
        println!("{}", self.summary_line(succeeded));
    }
}
