//! # Output Configuration
//!
//! Controls how the CLI decorates its progress lines. Status markers are
//! emoji on a color-capable terminal and bracketed tags (`[OK]`, `[WARN]`)
//! otherwise, so logs captured by CI stay plain ASCII.
//!
//! In `auto` mode the following are honored, in order:
//! - `NO_COLOR` (any value) disables decoration
//! - `CLICOLOR=0` disables decoration
//! - `CLICOLOR_FORCE` (non-empty, not `0`) forces it on
//! - `TERM=dumb` disables decoration
//! - otherwise the `console` crate decides from the stdout TTY

use std::env;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from the `--color` flag value
    /// (`always`, `never` or `auto`; anything else is treated as `auto`).
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
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
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns `emoji_str` when colors are enabled, `plain` otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}
