//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::{Env, WriteStyle};

use component_index::output::OutputConfig;

use crate::commands;

/// Component Index - Catalog component libraries from their repositories
#[derive(Parser, Debug)]
#[command(name = "component-index")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level; RUST_LOG takes precedence
    #[arg(long, global = true, value_name = "LEVEL", value_enum, default_value = "info")]
    log_level: LogLevel,
}

/// Levels accepted by `--log-level`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Clone every library in the manifest and write metadata plus the index
    Build(commands::build::BuildArgs),

    /// Check a manifest without fetching anything
    Validate(commands::validate::ValidateArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let out = OutputConfig::from_env_and_flag(&self.color);
        init_logging(self.log_level, &out);

        match self.command {
            Commands::Build(args) => commands::build::execute(args, &self.color),
            Commands::Validate(args) => commands::validate::execute(args, &self.color),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

fn init_logging(level: LogLevel, out: &OutputConfig) {
    let style = if out.use_color {
        WriteStyle::Always
    } else {
        WriteStyle::Never
    };

    // Ignore the error raised when a logger is already installed.
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(level.as_filter()))
        .format_timestamp(None)
        .format_target(false)
        .write_style(style)
        .try_init();
}
