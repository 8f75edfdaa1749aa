//! # CLI Command Implementations
//!
//! Each subcommand of `component-index` lives in its own file with:
//! - an `Args` struct derived with `clap`, and
//! - an `execute` function that runs the command against the
//!   `component_index` library.

pub mod build;
pub mod completions;
pub mod validate;
