//! CLI module
//!
//! Command-line front end: reads JSON from a file or stdin and prints the
//! inferred interface declarations (or the type graph with `--format structure`).

mod commands;
mod runner;

pub use commands::{Cli, OutputFormat};
pub use runner::Runner;
