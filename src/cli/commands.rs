//! CLI arguments

use clap::Parser;
use std::path::PathBuf;

/// Generate TypeScript interfaces from JSON
#[derive(Parser, Debug)]
#[command(name = "json2ts")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input JSON file (`-` or omitted reads stdin)
    pub input: Option<PathBuf>,

    /// Name of the top-level interface
    #[arg(short, long)]
    pub root_name: Option<String>,

    /// Convert keys to camelCase
    #[arg(long)]
    pub camel_case: bool,

    /// Type RFC 3339 date-time strings as Date
    #[arg(long)]
    pub detect_dates: bool,

    /// Maximum input nesting depth
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Options file (YAML or JSON); flags override its values
    #[arg(short, long)]
    pub options: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "ts")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Interface declarations
    Ts,
    /// Optimized type graph as JSON
    Structure,
}
