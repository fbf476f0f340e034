//! CLI runner - executes commands

use crate::cli::commands::{Cli, OutputFormat};
use crate::config::{load_options, InferOptions};
use crate::error::{Error, Result, ResultExt};
use crate::inference::{infer, infer_optimized};
use crate::types::JsonValue;
use std::fs;
use std::io::{self, Read};
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub fn run(&self) -> Result<()> {
        let input = self.read_input()?;
        let output = self.process(&input)?;
        println!("{output}");
        Ok(())
    }

    /// Resolve options: options file first, then command-line overrides
    pub fn options(&self) -> Result<InferOptions> {
        let mut options = match &self.cli.options {
            Some(path) => load_options(path)?,
            None => InferOptions::default(),
        };

        if let Some(name) = &self.cli.root_name {
            options.root_name.clone_from(name);
        }
        if self.cli.camel_case {
            options.normalize_key_casing = true;
        }
        if self.cli.detect_dates {
            options.detect_dates = true;
        }
        if let Some(depth) = self.cli.max_depth {
            options.max_depth = depth;
        }

        options.validate()?;
        Ok(options)
    }

    /// Produce the output text for a JSON document
    pub fn process(&self, input: &str) -> Result<String> {
        let options = self.options()?;
        let value: JsonValue = serde_json::from_str(input).context("Invalid JSON input")?;
        debug!(format = ?self.cli.format, "processing input");

        match self.cli.format {
            OutputFormat::Ts => Ok(infer(&value, &options)?.join("\n\n")),
            OutputFormat::Structure => infer_optimized(&value, &options)?.to_json_pretty(),
        }
    }

    fn read_input(&self) -> Result<String> {
        match &self.cli.input {
            Some(path) if path.as_os_str() != "-" => {
                fs::read_to_string(path).map_err(|e| {
                    if e.kind() == io::ErrorKind::NotFound {
                        Error::FileNotFound {
                            path: path.display().to_string(),
                        }
                    } else {
                        Error::Io(e)
                    }
                })
            }
            _ => {
                let mut buf = String::new();
                io::stdin().read_to_string(&mut buf)?;
                Ok(buf)
            }
        }
    }
}
