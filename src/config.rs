//! Inference options
//!
//! Options can be built in code with the `with_*` builder methods or loaded
//! from a YAML (or JSON) options file.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default display name of the top-level type
pub const DEFAULT_ROOT_NAME: &str = "RootObject";

/// Default nesting limit for input values
pub const DEFAULT_MAX_DEPTH: usize = 256;

// ============================================================================
// Options
// ============================================================================

/// Options controlling a single inference run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferOptions {
    /// Name of the top-level interface (or of the merged element type for arrays)
    #[serde(alias = "rootName")]
    pub root_name: String,

    /// Convert object keys to camel case before typing them
    #[serde(alias = "camelCaseKey")]
    pub normalize_key_casing: bool,

    /// Type RFC 3339 date-time strings as `Date`
    pub detect_dates: bool,

    /// Maximum nesting depth accepted before the input is rejected
    pub max_depth: usize,
}

impl Default for InferOptions {
    fn default() -> Self {
        Self {
            root_name: DEFAULT_ROOT_NAME.to_string(),
            normalize_key_casing: false,
            detect_dates: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl InferOptions {
    /// Create options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root type name
    #[must_use]
    pub fn with_root_name(mut self, name: impl Into<String>) -> Self {
        self.root_name = name.into();
        self
    }

    /// Enable/disable camel-case key normalization
    #[must_use]
    pub fn with_key_casing(mut self, enabled: bool) -> Self {
        self.normalize_key_casing = enabled;
        self
    }

    /// Enable/disable date-time string detection
    #[must_use]
    pub fn with_date_detection(mut self, enabled: bool) -> Self {
        self.detect_dates = enabled;
        self
    }

    /// Set maximum nesting depth
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.root_name.trim().is_empty() {
            return Err(Error::config("root_name cannot be empty"));
        }

        if self.max_depth == 0 {
            return Err(Error::config("max_depth must be greater than zero"));
        }

        Ok(())
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Load inference options from a YAML or JSON file
pub fn load_options(path: impl AsRef<Path>) -> Result<InferOptions> {
    let path = path.as_ref();

    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::config(format!(
                "Failed to read options file '{}': {}",
                path.display(),
                e
            ))
        }
    })?;

    load_options_from_str(&content)
}

/// Load inference options from a YAML (or JSON) string
pub fn load_options_from_str(content: &str) -> Result<InferOptions> {
    // An empty document means "all defaults"
    if content.trim().is_empty() {
        return Ok(InferOptions::default());
    }

    let options: InferOptions = serde_yaml::from_str(content)?;
    options.validate()?;
    Ok(options)
}
