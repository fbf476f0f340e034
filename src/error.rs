//! Error types for json2ts
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use crate::structure::TypeId;
use thiserror::Error;

/// The main error type for json2ts
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Input Errors
    // ============================================================================
    #[error("Only (Object) and (Array of Object) are supported, found {found}")]
    InvalidInput { found: String },

    #[error("Input nesting exceeds the maximum depth of {limit}")]
    DepthLimitExceeded { limit: usize },

    // ============================================================================
    // Internal Invariant Errors
    // ============================================================================
    #[error("Type {id} is referenced but was never resolved")]
    UnresolvedType { id: TypeId },

    #[error("Could not find a unique name for '{name}'")]
    NameExhausted { name: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid input error
    pub fn invalid_input(found: impl Into<String>) -> Self {
        Self::InvalidInput {
            found: found.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an unresolved type error
    pub fn unresolved(id: TypeId) -> Self {
        Self::UnresolvedType { id }
    }

    /// Check if this error indicates an algorithmic defect rather than bad input
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Error::UnresolvedType { .. } | Error::NameExhausted { .. }
        )
    }
}

/// Result type alias for json2ts
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_input("number");
        assert_eq!(
            err.to_string(),
            "Only (Object) and (Array of Object) are supported, found number"
        );

        let err = Error::config("root name cannot be empty");
        assert_eq!(
            err.to_string(),
            "Configuration error: root name cannot be empty"
        );

        let err = Error::DepthLimitExceeded { limit: 8 };
        assert_eq!(
            err.to_string(),
            "Input nesting exceeds the maximum depth of 8"
        );
    }

    #[test]
    fn test_is_internal() {
        assert!(Error::unresolved(TypeId::new(7)).is_internal());
        assert!(Error::NameExhausted {
            name: "Pet".to_string()
        }
        .is_internal());

        assert!(!Error::invalid_input("array").is_internal());
        assert!(!Error::DepthLimitExceeded { limit: 1 }.is_internal());
        assert!(!Error::config("test").is_internal());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let wrapped = result.context("outer");
        assert!(wrapped
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
