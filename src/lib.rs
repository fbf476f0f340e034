//! # json2ts
//!
//! Infers a minimal set of named TypeScript interface declarations describing
//! the shape of a JSON object or array of objects.
//!
//! ## Features
//!
//! - **Structural Deduplication**: Identical shapes anywhere in the input share one declaration
//! - **Shape Merging**: Array elements with divergent shapes merge into one type with optional keys
//! - **Unions**: Heterogeneous values become `A | B` unions; `T | null` fields become optional
//! - **Readable Names**: Types are named after their keys, singularized inside arrays
//!
//! ## Quick Start
//!
//! ```rust
//! use json2ts::{infer, InferOptions};
//! use serde_json::json;
//!
//! let value = json!({
//!     "id": 1,
//!     "pets": [{"name": "Rex"}, {"name": "Tom", "age": 3}]
//! });
//!
//! let declarations = infer(&value, &InferOptions::default()).unwrap();
//! assert_eq!(
//!     declarations,
//!     vec![
//!         "interface RootObject {\n  id: number;\n  pets: Pet[];\n}",
//!         "interface Pet {\n  name: string;\n  age?: number;\n}",
//!     ]
//! );
//! ```
//!
//! ## Architecture
//!
//! ```text
//! JSON value ──► structure ──► naming ──► render ──► declarations
//!                (type pool)   (id → name)  (interface text)
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Inference options
pub mod config;

/// Type graph construction, merging and pruning
pub mod structure;

/// Name assignment
pub mod naming;

/// Interface rendering
pub mod render;

/// Pipeline entry points
pub mod inference;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{load_options, load_options_from_str, InferOptions};
pub use error::{Error, Result};
pub use inference::{infer, infer_optimized, infer_str, validate_input};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
