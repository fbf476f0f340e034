//! Public inference entry points
//!
//! Runs the full pipeline: validate → build type graph → prune → name → render.

use crate::config::InferOptions;
use crate::error::{Error, Result};
use crate::naming::assign_names;
use crate::render::render;
use crate::structure::{infer_structure, optimize, TypePool, TypeStructure};
use crate::types::{value_kind, JsonValue};
use tracing::debug;

/// Infer interface declarations for a JSON object or array of objects
///
/// # Examples
///
/// ```
/// use json2ts::{infer, InferOptions};
/// use serde_json::json;
///
/// let decls = infer(&json!({"name": "Rex", "tags": ["dog"]}), &InferOptions::default()).unwrap();
/// assert_eq!(decls, vec!["interface RootObject {\n  name: string;\n  tags: string[];\n}"]);
/// ```
pub fn infer(value: &JsonValue, options: &InferOptions) -> Result<Vec<String>> {
    let structure = infer_optimized(value, options)?;
    let names = assign_names(&structure, &options.root_name)?;
    let declarations = render(&structure, &names)?;

    debug!(count = declarations.len(), "rendered declarations");
    Ok(declarations)
}

/// Parse `json` and infer interface declarations for it
pub fn infer_str(json: &str, options: &InferOptions) -> Result<Vec<String>> {
    let value: JsonValue = serde_json::from_str(json)?;
    infer(&value, options)
}

/// Validate the input, build its type graph and prune unused entries
pub fn infer_optimized(value: &JsonValue, options: &InferOptions) -> Result<TypeStructure> {
    options.validate()?;
    validate_input(value)?;

    let mut structure = infer_structure(value, TypePool::new(), options)?;
    optimize(&mut structure);
    Ok(structure)
}

/// Accept only an object or a non-empty array of objects
pub fn validate_input(value: &JsonValue) -> Result<()> {
    match value {
        JsonValue::Object(_) => Ok(()),
        JsonValue::Array(items) if items.is_empty() => Err(Error::invalid_input("empty array")),
        JsonValue::Array(items) => match items.iter().find(|item| !item.is_object()) {
            Some(item) => Err(Error::invalid_input(format!(
                "array containing {}",
                value_kind(item)
            ))),
            None => Ok(()),
        },
        other => Err(Error::invalid_input(value_kind(other))),
    }
}
