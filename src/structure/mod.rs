//! Type graph module
//!
//! Builds a deduplicated graph of type descriptions from JSON values.
//!
//! # Features
//!
//! - **Structural Deduplication**: Identical shapes resolve to one pool id
//! - **Object Merging**: Divergent object shapes merge with optional keys
//! - **Array Merging**: Nested arrays merge element-wise
//! - **Union Merging**: Heterogeneous values collapse into flat unions
//! - **Pruning**: Entries orphaned by merging are removed

mod builder;
mod optimize;
mod types;

pub use builder::{infer_structure, TypeBuilder};
pub use optimize::{optimize, reachable_ids};
pub use types::{
    ArrayShape, Field, ObjectShape, Primitive, TypeDescription, TypeId, TypePool, TypeRef,
    TypeStructure,
};

#[cfg(test)]
mod tests;
