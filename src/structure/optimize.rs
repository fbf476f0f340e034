//! Pruning of pool entries orphaned by merging

use super::types::{TypeId, TypePool, TypeRef, TypeStructure};
use std::collections::HashSet;
use tracing::debug;

/// Collect every pool id reachable from `root`
pub fn reachable_ids(root: TypeRef, pool: &TypePool) -> HashSet<TypeId> {
    let mut seen = HashSet::new();
    let mut stack: Vec<TypeId> = root.id().into_iter().collect();

    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            continue;
        }
        if let Some(desc) = pool.get(id) {
            stack.extend(desc.children().into_iter().filter_map(TypeRef::id));
        }
    }

    seen
}

/// Remove pool entries not reachable from the root, returning how many were removed
pub fn optimize(structure: &mut TypeStructure) -> usize {
    let used = reachable_ids(structure.root, &structure.pool);
    let before = structure.pool.len();

    structure.pool.retain(|id| used.contains(&id));

    let removed = before - structure.pool.len();
    debug!(removed, remaining = structure.pool.len(), "optimized type graph");
    removed
}
