//! Structure collector and its cache.

use crate::errors::Result;
use crate::host::{SceneNode, StyleCatalog};
use crate::structure::model::{NodeId, StructureNode};
use crate::structure::snapshot::{snapshot_node, CollectOptions};
use std::collections::HashMap;
use std::sync::Arc;

/// Pre-order snapshot of the subtree under `root`
///
/// Ids start at 1 and follow visit order, so every node's parent id is
/// smaller than its own id and the root is the only node without a parent.
/// A descendant whose kind cannot appear in a structure is left out together
/// with its subtree.
///
/// # Errors
///
/// Fails when the root itself cannot appear in a structure.
pub fn collect_structure(
    root: &SceneNode,
    catalog: &dyn StyleCatalog,
    options: CollectOptions,
) -> Result<Vec<StructureNode>> {
    let mut list = Vec::new();
    let mut next_id: NodeId = 1;
    let mut stack: Vec<(&SceneNode, Option<NodeId>, Option<String>)> = vec![(root, None, None)];

    while let Some((node, parent_id, parent_path)) = stack.pop() {
        let id = next_id;
        let snap = match snapshot_node(node, parent_path.as_deref(), parent_id, id, catalog, options) {
            Ok(snap) => snap,
            Err(err) if parent_id.is_some() => {
                tracing::debug!(node_id = %node.id, error = %err, "subtree skipped");
                continue;
            }
            Err(err) => return Err(err),
        };
        next_id += 1;
        for child in node.children.iter().rev() {
            stack.push((child, Some(id), Some(snap.path.clone())));
        }
        list.push(snap);
    }

    Ok(list)
}

/// Collected structures keyed by root node id and options
///
/// Owned by one extraction run. Call [`StructureCache::reset`] (or start
/// from a new cache) at the beginning of every top-level export so that
/// entries never outlive the document state they were built from.
#[derive(Debug, Default)]
pub struct StructureCache {
    entries: HashMap<(String, bool), Arc<Vec<StructureNode>>>,
}

impl StructureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached structure for `root`, collecting it on first request
    ///
    /// # Errors
    ///
    /// Propagates collection failures; failures are not cached.
    pub fn get_or_collect(
        &mut self,
        root: &SceneNode,
        catalog: &dyn StyleCatalog,
        options: CollectOptions,
    ) -> Result<Arc<Vec<StructureNode>>> {
        let key = (root.id.clone(), options.preserve_hidden_fills);
        if let Some(hit) = self.entries.get(&key) {
            tracing::trace!(node_id = %root.id, "structure cache hit");
            return Ok(Arc::clone(hit));
        }
        let structure = Arc::new(collect_structure(root, catalog, options)?);
        self.entries.insert(key, Arc::clone(&structure));
        Ok(structure)
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
