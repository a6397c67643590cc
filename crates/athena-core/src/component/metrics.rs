//! Cross-component nesting depth.

use crate::component::model::{Component, ComponentRole};
use crate::diff::{replay_patches, StructurePatch};
use crate::structure::path::{canonical_path, PATH_SEPARATOR};
use crate::structure::{NodeId, StructureNode};
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy)]
struct Hit {
    target: usize,
    host: Option<usize>,
    depth: u32,
}

/// Fill `depth`, `depth_inside` and `depth_actual` for a batch of components
///
/// Instance keys resolve against the whole batch, so this must run once all
/// components of the batch are described. Re-running over the same batch
/// is idempotent for `depth_inside` and `depth_actual`.
pub fn assign_depth_metrics(components: &mut [Component]) {
    let mut by_key: HashMap<&str, usize> = HashMap::new();
    for (index, component) in components.iter().enumerate() {
        for key in component.instance_keys() {
            by_key.insert(key, index);
        }
    }

    let mut hits = Vec::new();
    for (host_index, host) in components.iter().enumerate() {
        let host_is_main = host.role == ComponentRole::Main;
        for nodes in structure_sets(host) {
            walk_depths(&nodes, |node, depth| {
                let Some(instance) = &node.component_instance else {
                    return;
                };
                let Some(&target) = by_key.get(instance.component_key.as_str()) else {
                    return;
                };
                if components[target].role != ComponentRole::Part {
                    return;
                }
                hits.push(Hit {
                    target,
                    host: host_is_main.then_some(host_index),
                    depth,
                });
            });
        }
    }

    for hit in hits {
        let target = &mut components[hit.target];
        push_unique(target.depth_inside.get_or_insert_with(Vec::new), hit.depth);
        target.depth_actual = Some(target.depth_actual.map_or(hit.depth, |d| d.min(hit.depth)));

        if let Some(host_index) = hit.host {
            let host = &mut components[host_index];
            push_unique(host.depth_inside.get_or_insert_with(Vec::new), hit.depth);
            host.depth = Some(host.depth.map_or(hit.depth, |d| d.max(hit.depth)));
        }
    }
}

/// Base structure plus every variant rebuilt from a non-empty patch list
fn structure_sets(host: &Component) -> Vec<Cow<'_, [StructureNode]>> {
    let mut sets = Vec::new();
    if !host.structure.is_empty() {
        sets.push(Cow::Borrowed(host.structure.as_slice()));
    }
    for patches in host.variant_structures.values() {
        if patches.is_empty() {
            continue;
        }
        let mut rebuilt = replay_patches(&host.structure, patches);
        let added = patches
            .iter()
            .filter(|p| matches!(p, StructurePatch::Add { .. }))
            .count();
        relink_added(&mut rebuilt, added);
        if !rebuilt.is_empty() {
            sets.push(Cow::Owned(rebuilt));
        }
    }
    sets
}

/// Re-home the trailing `added` nodes of a replayed list onto its tree
///
/// Adds carry ids and parent ids from the variant's own numbering. Each one
/// gets a fresh id past the largest kept id. Its parent is the added node it
/// hung under in the variant, or else the first node whose canonical path
/// equals its parent path.
fn relink_added(nodes: &mut [StructureNode], added: usize) {
    let split = nodes.len().saturating_sub(added);
    let (kept, adds) = nodes.split_at_mut(split);

    let mut next_id = kept.iter().map(|n| n.id).max().unwrap_or(0) + 1;
    let mut by_path: HashMap<String, NodeId> = HashMap::new();
    for node in kept.iter() {
        by_path.entry(canonical_path(&node.path)).or_insert(node.id);
    }

    let mut renumbered: HashMap<NodeId, NodeId> = HashMap::new();
    for node in adds.iter_mut() {
        let parent = node
            .parent_id
            .and_then(|old| renumbered.get(&old).copied())
            .or_else(|| {
                parent_path(&node.path, &node.name)
                    .and_then(|path| by_path.get(&canonical_path(path)).copied())
            });
        if parent.is_none() && node.parent_id.is_some() {
            tracing::debug!(path = %node.path, "added node has no parent in replayed variant");
        }

        renumbered.insert(node.id, next_id);
        node.id = next_id;
        node.parent_id = parent;
        by_path.entry(canonical_path(&node.path)).or_insert(next_id);
        next_id += 1;
    }
}

fn parent_path<'a>(path: &'a str, name: &str) -> Option<&'a str> {
    path.strip_suffix(name)?.strip_suffix(PATH_SEPARATOR)
}

/// Depth-first over parent links, roots at depth 0
fn walk_depths(nodes: &[StructureNode], mut visit: impl FnMut(&StructureNode, u32)) {
    let mut children: HashMap<Option<NodeId>, Vec<usize>> = HashMap::new();
    for (index, node) in nodes.iter().enumerate() {
        children.entry(node.parent_id).or_default().push(index);
    }

    let mut seen = HashSet::new();
    let mut stack: Vec<(usize, u32)> = children
        .get(&None)
        .map(|roots| roots.iter().rev().map(|&i| (i, 0)).collect())
        .unwrap_or_default();

    while let Some((index, depth)) = stack.pop() {
        if !seen.insert(index) {
            continue;
        }
        let node = &nodes[index];
        visit(node, depth);
        if let Some(kids) = children.get(&Some(node.id)) {
            stack.extend(kids.iter().rev().map(|&i| (i, depth + 1)));
        }
    }
}

fn push_unique(values: &mut Vec<u32>, value: u32) {
    if !values.contains(&value) {
        values.push(value);
    }
}
