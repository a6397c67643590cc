//! Patch replay: rebuild a variant structure from its base and patches.

use crate::diff::model::StructurePatch;
use crate::structure::model::{NodeId, StructureNode};
use std::collections::{HashMap, HashSet};

/// Apply `patches` to a copy of `base`
///
/// Updates overwrite attributes in place, removes drop nodes, adds append
/// copies in patch order. Updates and removes address base ids only, so an
/// added node never shadows a base node with the same id. Patches naming an
/// unknown id are ignored. The base is left untouched.
///
/// Added nodes keep the ids and parent ids they had in the variant's own
/// numbering; consumers that follow parent links across replayed structures
/// should match by canonical path instead.
pub fn replay_patches(base: &[StructureNode], patches: &[StructurePatch]) -> Vec<StructureNode> {
    let mut nodes: Vec<StructureNode> = base.to_vec();
    let index: HashMap<NodeId, usize> = base.iter().enumerate().map(|(i, n)| (n.id, i)).collect();
    let mut removed: HashSet<usize> = HashSet::new();
    let mut added = Vec::new();

    for patch in patches {
        match patch {
            StructurePatch::Update { id, value } => {
                if let Some(&i) = index.get(id) {
                    if !removed.contains(&i) {
                        value.apply_to(&mut nodes[i]);
                    }
                }
            }
            StructurePatch::Remove { id } => {
                if let Some(&i) = index.get(id) {
                    removed.insert(i);
                }
            }
            StructurePatch::Add { node } => added.push(node.clone()),
        }
    }

    let mut out: Vec<StructureNode> = nodes
        .into_iter()
        .enumerate()
        .filter_map(|(i, n)| (!removed.contains(&i)).then_some(n))
        .collect();
    out.extend(added);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::model::NodeFieldSet;
    use crate::structure::model::StructureNodeType;

    fn node(id: NodeId, parent: Option<NodeId>, path: &str) -> StructureNode {
        let name = path.rsplit(" / ").next().unwrap_or(path);
        StructureNode::bare(id, parent, path, StructureNodeType::Frame, name)
    }

    #[test]
    fn test_replay_leaves_base_untouched() {
        let base = vec![node(1, None, "A"), node(2, Some(1), "A / Label")];
        let snapshot = base.clone();
        let patches = vec![
            StructurePatch::Update {
                id: 2,
                value: NodeFieldSet {
                    visible: Some(false),
                    ..Default::default()
                },
            },
            StructurePatch::Remove { id: 1 },
        ];

        let replayed = replay_patches(&base, &patches);
        assert_eq!(base, snapshot);
        assert_eq!(replayed.len(), 1);
        assert!(!replayed[0].visible);
    }

    #[test]
    fn test_added_nodes_append_in_order() {
        let base = vec![node(1, None, "A")];
        let patches = vec![
            StructurePatch::Add {
                node: node(2, Some(1), "B / X"),
            },
            StructurePatch::Add {
                node: node(3, Some(1), "B / Y"),
            },
        ];
        let replayed = replay_patches(&base, &patches);
        let paths: Vec<&str> = replayed.iter().map(|n| n.path.as_str()).collect();
        assert_eq!(paths, vec!["A", "B / X", "B / Y"]);
    }

    #[test]
    fn test_added_node_does_not_shadow_base_id() {
        let base = vec![node(1, None, "A"), node(2, Some(1), "A / Label")];
        let patches = vec![
            StructurePatch::Add {
                node: node(2, Some(1), "B / Icon"),
            },
            StructurePatch::Remove { id: 2 },
        ];
        let replayed = replay_patches(&base, &patches);
        let paths: Vec<&str> = replayed.iter().map(|n| n.path.as_str()).collect();
        assert_eq!(paths, vec!["A", "B / Icon"]);
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let base = vec![node(1, None, "A")];
        let patches = vec![StructurePatch::Remove { id: 42 }];
        assert_eq!(replay_patches(&base, &patches), base);
    }
}
