//! Variant diff engine.
//!
//! The core entry point is [`compute_variant_patches`], which matches the
//! nodes of a variant structure to a base structure by canonical path and
//! emits the patches that turn the base into the variant.

use crate::diff::model::{NodeFieldSet, StructurePatch};
use crate::structure::model::{NodeId, StructureNode};
use crate::structure::path::canonical_path;
use std::collections::{HashMap, HashSet};

/// Attribute-level difference between two matched nodes
///
/// Returns `None` when every compared attribute is equal. Identity fields
/// (`id`, `parentId`, `path`) are never compared.
pub fn diff_nodes(base: &StructureNode, next: &StructureNode) -> Option<NodeFieldSet> {
    fn changed<T: PartialEq + Clone>(base: &T, next: &T) -> Option<T> {
        (base != next).then(|| next.clone())
    }

    let fields = NodeFieldSet {
        node_type: changed(&base.node_type, &next.node_type),
        name: changed(&base.name, &next.name),
        visible: changed(&base.visible, &next.visible),
        styles: changed(&base.styles, &next.styles),
        layout: changed(&base.layout, &next.layout),
        opacity: changed(&base.opacity, &next.opacity),
        opacity_token: changed(&base.opacity_token, &next.opacity_token),
        radius: changed(&base.radius, &next.radius),
        radius_token: changed(&base.radius_token, &next.radius_token),
        effects: changed(&base.effects, &next.effects),
        fills: changed(&base.fills, &next.fills),
        fill_token: changed(&base.fill_token, &next.fill_token),
        strokes: changed(&base.strokes, &next.strokes),
        stroke_token: changed(&base.stroke_token, &next.stroke_token),
        stroke_weight: changed(&base.stroke_weight, &next.stroke_weight),
        stroke_align: changed(&base.stroke_align, &next.stroke_align),
        typography: changed(&base.typography, &next.typography),
        typography_token: changed(&base.typography_token, &next.typography_token),
        component_instance: changed(&base.component_instance, &next.component_instance),
        text: changed(&base.text, &next.text),
    };

    (!fields.is_empty()).then_some(fields)
}

/// Patches that turn `base` into `variant`
///
/// Nodes are matched by canonical path. When a path occurs more than once,
/// the k-th variant occurrence pairs with the k-th base occurrence. Output
/// order: updates and adds in variant order, then removes in base order.
/// An empty base turns every variant node into an add.
pub fn compute_variant_patches(
    base: &[StructureNode],
    variant: &[StructureNode],
) -> Vec<StructurePatch> {
    if base.is_empty() {
        return variant
            .iter()
            .map(|node| StructurePatch::Add { node: node.clone() })
            .collect();
    }

    let mut base_by_path: HashMap<String, Vec<&StructureNode>> = HashMap::new();
    for node in base {
        base_by_path
            .entry(canonical_path(&node.path))
            .or_default()
            .push(node);
    }

    let mut consumed: HashMap<String, usize> = HashMap::new();
    let mut matched: HashSet<NodeId> = HashSet::new();
    let mut patches = Vec::new();

    for node in variant {
        let key = canonical_path(&node.path);
        let occurrence = consumed.entry(key.clone()).or_insert(0);
        let counterpart = base_by_path
            .get(&key)
            .and_then(|candidates| candidates.get(*occurrence));
        *occurrence += 1;

        match counterpart {
            Some(base_node) => {
                matched.insert(base_node.id);
                if let Some(value) = diff_nodes(base_node, node) {
                    patches.push(StructurePatch::Update {
                        id: base_node.id,
                        value,
                    });
                }
            }
            None => patches.push(StructurePatch::Add { node: node.clone() }),
        }
    }

    patches.extend(
        base.iter()
            .filter(|node| !matched.contains(&node.id))
            .map(|node| StructurePatch::Remove { id: node.id }),
    );

    patches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::model::StructureNodeType;

    fn node(id: NodeId, parent: Option<NodeId>, path: &str) -> StructureNode {
        let name = path.rsplit(" / ").next().unwrap_or(path);
        StructureNode::bare(id, parent, path, StructureNodeType::Frame, name)
    }

    #[test]
    fn test_identical_structures_yield_no_patches() {
        let base = vec![node(1, None, "A"), node(2, Some(1), "A / Label")];
        assert!(compute_variant_patches(&base, &base).is_empty());
    }

    #[test]
    fn test_root_rename_is_name_update_only() {
        let base = vec![node(1, None, "State=Default"), node(2, Some(1), "State=Default / Label")];
        let variant = vec![node(1, None, "State=Hover"), node(2, Some(1), "State=Hover / Label")];

        let patches = compute_variant_patches(&base, &variant);
        assert_eq!(patches.len(), 1);
        match &patches[0] {
            StructurePatch::Update { id, value } => {
                assert_eq!(*id, 1);
                assert_eq!(value.changed_fields(), vec!["name"]);
            }
            other => panic!("unexpected patch {:?}", other),
        }
    }

    #[test]
    fn test_removes_follow_adds() {
        let base = vec![node(1, None, "A"), node(2, Some(1), "A / Old")];
        let variant = vec![node(1, None, "B"), node(2, Some(1), "B / New")];

        let ops: Vec<&str> = compute_variant_patches(&base, &variant)
            .iter()
            .map(StructurePatch::op_name)
            .collect();
        assert_eq!(ops, vec!["update", "add", "remove"]);
    }

    #[test]
    fn test_duplicate_paths_pair_by_occurrence() {
        let base = vec![
            node(1, None, "A"),
            node(2, Some(1), "A / Dot"),
            node(3, Some(1), "A / Dot"),
        ];
        let mut second = node(3, Some(1), "A / Dot");
        second.visible = false;
        let variant = vec![node(1, None, "A"), node(2, Some(1), "A / Dot"), second];

        let patches = compute_variant_patches(&base, &variant);
        assert_eq!(patches.len(), 1);
        assert!(matches!(patches[0], StructurePatch::Update { id: 3, .. }));
    }

    #[test]
    fn test_empty_base_adds_everything() {
        let variant = vec![node(1, None, "A"), node(2, Some(1), "A / Label")];
        let patches = compute_variant_patches(&[], &variant);
        assert_eq!(patches.len(), 2);
        assert!(patches
            .iter()
            .all(|p| matches!(p, StructurePatch::Add { .. })));
    }
}
