//! Node snapshot extractor.
//!
//! Turns one host node into a [`StructureNode`]: identity, path, visibility
//! and every visual attribute the diff engine compares, with design-token
//! references resolved where the host binds them.

pub mod layout;
pub mod paint;
pub mod text;
pub mod visual;

use crate::errors::{AthenaError, Result};
use crate::host::mixed::uniform;
use crate::host::{NodeKind, SceneNode, StyleCatalog};
use crate::structure::model::{NodeId, StructureNode, StructureNodeType};
use crate::structure::path::make_path;
use paint::PaintChannel;

/// Options that change what a snapshot captures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollectOptions {
    /// Capture fills of hidden nodes too
    pub preserve_hidden_fills: bool,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            preserve_hidden_fills: true,
        }
    }
}

/// Map a host kind onto the closed structure node enumeration
pub fn structure_type(node: &SceneNode) -> Result<StructureNodeType> {
    match node.kind {
        NodeKind::Component => Ok(StructureNodeType::Component),
        NodeKind::Instance => Ok(StructureNodeType::Instance),
        NodeKind::Frame => Ok(StructureNodeType::Frame),
        NodeKind::Group => Ok(StructureNodeType::Group),
        NodeKind::Text => Ok(StructureNodeType::Text),
        NodeKind::BooleanOperation => Ok(StructureNodeType::BooleanOperation),
        NodeKind::Vector
        | NodeKind::Rectangle
        | NodeKind::Ellipse
        | NodeKind::Line
        | NodeKind::Star
        | NodeKind::Polygon => Ok(StructureNodeType::Vector),
        other => Err(AthenaError::UnsupportedNodeType {
            node_id: node.id.clone(),
            node_type: other.to_string(),
        }),
    }
}

/// Snapshot a single node
///
/// # Errors
///
/// `UnsupportedNodeType` when the node kind cannot appear in a structure.
pub fn snapshot_node(
    node: &SceneNode,
    parent_path: Option<&str>,
    parent_id: Option<NodeId>,
    id: NodeId,
    catalog: &dyn StyleCatalog,
    options: CollectOptions,
) -> Result<StructureNode> {
    let node_type = structure_type(node)?;
    let mut snap = StructureNode::bare(
        id,
        parent_id,
        make_path(parent_path, &node.name),
        node_type,
        node.name.clone(),
    );
    snap.visible = node.visible;

    snap.styles = visual::extract_styles(node);
    snap.layout = layout::extract_layout(node);
    snap.opacity = node.opacity;
    snap.opacity_token = node.bound_variable("opacity").map(str::to_string);

    let fill_token = paint::resolve_paint_token(node, PaintChannel::Fills, catalog);
    if options.preserve_hidden_fills || node.visible {
        snap.fills = paint::extract_paints(node.fills.as_ref(), fill_token.as_deref());
    }
    snap.fill_token = fill_token;

    let stroke_token = paint::resolve_paint_token(node, PaintChannel::Strokes, catalog);
    if let Some(strokes) = paint::extract_paints(node.strokes.as_ref(), stroke_token.as_deref()) {
        snap.strokes = Some(strokes);
        snap.stroke_weight = uniform(&node.stroke_weight).copied();
        snap.stroke_align = node.stroke_align;
    }
    snap.stroke_token = stroke_token;

    snap.component_instance = visual::extract_instance(node);
    snap.text = text::extract_text(node);
    snap.typography = text::extract_typography(node);
    snap.typography_token = text::typography_token(node);

    snap.radius = visual::extract_radius(node);
    snap.radius_token = node.bound_variable("cornerRadius").map(str::to_string);
    snap.effects = visual::extract_effects(node);

    Ok(snap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Document, Mixable, Paint};
    use crate::structure::model::Radius;
    use serde_json::json;

    #[test]
    fn test_shapes_map_to_vector() {
        for kind in [NodeKind::Rectangle, NodeKind::Ellipse, NodeKind::Star] {
            let node = SceneNode::new("1", "Shape", kind);
            assert_eq!(structure_type(&node).unwrap(), StructureNodeType::Vector);
        }
    }

    #[test]
    fn test_section_is_unsupported() {
        let node = SceneNode::new("1", "Section", NodeKind::Section);
        let err = structure_type(&node).unwrap_err();
        assert!(matches!(err, AthenaError::UnsupportedNodeType { .. }));
    }

    #[test]
    fn test_snapshot_path_and_identity() {
        let node = SceneNode::new("1", "Label", NodeKind::Text);
        let doc = Document::default();
        let snap = snapshot_node(
            &node,
            Some("Button"),
            Some(1),
            2,
            &doc.style_index(),
            CollectOptions::default(),
        )
        .unwrap();
        assert_eq!(snap.id, 2);
        assert_eq!(snap.parent_id, Some(1));
        assert_eq!(snap.path, "Button / Label");
        assert_eq!(snap.node_type, StructureNodeType::Text);
    }

    #[test]
    fn test_hidden_fills_gated_by_option() {
        let mut node = SceneNode::new("1", "Bg", NodeKind::Rectangle);
        node.visible = false;
        node.fills = Some(Mixable::Uniform(vec![Paint::solid(1.0, 1.0, 1.0)]));
        node.bound_variables =
            serde_json::from_value(json!({"fills": [{"id": "VariableID:bg"}]})).unwrap();
        let doc = Document::default();
        let catalog = doc.style_index();

        let kept = snapshot_node(&node, None, None, 1, &catalog, CollectOptions::default()).unwrap();
        assert!(kept.fills.is_some());

        let options = CollectOptions {
            preserve_hidden_fills: false,
        };
        let dropped = snapshot_node(&node, None, None, 1, &catalog, options).unwrap();
        assert!(dropped.fills.is_none());
        assert_eq!(dropped.fill_token.as_deref(), Some("VariableID:bg"));
    }

    #[test]
    fn test_stroke_weight_only_with_solid_strokes() {
        let mut node = SceneNode::new("1", "Box", NodeKind::Frame);
        node.stroke_weight = Some(Mixable::Uniform(1.0));
        let doc = Document::default();
        let catalog = doc.style_index();

        let bare = snapshot_node(&node, None, None, 1, &catalog, CollectOptions::default()).unwrap();
        assert!(bare.stroke_weight.is_none());

        node.strokes = Some(Mixable::Uniform(vec![Paint::solid(0.0, 0.0, 0.0)]));
        let stroked =
            snapshot_node(&node, None, None, 1, &catalog, CollectOptions::default()).unwrap();
        assert_eq!(stroked.stroke_weight, Some(1.0));
        assert_eq!(stroked.strokes.map(|s| s.len()), Some(1));
    }

    #[test]
    fn test_radius_and_token() {
        let mut node = SceneNode::new("1", "Box", NodeKind::Frame);
        node.corner_radius = Some(Mixable::Uniform(8.0));
        node.bound_variables =
            serde_json::from_value(json!({"cornerRadius": {"id": "VariableID:r"}})).unwrap();
        let doc = Document::default();
        let snap = snapshot_node(
            &node,
            None,
            None,
            1,
            &doc.style_index(),
            CollectOptions::default(),
        )
        .unwrap();
        assert_eq!(snap.radius, Some(Radius::Uniform(8.0)));
        assert_eq!(snap.radius_token.as_deref(), Some("VariableID:r"));
    }
}
