//! Structure nodes: the flat, path-addressed snapshot of a component subtree.
//!
//! All attribute types derive `PartialEq`; the diff engine relies on that
//! structural equality to decide whether an attribute changed.

use crate::host::{EffectKind, StrokeAlign, TextCase};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pre-order index of a node inside one collected structure (root = 1)
pub type NodeId = u32;

/// The closed set of node types a structure can contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StructureNodeType {
    Component,
    Instance,
    Frame,
    Group,
    Vector,
    Text,
    BooleanOperation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleRef {
    pub style_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NodeStyles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<StyleRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<StyleRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<StyleRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<Vec<StyleRef>>,
}

impl NodeStyles {
    pub fn is_empty(&self) -> bool {
        self.fill.is_none() && self.stroke.is_none() && self.text.is_none() && self.effects.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaddingTokens {
    pub top: Option<String>,
    pub right: Option<String>,
    pub bottom: Option<String>,
    pub left: Option<String>,
}

impl PaddingTokens {
    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.right.is_none() && self.bottom.is_none() && self.left.is_none()
    }
}

/// Auto-layout attributes; present only on nodes with an active layout mode
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeLayout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<Padding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_tokens: Option<PaddingTokens>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_spacing_token: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaintType {
    Solid,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaintColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

/// A solid paint as captured on a structure node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePaint {
    #[serde(rename = "type")]
    pub kind: PaintType,
    pub color: PaintColor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    pub opacity: f64,
    /// Always serialized; `null` when no token is bound
    #[serde(default)]
    pub token_key: Option<String>,
    pub color_hex: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CornerRadii {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_right: f64,
    pub bottom_left: f64,
}

/// Scalar radius when uniform, per-corner otherwise
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Radius {
    Uniform(f64),
    Corners(CornerRadii),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeEffect {
    #[serde(rename = "type")]
    pub kind: EffectKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<Offset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub font_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
}

/// Pixel line heights stay numeric, other units become `UNIT(value)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LineHeightValue {
    Pixels(f64),
    Label(String),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characters: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<LineHeightValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph_spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case: Option<TextCase>,
}

impl TextContent {
    pub fn is_empty(&self) -> bool {
        *self == TextContent::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceInfo {
    pub component_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_properties: Option<BTreeMap<String, String>>,
}

/// One node of a collected structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureNode {
    pub id: NodeId,
    pub parent_id: Option<NodeId>,
    pub path: String,
    #[serde(rename = "type")]
    pub node_type: StructureNodeType,
    pub name: String,
    pub visible: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<NodeStyles>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<NodeLayout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<Radius>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<Vec<NodeEffect>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_instance: Option<InstanceInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fills: Option<Vec<NodePaint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strokes: Option<Vec<NodePaint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_align: Option<StrokeAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typography: Option<Typography>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typography_token: Option<String>,
}

impl StructureNode {
    /// A node with identity fields set and every optional attribute absent
    pub fn bare(
        id: NodeId,
        parent_id: Option<NodeId>,
        path: impl Into<String>,
        node_type: StructureNodeType,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            parent_id,
            path: path.into(),
            node_type,
            name: name.into(),
            visible: true,
            styles: None,
            layout: None,
            opacity: None,
            opacity_token: None,
            radius: None,
            radius_token: None,
            effects: None,
            component_instance: None,
            text: None,
            fills: None,
            fill_token: None,
            strokes: None,
            stroke_token: None,
            stroke_weight: None,
            stroke_align: None,
            typography: None,
            typography_token: None,
        }
    }
}
