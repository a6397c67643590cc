//! Variant patch types.
//!
//! A variant is stored as a list of patches against its component set's base
//! structure. Patches serialize with an `op` tag (`update`, `add`, `remove`).

use crate::host::StrokeAlign;
use crate::structure::model::{
    InstanceInfo, NodeEffect, NodeId, NodeLayout, NodePaint, NodeStyles, Radius, StructureNode,
    StructureNodeType, TextContent, Typography,
};
use serde::{Deserialize, Serialize};

/// One edit against a base structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum StructurePatch {
    /// Overwrite the listed attributes of the base node `id`
    Update { id: NodeId, value: NodeFieldSet },
    /// Append a node that has no counterpart in the base
    Add { node: StructureNode },
    /// Drop the base node `id`
    Remove { id: NodeId },
}

impl StructurePatch {
    pub fn op_name(&self) -> &'static str {
        match self {
            StructurePatch::Update { .. } => "update",
            StructurePatch::Add { .. } => "add",
            StructurePatch::Remove { .. } => "remove",
        }
    }
}

/// Present-or-cleared encoding for optional attributes
///
/// The outer `Option` says whether the attribute changed; the inner one is
/// its new value, where `None` (serialized as `null`) clears it.
mod changed {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S, T>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

/// The attributes of a node that an update patch overwrites
///
/// Identity fields (`id`, `parentId`, `path`) never appear here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeFieldSet {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<StructureNodeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none", with = "changed")]
    pub styles: Option<Option<NodeStyles>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "changed")]
    pub layout: Option<Option<NodeLayout>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "changed")]
    pub opacity: Option<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "changed")]
    pub opacity_token: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "changed")]
    pub radius: Option<Option<Radius>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "changed")]
    pub radius_token: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "changed")]
    pub effects: Option<Option<Vec<NodeEffect>>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "changed")]
    pub fills: Option<Option<Vec<NodePaint>>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "changed")]
    pub fill_token: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "changed")]
    pub strokes: Option<Option<Vec<NodePaint>>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "changed")]
    pub stroke_token: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "changed")]
    pub stroke_weight: Option<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "changed")]
    pub stroke_align: Option<Option<StrokeAlign>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "changed")]
    pub typography: Option<Option<Typography>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "changed")]
    pub typography_token: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "changed")]
    pub component_instance: Option<Option<InstanceInfo>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "changed")]
    pub text: Option<Option<TextContent>>,
}

impl NodeFieldSet {
    pub fn is_empty(&self) -> bool {
        self.changed_fields().is_empty()
    }

    /// Serialized names of the attributes this set carries
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let flags = [
            ("type", self.node_type.is_some()),
            ("name", self.name.is_some()),
            ("visible", self.visible.is_some()),
            ("styles", self.styles.is_some()),
            ("layout", self.layout.is_some()),
            ("opacity", self.opacity.is_some()),
            ("opacityToken", self.opacity_token.is_some()),
            ("radius", self.radius.is_some()),
            ("radiusToken", self.radius_token.is_some()),
            ("effects", self.effects.is_some()),
            ("fills", self.fills.is_some()),
            ("fillToken", self.fill_token.is_some()),
            ("strokes", self.strokes.is_some()),
            ("strokeToken", self.stroke_token.is_some()),
            ("strokeWeight", self.stroke_weight.is_some()),
            ("strokeAlign", self.stroke_align.is_some()),
            ("typography", self.typography.is_some()),
            ("typographyToken", self.typography_token.is_some()),
            ("componentInstance", self.component_instance.is_some()),
            ("text", self.text.is_some()),
        ];
        flags
            .into_iter()
            .filter_map(|(name, present)| present.then_some(name))
            .collect()
    }

    /// Overwrite the carried attributes on `node`; identity fields stay
    pub fn apply_to(&self, node: &mut StructureNode) {
        fn set<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(value) = value {
                *target = value.clone();
            }
        }

        set(&mut node.node_type, &self.node_type);
        set(&mut node.name, &self.name);
        set(&mut node.visible, &self.visible);
        set(&mut node.styles, &self.styles);
        set(&mut node.layout, &self.layout);
        set(&mut node.opacity, &self.opacity);
        set(&mut node.opacity_token, &self.opacity_token);
        set(&mut node.radius, &self.radius);
        set(&mut node.radius_token, &self.radius_token);
        set(&mut node.effects, &self.effects);
        set(&mut node.fills, &self.fills);
        set(&mut node.fill_token, &self.fill_token);
        set(&mut node.strokes, &self.strokes);
        set(&mut node.stroke_token, &self.stroke_token);
        set(&mut node.stroke_weight, &self.stroke_weight);
        set(&mut node.stroke_align, &self.stroke_align);
        set(&mut node.typography, &self.typography);
        set(&mut node.typography_token, &self.typography_token);
        set(&mut node.component_instance, &self.component_instance);
        set(&mut node.text, &self.text);
    }
}
