//! Scene nodes.

use super::mixed::Mixable;
use super::paint::{Effect, Paint};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Host node kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    Document,
    Page,
    Section,
    ComponentSet,
    Component,
    Instance,
    #[default]
    Frame,
    Group,
    Vector,
    Text,
    BooleanOperation,
    Rectangle,
    Ellipse,
    Line,
    Star,
    Polygon,
    Slice,
    #[serde(other)]
    Other,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Document => "DOCUMENT",
            NodeKind::Page => "PAGE",
            NodeKind::Section => "SECTION",
            NodeKind::ComponentSet => "COMPONENT_SET",
            NodeKind::Component => "COMPONENT",
            NodeKind::Instance => "INSTANCE",
            NodeKind::Frame => "FRAME",
            NodeKind::Group => "GROUP",
            NodeKind::Vector => "VECTOR",
            NodeKind::Text => "TEXT",
            NodeKind::BooleanOperation => "BOOLEAN_OPERATION",
            NodeKind::Rectangle => "RECTANGLE",
            NodeKind::Ellipse => "ELLIPSE",
            NodeKind::Line => "LINE",
            NodeKind::Star => "STAR",
            NodeKind::Polygon => "POLYGON",
            NodeKind::Slice => "SLICE",
            NodeKind::Other => "OTHER",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a variable bound to a node, paint or style property
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum VariableBinding {
    Id(String),
    Many(Vec<VariableBinding>),
    Alias(Box<VariableAlias>),
}

/// Object form of a binding; hosts spell the reference in several ways
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableAlias {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub variable_id: Option<String>,
    #[serde(default)]
    pub variable: Option<VariableRef>,
    #[serde(default, alias = "values", alias = "alias", alias = "variableAlias")]
    pub value: Option<VariableBinding>,
    #[serde(default)]
    pub bound_variables: Option<BoundVariables>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct VariableRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
}

/// Property names consulted, in order, inside nested paint-like bindings
pub(crate) const PAINT_BINDING_KEYS: [&str; 5] = ["color", "fills", "fill", "strokes", "stroke"];

impl VariableBinding {
    /// The first non-empty variable id carried by this binding
    pub fn variable_id(&self) -> Option<&str> {
        match self {
            VariableBinding::Id(id) => Some(id.as_str()).filter(|id| !id.is_empty()),
            VariableBinding::Many(items) => items.iter().find_map(VariableBinding::variable_id),
            VariableBinding::Alias(alias) => alias.variable_id(),
        }
    }
}

impl VariableAlias {
    fn variable_id(&self) -> Option<&str> {
        fn non_empty(s: &Option<String>) -> Option<&str> {
            s.as_deref().filter(|s| !s.is_empty())
        }
        non_empty(&self.id)
            .or_else(|| non_empty(&self.variable_id))
            .or_else(|| {
                self.variable
                    .as_ref()
                    .and_then(|v| non_empty(&v.id).or_else(|| non_empty(&v.key)))
            })
            .or_else(|| self.value.as_ref().and_then(VariableBinding::variable_id))
            .or_else(|| {
                let bound = self.bound_variables.as_ref()?;
                PAINT_BINDING_KEYS
                    .iter()
                    .find_map(|key| bound.get(*key))
                    .and_then(VariableBinding::variable_id)
            })
    }
}

/// Property name -> bound variable
pub type BoundVariables = BTreeMap<String, VariableBinding>;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FontName {
    pub family: String,
    pub style: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineHeightUnit {
    Pixels,
    Percent,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineHeight {
    pub unit: LineHeightUnit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LetterSpacing {
    pub unit: LineHeightUnit,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextCase {
    Original,
    Upper,
    Lower,
    Title,
    SmallCaps,
    SmallCapsForced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrokeAlign {
    Center,
    Inside,
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutMode {
    None,
    Horizontal,
    Vertical,
    #[serde(other)]
    Grid,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MainComponentRef {
    #[serde(default)]
    pub id: Option<String>,
    pub key: String,
}

fn default_visible() -> bool {
    true
}

/// A node of the host scene graph
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub opacity: Option<f64>,

    #[serde(default)]
    pub fills: Option<Mixable<Vec<Paint>>>,
    #[serde(default)]
    pub strokes: Option<Mixable<Vec<Paint>>>,
    #[serde(default)]
    pub stroke_weight: Option<Mixable<f64>>,
    #[serde(default)]
    pub stroke_align: Option<StrokeAlign>,

    #[serde(default)]
    pub fill_style_id: Option<Mixable<String>>,
    #[serde(default)]
    pub stroke_style_id: Option<Mixable<String>>,
    #[serde(default)]
    pub text_style_id: Option<Mixable<String>>,
    #[serde(default)]
    pub effect_style_id: Option<Mixable<String>>,
    #[serde(default)]
    pub bound_variables: BoundVariables,

    #[serde(default)]
    pub layout_mode: Option<LayoutMode>,
    #[serde(default)]
    pub padding_top: Option<f64>,
    #[serde(default)]
    pub padding_right: Option<f64>,
    #[serde(default)]
    pub padding_bottom: Option<f64>,
    #[serde(default)]
    pub padding_left: Option<f64>,
    #[serde(default)]
    pub item_spacing: Option<f64>,

    #[serde(default)]
    pub corner_radius: Option<Mixable<f64>>,
    #[serde(default)]
    pub top_left_radius: Option<f64>,
    #[serde(default)]
    pub top_right_radius: Option<f64>,
    #[serde(default)]
    pub bottom_right_radius: Option<f64>,
    #[serde(default)]
    pub bottom_left_radius: Option<f64>,

    #[serde(default)]
    pub effects: Option<Mixable<Vec<Effect>>>,

    #[serde(default)]
    pub characters: Option<String>,
    #[serde(default)]
    pub font_name: Option<Mixable<FontName>>,
    #[serde(default)]
    pub font_size: Option<Mixable<f64>>,
    #[serde(default)]
    pub line_height: Option<Mixable<LineHeight>>,
    #[serde(default)]
    pub letter_spacing: Option<Mixable<LetterSpacing>>,
    #[serde(default)]
    pub paragraph_spacing: Option<f64>,
    #[serde(default)]
    pub text_case: Option<Mixable<TextCase>>,

    #[serde(default)]
    pub main_component: Option<MainComponentRef>,
    #[serde(default)]
    pub variant_properties: Option<BTreeMap<String, String>>,

    #[serde(default)]
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            visible: true,
            ..Default::default()
        }
    }

    pub fn with_children(mut self, children: Vec<SceneNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Variable id bound to `property` on this node, if any
    pub fn bound_variable(&self, property: &str) -> Option<&str> {
        self.bound_variables
            .get(property)
            .and_then(VariableBinding::variable_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_binding_forms_resolve_to_first_id() {
        let bindings: BoundVariables = serde_json::from_value(json!({
            "fills": [{"type": "VARIABLE_ALIAS", "id": "VariableID:1"}],
            "opacity": {"type": "VARIABLE_ALIAS", "id": "VariableID:2"},
            "itemSpacing": "VariableID:3",
            "paddingTop": ""
        }))
        .unwrap();

        assert_eq!(bindings["fills"].variable_id(), Some("VariableID:1"));
        assert_eq!(bindings["opacity"].variable_id(), Some("VariableID:2"));
        assert_eq!(bindings["itemSpacing"].variable_id(), Some("VariableID:3"));
        assert_eq!(bindings["paddingTop"].variable_id(), None);
    }

    #[test]
    fn test_scene_node_defaults() {
        let node: SceneNode = serde_json::from_value(json!({
            "id": "1:2",
            "name": "Label",
            "type": "TEXT",
            "fontSize": "__mixed__"
        }))
        .unwrap();

        assert!(node.visible);
        assert_eq!(node.kind, NodeKind::Text);
        assert!(node.font_size.as_ref().is_some_and(Mixable::is_mixed));
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_unknown_kind_maps_to_other() {
        let node: SceneNode =
            serde_json::from_value(json!({"id": "1", "name": "x", "type": "STICKY"})).unwrap();
        assert_eq!(node.kind, NodeKind::Other);
    }

    #[test]
    fn test_nested_binding_forms() {
        let bindings: BoundVariables = serde_json::from_value(json!({
            "a": {"variableId": "VariableID:a"},
            "b": {"variable": {"key": "key-b"}},
            "c": {"alias": {"id": "VariableID:c"}},
            "d": {"boundVariables": {"fills": [{"id": "VariableID:d"}]}},
            "e": {"type": "VARIABLE_ALIAS"}
        }))
        .unwrap();

        assert_eq!(bindings["a"].variable_id(), Some("VariableID:a"));
        assert_eq!(bindings["b"].variable_id(), Some("key-b"));
        assert_eq!(bindings["c"].variable_id(), Some("VariableID:c"));
        assert_eq!(bindings["d"].variable_id(), Some("VariableID:d"));
        assert_eq!(bindings["e"].variable_id(), None);
    }
}
