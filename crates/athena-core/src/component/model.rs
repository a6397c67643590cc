//! Component records.

use crate::diff::model::StructurePatch;
use crate::structure::model::StructureNode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub id: String,
    pub key: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentRole {
    Main,
    Part,
    Helper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Active,
    Deprecated,
    Scheduled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentPlatform {
    Desktop,
    MobileWeb,
    Universal,
}

/// Back-reference to a component that hosts this one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentHost {
    pub key: Option<String>,
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<ComponentRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ComponentStatus>,
}

/// A component set or stand-alone component, with its variants as patches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub key: String,
    pub name: String,
    pub page: String,
    pub category: String,
    pub description: String,
    pub variants: Vec<Variant>,
    pub default_variant: Option<String>,
    /// Base structure every variant patch list applies to
    pub structure: Vec<StructureNode>,
    /// Variant key -> patches against `structure`; the base variant maps to `[]`
    pub variant_structures: BTreeMap<String, Vec<StructurePatch>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_component: Option<ComponentHost>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parent_components: Vec<ComponentHost>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth_inside: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth_actual: Option<u32>,
    pub role: ComponentRole,
    pub status: ComponentStatus,
    pub platform: ComponentPlatform,
}

impl Component {
    /// Keys under which instances may refer to this component
    pub fn instance_keys(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.key.as_str())
            .chain(self.variants.iter().map(|v| v.key.as_str()))
            .filter(|k| !k.is_empty())
    }
}
