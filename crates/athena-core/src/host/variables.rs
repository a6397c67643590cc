//! Local variable collections (design tokens) exposed by the host.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct VariablesApi {
    #[serde(default)]
    pub collections: Vec<VariableCollection>,
    #[serde(default)]
    pub variables: Vec<Variable>,
}

impl VariablesApi {
    pub fn variable(&self, id: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableMode {
    pub mode_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableCollection {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub default_mode_id: String,
    #[serde(default)]
    pub hidden_from_publishing: bool,
    #[serde(default)]
    pub remote: bool,
    #[serde(default)]
    pub modes: Vec<VariableMode>,
    #[serde(default)]
    pub variable_ids: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariableResolvedType {
    Boolean,
    Float,
    String,
    Color,
}

/// A per-mode variable value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    Alias(AliasValue),
    Color(ColorValue),
    Bool(bool),
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasValue {
    #[serde(rename = "type")]
    pub kind: AliasTag,
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AliasTag {
    #[serde(rename = "VARIABLE_ALIAS")]
    VariableAlias,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorValue {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub hidden_from_publishing: bool,
    #[serde(default)]
    pub remote: bool,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub resolved_type: Option<VariableResolvedType>,
    pub variable_collection_id: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default)]
    pub code_syntax: BTreeMap<String, String>,
    #[serde(default)]
    pub values_by_mode: BTreeMap<String, VariableValue>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_variable_value_forms() {
        let values: Vec<VariableValue> = serde_json::from_value(json!([
            {"type": "VARIABLE_ALIAS", "id": "VariableID:abc/1:2"},
            {"r": 1.0, "g": 0.5, "b": 0.0, "a": 1.0},
            true,
            12,
            "Inter"
        ]))
        .unwrap();

        assert!(matches!(values[0], VariableValue::Alias(_)));
        assert!(matches!(values[1], VariableValue::Color(_)));
        assert_eq!(values[2], VariableValue::Bool(true));
        assert_eq!(values[3], VariableValue::Number(12.0));
        assert_eq!(values[4], VariableValue::Text("Inter".to_string()));
    }
}
