//! Token export payload.

use crate::host::{VariableMode, VariableResolvedType, VariableValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenExportMeta {
    pub generated_at: String,
    pub file_name: String,
    pub library: String,
}

/// Per-platform code names of a variable
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CodeSyntax {
    #[serde(rename = "WEB", default, skip_serializing_if = "Option::is_none")]
    pub web: Option<String>,
    #[serde(rename = "ANDROID", default, skip_serializing_if = "Option::is_none")]
    pub android: Option<String>,
    #[serde(rename = "iOS", default, skip_serializing_if = "Option::is_none")]
    pub ios: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenVariableExport {
    pub id: String,
    pub name: String,
    pub description: String,
    pub hidden_from_publishing: bool,
    pub remote: bool,
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_type: Option<VariableResolvedType>,
    pub variable_collection_id: String,
    pub scopes: Vec<String>,
    pub code_syntax: CodeSyntax,
    /// Mode id -> value, library aliases replaced when resolvable
    pub values_by_mode: BTreeMap<String, VariableValue>,
    /// Mode id -> `#RRGGBB`, only for modes holding a color
    pub hex_by_mode: BTreeMap<String, String>,
    pub collection_name: String,
    pub group_name: String,
    pub token_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenCollectionExport {
    pub id: String,
    pub name: String,
    pub key: String,
    pub default_mode_id: String,
    pub hidden_from_publishing: bool,
    pub remote: bool,
    pub modes: Vec<VariableMode>,
    pub variables: Vec<TokenVariableExport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenExportPayload {
    pub meta: TokenExportMeta,
    pub collections: Vec<TokenCollectionExport>,
}
