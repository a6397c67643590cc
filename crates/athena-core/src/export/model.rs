//! Export document and the payloads that carry it to the host UI.

use crate::component::Component;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportScope {
    Document,
    CurrentPage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMeta {
    /// RFC 3339 timestamp
    pub generated_at: String,
    pub version: String,
    /// Normalized names of the pages that contributed components
    pub files: Vec<String>,
    pub scope: ExportScope,
    pub file_name: String,
    pub library: String,
}

impl ExportMeta {
    pub fn new(
        version: impl Into<String>,
        files: Vec<String>,
        scope: ExportScope,
        document_name: &str,
    ) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            version: version.into(),
            files,
            scope,
            file_name: document_name.to_string(),
            library: document_name.to_string(),
        }
    }
}

/// Top-level component export
///
/// `tokens`, `typography`, `spacing` and `radius` are reserved and always
/// empty; tokens and styles travel through their own exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub meta: ExportMeta,
    pub components: Vec<Component>,
    #[serde(default)]
    pub tokens: Vec<serde_json::Value>,
    #[serde(default)]
    pub typography: Vec<serde_json::Value>,
    #[serde(default)]
    pub spacing: Vec<serde_json::Value>,
    #[serde(default)]
    pub radius: Vec<serde_json::Value>,
}

impl ExportDocument {
    pub fn new(meta: ExportMeta, components: Vec<Component>) -> Self {
        Self {
            meta,
            components,
            tokens: Vec::new(),
            typography: Vec::new(),
            spacing: Vec::new(),
            radius: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportMode {
    Full,
    Paged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedProgress {
    pub completed: usize,
    pub total: usize,
    pub has_more: bool,
    pub auto_continue: bool,
    pub current_page: String,
}

/// Body of an `export-result` message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResultPayload {
    /// Pretty-printed `data`
    pub json: String,
    pub data: ExportDocument,
    pub mode: ExportMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<PagedProgress>,
}
