//! Payload preparation before an export leaves the engine.

use crate::errors::Result;
use crate::export::model::{ExportDocument, ExportMode, ExportResultPayload, PagedProgress};

/// Copy of `document` without parent-component back-references
pub fn sanitize_export(document: &ExportDocument) -> ExportDocument {
    let mut sanitized = document.clone();
    for component in &mut sanitized.components {
        component.parent_component = None;
        component.parent_components.clear();
    }
    sanitized
}

/// One-shot `export-result` body
pub fn full_result(document: &ExportDocument) -> Result<ExportResultPayload> {
    let data = sanitize_export(document);
    Ok(ExportResultPayload {
        json: serde_json::to_string_pretty(&data)?,
        data,
        mode: ExportMode::Full,
        page_name: None,
        progress: None,
    })
}

/// Per-page `export-result` body of a paged session
pub fn paged_result(document: &ExportDocument, progress: PagedProgress) -> Result<ExportResultPayload> {
    let data = sanitize_export(document);
    Ok(ExportResultPayload {
        json: serde_json::to_string_pretty(&data)?,
        data,
        mode: ExportMode::Paged,
        page_name: Some(progress.current_page.clone()),
        progress: Some(progress),
    })
}
