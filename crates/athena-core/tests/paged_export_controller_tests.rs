//! Paged export sessions
//!
//! Drives [`PagedExportController`] against a recording host and checks the
//! message sequence the UI would see.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use athena_core::config::ExportConfig;
use athena_core::export::{ExportMode, ExportResultPayload, ExportScope};
use athena_core::extraction::Extractor;
use athena_core::session::{OutboundMessage, PagedExportController, RecordingHost};
use common::{document, two_page_document};
use serde_json::json;

// ---- helpers ----

fn results(host: &RecordingHost) -> Vec<&ExportResultPayload> {
    host.messages
        .iter()
        .filter_map(|m| match m {
            OutboundMessage::ExportResult(payload) => Some(payload.as_ref()),
            _ => None,
        })
        .collect()
}

// ---- document sessions ----

#[tokio::test]
async fn test_document_session_auto_continues() {
    // S1: every page is streamed without continue requests
    let doc = two_page_document();
    let mut controller = PagedExportController::new(Extractor::new(&doc, ExportConfig::default()));
    let mut host = RecordingHost::new();

    controller.start_from_document(&mut host).await.unwrap();

    assert_eq!(
        host.types(),
        vec!["export-progress", "export-result", "export-progress", "export-result"]
    );
    let results = results(&host);
    let first = results[0];
    assert_eq!(first.mode, ExportMode::Paged);
    assert_eq!(first.page_name.as_deref(), Some("Buttons"));
    let progress = first.progress.as_ref().unwrap();
    assert_eq!((progress.completed, progress.total), (1, 2));
    assert!(progress.has_more);
    assert!(progress.auto_continue);
    // each page batch is its own current-page export
    assert_eq!(first.data.meta.scope, ExportScope::CurrentPage);
    assert_eq!(first.data.meta.files, vec!["Buttons"]);

    let last = results[1].progress.as_ref().unwrap();
    assert_eq!(last.current_page, "Actions");
    assert!(!last.has_more);
    assert!(controller.session().is_none());
    assert!(host.notifications.is_empty());
}

#[tokio::test]
async fn test_progress_carries_session_and_page() {
    let doc = two_page_document();
    let mut controller = PagedExportController::new(Extractor::new(&doc, ExportConfig::default()));
    let mut host = RecordingHost::new();

    controller.start_from_document(&mut host).await.unwrap();

    let progress: Vec<_> = host
        .messages
        .iter()
        .filter_map(|m| match m {
            OutboundMessage::ExportProgress(p) => Some(p),
            _ => None,
        })
        .collect();
    assert_eq!(progress[0].session_id, 1);
    assert_eq!(progress[0].page_name, "Buttons");
    assert_eq!(progress[0].completed_pages, 0);
    assert_eq!(progress[1].completed_pages, 1);
    assert_eq!(progress[1].total_pages, 2);
}

#[tokio::test]
async fn test_document_without_pages_sends_full_result() {
    let doc = document(json!({"name": "Empty"}));
    let mut controller = PagedExportController::new(Extractor::new(&doc, ExportConfig::default()));
    let mut host = RecordingHost::new();

    controller.start_from_document(&mut host).await.unwrap();

    let results = results(&host);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].mode, ExportMode::Full);
    assert_eq!(results[0].data.meta.scope, ExportScope::Document);
    assert!(results[0].progress.is_none());
}

// ---- current page sessions ----

#[tokio::test]
async fn test_current_page_session_waits_for_continue() {
    // S2: the current page comes first, the rest follow one per continue
    let doc = two_page_document();
    let mut controller = PagedExportController::new(Extractor::new(&doc, ExportConfig::default()));
    let mut host = RecordingHost::new();

    controller.start_from_current_page(&mut host).await.unwrap();

    assert_eq!(host.types(), vec!["export-progress", "export-result"]);
    let progress = results(&host)[0].progress.clone().unwrap();
    assert_eq!(progress.current_page, "Actions");
    assert!(progress.has_more);
    assert!(!progress.auto_continue);
    let session = controller.session().unwrap();
    assert_eq!(session.pending_pages(), 1);
    assert_eq!(session.scope, ExportScope::CurrentPage);

    controller.continue_export(&mut host).await.unwrap();

    let results = results(&host);
    assert_eq!(results.len(), 2);
    assert_eq!(results[1].page_name.as_deref(), Some("Buttons"));
    assert!(!results[1].progress.as_ref().unwrap().has_more);
    assert!(controller.session().is_none());
}

#[tokio::test]
async fn test_continue_without_session_is_noop() {
    let doc = two_page_document();
    let mut controller = PagedExportController::new(Extractor::new(&doc, ExportConfig::default()));
    let mut host = RecordingHost::new();

    controller.continue_export(&mut host).await.unwrap();

    assert!(host.messages.is_empty());
}

// ---- cancellation ----

#[tokio::test]
async fn test_cancel_drops_session_and_notifies_ui() {
    let doc = two_page_document();
    let mut controller = PagedExportController::new(Extractor::new(&doc, ExportConfig::default()));
    let mut host = RecordingHost::new();

    controller.start_from_current_page(&mut host).await.unwrap();
    controller.cancel(&mut host);

    assert_eq!(host.types().last(), Some(&"export-cancelled"));
    assert!(controller.session().is_none());

    let before = host.messages.len();
    controller.continue_export(&mut host).await.unwrap();
    assert_eq!(host.messages.len(), before);
}

#[tokio::test]
async fn test_cancel_without_session_still_notifies() {
    let doc = two_page_document();
    let mut controller = PagedExportController::new(Extractor::new(&doc, ExportConfig::default()));
    let mut host = RecordingHost::new();

    controller.cancel(&mut host);

    assert_eq!(host.types(), vec!["export-cancelled"]);
}

#[tokio::test]
async fn test_cancel_slot_aborts_next_page_silently() {
    let doc = two_page_document();
    let mut controller = PagedExportController::new(Extractor::new(&doc, ExportConfig::default()));
    let slot = controller.cancel_slot();
    let mut host = RecordingHost::new();

    controller.start_from_current_page(&mut host).await.unwrap();
    assert!(slot.cancel_active());
    let before = host.messages.len();
    controller.continue_export(&mut host).await.unwrap();

    assert_eq!(host.messages.len(), before);
    assert!(controller.session().is_none());
    assert!(!slot.cancel_active());
}

#[tokio::test]
async fn test_restart_opens_new_session() {
    let doc = two_page_document();
    let mut controller = PagedExportController::new(Extractor::new(&doc, ExportConfig::default()));
    let mut host = RecordingHost::new();

    controller.start_from_current_page(&mut host).await.unwrap();
    assert_eq!(controller.session().map(|s| s.id), Some(1));
    controller.cancel(&mut host);
    controller.start_from_current_page(&mut host).await.unwrap();
    assert_eq!(controller.session().map(|s| s.id), Some(2));
}

// ---- failures ----

#[tokio::test]
async fn test_failures_reported_once_at_the_end() {
    let doc = document(json!({
        "name": "Kit",
        "pages": [
            {"id": "P:1", "name": "One", "children": [{"id": "c:1", "name": "NoKey", "type": "COMPONENT"}]},
            {"id": "P:2", "name": "Two", "children": [{"id": "c:2", "name": "AlsoNoKey", "type": "COMPONENT"}]}
        ]
    }));
    let mut controller = PagedExportController::new(Extractor::new(&doc, ExportConfig::default()));
    let mut host = RecordingHost::new();

    controller.start_from_document(&mut host).await.unwrap();

    assert_eq!(
        host.notifications,
        vec!["Some components were not exported (2). See the log.".to_string()]
    );
    assert!(results(&host).iter().all(|r| r.data.components.is_empty()));
}

#[tokio::test]
async fn test_aborted_session_still_reports_earlier_failures() {
    let doc = document(json!({
        "name": "Kit",
        "pages": [
            {"id": "P:1", "name": "One", "children": [{"id": "c:1", "name": "NoKey", "type": "COMPONENT"}]},
            {"id": "P:2", "name": "Two", "children": [{"id": "c:2", "name": "Chip", "type": "COMPONENT", "key": "chip"}]}
        ]
    }));
    let mut controller = PagedExportController::new(Extractor::new(&doc, ExportConfig::default()));
    let slot = controller.cancel_slot();
    let mut host = RecordingHost::new();

    controller.start_from_current_page(&mut host).await.unwrap();
    assert!(host.notifications.is_empty());
    assert!(slot.cancel_active());
    controller.continue_export(&mut host).await.unwrap();

    assert_eq!(
        host.notifications,
        vec!["Some components were not exported (1). See the log.".to_string()]
    );
    assert_eq!(results(&host).len(), 1);
    assert!(controller.session().is_none());
}
