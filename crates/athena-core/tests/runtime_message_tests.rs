//! UI message routing
//!
//! Raw UI messages go through [`PluginRuntime::handle`]; the recording host
//! shows what the UI receives.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use athena_core::config::{load_defaults, AthenaConfig};
use athena_core::host::Document;
use athena_core::session::{OutboundMessage, PluginRuntime, RecordingHost};
use athena_core::tokens::AliasResolver;
use common::{document, solid, two_page_document};
use serde_json::{json, Value};

// ---- helpers ----

fn runtime(doc: &Document, config: AthenaConfig) -> PluginRuntime<'_, RecordingHost> {
    PluginRuntime::new(doc, &config, AliasResolver::disabled(), RecordingHost::new())
}

fn wire(message: &OutboundMessage) -> Value {
    serde_json::to_value(message).unwrap()
}

// ---- routing ----

#[tokio::test]
async fn test_test_message_is_echoed() {
    let doc = two_page_document();
    let mut plugin = runtime(&doc, load_defaults().unwrap());

    plugin.handle(json!({"type": "test", "payload": [1, 2]})).await;

    let host = plugin.host();
    assert_eq!(host.types(), vec!["echo"]);
    assert_eq!(
        wire(&host.messages[0]),
        json!({"type": "echo", "payload": {"received": {"type": "test", "payload": [1, 2]}}})
    );
}

#[tokio::test]
async fn test_unknown_and_malformed_messages_are_ignored() {
    let doc = two_page_document();
    let mut plugin = runtime(&doc, load_defaults().unwrap());

    plugin.handle(json!({"type": "resize", "width": 400})).await;
    plugin.handle(json!({"no": "type"})).await;
    plugin.handle(json!("export-components")).await;

    assert!(plugin.host().messages.is_empty());
    assert!(plugin.host().notifications.is_empty());
}

#[tokio::test]
async fn test_export_cancels_previous_session_first() {
    let doc = two_page_document();
    let mut plugin = runtime(&doc, load_defaults().unwrap());

    plugin.handle(json!({"type": "export-components"})).await;

    assert_eq!(
        plugin.host().types(),
        vec![
            "export-cancelled",
            "export-progress",
            "export-result",
            "export-progress",
            "export-result"
        ]
    );
}

#[tokio::test]
async fn test_current_page_export_then_continue() {
    // S1: the UI asks for the next page after each result
    let doc = two_page_document();
    let mut plugin = runtime(&doc, load_defaults().unwrap());

    plugin.handle(json!({"type": "export-components-current-page"})).await;
    assert!(plugin.controller().session().is_some());
    plugin.handle(json!({"type": "export-components-continue"})).await;

    let pages: Vec<Value> = plugin
        .host()
        .messages
        .iter()
        .map(wire)
        .filter(|m| m["type"] == "export-result")
        .map(|m| m["payload"]["pageName"].clone())
        .collect();
    assert_eq!(pages, vec![json!("Actions"), json!("Buttons")]);
    assert!(plugin.controller().session().is_none());
}

#[tokio::test]
async fn test_cancel_message_stops_session() {
    let doc = two_page_document();
    let mut plugin = runtime(&doc, load_defaults().unwrap());

    plugin.handle(json!({"type": "export-components-current-page"})).await;
    plugin.handle(json!({"type": "cancel-export"})).await;
    plugin.handle(json!({"type": "export-components-continue"})).await;

    let types = plugin.host().types();
    assert_eq!(types.last(), Some(&"export-cancelled"));
    assert_eq!(types.iter().filter(|t| **t == "export-result").count(), 1);
}

#[tokio::test]
async fn test_result_json_matches_sanitized_data() {
    let doc = two_page_document();
    let mut plugin = runtime(&doc, load_defaults().unwrap());

    plugin.handle(json!({"type": "export-components"})).await;

    let result = plugin
        .host()
        .messages
        .iter()
        .find_map(|m| match m {
            OutboundMessage::ExportResult(payload) => Some(payload.clone()),
            _ => None,
        })
        .unwrap();
    let parsed: Value = serde_json::from_str(&result.json).unwrap();
    assert_eq!(parsed, serde_json::to_value(&result.data).unwrap());
    assert_eq!(parsed["meta"]["scope"], "current-page");
}

// ---- collect actions ----

#[tokio::test]
async fn test_collect_styles_result() {
    let doc = document(json!({
        "name": "Kit",
        "styles": [{"id": "S:1", "key": "k", "name": "Brand/Red", "type": "PAINT", "paints": [solid(1.0, 0.0, 0.0)]}]
    }));
    let mut plugin = runtime(&doc, load_defaults().unwrap());

    plugin.handle(json!({"type": "collect-styles"})).await;

    let message = wire(&plugin.host().messages[0]);
    assert_eq!(message["type"], "collect-styles-result");
    assert_eq!(message["payload"]["data"]["styles"][0]["group"], "Brand");
    let text: Value = serde_json::from_str(message["payload"]["json"].as_str().unwrap()).unwrap();
    assert_eq!(text, message["payload"]["data"]);
}

#[tokio::test]
async fn test_collect_failures_become_notifications() {
    let doc = document(json!({"name": "Bare"}));
    let mut plugin = runtime(&doc, load_defaults().unwrap());

    plugin.handle(json!({"type": "collect-tokens"})).await;
    plugin.handle(json!({"type": "collect-styles"})).await;

    let host = plugin.host();
    assert!(host.messages.is_empty());
    assert_eq!(host.notifications.len(), 2);
    assert!(host.notifications[0].starts_with("Could not collect tokens"));
    assert!(host.notifications[0].contains("variables"));
    assert!(host.notifications[1].starts_with("Could not collect styles"));
}

#[tokio::test]
async fn test_collect_tokens_result() {
    let doc = document(json!({
        "name": "Kit",
        "variables": {
            "collections": [{"id": "C:1", "name": "Brand", "key": "ck", "defaultModeId": "m1",
                             "modes": [{"modeId": "m1", "name": "Light"}], "variableIds": ["V:1"]}],
            "variables": [{"id": "V:1", "name": "Color/Red", "key": "vk", "resolvedType": "COLOR",
                           "variableCollectionId": "C:1",
                           "valuesByMode": {"m1": {"r": 1.0, "g": 0.0, "b": 0.0, "a": 1.0}}}]
        }
    }));
    let mut plugin = runtime(&doc, load_defaults().unwrap());

    plugin.handle(json!({"type": "collect-tokens"})).await;

    let message = wire(&plugin.host().messages[0]);
    assert_eq!(message["type"], "collect-tokens-result");
    let variable = &message["payload"]["data"]["collections"][0]["variables"][0];
    assert_eq!(variable["hexByMode"]["m1"], "#FF0000");
}

// ---- debug forwarding ----

#[tokio::test]
async fn test_debug_events_forwarded_when_enabled() {
    let doc = two_page_document();
    let mut config = load_defaults().unwrap();
    config.debug.forward_to_ui = true;
    let mut plugin = runtime(&doc, config);

    plugin.handle(json!({"type": "test"})).await;

    let types = plugin.host().types();
    assert_eq!(types, vec!["debug-log", "echo"]);
    let entry = wire(&plugin.host().messages[0]);
    assert_eq!(entry["payload"]["topic"], "ui-message");
}

#[tokio::test]
async fn test_debug_events_stay_local_by_default() {
    let doc = two_page_document();
    let mut plugin = runtime(&doc, load_defaults().unwrap());

    plugin.handle(json!({"type": "collect-tokens"})).await;

    assert!(!plugin.host().types().contains(&"debug-log"));
}
