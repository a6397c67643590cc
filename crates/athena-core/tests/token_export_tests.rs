//! Token export
//!
//! Local variables are exported per collection; aliases into the library
//! are resolved through a remote token source that is fetched at most once.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use athena_core::errors::{AthenaError, Result};
use athena_core::host::{Document, VariableValue};
use athena_core::tokens::{collect_tokens, AliasResolver, FileTokenSource, RemoteTokenSource};
use async_trait::async_trait;
use common::document;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// ---- helpers ----

struct StaticSource {
    body: Result<String>,
    fetches: AtomicUsize,
}

impl StaticSource {
    fn ok(body: String) -> Arc<Self> {
        Arc::new(Self {
            body: Ok(body),
            fetches: AtomicUsize::new(0),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            body: Err(AthenaError::RemoteSource {
                url: "mock://library".to_string(),
                reason: "offline".to_string(),
            }),
            fetches: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl RemoteTokenSource for StaticSource {
    async fn fetch(&self) -> Result<String> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.body.clone()
    }

    fn location(&self) -> String {
        "mock://library".to_string()
    }
}

/// Raw text: mode order matters and `json!` would sort the keys
fn library() -> String {
    r#"{"collections": [{"variables": [
        {"key": "lib1", "valuesByMode": {
            "light": {"r": 1.0, "g": 0.0, "b": 0.0, "a": 1.0},
            "dark": {"r": 0.0, "g": 0.0, "b": 0.0, "a": 1.0}
        }},
        {"key": "lib2", "valuesByMode": {"m": 16}}
    ]}]}"#
        .to_string()
}

fn token_document() -> Document {
    document(json!({
        "name": "Kit",
        "variables": {
            "collections": [
                {"id": "C:1", "name": "Brand", "key": "ck1", "defaultModeId": "m1",
                 "modes": [{"modeId": "m1", "name": "Light"}, {"modeId": "m2", "name": "Dark"}],
                 "variableIds": ["V:2", "V:1", "V:missing"]},
                {"id": "C:2", "name": "", "key": "ck2", "defaultModeId": "m1",
                 "modes": [{"modeId": "m1", "name": "Default"}],
                 "variableIds": ["V:3"]}
            ],
            "variables": [
                {"id": "V:1", "name": "Color/Brand/Primary", "key": "k1", "resolvedType": "COLOR",
                 "variableCollectionId": "C:1",
                 "codeSyntax": {"WEB": "--brand-primary", "ANDROID": ""},
                 "valuesByMode": {
                    "m1": {"type": "VARIABLE_ALIAS", "id": "VariableID:lib1/12:3"},
                    "m2": {"r": 0.0, "g": 0.0, "b": 1.0, "a": 1.0}
                 }},
                {"id": "V:2", "name": "Spacing", "key": "k2", "resolvedType": "FLOAT",
                 "variableCollectionId": "C:1",
                 "valuesByMode": {"m1": {"type": "VARIABLE_ALIAS", "id": "VariableID:lib2/1:1"}, "m2": 8}},
                {"id": "V:3", "name": "", "key": "k3", "resolvedType": "STRING",
                 "variableCollectionId": "C:2",
                 "valuesByMode": {"m1": {"type": "VARIABLE_ALIAS", "id": "VariableID:unknown/1:1"}}}
            ]
        }
    }))
}

// ---- scenarios ----

#[tokio::test]
async fn test_collections_follow_variable_id_order() {
    let doc = token_document();
    let payload = collect_tokens(&doc, &AliasResolver::disabled()).await.unwrap();

    assert_eq!(payload.meta.file_name, "Kit");
    assert_eq!(payload.collections.len(), 2);
    let brand = &payload.collections[0];
    let ids: Vec<&str> = brand.variables.iter().map(|v| v.id.as_str()).collect();
    // unknown ids are skipped
    assert_eq!(ids, vec!["V:2", "V:1"]);
    assert_eq!(brand.modes.len(), 2);
}

#[tokio::test]
async fn test_names_split_and_collection_fallbacks() {
    let doc = token_document();
    let payload = collect_tokens(&doc, &AliasResolver::disabled()).await.unwrap();

    let primary = &payload.collections[0].variables[1];
    assert_eq!(primary.group_name, "Color");
    assert_eq!(primary.token_name, "Brand/Primary");
    assert_eq!(primary.collection_name, "Brand");
    assert_eq!(primary.code_syntax.web.as_deref(), Some("--brand-primary"));
    assert_eq!(primary.code_syntax.android, None);

    let spacing = &payload.collections[0].variables[0];
    assert_eq!(spacing.group_name, "Ungrouped");
    assert_eq!(spacing.token_name, "Spacing");

    // unnamed variable falls back to its key, unnamed collection to its key
    let unnamed = &payload.collections[1].variables[0];
    assert_eq!(unnamed.token_name, "k3");
    assert_eq!(unnamed.collection_name, "ck2");
}

#[tokio::test]
async fn test_library_aliases_resolve_to_first_mode_value() {
    // S1: lib1 resolves to its first listed mode (red)
    let doc = token_document();
    let source = StaticSource::ok(library());
    let resolver = AliasResolver::new(source.clone());

    let payload = collect_tokens(&doc, &resolver).await.unwrap();

    let primary = &payload.collections[0].variables[1];
    assert_eq!(primary.hex_by_mode.get("m1").map(String::as_str), Some("#FF0000"));
    assert_eq!(primary.hex_by_mode.get("m2").map(String::as_str), Some("#0000FF"));

    let spacing = &payload.collections[0].variables[0];
    assert_eq!(spacing.values_by_mode.get("m1"), Some(&VariableValue::Number(16.0)));
    assert!(spacing.hex_by_mode.is_empty());

    // unknown library keys stay aliases
    let unnamed = &payload.collections[1].variables[0];
    assert!(matches!(unnamed.values_by_mode.get("m1"), Some(VariableValue::Alias(_))));
}

#[tokio::test]
async fn test_library_fetched_once_per_resolver() {
    let doc = token_document();
    let source = StaticSource::ok(library());
    let resolver = AliasResolver::new(source.clone());

    collect_tokens(&doc, &resolver).await.unwrap();
    collect_tokens(&doc, &resolver).await.unwrap();

    assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failed_fetch_leaves_aliases_and_is_not_retried() {
    let doc = token_document();
    let source = StaticSource::failing();
    let resolver = AliasResolver::new(source.clone());

    let payload = collect_tokens(&doc, &resolver).await.unwrap();
    collect_tokens(&doc, &resolver).await.unwrap();

    let primary = &payload.collections[0].variables[1];
    assert!(matches!(primary.values_by_mode.get("m1"), Some(VariableValue::Alias(_))));
    assert!(!primary.hex_by_mode.contains_key("m1"));
    assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_file_source_feeds_resolver() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("library.json");
    std::fs::write(&path, library()).unwrap();

    let doc = token_document();
    let resolver = AliasResolver::new(Arc::new(FileTokenSource::new(&path)));
    let payload = collect_tokens(&doc, &resolver).await.unwrap();

    let primary = &payload.collections[0].variables[1];
    assert_eq!(primary.hex_by_mode.get("m1").map(String::as_str), Some("#FF0000"));
}

#[tokio::test]
async fn test_missing_variables_api_is_capability_error() {
    let doc = document(json!({"name": "Kit"}));
    let err = collect_tokens(&doc, &AliasResolver::disabled()).await.unwrap_err();
    assert_eq!(
        err,
        AthenaError::CapabilityMissing {
            capability: "variables".to_string()
        }
    );
}

#[tokio::test]
async fn test_payload_wire_names() {
    let doc = token_document();
    let payload = collect_tokens(&doc, &AliasResolver::disabled()).await.unwrap();
    let value = serde_json::to_value(&payload).unwrap();

    let variable = &value["collections"][0]["variables"][1];
    assert_eq!(variable["collectionName"], "Brand");
    assert_eq!(variable["codeSyntax"]["WEB"], "--brand-primary");
    assert_eq!(variable["resolvedType"], "COLOR");
    assert_eq!(value["collections"][0]["defaultModeId"], "m1");
}
