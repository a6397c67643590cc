use athena_core::config::ExportConfig;
use athena_core::host::Document;
use serde_json::{json, Value};

/// Parse a document dump built with `json!`
#[allow(dead_code)]
pub fn document(value: Value) -> Document {
    serde_json::from_value(value).expect("fixture document should parse")
}

/// A solid paint with the given 0..1 channels
#[allow(dead_code)]
pub fn solid(r: f64, g: f64, b: f64) -> Value {
    json!({"type": "SOLID", "color": {"r": r, "g": g, "b": b}})
}

/// A text node
#[allow(dead_code)]
pub fn text(id: &str, name: &str, characters: &str) -> Value {
    json!({"id": id, "name": name, "type": "TEXT", "characters": characters})
}

/// An instance of the component published under `key`
#[allow(dead_code)]
pub fn instance(id: &str, name: &str, key: &str) -> Value {
    json!({"id": id, "name": name, "type": "INSTANCE", "mainComponent": {"key": key}})
}

/// A Button set with a Default and a Pressed variant that differ by fill only
#[allow(dead_code)]
pub fn button_set(prefix: &str) -> Value {
    json!({
        "id": format!("{prefix}:0"), "name": "Button", "type": "COMPONENT_SET",
        "key": format!("{prefix}-set"),
        "children": [
            {
                "id": format!("{prefix}:1"), "name": "State=Default", "type": "COMPONENT",
                "key": format!("{prefix}-default"),
                "fills": [solid(0.0, 0.0, 1.0)],
                "children": [text(&format!("{prefix}:2"), "Label", "OK")]
            },
            {
                "id": format!("{prefix}:3"), "name": "State=Pressed", "type": "COMPONENT",
                "key": format!("{prefix}-pressed"),
                "fills": [solid(0.0, 0.0, 0.5)],
                "children": [text(&format!("{prefix}:4"), "Label", "OK")]
            }
        ]
    })
}

/// A frame holding `count` plain rectangles
#[allow(dead_code)]
pub fn wide_frame(id: &str, count: usize) -> Value {
    let children: Vec<Value> = (0..count)
        .map(|i| json!({"id": format!("{id}/r{i}"), "name": format!("Rect {i}"), "type": "RECTANGLE"}))
        .collect();
    json!({"id": id, "name": "Filler", "type": "FRAME", "children": children})
}

/// Two pages, each with one button set; the second page is current
#[allow(dead_code)]
pub fn two_page_document() -> Document {
    document(json!({
        "name": "Kit",
        "currentPageId": "P:2",
        "pages": [
            {"id": "P:1", "name": "🧩 Buttons", "children": [button_set("a")]},
            {"id": "P:2", "name": "Actions", "children": [button_set("b")]}
        ]
    }))
}

/// Export settings with a small chunk size
#[allow(dead_code)]
pub fn export_config(chunk_size: usize) -> ExportConfig {
    ExportConfig {
        chunk_size,
        ..ExportConfig::default()
    }
}
