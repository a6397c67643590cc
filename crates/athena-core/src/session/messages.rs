//! Wire protocol between the host UI and the engine.

use crate::export::ExportResultPayload;
use crate::styles::StyleExportPayload;
use crate::tokens::TokenExportPayload;
use serde::{Deserialize, Serialize};

/// A request from the UI, discriminated by `type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InboundMessage {
    Test,
    ExportComponents,
    ExportComponentsCurrentPage,
    ExportComponentsContinue,
    CancelExport,
    CollectTokens,
    CollectStyles,
    /// Any other `type`; ignored
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportProgress {
    pub session_id: u64,
    pub page_name: String,
    pub processed_nodes: usize,
    pub completed_pages: usize,
    pub total_pages: usize,
}

/// `{json, data}` body of the token and style results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectResult<T> {
    pub json: String,
    pub data: T,
}

impl<T: Serialize> CollectResult<T> {
    pub fn new(data: T) -> serde_json::Result<Self> {
        Ok(Self {
            json: serde_json::to_string_pretty(&data)?,
            data,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugEntry {
    pub topic: String,
    pub detail: serde_json::Value,
    pub timestamp: String,
}

/// A message to the UI: `{"type": ..., "payload": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "kebab-case")]
pub enum OutboundMessage {
    Echo { received: serde_json::Value },
    ExportProgress(ExportProgress),
    ExportResult(Box<ExportResultPayload>),
    ExportCancelled,
    CollectTokensResult(Box<CollectResult<TokenExportPayload>>),
    CollectStylesResult(Box<CollectResult<StyleExportPayload>>),
    DebugLog(DebugEntry),
}

impl OutboundMessage {
    pub fn type_name(&self) -> &'static str {
        match self {
            OutboundMessage::Echo { .. } => "echo",
            OutboundMessage::ExportProgress(_) => "export-progress",
            OutboundMessage::ExportResult(_) => "export-result",
            OutboundMessage::ExportCancelled => "export-cancelled",
            OutboundMessage::CollectTokensResult(_) => "collect-tokens-result",
            OutboundMessage::CollectStylesResult(_) => "collect-styles-result",
            OutboundMessage::DebugLog(_) => "debug-log",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_inbound_types() {
        let cases = [
            ("test", InboundMessage::Test),
            ("export-components", InboundMessage::ExportComponents),
            (
                "export-components-current-page",
                InboundMessage::ExportComponentsCurrentPage,
            ),
            (
                "export-components-continue",
                InboundMessage::ExportComponentsContinue,
            ),
            ("cancel-export", InboundMessage::CancelExport),
            ("collect-tokens", InboundMessage::CollectTokens),
            ("collect-styles", InboundMessage::CollectStyles),
            ("resize", InboundMessage::Unknown),
        ];
        for (tag, expected) in cases {
            let parsed: InboundMessage =
                serde_json::from_value(json!({"type": tag, "extra": 1})).unwrap();
            assert_eq!(parsed, expected, "for {}", tag);
        }
    }

    #[test]
    fn test_outbound_shape() {
        let cancelled = serde_json::to_value(OutboundMessage::ExportCancelled).unwrap();
        assert_eq!(cancelled, json!({"type": "export-cancelled"}));

        let progress = OutboundMessage::ExportProgress(ExportProgress {
            session_id: 2,
            page_name: "Buttons".into(),
            processed_nodes: 250,
            completed_pages: 0,
            total_pages: 3,
        });
        assert_eq!(progress.type_name(), "export-progress");
        let value = serde_json::to_value(progress).unwrap();
        assert_eq!(value["type"], "export-progress");
        assert_eq!(value["payload"]["processedNodes"], 250);
        assert_eq!(value["payload"]["sessionId"], 2);
    }
}
