//! Message routing between the host UI and the engine.

use crate::config::AthenaConfig;
use crate::errors::AthenaError;
use crate::extraction::Extractor;
use crate::host::Document;
use crate::session::cancel::CancelSlot;
use crate::session::controller::PagedExportController;
use crate::session::host::{HostChannel, NOTIFY_TIMEOUT_MS};
use crate::session::messages::{CollectResult, DebugEntry, InboundMessage, OutboundMessage};
use crate::styles::collect_styles;
use crate::tokens::{collect_tokens, AliasResolver};
use athena_core_types::RequestId;
use serde_json::{json, Value};

pub struct PluginRuntime<'doc, H: HostChannel> {
    document: &'doc Document,
    host: H,
    controller: PagedExportController<'doc>,
    resolver: AliasResolver,
    forward_debug: bool,
}

impl<'doc, H: HostChannel> PluginRuntime<'doc, H> {
    pub fn new(document: &'doc Document, config: &AthenaConfig, resolver: AliasResolver, host: H) -> Self {
        let extractor = Extractor::new(document, config.export.clone());
        Self {
            document,
            host,
            controller: PagedExportController::new(extractor),
            resolver,
            forward_debug: config.debug.forward_to_ui,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn controller(&self) -> &PagedExportController<'doc> {
        &self.controller
    }

    /// See [`PagedExportController::cancel_slot`]
    pub fn cancel_slot(&self) -> CancelSlot {
        self.controller.cancel_slot()
    }

    /// Route one raw message from the UI
    ///
    /// Malformed messages and unknown types are logged and ignored; action
    /// failures are reported through a host notification.
    pub async fn handle(&mut self, raw: Value) {
        let request_id = RequestId::new();
        let message = match serde_json::from_value::<InboundMessage>(raw.clone()) {
            Ok(message) => message,
            Err(err) => {
                tracing::warn!(%request_id, error = %err, "malformed ui message ignored");
                return;
            }
        };
        tracing::debug!(%request_id, ?message, "ui message");
        self.log_debug("ui-message", raw.clone());

        match message {
            InboundMessage::Test => {
                self.host
                    .post_message(OutboundMessage::Echo { received: raw });
            }
            InboundMessage::ExportComponents => {
                self.log_debug("export-components-request", Value::Null);
                self.controller.cancel(&mut self.host);
                let outcome = self.controller.start_from_document(&mut self.host).await;
                self.report("export_components", request_id, outcome);
            }
            InboundMessage::ExportComponentsCurrentPage => {
                self.log_debug("export-current-page-request", Value::Null);
                self.controller.cancel(&mut self.host);
                let outcome = self.controller.start_from_current_page(&mut self.host).await;
                self.report("export_components_current_page", request_id, outcome);
            }
            InboundMessage::ExportComponentsContinue => {
                self.log_debug("export-components-continue-request", Value::Null);
                let outcome = self.controller.continue_export(&mut self.host).await;
                self.report("export_components_continue", request_id, outcome);
            }
            InboundMessage::CancelExport => {
                self.controller.cancel(&mut self.host);
            }
            InboundMessage::CollectTokens => {
                self.log_debug("collect-tokens-request", Value::Null);
                self.collect_tokens_and_send().await;
            }
            InboundMessage::CollectStyles => {
                self.log_debug("collect-styles-request", Value::Null);
                self.collect_styles_and_send();
            }
            InboundMessage::Unknown => {
                tracing::debug!(%request_id, "unknown ui message ignored");
            }
        }
    }

    async fn collect_tokens_and_send(&mut self) {
        let result = collect_tokens(self.document, &self.resolver)
            .await
            .and_then(|payload| CollectResult::new(payload).map_err(AthenaError::from));
        match result {
            Ok(result) => {
                let collections = result.data.collections.len();
                self.log_debug("collect-tokens-result", json!({ "collections": collections }));
                self.host
                    .post_message(OutboundMessage::CollectTokensResult(Box::new(result)));
            }
            Err(err) => {
                self.log_debug("collect-tokens-error", json!({ "error": err.to_string() }));
                self.host
                    .notify(&format!("Could not collect tokens: {}", err), NOTIFY_TIMEOUT_MS);
            }
        }
    }

    fn collect_styles_and_send(&mut self) {
        let result =
            collect_styles(self.document).and_then(|payload| CollectResult::new(payload).map_err(AthenaError::from));
        match result {
            Ok(result) => {
                let styles = result.data.styles.len();
                self.log_debug("collect-styles-result", json!({ "styles": styles }));
                self.host
                    .post_message(OutboundMessage::CollectStylesResult(Box::new(result)));
            }
            Err(err) => {
                self.log_debug("collect-styles-error", json!({ "error": err.to_string() }));
                self.host
                    .notify(&format!("Could not collect styles: {}", err), NOTIFY_TIMEOUT_MS);
            }
        }
    }

    fn report(&mut self, op: &str, request_id: RequestId, outcome: Result<(), AthenaError>) {
        if let Err(err) = outcome {
            tracing::error!(%request_id, op, error = %err, "export failed");
            self.host
                .notify(&format!("Export failed: {}", err), NOTIFY_TIMEOUT_MS);
        }
    }

    /// Debug event, mirrored to the UI when forwarding is on
    fn log_debug(&mut self, topic: &str, detail: Value) {
        tracing::debug!(topic, %detail, "debug event");
        if self.forward_debug {
            self.host.post_message(OutboundMessage::DebugLog(DebugEntry {
                topic: topic.to_string(),
                detail,
                timestamp: chrono::Utc::now().to_rfc3339(),
            }));
        }
    }
}
