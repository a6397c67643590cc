//! Paged export: one page per step, progress and results streamed to the host.

use crate::component::{normalize_page_name, Component};
use crate::errors::Result;
use crate::export::{full_result, paged_result, ExportScope, PagedProgress};
use crate::extraction::{DocumentExtraction, Extractor};
use crate::host::Page;
use crate::session::cancel::{CancelSlot, CancelToken};
use crate::session::host::{extraction_failure_notice, HostChannel, NOTIFY_TIMEOUT_MS};
use crate::session::messages::{ExportProgress, OutboundMessage};
use std::collections::VecDeque;

/// State of the running paged export
#[derive(Debug)]
pub struct ExportSession {
    pub id: u64,
    pub scope: ExportScope,
    pub total_pages: usize,
    pub processed_pages: usize,
    pub auto_continue: bool,
    pending_pages: VecDeque<usize>,
    /// Everything gathered so far, kept for the final error report
    pub components: Vec<Component>,
    pub errors: Vec<String>,
    cancel: CancelToken,
}

impl ExportSession {
    pub fn pending_pages(&self) -> usize {
        self.pending_pages.len()
    }
}

pub struct PagedExportController<'doc> {
    extractor: Extractor<'doc>,
    session: Option<ExportSession>,
    session_counter: u64,
    cancel_slot: CancelSlot,
}

impl<'doc> PagedExportController<'doc> {
    pub fn new(extractor: Extractor<'doc>) -> Self {
        Self {
            extractor,
            session: None,
            session_counter: 0,
            cancel_slot: CancelSlot::new(),
        }
    }

    /// Handle that cancels the running session from outside the message loop
    pub fn cancel_slot(&self) -> CancelSlot {
        self.cancel_slot.clone()
    }

    pub fn session(&self) -> Option<&ExportSession> {
        self.session.as_ref()
    }

    /// Export every page, continuing automatically from page to page
    ///
    /// # Errors
    ///
    /// Only serialization of a result payload can fail.
    pub async fn start_from_document(&mut self, host: &mut dyn HostChannel) -> Result<()> {
        let pages: Vec<usize> = (0..self.extractor.document().pages.len()).collect();
        if pages.is_empty() {
            let extraction = self.extractor.extract_components_from_document();
            return send_full(host, &extraction);
        }
        self.start_paged(pages, true, ExportScope::Document, host).await
    }

    /// Export starting at the current page; each further page waits for
    /// [`continue_export`](Self::continue_export)
    ///
    /// # Errors
    ///
    /// Only serialization of a result payload can fail.
    pub async fn start_from_current_page(&mut self, host: &mut dyn HostChannel) -> Result<()> {
        let document = self.extractor.document();
        let count = document.pages.len();
        if count == 0 {
            let extraction = self.extractor.extract_components_from_current_page();
            return send_full(host, &extraction);
        }
        let first = document.current_page_index().unwrap_or(0);
        let pages: Vec<usize> = (0..count).map(|i| (first + i) % count).collect();
        self.start_paged(pages, false, ExportScope::CurrentPage, host).await
    }

    /// Process the next page of the running session, if any
    ///
    /// # Errors
    ///
    /// Only serialization of a result payload can fail.
    pub async fn continue_export(&mut self, host: &mut dyn HostChannel) -> Result<()> {
        if self.session.is_none() {
            tracing::debug!("continue requested without a session");
            return Ok(());
        }
        self.process_pages(host).await
    }

    /// Stop the running session, drop it and tell the UI
    pub fn cancel(&mut self, host: &mut dyn HostChannel) {
        if let Some(session) = self.session.take() {
            session.cancel.cancel();
            tracing::info!(session_id = session.id, processed_pages = session.processed_pages, "paged export cancelled");
        }
        self.cancel_slot.clear();
        host.post_message(OutboundMessage::ExportCancelled);
    }

    async fn start_paged(
        &mut self,
        pages: Vec<usize>,
        auto_continue: bool,
        scope: ExportScope,
        host: &mut dyn HostChannel,
    ) -> Result<()> {
        self.session_counter += 1;
        let cancel = CancelToken::new();
        self.cancel_slot.install(cancel.clone());
        tracing::info!(
            session_id = self.session_counter,
            total_pages = pages.len(),
            auto_continue,
            ?scope,
            "paged export started"
        );
        self.session = Some(ExportSession {
            id: self.session_counter,
            scope,
            total_pages: pages.len(),
            processed_pages: 0,
            auto_continue,
            pending_pages: pages.into(),
            components: Vec::new(),
            errors: Vec::new(),
            cancel,
        });
        self.process_pages(host).await
    }

    /// Process one page, and keep going while the session auto-continues
    async fn process_pages(&mut self, host: &mut dyn HostChannel) -> Result<()> {
        loop {
            let Some(session) = self.session.as_mut() else {
                return Ok(());
            };
            let Some(page_index) = session.pending_pages.pop_front() else {
                self.finalize(host);
                return Ok(());
            };

            let document = self.extractor.document();
            let page: &'doc Page = &document.pages[page_index];
            let page_name = normalize_page_name(&page.name);
            let session_id = session.id;
            let completed_pages = session.processed_pages;
            let total_pages = session.total_pages;
            let cancel = session.cancel.clone();

            tracing::debug!(page = %page.name, remaining = session.pending_pages.len(), "paged page start");
            let result = self
                .extractor
                .extract_page_chunked(page, &cancel, |processed_nodes| {
                    host.post_message(OutboundMessage::ExportProgress(ExportProgress {
                        session_id,
                        page_name: page_name.clone(),
                        processed_nodes,
                        completed_pages,
                        total_pages,
                    }));
                })
                .await;

            if result.aborted {
                tracing::info!(session_id, page = %page.name, "paged export aborted");
                if self.session.as_ref().map(|s| s.id) == Some(session_id) {
                    self.finalize(host);
                }
                return Ok(());
            }

            let page_export = self.extractor.page_export(page, &result);
            let Some(session) = self.session.as_mut() else {
                return Ok(());
            };
            session.components.extend(result.components);
            session.errors.extend(result.errors);
            session.processed_pages += 1;
            let has_more = !session.pending_pages.is_empty();
            let auto_continue = session.auto_continue;

            let payload = paged_result(
                &page_export,
                PagedProgress {
                    completed: session.processed_pages,
                    total: session.total_pages,
                    has_more,
                    auto_continue,
                    current_page: page_name,
                },
            )?;
            host.post_message(OutboundMessage::ExportResult(Box::new(payload)));

            if !has_more {
                self.finalize(host);
                return Ok(());
            }
            if !auto_continue {
                return Ok(());
            }
            tokio::task::yield_now().await;
        }
    }

    fn finalize(&mut self, host: &mut dyn HostChannel) {
        let Some(session) = self.session.take() else {
            return;
        };
        self.cancel_slot.clear();
        if !session.errors.is_empty() {
            tracing::warn!(errors = ?session.errors, "component parsing errors");
            host.notify(&extraction_failure_notice(session.errors.len()), NOTIFY_TIMEOUT_MS);
        }
        tracing::info!(
            session_id = session.id,
            processed_pages = session.processed_pages,
            components = session.components.len(),
            errors = session.errors.len(),
            "paged export finished"
        );
    }
}

/// Post a one-shot result and report its failures
///
/// # Errors
///
/// Fails when the payload cannot be serialized.
pub fn send_full(host: &mut dyn HostChannel, extraction: &DocumentExtraction) -> Result<()> {
    let payload = full_result(&extraction.export)?;
    tracing::debug!(
        scope = ?extraction.export.meta.scope,
        components = extraction.export.components.len(),
        bytes = payload.json.len(),
        "send export"
    );
    host.post_message(OutboundMessage::ExportResult(Box::new(payload)));
    if !extraction.errors.is_empty() {
        tracing::warn!(errors = ?extraction.errors, "component parsing errors");
        host.notify(&extraction_failure_notice(extraction.errors.len()), NOTIFY_TIMEOUT_MS);
    }
    Ok(())
}
