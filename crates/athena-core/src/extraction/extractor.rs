//! Blocking and chunked component extraction over a [`Document`].

use crate::component::{assign_depth_metrics, normalize_page_name, Describer};
use crate::config::ExportConfig;
use crate::export::{ExportDocument, ExportMeta, ExportScope};
use crate::extraction::walk::{PageExtraction, PageWalker, Step};
use crate::host::{Document, Page, StyleIndex};
use crate::session::CancelToken;
use crate::structure::StructureCache;
use crate::{log_op_end, log_op_start};

/// An export document plus the per-component failures collected on the way
#[derive(Debug, Clone)]
pub struct DocumentExtraction {
    pub export: ExportDocument,
    pub errors: Vec<String>,
}

/// Owns the per-run structure cache and the style index of one document
pub struct Extractor<'doc> {
    document: &'doc Document,
    catalog: StyleIndex<'doc>,
    cache: StructureCache,
    config: ExportConfig,
}

impl<'doc> Extractor<'doc> {
    pub fn new(document: &'doc Document, config: ExportConfig) -> Self {
        Self {
            document,
            catalog: document.style_index(),
            cache: StructureCache::new(),
            config,
        }
    }

    pub fn document(&self) -> &'doc Document {
        self.document
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Every page of the document, depth metrics over the whole batch
    pub fn extract_components_from_document(&mut self) -> DocumentExtraction {
        let document = self.document;
        log_op_start!("extract_document", page_count = document.pages.len());
        let start = std::time::Instant::now();
        self.cache.reset();

        let mut components = Vec::new();
        let mut errors = Vec::new();
        let mut files: Vec<String> = Vec::new();
        for page in &document.pages {
            let result = self.walk_page(page);
            if result.page_has_components && !files.contains(&result.page_name) {
                files.push(result.page_name.clone());
            }
            components.extend(result.components);
            errors.extend(result.errors);
        }
        assign_depth_metrics(&mut components);

        log_op_end!(
            "extract_document",
            started = start,
            component_count = components.len(),
            error_count = errors.len()
        );
        self.package(components, errors, files, ExportScope::Document)
    }

    /// The page the user is looking at; an empty export when there is none
    pub fn extract_components_from_current_page(&mut self) -> DocumentExtraction {
        let document = self.document;
        let Some(page) = document.current_page() else {
            tracing::warn!("document has no pages");
            return self.package(Vec::new(), Vec::new(), Vec::new(), ExportScope::CurrentPage);
        };
        log_op_start!("extract_current_page", page_name = %page.name);
        let start = std::time::Instant::now();
        self.cache.reset();

        let mut result = self.walk_page(page);
        assign_depth_metrics(&mut result.components);
        let files = if result.page_has_components {
            vec![result.page_name.clone()]
        } else {
            Vec::new()
        };

        log_op_end!(
            "extract_current_page",
            started = start,
            component_count = result.components.len(),
            error_count = result.errors.len()
        );
        self.package(result.components, result.errors, files, ExportScope::CurrentPage)
    }

    /// Blocking walk of one page, without depth metrics or cache reset
    pub fn walk_page(&mut self, page: &'doc Page) -> PageExtraction {
        let document = self.document;
        let mut walker = PageWalker::new(page, &document.name);
        let options = self.config.collect_options();
        loop {
            let mut describer = Describer::new(&self.catalog, &mut self.cache, options);
            if walker.step(&mut describer).is_none() {
                break;
            }
        }
        walker.finish(false)
    }

    /// Cancellable walk of one page that yields to the runtime every
    /// `chunk_size` processed nodes
    ///
    /// Starts from an empty structure cache. `on_progress` receives the
    /// processed-node count at every chunk boundary and once at the end.
    /// Cancellation is checked before each node; an aborted walk returns
    /// what it gathered so far with `aborted` set and no depth metrics.
    pub async fn extract_page_chunked<F>(
        &mut self,
        page: &'doc Page,
        cancel: &CancelToken,
        mut on_progress: F,
    ) -> PageExtraction
    where
        F: FnMut(usize),
    {
        log_op_start!("extract_page_chunked", page_name = %page.name);
        let start = std::time::Instant::now();
        self.cache.reset();

        let chunk_size = self.config.chunk_size.max(1);
        let options = self.config.collect_options();
        let document = self.document;
        let mut walker = PageWalker::new(page, &document.name);

        loop {
            if cancel.is_cancelled() {
                tracing::info!(page = %page.name, processed_nodes = walker.processed_nodes(), "page walk aborted");
                return walker.finish(true);
            }
            let step = {
                let mut describer = Describer::new(&self.catalog, &mut self.cache, options);
                walker.step(&mut describer)
            };
            match step {
                None => break,
                Some(Step::Descended) if walker.processed_nodes() % chunk_size == 0 => {
                    on_progress(walker.processed_nodes());
                    tokio::task::yield_now().await;
                }
                Some(_) => {}
            }
        }

        on_progress(walker.processed_nodes());
        let mut result = walker.finish(cancel.is_cancelled());
        if !result.aborted {
            assign_depth_metrics(&mut result.components);
        }

        log_op_end!(
            "extract_page_chunked",
            started = start,
            processed_nodes = result.processed_nodes,
            component_count = result.components.len()
        );
        result
    }

    /// Export document for one page batch of a paged session
    pub fn page_export(&self, page: &Page, result: &PageExtraction) -> ExportDocument {
        let files = if result.page_has_components {
            vec![normalize_page_name(&page.name)]
        } else {
            Vec::new()
        };
        ExportDocument::new(
            ExportMeta::new(
                self.config.version.clone(),
                files,
                ExportScope::CurrentPage,
                &self.document.name,
            ),
            result.components.clone(),
        )
    }

    fn package(
        &self,
        components: Vec<crate::component::Component>,
        errors: Vec<String>,
        files: Vec<String>,
        scope: ExportScope,
    ) -> DocumentExtraction {
        let meta = ExportMeta::new(self.config.version.clone(), files, scope, &self.document.name);
        DocumentExtraction {
            export: ExportDocument::new(meta, components),
            errors,
        }
    }
}
