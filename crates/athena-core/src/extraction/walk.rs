//! Page worklist shared by the blocking and the chunked walk.

use crate::component::{normalize_page_name, Component, DescribeContext, Describer};
use crate::errors::AthenaError;
use crate::host::{NodeKind, Page, SceneNode};
use crate::log_component_failure;
use serde::Serialize;

/// Outcome of walking one page
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageExtraction {
    /// Normalized page name
    pub page_name: String,
    pub components: Vec<Component>,
    /// Formatted per-component failures
    pub errors: Vec<String>,
    pub page_has_components: bool,
    pub aborted: bool,
    /// Container nodes descended into
    pub processed_nodes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// A component set or stand-alone component was described (or failed)
    Component,
    /// Instance, or a component whose set is described elsewhere
    Skipped,
    /// Any other node; its children were queued
    Descended,
}

struct Frame<'doc> {
    node: &'doc SceneNode,
    parent_kind: Option<NodeKind>,
    section: Option<&'doc str>,
}

pub(crate) struct PageWalker<'doc> {
    page: &'doc Page,
    library_name: &'doc str,
    stack: Vec<Frame<'doc>>,
    result: PageExtraction,
}

impl<'doc> PageWalker<'doc> {
    pub(crate) fn new(page: &'doc Page, library_name: &'doc str) -> Self {
        let stack = page
            .children
            .iter()
            .rev()
            .map(|node| Frame {
                node,
                parent_kind: None,
                section: None,
            })
            .collect();
        Self {
            page,
            library_name,
            stack,
            result: PageExtraction {
                page_name: normalize_page_name(&page.name),
                ..Default::default()
            },
        }
    }

    pub(crate) fn processed_nodes(&self) -> usize {
        self.result.processed_nodes
    }

    /// Visit the next node; `None` once the page is exhausted
    pub(crate) fn step(&mut self, describer: &mut Describer<'_>) -> Option<Step> {
        let frame = self.stack.pop()?;
        let node = frame.node;

        let step = match node.kind {
            NodeKind::ComponentSet => {
                tracing::debug!(page = %self.page.name, name = %node.name, id = %node.id, "component set detected");
                let ctx = self.context(frame.section);
                let described = describer.describe_component_set(node, &ctx);
                self.record(node, described);
                Step::Component
            }
            NodeKind::Component => {
                tracing::debug!(page = %self.page.name, name = %node.name, id = %node.id, "component detected");
                if frame.parent_kind == Some(NodeKind::ComponentSet) {
                    Step::Skipped
                } else {
                    let ctx = self.context(frame.section);
                    let described = describer.describe_single_component(node, &ctx);
                    self.record(node, described);
                    Step::Component
                }
            }
            NodeKind::Instance => {
                tracing::debug!(page = %self.page.name, name = %node.name, id = %node.id, "instance skipped");
                Step::Skipped
            }
            _ => {
                let section = match (frame.section, node.kind) {
                    (Some(outer), _) => Some(outer),
                    (None, NodeKind::Section) => Some(node.name.as_str()),
                    (None, _) => None,
                };
                for child in node.children.iter().rev() {
                    self.stack.push(Frame {
                        node: child,
                        parent_kind: Some(node.kind),
                        section,
                    });
                }
                self.result.processed_nodes += 1;
                Step::Descended
            }
        };
        Some(step)
    }

    fn context(&self, section: Option<&'doc str>) -> DescribeContext<'doc> {
        DescribeContext {
            page_name: &self.page.name,
            section_name: section,
            library_name: Some(self.library_name),
        }
    }

    fn record(&mut self, node: &SceneNode, described: Result<Component, AthenaError>) {
        self.result.page_has_components = true;
        match described {
            Ok(component) => self.result.components.push(component),
            Err(cause) => {
                log_component_failure!(self.page.name, node.name, &cause);
                let failure = AthenaError::component_failure(&self.page.name, &node.name, &cause);
                self.result.errors.push(failure.to_string());
            }
        }
    }

    pub(crate) fn finish(self, aborted: bool) -> PageExtraction {
        PageExtraction {
            aborted,
            ..self.result
        }
    }
}
