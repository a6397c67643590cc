//! Athena Core - component structure extraction for design libraries
//!
//! This crate turns a design document's components into a compact,
//! diff-based export:
//! - Host object model (documents, pages, scene nodes, styles, variables)
//! - Node snapshots and pre-order structure collection with a per-run cache
//! - Variant diffing by canonical path and patch replay
//! - Component description, classification and cross-component depth metrics
//! - Blocking and chunked, cancellable page walks
//! - Paged export sessions and UI message routing
//! - Token and style exports

pub mod color;
pub mod component;
pub mod config;
pub mod diff;
pub mod errors;
pub mod export;
pub mod extraction;
pub mod host;
pub mod logging_facility;
pub mod session;
pub mod structure;
pub mod styles;
pub mod tokens;

// Re-export commonly used types
pub use component::{Component, ComponentPlatform, ComponentRole, ComponentStatus};
pub use config::{AthenaConfig, Loader};
pub use diff::{compute_variant_patches, replay_patches, StructurePatch};
pub use errors::{AthenaError, ExError, ExErrorKind, Result};
pub use export::{ExportDocument, ExportScope};
pub use extraction::{DocumentExtraction, Extractor, PageExtraction};
pub use host::Document;
pub use session::{CancelToken, HostChannel, OutboundMessage, PagedExportController, PluginRuntime};
pub use structure::{collect_structure, StructureCache, StructureNode};
