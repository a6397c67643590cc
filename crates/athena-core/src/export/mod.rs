//! Component export documents.

pub mod model;
pub mod sanitize;

pub use model::{
    ExportDocument, ExportMeta, ExportMode, ExportResultPayload, ExportScope, PagedProgress,
};
pub use sanitize::{full_result, paged_result, sanitize_export};
