//! Components: description, classification and depth metrics.

pub mod classify;
pub mod describe;
pub mod metrics;
pub mod model;

pub use classify::{
    classify_component, infer_category, normalize_page_name, Classification,
    ClassificationContext,
};
pub use describe::{DescribeContext, Describer};
pub use metrics::assign_depth_metrics;
pub use model::{
    Component, ComponentHost, ComponentPlatform, ComponentRole, ComponentStatus, Variant,
};
