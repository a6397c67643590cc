//! Naming conventions: role, status and platform markers, categories.

use crate::component::model::{ComponentPlatform, ComponentRole, ComponentStatus};

pub const MARKER_PART: &str = "🔩";
pub const MARKER_DEPRECATED: &str = "❌";
pub const MARKER_SCHEDULED: &str = "🔄";
pub const MARKER_DESKTOP: &str = "[d]";
pub const MARKER_MOBILE_WEB: &str = "[m]";

pub const UNCATEGORIZED: &str = "Uncategorized";

/// Names a component is classified by
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassificationContext<'a> {
    pub component_name: &'a str,
    pub page_name: Option<&'a str>,
    pub section_name: Option<&'a str>,
    /// Only consulted for status
    pub library_name: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub role: ComponentRole,
    pub status: ComponentStatus,
    pub platform: ComponentPlatform,
}

pub fn classify_component(ctx: &ClassificationContext<'_>) -> Classification {
    let sources = [
        ctx.component_name,
        ctx.page_name.unwrap_or_default(),
        ctx.section_name.unwrap_or_default(),
    ];
    let library = ctx.library_name.unwrap_or_default();

    let status_sources = || sources.iter().chain(std::iter::once(&library));
    let status = if status_sources().any(|s| s.contains(MARKER_DEPRECATED)) {
        ComponentStatus::Deprecated
    } else if status_sources().any(|s| s.contains(MARKER_SCHEDULED)) {
        ComponentStatus::Scheduled
    } else {
        ComponentStatus::Active
    };

    let role = if sources.iter().any(|s| s.contains(MARKER_PART)) {
        ComponentRole::Part
    } else {
        ComponentRole::Main
    };

    let joined = sources.join(" ").to_lowercase();
    let platform = if joined.contains(MARKER_DESKTOP) {
        ComponentPlatform::Desktop
    } else if joined.contains(MARKER_MOBILE_WEB) {
        ComponentPlatform::MobileWeb
    } else {
        ComponentPlatform::Universal
    };

    Classification {
        role,
        status,
        platform,
    }
}

/// First `/` segment of a component name, ignoring leading decoration
pub fn infer_category(name: &str) -> String {
    let cleaned = name
        .trim_start_matches(|c: char| !(c.is_alphanumeric() || c == '_'))
        .trim();
    match cleaned.split('/').next().map(str::trim) {
        Some(first) if !first.is_empty() => first.to_string(),
        _ => UNCATEGORIZED.to_string(),
    }
}

/// Page name without leading emoji or punctuation
pub fn normalize_page_name(name: &str) -> String {
    name.trim_start_matches(|c: char| !c.is_alphanumeric())
        .trim()
        .to_string()
}
