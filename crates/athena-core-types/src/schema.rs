//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";

// Entity identifiers
pub const FIELD_PAGE_NAME: &str = "page_name";
pub const FIELD_NODE_ID: &str = "node_id";
pub const FIELD_COMPONENT_KEY: &str = "component_key";
pub const FIELD_SESSION_ID: &str = "session_id";

// Collection sizes
pub const FIELD_COMPONENT_COUNT: &str = "component_count";
pub const FIELD_PROCESSED_NODES: &str = "processed_nodes";
pub const FIELD_PATCH_COUNT: &str = "patch_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
