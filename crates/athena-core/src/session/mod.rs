//! Host-facing session layer: message protocol, paged export and routing.

pub mod cancel;
pub mod controller;
pub mod host;
pub mod messages;
pub mod runtime;

pub use cancel::{CancelSlot, CancelToken};
pub use controller::{send_full, ExportSession, PagedExportController};
pub use host::{extraction_failure_notice, HostChannel, RecordingHost, NOTIFY_TIMEOUT_MS};
pub use messages::{
    CollectResult, DebugEntry, ExportProgress, InboundMessage, OutboundMessage,
};
pub use runtime::PluginRuntime;
