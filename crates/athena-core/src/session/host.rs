//! The engine's view of the host UI.

use crate::session::messages::OutboundMessage;

/// Timeout of the notifications the engine raises
pub const NOTIFY_TIMEOUT_MS: u32 = 5000;

/// Outbound side of the host: UI messages and transient notifications
pub trait HostChannel {
    fn post_message(&mut self, message: OutboundMessage);

    fn notify(&mut self, text: &str, timeout_ms: u32);
}

/// Keeps everything it is sent; used for one-shot runs and tests
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub messages: Vec<OutboundMessage>,
    pub notifications: Vec<String>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn types(&self) -> Vec<&'static str> {
        self.messages.iter().map(OutboundMessage::type_name).collect()
    }
}

impl HostChannel for RecordingHost {
    fn post_message(&mut self, message: OutboundMessage) {
        self.messages.push(message);
    }

    fn notify(&mut self, text: &str, _timeout_ms: u32) {
        self.notifications.push(text.to_string());
    }
}

/// Text of the notification raised when some components failed
pub fn extraction_failure_notice(count: usize) -> String {
    format!("Some components were not exported ({}). See the log.", count)
}
