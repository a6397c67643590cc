use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Shared cancellation flag for one export session
///
/// Clones observe the same flag. Once cancelled a token stays cancelled; a
/// new session gets a new token.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Slot holding the token of whichever session is active
///
/// Lets a reader that runs beside the export (e.g. the stdin loop) stop the
/// current page walk without waiting for its turn.
#[derive(Debug, Clone, Default)]
pub struct CancelSlot(Arc<Mutex<Option<CancelToken>>>);

impl CancelSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn install(&self, token: CancelToken) {
        *self.guard() = Some(token);
    }

    pub(crate) fn clear(&self) {
        *self.guard() = None;
    }

    /// Cancel the active session's token; false when nothing is running
    pub fn cancel_active(&self) -> bool {
        match self.guard().take() {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, Option<CancelToken>> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
