//! Cooperative cancellation signal passed into operations.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

#[derive(Debug, Default)]
struct SignalState {
    cancelled: AtomicBool,
    notify: Notify,
}

/// Cloneable cancellation token.
///
/// All clones observe the same state. Cancelling is idempotent and cannot be
/// undone. Operations receive one of these per attempt and may poll
/// [`CancelSignal::is_cancelled`] or await [`CancelSignal::cancelled`] to stop
/// early; nothing forces them to.
#[derive(Debug, Clone, Default)]
pub struct CancelSignal {
    state: Arc<SignalState>,
}

impl CancelSignal {
    /// Create a signal in the not-cancelled state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Returns `true` only for the call that flipped the flag.
    pub fn cancel(&self) -> bool {
        let first = !self.state.cancelled.swap(true, Ordering::AcqRel);
        if first {
            self.state.notify.notify_waiters();
        }
        first
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.load(Ordering::Acquire)
    }

    /// Resolve once cancellation has been requested.
    pub async fn cancelled(&self) {
        // Registered before the flag check so a concurrent cancel is not missed.
        let notified = self.state.notify.notified();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}
