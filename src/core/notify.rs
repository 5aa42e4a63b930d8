//! Presentation boundary for executor lifecycle events.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a loading indicator shown by a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoticeId(Uuid);

impl NoticeId {
    /// Fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NoticeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoticeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Receiver of lifecycle notifications (toasts, status lines, logs).
///
/// Sinks are side effects only. The executor's return value and error
/// classification never depend on whether a sink is attached.
pub trait NotificationSink: Send + Sync {
    /// Show a loading indicator and return its identifier.
    fn loading(&self, message: &str) -> NoticeId;
    /// Remove a loading indicator previously returned by [`NotificationSink::loading`].
    fn dismiss(&self, id: NoticeId);
    /// Report a successful operation.
    fn success(&self, message: &str);
    /// Report a failed operation.
    fn error(&self, message: &str);
}

/// Scoped loading indicator. Dismissed exactly once, when dropped.
pub struct LoadingGuard {
    sink: Arc<dyn NotificationSink>,
    id: NoticeId,
}

impl LoadingGuard {
    /// Show a loading indicator on `sink` that lives as long as the guard.
    pub fn show(sink: Arc<dyn NotificationSink>, message: &str) -> Self {
        let id = sink.loading(message);
        Self { sink, id }
    }

    /// Identifier of the indicator.
    #[must_use]
    pub const fn id(&self) -> NoticeId {
        self.id
    }
}

impl fmt::Debug for LoadingGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadingGuard").field("id", &self.id).finish_non_exhaustive()
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.sink.dismiss(self.id);
    }
}
