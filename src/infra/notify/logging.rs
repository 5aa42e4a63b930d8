//! Notification sink that writes lifecycle events to `tracing`.

use crate::core::{NoticeId, NotificationSink};

/// Sink for headless contexts where notifications become log lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn loading(&self, message: &str) -> NoticeId {
        let id = NoticeId::new();
        tracing::info!(notice = %id, "{message}");
        id
    }

    fn dismiss(&self, id: NoticeId) {
        tracing::debug!(notice = %id, "loading dismissed");
    }

    fn success(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn error(&self, message: &str) {
        tracing::warn!("{message}");
    }
}
