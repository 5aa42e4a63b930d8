//! In-memory notification sink for testing and dev.

use std::collections::{HashSet, VecDeque};

use parking_lot::Mutex;

use crate::core::{NoticeId, NotificationSink};

/// A recorded notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Loading indicator shown.
    Loading {
        /// Indicator identifier.
        id: NoticeId,
        /// Indicator text.
        message: String,
    },
    /// Loading indicator removed.
    Dismissed {
        /// Indicator identifier.
        id: NoticeId,
    },
    /// Success message.
    Success(String),
    /// Error message.
    Error(String),
}

struct SinkState {
    events: VecDeque<Notification>,
    // Tracked apart from `events`, which may evict old entries.
    live: HashSet<NoticeId>,
}

/// Bounded in-memory event log.
pub struct InMemorySink {
    state: Mutex<SinkState>,
    max_events: usize,
}

impl InMemorySink {
    /// Create a sink that keeps at most `max_events` notifications.
    #[must_use]
    pub fn new(max_events: usize) -> Self {
        Self {
            state: Mutex::new(SinkState {
                events: VecDeque::with_capacity(max_events),
                live: HashSet::new(),
            }),
            max_events,
        }
    }

    /// Snapshot of the recorded notifications, oldest first.
    pub fn events(&self) -> Vec<Notification> {
        self.state.lock().events.iter().cloned().collect()
    }

    /// Number of loading indicators that are shown and not yet dismissed.
    ///
    /// Independent of how many events the log still holds.
    pub fn active_loading(&self) -> usize {
        self.state.lock().live.len()
    }

    fn record(&self, event: Notification) {
        let mut state = self.state.lock();
        match &event {
            Notification::Loading { id, .. } => {
                state.live.insert(*id);
            }
            Notification::Dismissed { id } => {
                state.live.remove(id);
            }
            Notification::Success(_) | Notification::Error(_) => {}
        }
        if self.max_events == 0 {
            return;
        }
        if state.events.len() >= self.max_events {
            state.events.pop_front();
        }
        state.events.push_back(event);
    }
}

impl NotificationSink for InMemorySink {
    fn loading(&self, message: &str) -> NoticeId {
        let id = NoticeId::new();
        self.record(Notification::Loading {
            id,
            message: message.to_owned(),
        });
        id
    }

    fn dismiss(&self, id: NoticeId) {
        self.record(Notification::Dismissed { id });
    }

    fn success(&self, message: &str) {
        self.record(Notification::Success(message.to_owned()));
    }

    fn error(&self, message: &str) {
        self.record(Notification::Error(message.to_owned()));
    }
}
