//! Trailing-edge debounce.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::runtime::TokioSpawner;

/// Collapses a burst of calls into one invocation after `delay` of silence.
///
/// Every [`Debounce::call`] cancels the pending invocation and schedules a new
/// one with the latest arguments. The wrapped function runs on the spawner's
/// runtime, never on the caller's stack.
///
/// # Example
///
/// ```rust,ignore
/// let search = Debounce::new(|query: String| refresh_tickets(query), Duration::from_millis(300));
/// search.call("ma".into());
/// search.call("math".into()); // only this one reaches refresh_tickets
/// ```
pub struct Debounce<A> {
    f: Arc<dyn Fn(A) + Send + Sync>,
    delay: Duration,
    spawner: TokioSpawner,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<A: Send + 'static> Debounce<A> {
    /// Debounce `f` on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a tokio runtime.
    pub fn new<F>(f: F, delay: Duration) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self::with_spawner(TokioSpawner::current(), f, delay)
    }

    /// Debounce `f`, scheduling timers with `spawner`.
    pub fn with_spawner<F>(spawner: TokioSpawner, f: F, delay: Duration) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            f: Arc::new(f),
            delay,
            spawner,
            pending: Mutex::new(None),
        }
    }

    /// Record a call; `f` runs with `args` once `delay` passes without another call.
    pub fn call(&self, args: A) {
        let f = Arc::clone(&self.f);
        let delay = self.delay;
        let mut pending = self.pending.lock();
        if let Some(previous) = pending.take() {
            previous.abort();
        }
        *pending = Some(self.spawner.spawn_handle(async move {
            tokio::time::sleep(delay).await;
            f(args);
        }));
    }

    /// Drop the pending invocation, if any.
    pub fn cancel(&self) {
        if let Some(previous) = self.pending.lock().take() {
            previous.abort();
        }
    }

    /// Whether an invocation is scheduled and has not run yet.
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Configured silence window.
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

impl<A> fmt::Debug for Debounce<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debounce")
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}
