//! Leading-edge throttle.

use std::fmt;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

/// Invokes the wrapped function at most once per `limit` window.
///
/// The first call of a window runs immediately and opens the window; calls
/// inside an open window are dropped. Runs `f` on the caller's stack.
pub struct Throttle<A> {
    f: Box<dyn Fn(A) + Send + Sync>,
    limit: Duration,
    window_start: Mutex<Option<Instant>>,
}

impl<A> Throttle<A> {
    /// Throttle `f` to one call per `limit`.
    pub fn new<F>(f: F, limit: Duration) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            f: Box::new(f),
            limit,
            window_start: Mutex::new(None),
        }
    }

    /// Invoke `f` if no window is open. Returns whether `f` ran.
    pub fn call(&self, args: A) -> bool {
        let now = Instant::now();
        {
            let mut window = self.window_start.lock();
            if let Some(start) = *window {
                if now.duration_since(start) < self.limit {
                    tracing::trace!("throttled call dropped");
                    return false;
                }
            }
            *window = Some(now);
        }
        (self.f)(args);
        true
    }

    /// Close the current window so the next call fires immediately.
    pub fn reset(&self) {
        *self.window_start.lock() = None;
    }

    /// Configured window length.
    pub const fn limit(&self) -> Duration {
        self.limit
    }
}

impl<A> fmt::Debug for Throttle<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Throttle")
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}
