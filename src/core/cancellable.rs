//! Cancellable handles around in-flight operations.
//!
//! A [`Cancellable`] is the `result` half of the pair and a [`CancelHandle`]
//! is the `cancel` half. The wrapped future is spawned eagerly on the host
//! scheduler. Once cancelled before the wrapped future settles, the
//! `Cancellable` never resolves.
//!
//! # Limitations
//!
//! Cancellation is cooperative. The wrapped future keeps running to
//! completion after [`CancelHandle::cancel`]; only its outcome is discarded.
//! Work that should actually stop must be built with
//! [`Cancellable::wrap_with_signal`] and watch the [`CancelSignal`] it is
//! given.
//!
//! A panic inside the wrapped future is re-raised when the `Cancellable` is
//! polled, unless the handle was cancelled first.

use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::FutureExt;
use tokio::sync::oneshot;

use crate::core::CancelSignal;
use crate::runtime::{Spawn, TokioSpawner};

/// Idempotent cancel switch for a [`Cancellable`].
#[derive(Debug, Clone)]
pub struct CancelHandle {
    signal: CancelSignal,
}

impl CancelHandle {
    /// Cancel the associated operation. Later calls are no-ops.
    pub fn cancel(&self) {
        if self.signal.cancel() {
            tracing::debug!("cancellable operation cancelled");
        }
    }

    /// Whether [`CancelHandle::cancel`] has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.signal.is_cancelled()
    }
}

/// Future resolving to the wrapped operation's output unless cancelled first.
#[derive(Debug)]
#[must_use = "a cancellable does nothing observable unless awaited"]
pub struct Cancellable<T> {
    // `None` once the sender went away without a value: terminal, never settles.
    rx: Option<oneshot::Receiver<std::thread::Result<T>>>,
    handle: CancelHandle,
}

impl<T: Send + 'static> Cancellable<T> {
    /// Spawn `fut` on the current tokio runtime and wrap it.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a tokio runtime.
    pub fn wrap<F>(fut: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self::wrap_on(&TokioSpawner::current(), fut)
    }

    /// Spawn `fut` with the given spawner and wrap it.
    pub fn wrap_on<S, F>(spawner: &S, fut: F) -> Self
    where
        S: Spawn,
        F: Future<Output = T> + Send + 'static,
    {
        Self::spawn_with(spawner, CancelSignal::new(), fut)
    }

    /// Build the operation from the handle's signal so it can stop itself.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a tokio runtime.
    pub fn wrap_with_signal<F, Fut>(make: F) -> Self
    where
        F: FnOnce(CancelSignal) -> Fut,
        Fut: Future<Output = T> + Send + 'static,
    {
        let signal = CancelSignal::new();
        let fut = make(signal.clone());
        Self::spawn_with(&TokioSpawner::current(), signal, fut)
    }

    fn spawn_with<S, F>(spawner: &S, signal: CancelSignal, fut: F) -> Self
    where
        S: Spawn,
        F: Future<Output = T> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let observer = signal.clone();
        spawner.spawn(async move {
            let output = AssertUnwindSafe(fut).catch_unwind().await;
            if observer.is_cancelled() {
                tracing::debug!("discarding output of cancelled operation");
                return;
            }
            if output.is_err() {
                tracing::warn!("cancellable operation panicked");
            }
            // The receiver may already be gone; nobody is left to observe the output.
            let _ = tx.send(output);
        });
        Self {
            rx: Some(rx),
            handle: CancelHandle { signal },
        }
    }
}

impl<T> Cancellable<T> {
    /// A cloneable cancel switch for this operation.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.handle.clone()
    }

    /// Cancel the operation. Equivalent to calling [`CancelHandle::cancel`].
    pub fn cancel(&self) {
        self.handle.cancel();
    }

    /// Whether the operation has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.handle.is_cancelled()
    }
}

impl<T> Future for Cancellable<T> {
    type Output = T;

    /// # Panics
    ///
    /// Resumes the panic of the wrapped future if it panicked before being cancelled.
    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<T> {
        let this = self.get_mut();
        let Some(rx) = this.rx.as_mut() else {
            return Poll::Pending;
        };
        match Pin::new(rx).poll(cx) {
            Poll::Ready(Ok(Ok(output))) => Poll::Ready(output),
            Poll::Ready(Ok(Err(payload))) => {
                this.rx = None;
                panic::resume_unwind(payload)
            }
            Poll::Ready(Err(_)) => {
                // Dropped without a value: cancelled before settling, or the runtime shut down.
                this.rx = None;
                Poll::Pending
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
