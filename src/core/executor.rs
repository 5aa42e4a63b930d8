//! Resilient executor: per-attempt deadlines, bounded retries, classified failures.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures::{FutureExt, TryFutureExt};
use tokio::time;

use crate::core::{CancelSignal, ClassifiedError, LoadingGuard, NotificationSink, Policy};

/// A unit of work the executor may run several times.
///
/// Each attempt receives a fresh [`CancelSignal`]. When an attempt loses the
/// race against the deadline its future is dropped and the signal is
/// cancelled, so work the operation handed off elsewhere can stop as well.
///
/// # Example
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use resilient_ops::core::{CancelSignal, Operation};
///
/// struct FetchTickets {
///     client: TicketClient,
/// }
///
/// #[async_trait]
/// impl Operation for FetchTickets {
///     type Output = Vec<Ticket>;
///
///     async fn call(&self, signal: CancelSignal) -> anyhow::Result<Vec<Ticket>> {
///         self.client.list_open(signal).await
///     }
/// }
/// ```
#[async_trait]
pub trait Operation: Send + Sync {
    /// Value produced by a successful attempt.
    type Output: Send;

    /// Run one attempt.
    async fn call(&self, signal: CancelSignal) -> anyhow::Result<Self::Output>;
}

#[async_trait]
impl<O> Operation for Arc<O>
where
    O: Operation + ?Sized,
{
    type Output = O::Output;

    async fn call(&self, signal: CancelSignal) -> anyhow::Result<O::Output> {
        (**self).call(signal).await
    }
}

enum Failure {
    Timeout,
    Error(anyhow::Error),
}

/// Runs operations under a [`Policy`], optionally reporting to a notification sink.
///
/// The executor holds no per-call state and can be shared freely.
#[derive(Clone, Default)]
pub struct Executor {
    sink: Option<Arc<dyn NotificationSink>>,
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("sink", &self.sink.is_some())
            .finish()
    }
}

impl Executor {
    /// Executor without a notification sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a notification sink.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Run `operation` under `policy`.
    ///
    /// Returns the first successful attempt's value. When every attempt fails
    /// the error is classified by the final attempt: a timeout yields
    /// [`ClassifiedError::Timeout`], anything else
    /// [`ClassifiedError::MaxRetries`] wrapping the last cause.
    pub async fn execute<O>(&self, operation: O, policy: &Policy) -> Result<O::Output, ClassifiedError>
    where
        O: Operation,
    {
        self.run(|signal| operation.call(signal), policy).await
    }

    /// Run a zero-argument closure under `policy`.
    ///
    /// The closure is invoked once per attempt. A timed-out attempt's future
    /// is dropped.
    pub async fn execute_fn<F, Fut, T, E>(&self, mut f: F, policy: &Policy) -> Result<T, ClassifiedError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Into<anyhow::Error>,
    {
        self.run(move |_signal| f().map_err(Into::<anyhow::Error>::into), policy).await
    }

    /// Run a closure that receives each attempt's [`CancelSignal`].
    pub async fn execute_with_signal<F, Fut, T, E>(
        &self,
        mut f: F,
        policy: &Policy,
    ) -> Result<T, ClassifiedError>
    where
        F: FnMut(CancelSignal) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Into<anyhow::Error>,
    {
        self.run(move |signal| f(signal).map_err(Into::<anyhow::Error>::into), policy).await
    }

    async fn run<F, Fut, T>(&self, make_attempt: F, policy: &Policy) -> Result<T, ClassifiedError>
    where
        F: FnMut(CancelSignal) -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        let loading = self.begin_loading(policy);
        let outcome = run_attempts(make_attempt, policy).await;
        // Dismiss before any outcome message is shown.
        drop(loading);

        match &outcome {
            Ok(_) => {
                if policy.presentation.show_success {
                    if let Some(sink) = &self.sink {
                        sink.success(&policy.presentation.success_message);
                    }
                }
            }
            Err(err) => {
                tracing::error!(kind = %err.kind(), error = %err, "operation failed");
                policy.notify_error(err);
                if policy.presentation.show_error {
                    if let Some(sink) = &self.sink {
                        let message = policy
                            .presentation
                            .error_message
                            .as_deref()
                            .unwrap_or_else(|| err.user_message());
                        sink.error(message);
                    }
                }
            }
        }
        outcome
    }

    fn begin_loading(&self, policy: &Policy) -> Option<LoadingGuard> {
        if !policy.presentation.show_loading {
            return None;
        }
        self.sink
            .as_ref()
            .map(|sink| LoadingGuard::show(Arc::clone(sink), &policy.presentation.loading_message))
    }
}

/// Run `operation` under `policy` without a notification sink.
pub async fn execute<O>(operation: O, policy: &Policy) -> Result<O::Output, ClassifiedError>
where
    O: Operation,
{
    Executor::new().execute(operation, policy).await
}

async fn run_attempts<F, Fut, T>(mut make_attempt: F, policy: &Policy) -> Result<T, ClassifiedError>
where
    F: FnMut(CancelSignal) -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    let max_attempts = policy.max_attempts();
    let mut attempt: u32 = 0;
    loop {
        tracing::debug!(attempt = attempt + 1, max_attempts, "starting attempt");
        let signal = CancelSignal::new();
        let attempt_signal = signal.clone();
        let make = &mut make_attempt;
        // Building the attempt happens inside the guard so a panicking closure is caught too.
        let guarded = AssertUnwindSafe(async move { make(attempt_signal).await }).catch_unwind();

        let failure = match time::timeout(policy.timeout, guarded).await {
            Ok(Ok(Ok(value))) => {
                if attempt > 0 {
                    tracing::info!(attempts = attempt + 1, "operation succeeded after retry");
                }
                return Ok(value);
            }
            Ok(Ok(Err(err))) => Failure::Error(err),
            Ok(Err(panic)) => Failure::Error(anyhow::anyhow!(
                "operation panicked: {}",
                panic_message(panic.as_ref())
            )),
            Err(_elapsed) => {
                signal.cancel();
                tracing::warn!(
                    attempt = attempt + 1,
                    timeout_ms = u64::try_from(policy.timeout.as_millis()).unwrap_or(u64::MAX),
                    "attempt timed out"
                );
                policy.notify_timeout();
                Failure::Timeout
            }
        };

        if attempt >= policy.retries {
            return Err(match failure {
                Failure::Timeout => ClassifiedError::timeout(policy.timeout),
                Failure::Error(cause) => ClassifiedError::max_retries(max_attempts, cause),
            });
        }

        attempt += 1;
        if let Failure::Error(err) = &failure {
            tracing::warn!(attempt, max_attempts, error = %err, "attempt failed, retrying");
        }
        policy.notify_retry(attempt);
        time::sleep(policy.retry_delay).await;
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
