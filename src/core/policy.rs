//! Per-call executor policy.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{PolicyConfig, PresentationConfig};
use crate::core::ClassifiedError;

/// Called once with the final error when a call fails.
pub type ErrorCallback = Arc<dyn Fn(&ClassifiedError) + Send + Sync>;
/// Called with the configured deadline whenever an attempt times out.
pub type TimeoutCallback = Arc<dyn Fn(Duration) + Send + Sync>;
/// Called with the number of the upcoming retry (starting at 1).
pub type RetryCallback = Arc<dyn Fn(u32) + Send + Sync>;

/// Immutable configuration for one executor call.
///
/// Built with the `with_*`/`on_*` methods or from a validated
/// [`PolicyConfig`].
#[derive(Clone)]
pub struct Policy {
    /// Deadline applied to each attempt separately.
    pub timeout: Duration,
    /// Additional attempts after the first.
    pub retries: u32,
    /// Fixed pause between attempts.
    pub retry_delay: Duration,
    /// Messages sent to the notification sink.
    pub presentation: PresentationConfig,
    on_error: Option<ErrorCallback>,
    on_timeout: Option<TimeoutCallback>,
    on_retry: Option<RetryCallback>,
}

impl Default for Policy {
    fn default() -> Self {
        Self::from_validated(&PolicyConfig::default())
    }
}

impl Policy {
    /// Policy with the default timeout, retries and delay.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a policy from configuration after validating it.
    pub fn from_config(cfg: &PolicyConfig) -> Result<Self, String> {
        cfg.validate()?;
        Ok(Self::from_validated(cfg))
    }

    fn from_validated(cfg: &PolicyConfig) -> Self {
        Self {
            timeout: Duration::from_millis(cfg.timeout_ms),
            retries: cfg.retries,
            retry_delay: Duration::from_millis(cfg.retry_delay_ms),
            presentation: cfg.presentation.clone(),
            on_error: None,
            on_timeout: None,
            on_retry: None,
        }
    }

    /// Set the per-attempt deadline.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the number of additional attempts.
    #[must_use]
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Set the pause between attempts.
    #[must_use]
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Replace the presentation toggles.
    #[must_use]
    pub fn with_presentation(mut self, presentation: PresentationConfig) -> Self {
        self.presentation = presentation;
        self
    }

    /// Show a loading indicator with the given text for the duration of the call.
    #[must_use]
    pub fn with_loading(mut self, message: impl Into<String>) -> Self {
        self.presentation.show_loading = true;
        self.presentation.loading_message = message.into();
        self
    }

    /// Emit a success message with the given text.
    #[must_use]
    pub fn with_success(mut self, message: impl Into<String>) -> Self {
        self.presentation.show_success = true;
        self.presentation.success_message = message.into();
        self
    }

    /// Register the final-failure callback.
    #[must_use]
    pub fn on_error(mut self, f: impl Fn(&ClassifiedError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(f));
        self
    }

    /// Register the per-attempt timeout callback.
    #[must_use]
    pub fn on_timeout(mut self, f: impl Fn(Duration) + Send + Sync + 'static) -> Self {
        self.on_timeout = Some(Arc::new(f));
        self
    }

    /// Register the retry callback.
    #[must_use]
    pub fn on_retry(mut self, f: impl Fn(u32) + Send + Sync + 'static) -> Self {
        self.on_retry = Some(Arc::new(f));
        self
    }

    /// Total number of attempts this policy allows.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }

    /// Upper bound on wall-clock time spent in the retry loop.
    ///
    /// Saturates at [`Duration::MAX`].
    #[must_use]
    pub fn worst_case(&self) -> Duration {
        self.timeout
            .checked_mul(self.max_attempts())
            .zip(self.retry_delay.checked_mul(self.retries))
            .and_then(|(attempts, delays)| attempts.checked_add(delays))
            .unwrap_or(Duration::MAX)
    }

    pub(crate) fn notify_error(&self, err: &ClassifiedError) {
        if let Some(f) = &self.on_error {
            f(err);
        }
    }

    pub(crate) fn notify_timeout(&self) {
        if let Some(f) = &self.on_timeout {
            f(self.timeout);
        }
    }

    pub(crate) fn notify_retry(&self, retry: u32) {
        if let Some(f) = &self.on_retry {
            f(retry);
        }
    }
}

impl fmt::Debug for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Policy")
            .field("timeout", &self.timeout)
            .field("retries", &self.retries)
            .field("retry_delay", &self.retry_delay)
            .field("presentation", &self.presentation)
            .field("on_error", &self.on_error.is_some())
            .field("on_timeout", &self.on_timeout.is_some())
            .field("on_retry", &self.on_retry.is_some())
            .finish()
    }
}
