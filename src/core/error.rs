//! Classified error taxonomy for executor outcomes.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed set of failure kinds an executor call can end with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// The per-attempt deadline was exceeded on the final attempt.
    Timeout,
    /// Every attempt failed with a non-timeout error.
    MaxRetries,
    /// Anything that was not already classified.
    UnknownError,
}

impl ErrorKind {
    /// Stable string code for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "TIMEOUT",
            Self::MaxRetries => "MAX_RETRIES",
            Self::UnknownError => "UNKNOWN_ERROR",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The only error type that crosses the executor boundary.
#[derive(Debug, Error)]
pub enum ClassifiedError {
    /// The configured per-attempt deadline was exceeded on the final attempt.
    #[error("operation timed out after {}ms", .timeout.as_millis())]
    Timeout {
        /// Configured per-attempt deadline.
        timeout: Duration,
    },
    /// All attempts were exhausted through non-timeout failures.
    #[error("operation failed after {attempts} attempts: {cause}")]
    MaxRetries {
        /// Number of attempts made.
        attempts: u32,
        /// The error of the last attempt.
        #[source]
        cause: anyhow::Error,
    },
    /// A failure that was not produced by the executor itself.
    #[error("unexpected error: {cause}")]
    Unknown {
        /// The wrapped failure.
        #[source]
        cause: anyhow::Error,
    },
}

impl ClassifiedError {
    /// Build a timeout error for the given deadline.
    #[must_use]
    pub const fn timeout(timeout: Duration) -> Self {
        Self::Timeout { timeout }
    }

    /// Build a retries-exhausted error wrapping the last failure.
    pub fn max_retries(attempts: u32, cause: impl Into<anyhow::Error>) -> Self {
        Self::MaxRetries {
            attempts,
            cause: cause.into(),
        }
    }

    /// Wrap an arbitrary failure.
    ///
    /// An error that already is a `ClassifiedError` is returned unchanged;
    /// everything else becomes [`ClassifiedError::Unknown`].
    #[must_use]
    pub fn classify(err: anyhow::Error) -> Self {
        match err.downcast::<Self>() {
            Ok(classified) => classified,
            Err(cause) => Self::Unknown { cause },
        }
    }

    /// Kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::MaxRetries { .. } => ErrorKind::MaxRetries,
            Self::Unknown { .. } => ErrorKind::UnknownError,
        }
    }

    /// Underlying cause, if any. Timeouts carry none.
    #[must_use]
    pub const fn cause(&self) -> Option<&anyhow::Error> {
        match self {
            Self::Timeout { .. } => None,
            Self::MaxRetries { cause, .. } | Self::Unknown { cause } => Some(cause),
        }
    }

    /// Human-readable message for the presentation layer.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Timeout => "Operation timed out, please try again",
            ErrorKind::MaxRetries => "Operation failed after multiple attempts",
            ErrorKind::UnknownError => "An unexpected error occurred",
        }
    }
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_keeps_classified_errors() {
        let original = ClassifiedError::timeout(Duration::from_millis(250));
        let classified = ClassifiedError::classify(anyhow::Error::new(original));
        assert_eq!(classified.kind(), ErrorKind::Timeout);
        assert!(matches!(
            classified,
            ClassifiedError::Timeout { timeout } if timeout == Duration::from_millis(250)
        ));
    }

    #[test]
    fn classify_wraps_foreign_errors_as_unknown() {
        let classified = ClassifiedError::classify(anyhow::anyhow!("disk on fire"));
        assert_eq!(classified.kind(), ErrorKind::UnknownError);
        assert_eq!(
            classified.cause().map(ToString::to_string).as_deref(),
            Some("disk on fire")
        );
    }

    #[test]
    fn kind_serializes_as_code() {
        let json = serde_json::to_string(&ErrorKind::MaxRetries).unwrap();
        assert_eq!(json, "\"MAX_RETRIES\"");
        assert_eq!(ErrorKind::UnknownError.to_string(), "UNKNOWN_ERROR");
    }
}
