//! Executor, error taxonomy and cancellation primitives.

pub mod cancellable;
pub mod error;
pub mod executor;
pub mod notify;
pub mod policy;
pub mod signal;

pub use cancellable::{CancelHandle, Cancellable};
pub use error::{AppResult, ClassifiedError, ErrorKind};
pub use executor::{execute, Executor, Operation};
pub use notify::{LoadingGuard, NoticeId, NotificationSink};
pub use policy::{ErrorCallback, Policy, RetryCallback, TimeoutCallback};
pub use signal::CancelSignal;
