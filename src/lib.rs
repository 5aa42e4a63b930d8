//! # Resilient Ops
//!
//! Control-flow primitives for running flaky asynchronous operations from
//! event-driven front ends, such as help-center dashboards that call slow
//! ticket and category services.
//!
//! ## Key Features
//!
//! - **Executor**: runs an operation under a per-attempt deadline, retries with a
//!   fixed backoff, and returns exactly one classified error on total failure
//! - **Error Taxonomy**: `Timeout`, `MaxRetries`, `Unknown`; nothing unclassified
//!   crosses the executor boundary
//! - **Cooperative Cancellation**: every attempt gets a `CancelSignal` that fires
//!   when the attempt loses the race against its deadline
//! - **Cancellable Handles**: `{result, cancel}` pairs whose result never settles
//!   once cancelled
//! - **Rate Shaping**: per-instance `Debounce` (trailing edge) and `Throttle`
//!   (leading edge)
//! - **Notifications**: optional sink for loading/success/error messages, with a
//!   loading indicator that is dismissed exactly once on every exit path
//!
//! ## Executor
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use resilient_ops::core::{Executor, Policy};
//! use resilient_ops::infra::TracingSink;
//!
//! let executor = Executor::new().with_sink(Arc::new(TracingSink));
//! let policy = Policy::new()
//!     .with_timeout(Duration::from_secs(5))
//!     .with_retries(2)
//!     .with_loading("Loading tickets...")
//!     .on_retry(|n| tracing::info!(retry = n, "retrying ticket fetch"));
//!
//! let tickets = executor.execute_fn(|| client.open_tickets(), &policy).await?;
//! ```
//!
//! ## Rate Shaping
//!
//! ```rust,ignore
//! use resilient_ops::shaping::{Debounce, Throttle};
//!
//! let search = Debounce::new(|q: String| start_search(q), Duration::from_millis(300));
//! let refresh = Throttle::new(|()| reload_dashboard(), Duration::from_secs(2));
//! ```
//!
//! For complete examples, see `tests/executor_test.rs` and `tests/shaping_test.rs`.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Executor, error taxonomy, policies and cancellation primitives.
pub mod core;
/// Configuration models for executor policies.
pub mod config;
/// Infrastructure adapters for notification sinks.
pub mod infra;
/// Host scheduler adapters.
pub mod runtime;
/// Debounce and throttle call shapers.
pub mod shaping;
/// Shared utilities.
pub mod util;
