//! Infrastructure adapters for notification sinks.

pub mod notify;

pub use notify::{InMemorySink, Notification, TracingSink};
