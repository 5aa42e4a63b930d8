//! Notification sink backends.

pub mod logging;
pub mod memory;

pub use logging::TracingSink;
pub use memory::{InMemorySink, Notification};
