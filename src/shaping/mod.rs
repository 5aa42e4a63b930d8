//! Call-frequency shapers for event-driven callers.
//!
//! Each shaper owns its state. Two shapers wrapping the same function never
//! influence each other.

pub mod debounce;
pub mod throttle;

pub use debounce::Debounce;
pub use throttle::Throttle;
