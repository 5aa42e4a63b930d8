//! Telemetry helpers for structured logging and tracing.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_DIRECTIVE: &str = "resilient_ops=info";

/// Install the default fmt subscriber unless one is already set.
pub fn init_tracing() {
    init_tracing_with(DEFAULT_DIRECTIVE);
}

/// Install a fmt subscriber filtered by `RUST_LOG`, or `default_directive`
/// when the variable is unset or invalid. No-op if a subscriber exists.
pub fn init_tracing_with(default_directive: &str) {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    // Another thread may have won the race to install a subscriber.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
