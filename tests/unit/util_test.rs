//! Tests for utility functions

use resilient_ops::util::{init_tracing, init_tracing_with};

#[test]
fn test_init_tracing_is_idempotent() {
    init_tracing();
    init_tracing_with("debug");
    init_tracing();
    assert!(tracing::dispatcher::has_been_set());
}
