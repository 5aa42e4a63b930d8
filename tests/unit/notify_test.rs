//! Tests for notification sinks

use std::sync::Arc;

use resilient_ops::core::{LoadingGuard, NotificationSink};
use resilient_ops::infra::{InMemorySink, Notification, TracingSink};

#[test]
fn test_in_memory_sink_records_events() {
    let sink = InMemorySink::new(10);
    let id = sink.loading("Loading tickets...");
    sink.dismiss(id);
    sink.success("done");
    sink.error("failed");

    let events = sink.events();
    assert_eq!(events.len(), 4);
    assert_eq!(
        events[0],
        Notification::Loading {
            id,
            message: "Loading tickets...".to_string()
        }
    );
    assert_eq!(events[1], Notification::Dismissed { id });
    assert_eq!(events[2], Notification::Success("done".to_string()));
    assert_eq!(events[3], Notification::Error("failed".to_string()));
}

#[test]
fn test_in_memory_sink_overflow() {
    let sink = InMemorySink::new(2);
    sink.success("one");
    sink.success("two");
    sink.success("three");

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], Notification::Success("two".to_string())); // First one popped
    assert_eq!(events[1], Notification::Success("three".to_string()));
}

#[test]
fn test_loading_guard_dismisses_once_on_drop() {
    let sink = Arc::new(InMemorySink::new(10));
    {
        let guard = LoadingGuard::show(sink.clone(), "Working...");
        assert_eq!(sink.active_loading(), 1);
        assert_eq!(
            sink.events()[0],
            Notification::Loading {
                id: guard.id(),
                message: "Working...".to_string()
            }
        );
    }
    assert_eq!(sink.active_loading(), 0);
    let dismissed = sink
        .events()
        .iter()
        .filter(|e| matches!(e, Notification::Dismissed { .. }))
        .count();
    assert_eq!(dismissed, 1);
}

#[test]
fn test_tracing_sink_issues_distinct_ids() {
    let sink = TracingSink;
    let first = sink.loading("a");
    let second = sink.loading("b");
    assert_ne!(first, second);
    sink.dismiss(first);
    sink.dismiss(second);
}

#[test]
fn test_active_loading_survives_log_eviction() {
    let sink = InMemorySink::new(2);
    let first = sink.loading("Loading tickets...");
    let second = sink.loading("Loading categories...");
    sink.dismiss(first);

    // The log now holds only the second indicator and the first dismissal.
    assert_eq!(
        sink.events(),
        vec![
            Notification::Loading {
                id: second,
                message: "Loading categories...".to_string()
            },
            Notification::Dismissed { id: first },
        ]
    );
    assert_eq!(sink.active_loading(), 1);

    sink.success("one");
    sink.success("two");
    assert_eq!(sink.active_loading(), 1);
    sink.dismiss(second);
    assert_eq!(sink.active_loading(), 0);
}

#[test]
fn test_active_loading_ignores_unknown_dismissals() {
    let sink = InMemorySink::new(10);
    let id = sink.loading("Working...");
    sink.dismiss(id);
    sink.dismiss(id);
    assert_eq!(sink.active_loading(), 0);

    sink.loading("Again...");
    assert_eq!(sink.active_loading(), 1);
}
