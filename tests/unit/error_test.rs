//! Tests for error types

use std::time::Duration;

use resilient_ops::core::{ClassifiedError, ErrorKind};

#[test]
fn test_timeout_error() {
    let err = ClassifiedError::timeout(Duration::from_millis(1500));
    assert_eq!(format!("{}", err), "operation timed out after 1500ms");
    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert!(err.cause().is_none());
    assert_eq!(err.user_message(), "Operation timed out, please try again");
}

#[test]
fn test_max_retries_error() {
    let err = ClassifiedError::max_retries(3, anyhow::anyhow!("connection refused"));
    assert_eq!(
        format!("{}", err),
        "operation failed after 3 attempts: connection refused"
    );
    assert_eq!(err.kind(), ErrorKind::MaxRetries);
    assert_eq!(err.cause().unwrap().to_string(), "connection refused");
    assert_eq!(err.user_message(), "Operation failed after multiple attempts");
}

#[test]
fn test_unknown_error() {
    let io = std::io::Error::other("socket closed");
    let err = ClassifiedError::classify(io.into());
    assert_eq!(err.kind(), ErrorKind::UnknownError);
    assert_eq!(format!("{}", err), "unexpected error: socket closed");
    assert_eq!(err.user_message(), "An unexpected error occurred");
}

#[test]
fn test_error_source_chain() {
    use std::error::Error as _;

    let err = ClassifiedError::max_retries(2, anyhow::anyhow!("boom"));
    let source = err.source().expect("max retries carries a source");
    assert_eq!(source.to_string(), "boom");
}

#[test]
fn test_error_kind_codes() {
    assert_eq!(ErrorKind::Timeout.as_str(), "TIMEOUT");
    assert_eq!(ErrorKind::MaxRetries.as_str(), "MAX_RETRIES");
    assert_eq!(ErrorKind::UnknownError.as_str(), "UNKNOWN_ERROR");
}
