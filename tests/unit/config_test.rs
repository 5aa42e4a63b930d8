//! Tests for configuration validation

use std::time::Duration;

use resilient_ops::config::{PolicyConfig, PresentationConfig};
use resilient_ops::core::Policy;

#[test]
fn test_policy_config_validation() {
    let valid = PolicyConfig {
        timeout_ms: 500,
        retries: 0,
        retry_delay_ms: 0,
        presentation: PresentationConfig::default(),
    };
    assert!(valid.validate().is_ok());
}

#[test]
fn test_policy_config_invalid_timeout() {
    let invalid = PolicyConfig {
        timeout_ms: 0,
        ..PolicyConfig::default()
    };
    assert!(invalid.validate().is_err());
}

#[test]
fn test_policy_config_invalid_retries() {
    let invalid = PolicyConfig {
        retries: u32::MAX,
        ..PolicyConfig::default()
    };
    assert!(invalid.validate().is_err());
}

#[test]
fn test_policy_config_from_json() {
    let json = r#"{
        "timeout_ms": 50,
        "retries": 1,
        "retry_delay_ms": 10,
        "presentation": {
            "show_loading": true,
            "loading_message": "Saving ticket...",
            "error_message": "Could not save ticket"
        }
    }"#;

    let config = PolicyConfig::from_json_str(json).expect("valid config");
    assert_eq!(config.timeout_ms, 50);
    assert_eq!(config.retries, 1);
    assert_eq!(config.retry_delay_ms, 10);
    assert!(config.presentation.show_loading);
    assert_eq!(config.presentation.loading_message, "Saving ticket...");
    assert!(!config.presentation.show_success);
    assert!(config.presentation.show_error);
    assert_eq!(
        config.presentation.error_message.as_deref(),
        Some("Could not save ticket")
    );
}

#[test]
fn test_policy_config_from_json_uses_defaults() {
    let config = PolicyConfig::from_json_str("{}").expect("empty object is valid");
    assert_eq!(config, PolicyConfig::default());
}

#[test]
fn test_policy_config_from_json_rejects_invalid() {
    assert!(PolicyConfig::from_json_str(r#"{"timeout_ms": 0}"#).is_err());
    assert!(PolicyConfig::from_json_str("not json").is_err());
}

#[test]
fn test_policy_from_config() {
    let config = PolicyConfig::from_json_str(r#"{"timeout_ms": 250, "retries": 4}"#).unwrap();
    let policy = Policy::from_config(&config).expect("valid policy");
    assert_eq!(policy.timeout, Duration::from_millis(250));
    assert_eq!(policy.retries, 4);
    assert_eq!(policy.retry_delay, Duration::from_millis(1_000));
    assert_eq!(policy.max_attempts(), 5);
}
