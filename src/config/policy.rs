//! Serializable executor policy configuration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Environment variable holding the per-attempt timeout in milliseconds.
pub const ENV_TIMEOUT_MS: &str = "RESILIENT_TIMEOUT_MS";
/// Environment variable holding the number of retries.
pub const ENV_RETRIES: &str = "RESILIENT_RETRIES";
/// Environment variable holding the pause between attempts in milliseconds.
pub const ENV_RETRY_DELAY_MS: &str = "RESILIENT_RETRY_DELAY_MS";
/// Environment variable toggling the loading indicator.
pub const ENV_SHOW_LOADING: &str = "RESILIENT_SHOW_LOADING";
/// Environment variable toggling the success message.
pub const ENV_SHOW_SUCCESS: &str = "RESILIENT_SHOW_SUCCESS";
/// Environment variable toggling the error message.
pub const ENV_SHOW_ERROR: &str = "RESILIENT_SHOW_ERROR";

/// Default per-attempt timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;
/// Default number of additional attempts after the first.
pub const DEFAULT_RETRIES: u32 = 2;
/// Default pause between attempts in milliseconds.
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1_000;

/// Which lifecycle messages reach the notification sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    /// Show a loading indicator for the duration of the call.
    pub show_loading: bool,
    /// Text of the loading indicator.
    pub loading_message: String,
    /// Emit a message when the call succeeds.
    pub show_success: bool,
    /// Text of the success message.
    pub success_message: String,
    /// Emit a message when the call fails.
    pub show_error: bool,
    /// Replaces the per-kind error text when set.
    pub error_message: Option<String>,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            show_loading: false,
            loading_message: "Loading...".into(),
            show_success: false,
            success_message: "Operation completed successfully".into(),
            show_error: true,
            error_message: None,
        }
    }
}

/// Executor policy as read from JSON or the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Per-attempt deadline in milliseconds.
    pub timeout_ms: u64,
    /// Additional attempts after the first.
    pub retries: u32,
    /// Fixed pause between attempts in milliseconds.
    pub retry_delay_ms: u64,
    /// Presentation toggles.
    pub presentation: PresentationConfig,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            retries: DEFAULT_RETRIES,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            presentation: PresentationConfig::default(),
        }
    }
}

impl PolicyConfig {
    /// Validate policy values.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_ms == 0 {
            return Err("timeout_ms must be greater than 0".into());
        }
        if self.retries == u32::MAX {
            return Err("retries must be less than u32::MAX".into());
        }
        Ok(())
    }

    /// Parse policy configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Build from a key lookup, falling back to defaults for missing keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(v) = parse_var(&lookup, ENV_TIMEOUT_MS)? {
            cfg.timeout_ms = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_RETRIES)? {
            cfg.retries = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_RETRY_DELAY_MS)? {
            cfg.retry_delay_ms = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_SHOW_LOADING)? {
            cfg.presentation.show_loading = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_SHOW_SUCCESS)? {
            cfg.presentation.show_success = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_SHOW_ERROR)? {
            cfg.presentation.show_error = v;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// Build from process environment variables, loading `.env` first if present.
    pub fn from_env() -> Result<Self, String> {
        // A missing .env file is fine; real environment variables still apply.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| format!("`{key}` invalid: {e}"))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = PolicyConfig::default();
        assert_eq!(cfg.timeout_ms, 15_000);
        assert_eq!(cfg.retries, 2);
        assert_eq!(cfg.retry_delay_ms, 1_000);
        assert!(!cfg.presentation.show_loading);
        assert!(cfg.presentation.show_error);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn lookup_overrides_and_rejects_garbage() {
        let vars: HashMap<&str, &str> = [
            (ENV_TIMEOUT_MS, "250"),
            (ENV_RETRIES, " 4 "),
            (ENV_SHOW_LOADING, "true"),
        ]
        .into_iter()
        .collect();
        let cfg = PolicyConfig::from_lookup(|k| vars.get(k).map(ToString::to_string)).unwrap();
        assert_eq!(cfg.timeout_ms, 250);
        assert_eq!(cfg.retries, 4);
        assert_eq!(cfg.retry_delay_ms, DEFAULT_RETRY_DELAY_MS);
        assert!(cfg.presentation.show_loading);

        let err = PolicyConfig::from_lookup(|k| (k == ENV_RETRIES).then(|| "many".to_string()))
            .unwrap_err();
        assert!(err.contains(ENV_RETRIES));
    }

    #[test]
    fn lookup_rejects_zero_timeout() {
        let err = PolicyConfig::from_lookup(|k| (k == ENV_TIMEOUT_MS).then(|| "0".to_string()))
            .unwrap_err();
        assert!(err.contains("timeout_ms"));
    }
}
