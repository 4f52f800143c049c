//! # Controller Configuration
//!
//! Controller-level settings loaded from environment variables.

use crate::constants;
use std::time::Duration;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Text,
}

/// Controller-level configuration
///
/// All settings have sensible defaults and can be overridden via environment variables.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// HTTP port for `/metrics`, `/healthz` and `/readyz`
    pub metrics_port: u16,
    /// Requeue interval after a completed pass (seconds)
    pub resync_interval_secs: u64,
    /// Requeue interval after a failed pass (seconds)
    pub reconciliation_error_requeue_secs: u64,
    /// Maximum concurrent reconcile passes
    pub max_concurrent_reconciliations: u16,
    /// Log format (json, text)
    pub log_format: LogFormat,
    /// Skip the live B2 probe; set when `UPTEST_CLOUD_CREDENTIALS` is non-empty
    pub skip_live_check: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            metrics_port: constants::DEFAULT_METRICS_PORT,
            resync_interval_secs: constants::DEFAULT_RESYNC_INTERVAL_SECS,
            reconciliation_error_requeue_secs: constants::DEFAULT_RECONCILIATION_ERROR_REQUEUE_SECS,
            max_concurrent_reconciliations: constants::DEFAULT_MAX_CONCURRENT_RECONCILIATIONS,
            log_format: LogFormat::Text,
            skip_live_check: false,
        }
    }
}

impl ControllerConfig {
    /// Load configuration from environment variables with defaults
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            metrics_port: parse_or(&lookup, "METRICS_PORT", defaults.metrics_port),
            resync_interval_secs: parse_or(
                &lookup,
                "RESYNC_INTERVAL_SECS",
                defaults.resync_interval_secs,
            ),
            reconciliation_error_requeue_secs: parse_or(
                &lookup,
                "RECONCILIATION_ERROR_REQUEUE_SECS",
                defaults.reconciliation_error_requeue_secs,
            ),
            max_concurrent_reconciliations: parse_or(
                &lookup,
                "MAX_CONCURRENT_RECONCILIATIONS",
                defaults.max_concurrent_reconciliations,
            ),
            log_format: match lookup("LOG_FORMAT").map(|v| v.to_lowercase()).as_deref() {
                Some("json") => LogFormat::Json,
                _ => LogFormat::Text,
            },
            skip_live_check: lookup(constants::SKIP_LIVE_CHECK_ENV)
                .is_some_and(|v| !v.is_empty()),
        }
    }

    /// Get resync duration
    #[must_use]
    pub fn resync_interval(&self) -> Duration {
        Duration::from_secs(self.resync_interval_secs)
    }

    /// Get reconciliation error requeue duration
    #[must_use]
    pub fn reconciliation_error_requeue_duration(&self) -> Duration {
        Duration::from_secs(self.reconciliation_error_requeue_secs)
    }
}

/// Parse a variable or fall back to the default
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ControllerConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ControllerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config.metrics_port, 8080);
        assert_eq!(config.resync_interval(), Duration::from_secs(600));
        assert_eq!(config.reconciliation_error_requeue_duration(), Duration::from_secs(30));
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(!config.skip_live_check);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("METRICS_PORT", "9090"),
            ("RESYNC_INTERVAL_SECS", "60"),
            ("MAX_CONCURRENT_RECONCILIATIONS", "2"),
            ("LOG_FORMAT", "JSON"),
        ]);
        assert_eq!(config.metrics_port, 9090);
        assert_eq!(config.resync_interval_secs, 60);
        assert_eq!(config.max_concurrent_reconciliations, 2);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_unparsable_values_fall_back() {
        let config = config_from(&[("METRICS_PORT", "not-a-port")]);
        assert_eq!(config.metrics_port, 8080);
    }

    #[test]
    fn test_live_check_override_needs_non_empty_value() {
        assert!(config_from(&[("UPTEST_CLOUD_CREDENTIALS", "1")]).skip_live_check);
        assert!(config_from(&[("UPTEST_CLOUD_CREDENTIALS", "anything")]).skip_live_check);
        assert!(!config_from(&[("UPTEST_CLOUD_CREDENTIALS", "")]).skip_live_check);
    }
}
