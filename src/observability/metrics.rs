//! # Metrics
//!
//! Prometheus metrics for monitoring the controller.
//!
//! ## Metrics Exposed
//!
//! - `provider_backblaze_reconciliations_total` - Total number of reconcile passes
//! - `provider_backblaze_reconciliation_errors_total` - Passes that returned an error
//! - `provider_backblaze_reconciliation_duration_seconds` - Duration of reconcile passes
//! - `provider_backblaze_live_checks_total{result}` - B2 authorize calls by outcome
//! - `provider_backblaze_setup_invocations_total{result}` - Provider setups by outcome
//! - `provider_backblaze_provider_configs_available{name}` - 1 when a config is Available

use anyhow::Result;
use prometheus::{Histogram, IntCounter, IntCounterVec, IntGaugeVec, Registry};
use std::sync::LazyLock;

pub(crate) static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

static RECONCILIATIONS_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "provider_backblaze_reconciliations_total",
        "Total number of reconciliations",
    )
    .expect("Failed to create RECONCILIATIONS_TOTAL metric - this should never happen")
});

static RECONCILIATION_ERRORS_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "provider_backblaze_reconciliation_errors_total",
        "Total number of reconciliation errors",
    )
    .expect("Failed to create RECONCILIATION_ERRORS_TOTAL metric - this should never happen")
});

static RECONCILIATION_DURATION: LazyLock<Histogram> = LazyLock::new(|| {
    Histogram::with_opts(
        prometheus::HistogramOpts::new(
            "provider_backblaze_reconciliation_duration_seconds",
            "Duration of reconciliation in seconds",
        )
        .buckets(vec![0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0]),
    )
    .expect("Failed to create RECONCILIATION_DURATION metric - this should never happen")
});

static LIVE_CHECKS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "provider_backblaze_live_checks_total",
            "Total number of B2 authorize_account live checks by result",
        ),
        &["result"],
    )
    .expect("Failed to create LIVE_CHECKS_TOTAL metric - this should never happen")
});

static SETUP_INVOCATIONS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "provider_backblaze_setup_invocations_total",
            "Total number of Terraform provider setups by result",
        ),
        &["result"],
    )
    .expect("Failed to create SETUP_INVOCATIONS_TOTAL metric - this should never happen")
});

static PROVIDER_CONFIGS_AVAILABLE: LazyLock<IntGaugeVec> = LazyLock::new(|| {
    IntGaugeVec::new(
        prometheus::Opts::new(
            "provider_backblaze_provider_configs_available",
            "Whether a ProviderConfig is currently Available (1) or not (0)",
        ),
        &["name"],
    )
    .expect("Failed to create PROVIDER_CONFIGS_AVAILABLE metric - this should never happen")
});

/// Register every metric with the process registry
///
/// # Errors
///
/// Fails if called twice in one process.
pub fn register_metrics() -> Result<()> {
    REGISTRY.register(Box::new(RECONCILIATIONS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(RECONCILIATION_ERRORS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(RECONCILIATION_DURATION.clone()))?;
    REGISTRY.register(Box::new(LIVE_CHECKS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(SETUP_INVOCATIONS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(PROVIDER_CONFIGS_AVAILABLE.clone()))?;

    Ok(())
}

pub fn increment_reconciliations() {
    RECONCILIATIONS_TOTAL.inc();
}

pub fn increment_reconciliation_errors() {
    RECONCILIATION_ERRORS_TOTAL.inc();
}

pub fn observe_reconciliation_duration(duration: f64) {
    RECONCILIATION_DURATION.observe(duration);
}

pub fn increment_live_checks(result: &str) {
    LIVE_CHECKS_TOTAL.with_label_values(&[result]).inc();
}

pub fn increment_setup_invocations(result: &str) {
    SETUP_INVOCATIONS_TOTAL.with_label_values(&[result]).inc();
}

pub fn set_provider_config_available(name: &str, available: bool) {
    PROVIDER_CONFIGS_AVAILABLE
        .with_label_values(&[name])
        .set(i64::from(available));
}

/// Drop the availability series of a deleted config
pub fn forget_provider_config(name: &str) {
    // Absent series is fine
    let _ = PROVIDER_CONFIGS_AVAILABLE.remove_label_values(&[name]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_gauge_tracks_last_outcome() {
        set_provider_config_available("metrics-test", true);
        assert_eq!(
            PROVIDER_CONFIGS_AVAILABLE
                .with_label_values(&["metrics-test"])
                .get(),
            1
        );

        set_provider_config_available("metrics-test", false);
        assert_eq!(
            PROVIDER_CONFIGS_AVAILABLE
                .with_label_values(&["metrics-test"])
                .get(),
            0
        );

        forget_provider_config("metrics-test");
        forget_provider_config("metrics-test");
    }

    #[test]
    fn test_labelled_counters_increment() {
        let before = LIVE_CHECKS_TOTAL.with_label_values(&["failure"]).get();
        increment_live_checks("failure");
        assert!(LIVE_CHECKS_TOTAL.with_label_values(&["failure"]).get() > before);
    }
}
