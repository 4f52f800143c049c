//! # Constants
//!
//! Shared constants used throughout the controller.
//!
//! These values represent reasonable defaults and can be overridden via
//! configuration or environment variables where applicable.

use std::time::Duration;

/// API group for the provider's own custom resources
pub const API_GROUP: &str = "backblaze.crossplane.io";

/// API version for `ProviderConfig` and `ProviderConfigUsage`
pub const API_VERSION: &str = "v1beta1";

/// Field manager used for status patches and usage applies
pub const FIELD_MANAGER: &str = "provider-backblaze";

/// Label linking a `ProviderConfigUsage` to the `ProviderConfig` it references
pub const PROVIDER_CONFIG_LABEL: &str = "backblaze.crossplane.io/provider-config";

/// Backblaze B2 account authorization endpoint used for the live-check probe
pub const B2_AUTHORIZE_ACCOUNT_URL: &str =
    "https://api.backblazeb2.com/b2api/v1/b2_authorize_account";

/// Upper bound on a single live-check probe
pub const LIVE_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

/// Presence (non-empty) of this variable disables the live-check probe
pub const SKIP_LIVE_CHECK_ENV: &str = "UPTEST_CLOUD_CREDENTIALS";

/// Credential document key holding the B2 application key ID
pub const APPLICATION_KEY_ID: &str = "application_key_id";

/// Credential document key holding the B2 application key
pub const APPLICATION_KEY: &str = "application_key";

/// Default HTTP server port for metrics and health probes
pub const DEFAULT_METRICS_PORT: u16 = 8080;

/// Default requeue interval after a completed reconcile pass (seconds)
/// Periodic passes pick up credential changes the watch cannot see (Secret contents, env, files)
pub const DEFAULT_RESYNC_INTERVAL_SECS: u64 = 600;

/// Default requeue interval for reconciliation errors (seconds)
pub const DEFAULT_RECONCILIATION_ERROR_REQUEUE_SECS: u64 = 30;

/// Default maximum number of concurrent reconcile passes
pub const DEFAULT_MAX_CONCURRENT_RECONCILIATIONS: u16 = 10;

/// Default tracing filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "provider_backblaze=info";
