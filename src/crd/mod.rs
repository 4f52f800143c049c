//! # Custom Resource Definitions
//!
//! CRD types for the Backblaze provider controller.
//!
//! ## Module Structure
//!
//! - `provider_config.rs` - `ProviderConfig` and its credentials source descriptor
//! - `usage.rs` - `ProviderConfigUsage`, one per managed resource using a config
//! - `status.rs` - Status conditions and the availability outcome
//! - `managed.rs` - The view of a managed resource used by provider setups

mod managed;
mod provider_config;
mod status;
mod usage;

// Re-export all public types
pub use managed::{Managed, ManagedHandle, Reference, TypedReference};
pub use provider_config::{
    CredentialsSource, EnvSelector, FsSelector, ProviderConfig, ProviderConfigSpec,
    ProviderCredentials, SecretKeySelector,
};
pub use status::{
    Availability, Condition, ProviderConfigStatus, READY_CONDITION, REASON_AVAILABLE,
    REASON_UNAVAILABLE,
};
pub use usage::{ProviderConfigUsage, ProviderConfigUsageSpec};
