//! # Kubernetes Collaborators
//!
//! Async traits for the Kubernetes-side collaborators of the reconciler and
//! provider setups, with `kube`-backed implementations.
//!
//! - `store`: get a `ProviderConfig` and update its status
//! - `tracker`: record `ProviderConfigUsage` for managed resources

mod store;
mod tracker;

pub use store::{KubeProviderConfigStore, ProviderConfigStore};
pub use tracker::{build_usage, usage_name, KubeUsageTracker, UsageTracker};
