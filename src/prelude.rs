//! # Prelude
//!
//! Re-exports commonly used types and traits for convenience.
//!
//! ```rust
//! use provider_backblaze::prelude::*;
//! ```

// CRD types
pub use crate::crd::*;

// Collaborator traits and their Kubernetes implementations
pub use crate::client::{KubeProviderConfigStore, KubeUsageTracker, ProviderConfigStore, UsageTracker};
pub use crate::credentials::{
    AuthorizationProbe, B2AuthorizationProbe, CommonCredentialExtractor, CredentialError,
    CredentialExtractor, CredentialMap, CredentialValidator, KubeSecretReader, ProbeError,
    SecretReader,
};

// Reconciler types
pub use crate::controller::reconciler::{reconcile, PassOutcome, Reconciler, ReconcilerError};

// Provider setup
pub use crate::setup::{Setup, SetupClients, SetupError, SetupFailure, SetupFn};

// Config types
pub use crate::config::{ControllerConfig, LogFormat};
