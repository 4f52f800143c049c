//! # Provider Setup
//!
//! Builds the per-operation configuration handed to the Terraform Backblaze
//! provider. [`build`] returns a `SetupFn`; each call of
//! `SetupFn::setup` resolves the managed resource's `ProviderConfig`, records
//! usage, extracts and validates the credentials, and returns a fresh
//! [`Setup`].
//!
//! Failures return the partially built `Setup` alongside the error in
//! [`SetupFailure`], so callers can still read the version and requirement.

mod error;

pub use error::{SetupError, SetupFailure};

use crate::client::{
    KubeProviderConfigStore, KubeUsageTracker, ProviderConfigStore, UsageTracker,
};
use crate::constants::{APPLICATION_KEY, APPLICATION_KEY_ID};
use crate::credentials::{
    CommonCredentialExtractor, CredentialExtractor, CredentialValidator, KubeSecretReader,
};
use crate::crd::Managed;
use crate::observability;
use anyhow::anyhow;
use kube::Client;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Terraform provider the setup targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRequirement {
    pub source: String,
    pub version: String,
}

/// Configuration bundle for one provider operation
#[derive(Clone, PartialEq, Eq)]
pub struct Setup {
    pub version: String,
    pub requirement: ProviderRequirement,
    /// Validated credential values keyed by provider argument name
    pub configuration: BTreeMap<String, String>,
}

impl fmt::Debug for Setup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Setup")
            .field("version", &self.version)
            .field("requirement", &self.requirement)
            .field("configuration", &self.configuration.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Collaborators a `SetupFn` runs against
#[derive(Clone)]
pub struct SetupClients {
    pub store: Arc<dyn ProviderConfigStore>,
    pub tracker: Arc<dyn UsageTracker>,
    pub extractor: Arc<dyn CredentialExtractor>,
    pub validator: CredentialValidator,
}

impl SetupClients {
    /// Kubernetes-backed collaborators sharing one client
    ///
    /// Entry point for the Terraform provider bootstrap.
    #[must_use]
    pub fn from_client(client: Client, validator: CredentialValidator) -> Self {
        let secrets = Arc::new(KubeSecretReader::new(client.clone()));
        Self {
            store: Arc::new(KubeProviderConfigStore::new(client.clone())),
            tracker: Arc::new(KubeUsageTracker::new(client)),
            extractor: Arc::new(CommonCredentialExtractor::new(secrets)),
            validator,
        }
    }
}

impl fmt::Debug for SetupClients {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetupClients")
            .field("validator", &self.validator)
            .finish_non_exhaustive()
    }
}

/// A new, independent setup function for one Terraform version and provider
///
/// The returned function holds nothing beyond the version triple, so it can
/// be cloned freely and called concurrently.
#[must_use]
pub fn build(
    version: impl Into<String>,
    provider_source: impl Into<String>,
    provider_version: impl Into<String>,
) -> SetupFn {
    SetupFn {
        version: version.into(),
        requirement: ProviderRequirement {
            source: provider_source.into(),
            version: provider_version.into(),
        },
    }
}

/// Produces a [`Setup`] for a managed resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupFn {
    version: String,
    requirement: ProviderRequirement,
}

impl SetupFn {
    /// Resolve, track, extract and validate, then emit the setup
    ///
    /// # Errors
    ///
    /// A [`SetupFailure`] carrying the partial setup and the step that failed.
    pub async fn setup(
        &self,
        clients: &SetupClients,
        managed: &dyn Managed,
    ) -> Result<Setup, SetupFailure> {
        let result = self.run(clients, managed).await;
        observability::metrics::increment_setup_invocations(match &result {
            Ok(_) => "success",
            Err(failure) => failure.error.kind(),
        });
        result
    }

    async fn run(
        &self,
        clients: &SetupClients,
        managed: &dyn Managed,
    ) -> Result<Setup, SetupFailure> {
        let mut setup = Setup {
            version: self.version.clone(),
            requirement: self.requirement.clone(),
            configuration: BTreeMap::new(),
        };

        let Some(config_ref) = managed.provider_config_reference() else {
            return Err(SetupFailure::new(setup, SetupError::NoConfigRef));
        };

        let config = match clients.store.get(&config_ref.name).await {
            Ok(Some(config)) => config,
            Ok(None) => {
                let err = anyhow!("ProviderConfig {} not found", config_ref.name);
                return Err(SetupFailure::new(setup, SetupError::ConfigNotFound(err)));
            }
            Err(e) => return Err(SetupFailure::new(setup, SetupError::ConfigNotFound(e))),
        };

        if let Err(e) = clients.tracker.track(managed).await {
            warn!(provider_config = %config_ref.name, "Cannot track ProviderConfig usage: {e:#}");
            return Err(SetupFailure::new(setup, SetupError::Tracking(e)));
        }

        let raw = match clients.extractor.extract(&config.spec.credentials).await {
            Ok(raw) => raw,
            Err(e) => return Err(SetupFailure::new(setup, e.into())),
        };
        let creds = match clients.validator.validate(&raw).await {
            Ok(creds) => creds,
            Err(e) => return Err(SetupFailure::new(setup, e.into())),
        };

        debug!(provider_config = %config_ref.name, "Credentials validated for provider setup");

        setup.configuration = BTreeMap::from([
            (
                APPLICATION_KEY_ID.to_string(),
                creds.application_key_id().to_string(),
            ),
            (
                APPLICATION_KEY.to_string(),
                creds.application_key().to_string(),
            ),
        ]);
        Ok(setup)
    }
}
