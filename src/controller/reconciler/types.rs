//! # Types
//!
//! Core types for the reconciler.

use crate::client::{KubeProviderConfigStore, ProviderConfigStore};
use crate::config::ControllerConfig;
use crate::credentials::{
    CommonCredentialExtractor, CredentialExtractor, CredentialValidator, KubeSecretReader,
    ProbeError,
};
use crate::crd::Availability;
use kube::Client;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReconcilerError {
    #[error("cannot get ProviderConfig {name}: {source:#}")]
    Fetch {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("cannot update status of ProviderConfig {name}: {source:#}")]
    StatusWrite {
        name: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Result of one successful reconcile pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    /// The config no longer exists; nothing was written
    Deleted,
    /// The `Ready` condition was written with this availability
    Checked(Availability),
}

/// Shared context for reconcile passes
///
/// Holds only collaborators and configuration; each pass starts from the
/// stored object.
#[derive(Clone)]
pub struct Reconciler {
    pub store: Arc<dyn ProviderConfigStore>,
    pub extractor: Arc<dyn CredentialExtractor>,
    pub validator: CredentialValidator,
    pub config: ControllerConfig,
}

impl std::fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("validator", &self.validator)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Reconciler {
    #[must_use]
    pub fn new(
        store: Arc<dyn ProviderConfigStore>,
        extractor: Arc<dyn CredentialExtractor>,
        validator: CredentialValidator,
        config: ControllerConfig,
    ) -> Self {
        Self {
            store,
            extractor,
            validator,
            config,
        }
    }

    /// Reconciler backed by the cluster and the public B2 API
    ///
    /// # Errors
    ///
    /// Returns an error if the probe's HTTP client cannot be built.
    pub fn from_client(client: Client, config: ControllerConfig) -> Result<Self, ProbeError> {
        let validator = CredentialValidator::from_config(&config)?;
        let secrets = Arc::new(KubeSecretReader::new(client.clone()));
        Ok(Self::new(
            Arc::new(KubeProviderConfigStore::new(client)),
            Arc::new(CommonCredentialExtractor::new(secrets)),
            validator,
            config,
        ))
    }
}
