use crate::credentials::CredentialError;
use crate::setup::Setup;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("no providerConfigRef provided")]
    NoConfigRef,

    #[error("cannot get referenced ProviderConfig: {0:#}")]
    ConfigNotFound(#[source] anyhow::Error),

    #[error("cannot track ProviderConfig usage: {0:#}")]
    Tracking(#[source] anyhow::Error),

    #[error(transparent)]
    Credentials(#[from] CredentialError),
}

impl SetupError {
    /// Short label for metrics and logs
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            SetupError::NoConfigRef => "no-config-ref",
            SetupError::ConfigNotFound(_) => "config-not-found",
            SetupError::Tracking(_) => "tracking",
            SetupError::Credentials(e) => e.kind(),
        }
    }
}

/// A failed setup together with what was built before the failure
#[derive(Debug, Error)]
#[error("{error}")]
pub struct SetupFailure {
    pub partial: Setup,
    #[source]
    pub error: SetupError,
}

impl SetupFailure {
    #[must_use]
    pub fn new(partial: Setup, error: SetupError) -> Self {
        Self { partial, error }
    }
}
