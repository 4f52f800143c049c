//! # Credential Errors
//!
//! Failures of the extract, decode, required-field and live-check steps.
//! The `Display` text of each variant is what ends up in the `Ready`
//! condition message, so it is written for operators.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
    /// The referenced secret material could not be resolved
    #[error("cannot extract credentials: {0}")]
    Extraction(#[source] anyhow::Error),

    /// The credentials document is not a JSON object of strings
    #[error("cannot unmarshal backblaze credentials as JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// One or both required keys are absent or empty
    #[error("missing required credentials: {}", .fields.join(" and "))]
    MissingField { fields: Vec<&'static str> },

    /// Backblaze B2 rejected the credentials or could not be reached
    #[error("credential validation failed: {0}")]
    LiveCheck(#[from] ProbeError),
}

/// Failure of the B2 authorize-account probe
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("authentication failed with status: {0}")]
    Status(u16),

    #[error("failed to authenticate with Backblaze B2: {0}")]
    Transport(#[from] reqwest::Error),
}

impl CredentialError {
    /// Short label for metrics and logs
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            CredentialError::Extraction(_) => "extraction",
            CredentialError::Decode(_) => "decode",
            CredentialError::MissingField { .. } => "missing-field",
            CredentialError::LiveCheck(_) => "live-check",
        }
    }
}
