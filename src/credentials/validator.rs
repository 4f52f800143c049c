//! # Credential Validation
//!
//! Shared by the ProviderConfig reconciler and provider setups:
//!
//! 1. Decode the raw document as a JSON object of strings
//! 2. Require `application_key_id` and `application_key` to be non-empty
//! 3. If live checks are enabled, call B2 `b2_authorize_account` once
//!
//! Step 2 fails before any network call is made. Whether step 3 runs is
//! fixed when the validator is built.

use crate::config::ControllerConfig;
use crate::constants::{APPLICATION_KEY, APPLICATION_KEY_ID};
use crate::credentials::{
    AuthorizationProbe, B2AuthorizationProbe, CredentialError, CredentialMap, ProbeError,
};
use crate::observability;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Keys every Backblaze credentials document must carry
pub const REQUIRED_KEYS: [&str; 2] = [APPLICATION_KEY_ID, APPLICATION_KEY];

#[derive(Clone)]
pub struct CredentialValidator {
    probe: Arc<dyn AuthorizationProbe>,
    live_check: bool,
}

impl std::fmt::Debug for CredentialValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialValidator")
            .field("live_check", &self.live_check)
            .finish_non_exhaustive()
    }
}

impl CredentialValidator {
    #[must_use]
    pub fn new(probe: Arc<dyn AuthorizationProbe>, live_check: bool) -> Self {
        Self { probe, live_check }
    }

    /// Validator probing the public B2 API unless the config disables live checks
    ///
    /// # Errors
    ///
    /// Returns an error if the probe's HTTP client cannot be built.
    pub fn from_config(config: &ControllerConfig) -> Result<Self, ProbeError> {
        let probe = B2AuthorizationProbe::new()?;
        if config.skip_live_check {
            info!("Live credential checks disabled by environment override");
        }
        Ok(Self::new(Arc::new(probe), !config.skip_live_check))
    }

    #[must_use]
    pub fn live_check_enabled(&self) -> bool {
        self.live_check
    }

    /// Decode the document and enforce the required keys (no network)
    ///
    /// # Errors
    ///
    /// `Decode` for malformed documents, `MissingField` naming every absent
    /// or empty required key.
    pub fn decode(raw: &[u8]) -> Result<CredentialMap, CredentialError> {
        // null values decode as empty strings
        let creds: CredentialMap = serde_json::from_slice::<HashMap<String, Option<String>>>(raw)?
            .into_iter()
            .map(|(key, value)| (key, value.unwrap_or_default()))
            .collect::<HashMap<_, _>>()
            .into();

        let missing = creds.missing(&REQUIRED_KEYS);
        if !missing.is_empty() {
            return Err(CredentialError::MissingField { fields: missing });
        }
        Ok(creds)
    }

    /// Run every configured check against a raw credentials document
    ///
    /// # Errors
    ///
    /// Any `CredentialError` other than `Extraction`.
    pub async fn validate(&self, raw: &[u8]) -> Result<CredentialMap, CredentialError> {
        let creds = Self::decode(raw)?;

        if !self.live_check {
            debug!("Skipping live credential check");
            return Ok(creds);
        }

        let result = self
            .probe
            .authorize(creds.application_key_id(), creds.application_key())
            .await;
        observability::metrics::increment_live_checks(if result.is_ok() {
            "success"
        } else {
            "failure"
        });
        result?;

        Ok(creds)
    }
}
