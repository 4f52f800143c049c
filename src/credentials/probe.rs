//! # B2 Authorization Probe
//!
//! Live check of a Backblaze B2 application key: one `b2_authorize_account`
//! call with HTTP Basic auth. No retries.

use crate::constants::{B2_AUTHORIZE_ACCOUNT_URL, LIVE_CHECK_TIMEOUT};
use crate::credentials::ProbeError;
use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

/// Confirms that an application key is accepted by the remote service
#[async_trait]
pub trait AuthorizationProbe: Send + Sync {
    async fn authorize(&self, application_key_id: &str, application_key: &str)
        -> Result<(), ProbeError>;
}

#[derive(Debug, Clone)]
pub struct B2AuthorizationProbe {
    client: reqwest::Client,
    endpoint: String,
}

impl B2AuthorizationProbe {
    /// Probe against the public B2 API
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self, ProbeError> {
        Self::with_endpoint(B2_AUTHORIZE_ACCOUNT_URL)
    }

    /// Probe against a different authorize-account URL (mock servers)
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder()
            .timeout(LIVE_CHECK_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AuthorizationProbe for B2AuthorizationProbe {
    async fn authorize(
        &self,
        application_key_id: &str,
        application_key: &str,
    ) -> Result<(), ProbeError> {
        debug!(endpoint = %self.endpoint, "Probing Backblaze B2 authorize-account");

        let response = self
            .client
            .get(&self.endpoint)
            .basic_auth(application_key_id, Some(application_key))
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ProbeError::Status(status.as_u16()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_rustls() {
        let _ = rustls::crypto::ring::default_provider().install_default();
    }

    #[test]
    fn test_default_endpoint() {
        init_rustls();
        let probe = B2AuthorizationProbe::new().unwrap();
        assert_eq!(
            probe.endpoint(),
            "https://api.backblazeb2.com/b2api/v1/b2_authorize_account"
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        init_rustls();
        let probe = B2AuthorizationProbe::with_endpoint("http://127.0.0.1:1/b2_authorize_account")
            .unwrap();
        let err = probe.authorize("abc", "xyz").await.unwrap_err();
        assert!(matches!(err, ProbeError::Transport(_)));
        assert!(err
            .to_string()
            .starts_with("failed to authenticate with Backblaze B2"));
    }
}
