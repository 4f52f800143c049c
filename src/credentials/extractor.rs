//! # Credential Extraction
//!
//! Resolves a `ProviderCredentials` descriptor to the raw bytes of the
//! credentials document. Either the complete document is returned or an
//! error naming the source that could not be resolved.

use crate::credentials::CredentialError;
use crate::crd::{CredentialsSource, ProviderCredentials};
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use kube::{Api, Client};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;
use zeroize::Zeroizing;

/// Reads Kubernetes Secret data
#[async_trait]
pub trait SecretReader: Send + Sync {
    /// Returns the Secret's data, or `None` if the Secret does not exist
    async fn read_secret(
        &self,
        namespace: &str,
        name: &str,
    ) -> anyhow::Result<Option<BTreeMap<String, Vec<u8>>>>;
}

/// Resolves a credentials source descriptor to raw bytes
#[async_trait]
pub trait CredentialExtractor: Send + Sync {
    async fn extract(
        &self,
        credentials: &ProviderCredentials,
    ) -> Result<Zeroizing<Vec<u8>>, CredentialError>;
}

/// `SecretReader` backed by the Kubernetes API
#[derive(Clone)]
pub struct KubeSecretReader {
    client: Client,
}

impl KubeSecretReader {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl std::fmt::Debug for KubeSecretReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeSecretReader").finish_non_exhaustive()
    }
}

#[async_trait]
impl SecretReader for KubeSecretReader {
    async fn read_secret(
        &self,
        namespace: &str,
        name: &str,
    ) -> anyhow::Result<Option<BTreeMap<String, Vec<u8>>>> {
        let api: Api<Secret> = Api::namespaced(self.client.clone(), namespace);
        let secret = api
            .get_opt(name)
            .await
            .with_context(|| format!("cannot get secret {namespace}/{name}"))?;

        Ok(secret.map(|s| {
            s.data
                .unwrap_or_default()
                .into_iter()
                .map(|(key, value)| (key, value.0))
                .collect()
        }))
    }
}

/// Extractor for the credentials sources a Backblaze application key can come from
#[derive(Clone)]
pub struct CommonCredentialExtractor {
    secrets: Arc<dyn SecretReader>,
}

impl CommonCredentialExtractor {
    #[must_use]
    pub fn new(secrets: Arc<dyn SecretReader>) -> Self {
        Self { secrets }
    }

    async fn extract_secret(&self, credentials: &ProviderCredentials) -> anyhow::Result<Vec<u8>> {
        let selector = credentials
            .secret_ref
            .as_ref()
            .ok_or_else(|| anyhow!("source is Secret but no secretRef is set"))?;

        let mut data = self
            .secrets
            .read_secret(&selector.namespace, &selector.name)
            .await?
            .ok_or_else(|| {
                anyhow!(
                    "secret {}/{} not found",
                    selector.namespace,
                    selector.name
                )
            })?;

        data.remove(&selector.key).ok_or_else(|| {
            anyhow!(
                "key {} not found in secret {}/{}",
                selector.key,
                selector.namespace,
                selector.name
            )
        })
    }
}

impl std::fmt::Debug for CommonCredentialExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommonCredentialExtractor")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CredentialExtractor for CommonCredentialExtractor {
    async fn extract(
        &self,
        credentials: &ProviderCredentials,
    ) -> Result<Zeroizing<Vec<u8>>, CredentialError> {
        debug!(source = %credentials.source, "Extracting credentials");

        let data = match credentials.source {
            CredentialsSource::Secret => self.extract_secret(credentials).await,
            CredentialsSource::Environment => extract_env(credentials),
            CredentialsSource::Filesystem => extract_fs(credentials).await,
            CredentialsSource::InjectedIdentity | CredentialsSource::None => Err(anyhow!(
                "credentials source {} is not supported",
                credentials.source
            )),
        };

        data.map(Zeroizing::new).map_err(CredentialError::Extraction)
    }
}

fn extract_env(credentials: &ProviderCredentials) -> anyhow::Result<Vec<u8>> {
    let selector = credentials
        .env
        .as_ref()
        .ok_or_else(|| anyhow!("source is Environment but no env selector is set"))?;

    std::env::var_os(&selector.name)
        .map(|value| value.into_encoded_bytes())
        .ok_or_else(|| anyhow!("environment variable {} is not set", selector.name))
}

async fn extract_fs(credentials: &ProviderCredentials) -> anyhow::Result<Vec<u8>> {
    let selector = credentials
        .fs
        .as_ref()
        .ok_or_else(|| anyhow!("source is Filesystem but no fs selector is set"))?;

    tokio::fs::read(&selector.path)
        .await
        .with_context(|| format!("cannot read credentials file {}", selector.path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crd::{EnvSelector, FsSelector, SecretKeySelector};
    use std::io::Write;

    struct StaticSecrets(Option<BTreeMap<String, Vec<u8>>>);

    #[async_trait]
    impl SecretReader for StaticSecrets {
        async fn read_secret(
            &self,
            _namespace: &str,
            _name: &str,
        ) -> anyhow::Result<Option<BTreeMap<String, Vec<u8>>>> {
            Ok(self.0.clone())
        }
    }

    fn extractor(data: Option<BTreeMap<String, Vec<u8>>>) -> CommonCredentialExtractor {
        CommonCredentialExtractor::new(Arc::new(StaticSecrets(data)))
    }

    fn secret_source() -> ProviderCredentials {
        ProviderCredentials {
            source: CredentialsSource::Secret,
            secret_ref: Some(SecretKeySelector {
                name: "backblaze-creds".to_string(),
                namespace: "crossplane-system".to_string(),
                key: "credentials".to_string(),
            }),
            ..ProviderCredentials::default()
        }
    }

    #[tokio::test]
    async fn test_extract_secret_key() {
        let data = BTreeMap::from([("credentials".to_string(), b"{}".to_vec())]);
        let raw = extractor(Some(data))
            .extract(&secret_source())
            .await
            .unwrap();
        assert_eq!(raw.as_slice(), b"{}");
    }

    #[tokio::test]
    async fn test_extract_missing_secret_names_it() {
        let err = extractor(None).extract(&secret_source()).await.unwrap_err();
        assert!(matches!(err, CredentialError::Extraction(_)));
        assert!(err
            .to_string()
            .contains("secret crossplane-system/backblaze-creds not found"));
    }

    #[tokio::test]
    async fn test_extract_missing_key_names_it() {
        let data = BTreeMap::from([("other".to_string(), b"{}".to_vec())]);
        let err = extractor(Some(data))
            .extract(&secret_source())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("key credentials not found"));
    }

    #[tokio::test]
    async fn test_extract_secret_without_selector() {
        let credentials = ProviderCredentials {
            source: CredentialsSource::Secret,
            ..ProviderCredentials::default()
        };
        let err = extractor(None).extract(&credentials).await.unwrap_err();
        assert!(err.to_string().contains("no secretRef"));
    }

    #[tokio::test]
    async fn test_extract_environment() {
        std::env::set_var("PROVIDER_BACKBLAZE_TEST_EXTRACT_ENV", r#"{"a":"b"}"#);
        let credentials = ProviderCredentials {
            source: CredentialsSource::Environment,
            env: Some(EnvSelector {
                name: "PROVIDER_BACKBLAZE_TEST_EXTRACT_ENV".to_string(),
            }),
            ..ProviderCredentials::default()
        };
        let raw = extractor(None).extract(&credentials).await.unwrap();
        assert_eq!(raw.as_slice(), br#"{"a":"b"}"#);
    }

    #[tokio::test]
    async fn test_extract_unset_environment() {
        let credentials = ProviderCredentials {
            source: CredentialsSource::Environment,
            env: Some(EnvSelector {
                name: "PROVIDER_BACKBLAZE_TEST_NEVER_SET".to_string(),
            }),
            ..ProviderCredentials::default()
        };
        let err = extractor(None).extract(&credentials).await.unwrap_err();
        assert!(err
            .to_string()
            .contains("PROVIDER_BACKBLAZE_TEST_NEVER_SET is not set"));
    }

    #[tokio::test]
    async fn test_extract_filesystem() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"application_key_id":"abc"}"#).unwrap();
        let credentials = ProviderCredentials {
            source: CredentialsSource::Filesystem,
            fs: Some(FsSelector {
                path: file.path().display().to_string(),
            }),
            ..ProviderCredentials::default()
        };
        let raw = extractor(None).extract(&credentials).await.unwrap();
        assert_eq!(raw.as_slice(), br#"{"application_key_id":"abc"}"#);
    }

    #[tokio::test]
    async fn test_unsupported_sources() {
        for source in [CredentialsSource::None, CredentialsSource::InjectedIdentity] {
            let credentials = ProviderCredentials {
                source,
                ..ProviderCredentials::default()
            };
            let err = extractor(None).extract(&credentials).await.unwrap_err();
            assert!(err.to_string().contains(source.as_str()));
        }
    }
}
