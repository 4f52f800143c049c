//! Common test utilities
//!
//! In-memory fakes for the collaborator traits plus rustls setup for tests
//! that build HTTP clients.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use anyhow::anyhow;
use async_trait::async_trait;
use provider_backblaze::client::{ProviderConfigStore, UsageTracker};
use provider_backblaze::credentials::{
    AuthorizationProbe, CredentialError, CredentialExtractor, CredentialValidator, ProbeError,
};
use provider_backblaze::crd::{
    CredentialsSource, Managed, ProviderConfig, ProviderConfigSpec, ProviderCredentials,
    SecretKeySelector,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use zeroize::Zeroizing;

static RUSTLS_INIT: Once = Once::new();

/// Initialize rustls crypto provider for tests
pub fn init_rustls() {
    RUSTLS_INIT.call_once(|| {
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}

pub const VALID_DOCUMENT: &[u8] = br#"{"application_key_id":"abc","application_key":"xyz"}"#;

/// A `ProviderConfig` reading its credentials from a Secret
pub fn provider_config(name: &str, generation: i64) -> ProviderConfig {
    let mut config = ProviderConfig::new(
        name,
        ProviderConfigSpec {
            credentials: ProviderCredentials {
                source: CredentialsSource::Secret,
                secret_ref: Some(SecretKeySelector {
                    name: "backblaze-creds".to_string(),
                    namespace: "crossplane-system".to_string(),
                    key: "credentials".to_string(),
                }),
                ..ProviderCredentials::default()
            },
        },
    );
    config.metadata.generation = Some(generation);
    config.metadata.resource_version = Some("1".to_string());
    config
}

/// Object store keeping configs in memory and recording status writes
#[derive(Default)]
pub struct FakeStore {
    pub configs: Mutex<HashMap<String, ProviderConfig>>,
    pub writes: Mutex<Vec<ProviderConfig>>,
    pub gets: AtomicUsize,
    pub fail_get: bool,
    pub fail_update: bool,
}

impl FakeStore {
    pub fn with(configs: impl IntoIterator<Item = ProviderConfig>) -> Self {
        let store = Self::default();
        {
            let mut map = store.configs.lock().unwrap();
            for config in configs {
                map.insert(config.metadata.name.clone().unwrap(), config);
            }
        }
        store
    }

    pub fn writes(&self) -> Vec<ProviderConfig> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProviderConfigStore for FakeStore {
    async fn get(&self, name: &str) -> anyhow::Result<Option<ProviderConfig>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        if self.fail_get {
            return Err(anyhow!("connection refused"));
        }
        Ok(self.configs.lock().unwrap().get(name).cloned())
    }

    async fn update_status(&self, config: &ProviderConfig) -> anyhow::Result<()> {
        if self.fail_update {
            return Err(anyhow!("the object has been modified"));
        }
        self.writes.lock().unwrap().push(config.clone());
        let name = config.metadata.name.clone().unwrap();
        if let Some(stored) = self.configs.lock().unwrap().get_mut(&name) {
            stored.status.clone_from(&config.status);
        }
        Ok(())
    }
}

/// Extractor returning a fixed document, or an extraction error when `None`
pub struct FakeExtractor {
    pub document: Option<Vec<u8>>,
    pub calls: AtomicUsize,
}

impl FakeExtractor {
    pub fn returning(document: &[u8]) -> Self {
        Self {
            document: Some(document.to_vec()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            document: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialExtractor for FakeExtractor {
    async fn extract(
        &self,
        _credentials: &ProviderCredentials,
    ) -> Result<Zeroizing<Vec<u8>>, CredentialError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.document {
            Some(document) => Ok(Zeroizing::new(document.clone())),
            None => Err(CredentialError::Extraction(anyhow!(
                "secret crossplane-system/backblaze-creds not found"
            ))),
        }
    }
}

/// Probe answering with a fixed status code and counting calls
pub struct FakeProbe {
    pub status: u16,
    pub calls: AtomicUsize,
}

impl FakeProbe {
    pub fn answering(status: u16) -> Self {
        Self {
            status,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthorizationProbe for FakeProbe {
    async fn authorize(&self, _id: &str, _key: &str) -> Result<(), ProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.status == 200 {
            Ok(())
        } else {
            Err(ProbeError::Status(self.status))
        }
    }
}

pub fn validator(probe: &Arc<FakeProbe>, live_check: bool) -> CredentialValidator {
    CredentialValidator::new(Arc::clone(probe) as Arc<dyn AuthorizationProbe>, live_check)
}

/// Usage registrar counting calls
#[derive(Default)]
pub struct FakeTracker {
    pub calls: AtomicUsize,
    pub fail: bool,
}

impl FakeTracker {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UsageTracker for FakeTracker {
    async fn track(&self, _managed: &dyn Managed) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(anyhow!("usage apply forbidden"));
        }
        Ok(())
    }
}
