//! # ProviderConfig Store
//!
//! Read a `ProviderConfig` by name and write its status back.

use crate::constants::FIELD_MANAGER;
use crate::crd::ProviderConfig;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use kube::api::{Patch, PatchParams};
use kube::{Api, Client};

/// Object store for `ProviderConfig` resources
#[async_trait]
pub trait ProviderConfigStore: Send + Sync {
    /// Fetch a config by name; `Ok(None)` when it does not exist
    async fn get(&self, name: &str) -> Result<Option<ProviderConfig>>;

    /// Persist `config.status`, guarded by `config.metadata.resourceVersion`
    async fn update_status(&self, config: &ProviderConfig) -> Result<()>;
}

#[derive(Clone)]
pub struct KubeProviderConfigStore {
    api: Api<ProviderConfig>,
}

impl KubeProviderConfigStore {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self {
            api: Api::all(client),
        }
    }
}

impl std::fmt::Debug for KubeProviderConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeProviderConfigStore")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ProviderConfigStore for KubeProviderConfigStore {
    async fn get(&self, name: &str) -> Result<Option<ProviderConfig>> {
        self.api
            .get_opt(name)
            .await
            .with_context(|| format!("cannot get ProviderConfig {name}"))
    }

    async fn update_status(&self, config: &ProviderConfig) -> Result<()> {
        let name = config
            .metadata
            .name
            .as_deref()
            .ok_or_else(|| anyhow!("ProviderConfig has no name"))?;

        // resourceVersion makes the API server reject the write if the object moved on
        let patch = serde_json::json!({
            "metadata": { "resourceVersion": config.metadata.resource_version },
            "status": config.status,
        });

        self.api
            .patch_status(
                name,
                &PatchParams::apply(FIELD_MANAGER),
                &Patch::Merge(&patch),
            )
            .await
            .with_context(|| format!("cannot update status of ProviderConfig {name}"))?;
        Ok(())
    }
}
