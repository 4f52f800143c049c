//! # Usage Tracking
//!
//! Records which managed resources use which `ProviderConfig` by applying a
//! `ProviderConfigUsage` owned by the managed resource. Applying is
//! idempotent, so every provider setup can call `track` unconditionally.

use crate::constants::{FIELD_MANAGER, PROVIDER_CONFIG_LABEL};
use crate::crd::{Managed, ProviderConfigUsage, ProviderConfigUsageSpec, TypedReference};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use kube::api::{Patch, PatchParams};
use kube::{Api, Client};
use std::collections::BTreeMap;
use tracing::debug;

#[async_trait]
pub trait UsageTracker: Send + Sync {
    /// Record that `managed` uses the `ProviderConfig` it references
    async fn track(&self, managed: &dyn Managed) -> Result<()>;
}

#[derive(Clone)]
pub struct KubeUsageTracker {
    api: Api<ProviderConfigUsage>,
}

impl KubeUsageTracker {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self {
            api: Api::all(client),
        }
    }
}

impl std::fmt::Debug for KubeUsageTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeUsageTracker").finish_non_exhaustive()
    }
}

/// Name of the usage object for a managed resource
#[must_use]
pub fn usage_name(resource: &TypedReference) -> String {
    match &resource.uid {
        Some(uid) if !uid.is_empty() => uid.clone(),
        _ => format!("{}-{}", resource.kind.to_lowercase(), resource.name),
    }
}

/// Build the usage object recording that `managed` uses `provider_config`
#[must_use]
pub fn build_usage(provider_config: &str, resource: &TypedReference) -> ProviderConfigUsage {
    let mut usage = ProviderConfigUsage::new(
        &usage_name(resource),
        ProviderConfigUsageSpec {
            provider_config_ref: crate::crd::Reference {
                name: provider_config.to_string(),
            },
            resource_ref: resource.clone(),
        },
    );
    usage.metadata.labels = Some(BTreeMap::from([(
        PROVIDER_CONFIG_LABEL.to_string(),
        provider_config.to_string(),
    )]));
    // The usage goes away with the managed resource
    if let Some(uid) = resource.uid.clone() {
        usage.metadata.owner_references = Some(vec![OwnerReference {
            api_version: resource.api_version.clone(),
            kind: resource.kind.clone(),
            name: resource.name.clone(),
            uid,
            controller: Some(true),
            block_owner_deletion: Some(true),
        }]);
    }
    usage
}

#[async_trait]
impl UsageTracker for KubeUsageTracker {
    async fn track(&self, managed: &dyn Managed) -> Result<()> {
        let reference = managed
            .provider_config_reference()
            .ok_or_else(|| anyhow!("managed resource has no providerConfigRef"))?;
        let resource = managed.resource_reference();
        let usage = build_usage(&reference.name, &resource);
        let name = usage_name(&resource);

        debug!(
            provider_config = %reference.name,
            resource = %resource,
            "Tracking ProviderConfig usage"
        );

        self.api
            .patch(
                &name,
                &PatchParams::apply(FIELD_MANAGER).force(),
                &Patch::Apply(&usage),
            )
            .await
            .with_context(|| format!("cannot apply ProviderConfigUsage {name}"))?;
        Ok(())
    }
}
