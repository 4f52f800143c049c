//! # ProviderConfigUsage
//!
//! Records that a managed resource depends on a `ProviderConfig`. One usage
//! exists per managed resource; the controller watches usages so that a
//! config is re-checked when resources start or stop using it.

use serde::{Deserialize, Serialize};

/// ProviderConfigUsage Custom Resource Definition
#[derive(kube::CustomResource, Debug, Clone, Deserialize, Serialize, schemars::JsonSchema)]
#[kube(
    kind = "ProviderConfigUsage",
    group = "backblaze.crossplane.io",
    version = "v1beta1",
    category = "crossplane",
    category = "provider",
    category = "backblaze",
    printcolumn = r#"{"name":"Config-Name", "type":"string", "jsonPath":".spec.providerConfigRef.name"}, {"name":"Resource-Kind", "type":"string", "jsonPath":".spec.resourceRef.kind"}, {"name":"Resource-Name", "type":"string", "jsonPath":".spec.resourceRef.name"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfigUsageSpec {
    /// The ProviderConfig in use
    pub provider_config_ref: crate::crd::Reference,
    /// The managed resource using it
    pub resource_ref: crate::crd::TypedReference,
}
