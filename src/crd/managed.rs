//! # Managed Resources
//!
//! The minimal view of a managed resource the controller needs: which
//! `ProviderConfig` it points at and how to refer back to it.

use kube::api::DynamicObject;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to a cluster-scoped object by name
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, schemars::JsonSchema)]
pub struct Reference {
    pub name: String,
}

/// Reference to an object of a specific kind
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TypedReference {
    pub api_version: String,
    pub kind: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

impl fmt::Display for TypedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({})", self.kind, self.name, self.api_version)
    }
}

/// A resource whose external operations are configured by a `ProviderConfig`
pub trait Managed: Send + Sync {
    /// The `spec.providerConfigRef` of the resource, if set
    fn provider_config_reference(&self) -> Option<Reference>;

    /// A typed reference to the resource itself
    fn resource_reference(&self) -> TypedReference;
}

/// Plain handle for callers that already hold the two references
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedHandle {
    pub resource: TypedReference,
    pub provider_config: Option<Reference>,
}

impl Managed for ManagedHandle {
    fn provider_config_reference(&self) -> Option<Reference> {
        self.provider_config.clone()
    }

    fn resource_reference(&self) -> TypedReference {
        self.resource.clone()
    }
}

impl Managed for DynamicObject {
    fn provider_config_reference(&self) -> Option<Reference> {
        self.data
            .get("spec")?
            .get("providerConfigRef")?
            .get("name")?
            .as_str()
            .map(|name| Reference {
                name: name.to_string(),
            })
    }

    fn resource_reference(&self) -> TypedReference {
        let (api_version, kind) = self
            .types
            .as_ref()
            .map(|t| (t.api_version.clone(), t.kind.clone()))
            .unwrap_or_default();
        TypedReference {
            api_version,
            kind,
            name: self.metadata.name.clone().unwrap_or_default(),
            uid: self.metadata.uid.clone(),
        }
    }
}
