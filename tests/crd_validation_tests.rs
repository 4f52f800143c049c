//! # CRD Validation Tests
//!
//! Sample manifests deserialize into the CRD types and the generated CRDs
//! carry the expected group, scope and status subresource.

use kube::CustomResourceExt;
use provider_backblaze::constants::{API_GROUP, API_VERSION};
use provider_backblaze::crd::{
    Availability, CredentialsSource, ProviderConfig, ProviderConfigUsage,
};

#[test]
fn test_secret_provider_config_manifest() {
    let yaml = r#"
apiVersion: backblaze.crossplane.io/v1beta1
kind: ProviderConfig
metadata:
  name: default
spec:
  credentials:
    source: Secret
    secretRef:
      namespace: crossplane-system
      name: backblaze-creds
      key: credentials
"#;

    let config: ProviderConfig =
        serde_yaml::from_str(yaml).expect("Should deserialize Secret ProviderConfig");

    assert_eq!(config.spec.credentials.source, CredentialsSource::Secret);
    let secret_ref = config.spec.credentials.secret_ref.unwrap();
    assert_eq!(secret_ref.to_string(), "crossplane-system/backblaze-creds[credentials]");
    assert!(config.status.is_none());
}

#[test]
fn test_provider_config_status_round_trips_from_manifest() {
    let yaml = r#"
apiVersion: backblaze.crossplane.io/v1beta1
kind: ProviderConfig
metadata:
  name: default
  generation: 2
spec:
  credentials:
    source: Filesystem
    fs:
      path: /var/run/secrets/backblaze/credentials.json
status:
  observedGeneration: 2
  conditions:
    - type: Ready
      status: "False"
      reason: Unavailable
      message: "missing required credentials: application_key"
      lastTransitionTime: "2024-01-01T00:00:00+00:00"
"#;

    let config: ProviderConfig = serde_yaml::from_str(yaml).expect("Should deserialize status");

    assert_eq!(
        config.spec.credentials.fs.unwrap().path,
        "/var/run/secrets/backblaze/credentials.json"
    );
    let status = config.status.unwrap();
    assert_eq!(status.observed_generation, Some(2));
    assert_eq!(
        status.availability(),
        Some(Availability::Unavailable(
            "missing required credentials: application_key".to_string()
        ))
    );
}

#[test]
fn test_unknown_credentials_source_is_rejected() {
    let yaml = r#"
apiVersion: backblaze.crossplane.io/v1beta1
kind: ProviderConfig
metadata:
  name: default
spec:
  credentials:
    source: Vault
"#;

    assert!(serde_yaml::from_str::<ProviderConfig>(yaml).is_err());
}

#[test]
fn test_provider_config_crd_is_cluster_scoped_with_status() {
    let crd = ProviderConfig::crd();

    assert_eq!(crd.spec.group, API_GROUP);
    assert_eq!(crd.spec.scope, "Cluster");
    assert_eq!(crd.spec.names.kind, "ProviderConfig");

    let version = &crd.spec.versions[0];
    assert_eq!(version.name, API_VERSION);
    assert!(version
        .subresources
        .as_ref()
        .and_then(|s| s.status.as_ref())
        .is_some());
}

#[test]
fn test_usage_crd_is_cluster_scoped() {
    let crd = ProviderConfigUsage::crd();

    assert_eq!(crd.spec.group, API_GROUP);
    assert_eq!(crd.spec.scope, "Cluster");
    assert_eq!(crd.spec.names.kind, "ProviderConfigUsage");
    assert!(crd
        .spec
        .names
        .categories
        .unwrap_or_default()
        .contains(&"crossplane".to_string()));
}
