//! # Watch Loop
//!
//! Controller watch loop over `ProviderConfig` resources. Changes to a
//! `ProviderConfigUsage` also enqueue the config it references.

use crate::controller::reconciler::{reconcile, Reconciler};
use crate::controller::server::ServerState;
use crate::crd::{ProviderConfig, ProviderConfigUsage};
use crate::runtime::error_policy::handle_reconciliation_error;
use anyhow::Context;
use futures::StreamExt;
use kube::api::Api;
use kube_runtime::controller::Config as ControllerRuntimeConfig;
use kube_runtime::reflector::ObjectRef;
use kube_runtime::{watcher, Controller};
use std::sync::Arc;
use tokio::signal::unix::{signal, SignalKind};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Config a usage object points at
#[must_use]
pub fn usage_to_provider_config(usage: &ProviderConfigUsage) -> Option<ObjectRef<ProviderConfig>> {
    let name = usage.spec.provider_config_ref.name.as_str();
    if name.is_empty() {
        return None;
    }
    Some(ObjectRef::new(name))
}

/// Mark the server not-ready on SIGINT or SIGTERM
///
/// The SIGTERM handler is registered before returning, so a signal sent after
/// this call is never missed.
///
/// # Errors
///
/// Returns an error if the SIGTERM handler cannot be registered.
pub fn mark_unready_on_shutdown(
    server_state: Arc<ServerState>,
) -> Result<JoinHandle<()>, anyhow::Error> {
    let mut terminate =
        signal(SignalKind::terminate()).context("Failed to register SIGTERM handler")?;
    Ok(tokio::spawn(async move {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => info!("Received SIGINT, initiating graceful shutdown..."),
            _ = terminate.recv() => info!("Received SIGTERM, initiating graceful shutdown..."),
        }
        server_state.set_ready(false);
    }))
}

/// Run the controller until a shutdown signal arrives
///
/// # Errors
///
/// Returns an error if the shutdown signal handlers cannot be registered.
pub async fn run_watch_loop(
    configs: Api<ProviderConfig>,
    usages: Api<ProviderConfigUsage>,
    reconciler: Arc<Reconciler>,
    server_state: Arc<ServerState>,
) -> Result<(), anyhow::Error> {
    let concurrency = reconciler.config.max_concurrent_reconciliations;

    mark_unready_on_shutdown(Arc::clone(&server_state))?;

    info!(concurrency, "Starting controller watch loop...");
    Controller::new(configs, watcher::Config::default().any_semantic())
        .watches(usages, watcher::Config::default(), |usage| {
            usage_to_provider_config(&usage)
        })
        .with_config(ControllerRuntimeConfig::default().concurrency(concurrency))
        .shutdown_on_signal()
        .run(reconcile, handle_reconciliation_error, reconciler)
        .for_each(|result| async move {
            match result {
                Ok((obj, _action)) => debug!(provider_config.name = %obj.name, "watch.event.reconciled"),
                Err(e) => warn!("Controller stream error: {e}"),
            }
        })
        .await;

    info!("Controller stopped gracefully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crd::{ProviderConfigUsageSpec, Reference, TypedReference};

    fn usage(config: &str) -> ProviderConfigUsage {
        ProviderConfigUsage::new(
            "0f3c",
            ProviderConfigUsageSpec {
                provider_config_ref: Reference {
                    name: config.to_string(),
                },
                resource_ref: TypedReference {
                    api_version: "b2.backblaze.crossplane.io/v1alpha1".to_string(),
                    kind: "Bucket".to_string(),
                    name: "media".to_string(),
                    uid: Some("0f3c".to_string()),
                },
            },
        )
    }

    #[test]
    fn test_usage_maps_to_referenced_config() {
        let target = usage_to_provider_config(&usage("default")).unwrap();
        assert_eq!(target.name, "default");
        assert!(target.namespace.is_none());
    }

    #[test]
    fn test_usage_without_config_name_maps_to_nothing() {
        assert!(usage_to_provider_config(&usage("")).is_none());
    }

    #[tokio::test]
    async fn test_sigterm_marks_server_unready() {
        let state = Arc::new(ServerState::default());
        state.set_ready(true);

        let handle = mark_unready_on_shutdown(Arc::clone(&state)).unwrap();
        let status = std::process::Command::new("kill")
            .args(["-TERM", &std::process::id().to_string()])
            .status()
            .unwrap();
        assert!(status.success());

        tokio::time::timeout(std::time::Duration::from_secs(5), handle)
            .await
            .expect("SIGTERM should end the shutdown task")
            .unwrap();
        assert!(!state.is_ready());
    }
}
