//! # Initialization
//!
//! Controller initialization: rustls setup, tracing, metrics, server
//! startup, Kubernetes client and reconciler setup.

use crate::config::ControllerConfig;
use crate::controller::reconciler::Reconciler;
use crate::controller::server::{start_server, ServerState};
use crate::crd::{ProviderConfig, ProviderConfigUsage};
use crate::observability;
use anyhow::{Context, Result};
use kube::api::{Api, ListParams};
use kube::Client;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Initialization result containing all necessary components for the controller
pub struct InitializationResult {
    pub client: Client,
    pub configs: Api<ProviderConfig>,
    pub usages: Api<ProviderConfigUsage>,
    pub reconciler: Arc<Reconciler>,
    pub server_state: Arc<ServerState>,
}

impl std::fmt::Debug for InitializationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InitializationResult")
            .field("reconciler", &self.reconciler)
            .field("server_ready", &self.server_state.is_ready())
            .finish_non_exhaustive()
    }
}

/// Initialize the controller runtime
///
/// # Errors
///
/// Fails when tracing or metrics cannot be installed, the Kubernetes client
/// cannot be created, or the probe's HTTP client cannot be built.
pub async fn initialize(config: ControllerConfig) -> Result<InitializationResult> {
    // Must precede any TLS use; an already installed provider is fine
    let _ = rustls::crypto::ring::default_provider().install_default();

    observability::init_tracing(config.log_format)?;

    info!("Starting provider-backblaze controller");
    info!(
        "Build info: datetime={}, git_hash={}",
        env!("BUILD_DATETIME"),
        env!("BUILD_GIT_HASH")
    );

    observability::metrics::register_metrics()?;

    let server_state = Arc::new(ServerState::default());
    let server_port = config.metrics_port;
    let server_state_for_server = Arc::clone(&server_state);
    tokio::spawn(async move {
        if let Err(e) = start_server(server_port, server_state_for_server).await {
            error!("HTTP server error: {}", e);
        }
    });

    let client = Client::try_default()
        .await
        .context("Failed to create Kubernetes client")?;

    let configs: Api<ProviderConfig> = Api::all(client.clone());
    let usages: Api<ProviderConfigUsage> = Api::all(client.clone());

    let reconciler = Arc::new(
        Reconciler::from_client(client.clone(), config)
            .context("Failed to create reconciler")?,
    );

    check_crds_installed(&configs).await;

    server_state.set_ready(true);
    info!("Controller initialized, starting watch loop...");

    Ok(InitializationResult {
        client,
        configs,
        usages,
        reconciler,
        server_state,
    })
}

/// Log whether the ProviderConfig CRD answers; the watch retries either way
async fn check_crds_installed(configs: &Api<ProviderConfig>) {
    match configs.list(&ListParams::default().limit(1)).await {
        Ok(_) => info!("ProviderConfig CRD is queryable"),
        Err(e) => {
            error!("ProviderConfig CRD is not queryable: {e}. Is the CRD installed?");
            warn!("Installation: crdgen | kubectl apply -f -");
        }
    }
}
