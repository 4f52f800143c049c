//! # Backblaze B2 Provider Controller
//!
//! Reconciles Backblaze `ProviderConfig` resources: each pass extracts the
//! referenced credentials, checks them (optionally against the live B2 API)
//! and records the outcome as the `Ready` condition.
//!
//! ## Usage
//!
//! ```text
//! provider-backblaze                      # run the controller
//! provider-backblaze validate --file creds.json [--skip-live-check]
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use provider_backblaze::config::ControllerConfig;
use provider_backblaze::credentials::{B2AuthorizationProbe, CredentialValidator};
use provider_backblaze::runtime::{initialize, run_watch_loop};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use zeroize::Zeroizing;

#[derive(Parser, Debug)]
#[command(name = "provider-backblaze", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the ProviderConfig controller (default)
    Run,
    /// Check a local credentials document the way the controller would
    Validate {
        /// Path to a JSON document with application_key_id and application_key
        #[arg(long, short)]
        file: PathBuf,
        /// Only decode and check required keys; do not call Backblaze B2
        #[arg(long)]
        skip_live_check: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ControllerConfig::from_env();

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => {
            let init = initialize(config).await?;
            run_watch_loop(init.configs, init.usages, init.reconciler, init.server_state).await
        }
        Command::Validate {
            file,
            skip_live_check,
        } => validate(&file, !(skip_live_check || config.skip_live_check)).await,
    }
}

async fn validate(path: &Path, live_check: bool) -> Result<()> {
    let _ = rustls::crypto::ring::default_provider().install_default();

    let raw = Zeroizing::new(
        tokio::fs::read(path)
            .await
            .with_context(|| format!("cannot read credentials file {}", path.display()))?,
    );

    let probe = B2AuthorizationProbe::new().context("cannot build HTTP client")?;
    let validator = CredentialValidator::new(Arc::new(probe), live_check);

    let creds = validator
        .validate(&raw)
        .await
        .with_context(|| format!("{} is not usable", path.display()))?;

    println!(
        "{}: credentials for key {} are valid{}",
        path.display(),
        creds.application_key_id(),
        if live_check { "" } else { " (live check skipped)" }
    );
    Ok(())
}
