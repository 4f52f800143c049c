//! # Reconcile
//!
//! One pass over a `ProviderConfig`:
//!
//! 1. Fetch by name (absent: done, nothing written)
//! 2. Extract the credentials document from its source
//! 3. Validate it (decode, required keys, live check unless disabled)
//! 4. Write the `Ready` condition with a single status update
//!
//! Failures in steps 2 and 3 become an `Unavailable` condition. Fetch and
//! status-write failures are returned so the controller requeues the object.

use crate::controller::reconciler::types::{PassOutcome, Reconciler, ReconcilerError};
use crate::credentials::CredentialError;
use crate::crd::{Availability, ProviderConfig};
use crate::observability;
use kube::ResourceExt;
use kube_runtime::controller::Action;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, info_span, warn, Instrument};

impl Reconciler {
    /// Run one reconcile pass for the named config
    ///
    /// # Errors
    ///
    /// `Fetch` when the lookup fails for a reason other than not-found,
    /// `StatusWrite` when the status update is rejected.
    pub async fn reconcile_pass(&self, name: &str) -> Result<PassOutcome, ReconcilerError> {
        let fetched = self
            .store
            .get(name)
            .await
            .map_err(|source| ReconcilerError::Fetch {
                name: name.to_string(),
                source,
            })?;
        let Some(mut config) = fetched else {
            debug!("ProviderConfig no longer exists, nothing to do");
            observability::metrics::forget_provider_config(name);
            return Ok(PassOutcome::Deleted);
        };

        let availability = match self.check_credentials(&config).await {
            Ok(()) => Availability::Available,
            Err(e) => {
                warn!(error.kind = e.kind(), "Credentials unavailable: {e}");
                Availability::Unavailable(e.to_string())
            }
        };

        let generation = config.metadata.generation;
        let status = config.status.get_or_insert_with(Default::default);
        status.set_condition(availability.to_condition());
        status.observed_generation = generation;

        self.store
            .update_status(&config)
            .await
            .map_err(|source| ReconcilerError::StatusWrite {
                name: name.to_string(),
                source,
            })?;

        observability::metrics::set_provider_config_available(name, availability.is_available());
        Ok(PassOutcome::Checked(availability))
    }

    async fn check_credentials(&self, config: &ProviderConfig) -> Result<(), CredentialError> {
        let raw = self.extractor.extract(&config.spec.credentials).await?;
        self.validator.validate(&raw).await?;
        Ok(())
    }
}

/// Controller entry point; requeues after the resync interval on success
///
/// # Errors
///
/// Propagates [`ReconcilerError`] to the error policy.
pub async fn reconcile(
    obj: Arc<ProviderConfig>,
    ctx: Arc<Reconciler>,
) -> Result<Action, ReconcilerError> {
    let name = obj.name_any();
    let span = info_span!(
        "reconcile",
        provider_config.name = %name,
        resource.generation = obj.metadata.generation.unwrap_or(0),
    );

    async move {
        observability::metrics::increment_reconciliations();
        let start = Instant::now();
        let result = ctx.reconcile_pass(&name).await;
        observability::metrics::observe_reconciliation_duration(start.elapsed().as_secs_f64());

        match result? {
            PassOutcome::Deleted => Ok(Action::await_change()),
            PassOutcome::Checked(Availability::Available) => {
                info!("ProviderConfig credentials available");
                Ok(Action::requeue(ctx.config.resync_interval()))
            }
            PassOutcome::Checked(Availability::Unavailable(reason)) => {
                info!(reason = %reason, "ProviderConfig credentials unavailable");
                Ok(Action::requeue(ctx.config.resync_interval()))
            }
        }
    }
    .instrument(span)
    .await
}
