//! # Error Policy
//!
//! Requeue policy for failed reconcile passes. A failed pass is retried
//! after a fixed delay; there is no retry inside the pass itself.

use crate::controller::reconciler::{Reconciler, ReconcilerError};
use crate::crd::ProviderConfig;
use crate::observability;
use kube::ResourceExt;
use kube_runtime::controller::Action;
use std::sync::Arc;
use tracing::error;

/// Count the failure and requeue after `RECONCILIATION_ERROR_REQUEUE_SECS`
pub fn handle_reconciliation_error(
    obj: Arc<ProviderConfig>,
    error: &ReconcilerError,
    ctx: Arc<Reconciler>,
) -> Action {
    let requeue = ctx.config.reconciliation_error_requeue_duration();

    error!(
        provider_config.name = %obj.name_any(),
        error = %error,
        requeue_secs = requeue.as_secs(),
        "Reconciliation error"
    );
    observability::metrics::increment_reconciliation_errors();

    Action::requeue(requeue)
}
