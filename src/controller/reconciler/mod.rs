//! # Reconciler
//!
//! Keeps each `ProviderConfig`'s `Ready` condition in line with whether its
//! credentials can be used.
//!
//! ## Module Structure
//!
//! - `types.rs` - Reconciler context, error and pass outcome
//! - `reconcile.rs` - The reconcile pass and controller entry point

mod reconcile;
mod types;

pub use reconcile::reconcile;
pub use types::{PassOutcome, Reconciler, ReconcilerError};
