//! # Controller
//!
//! Core controller modules for the Backblaze provider.
//!
//! - `reconciler`: ProviderConfig credential reconciliation
//! - `server`: HTTP server for metrics and health checks

pub mod reconciler;
pub mod server;
