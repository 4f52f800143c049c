//! Backblaze B2 Provider Library
//!
//! Kubernetes controller that keeps each Backblaze `ProviderConfig`'s `Ready`
//! condition in line with whether its credentials work, and builds the
//! per-operation setup handed to the Terraform Backblaze provider.
//!
//! ## Quick Start
//!
//! ```rust
//! use provider_backblaze::prelude::*;
//! ```
//!
//! This brings commonly used types and traits into scope. For more specific imports,
//! use the individual modules.

pub mod client;
pub mod config;
pub mod constants;
pub mod controller;
pub mod crd;
pub mod credentials;
pub mod observability;
pub mod prelude;
pub mod runtime;
pub mod setup;
