//! # Configuration
//!
//! Controller configuration loaded from the environment at startup.

mod controller;

pub use controller::{ControllerConfig, LogFormat};
