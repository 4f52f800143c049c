//! # Credentials
//!
//! Extraction and validation of Backblaze B2 credentials, shared by the
//! ProviderConfig reconciler and provider setups.
//!
//! - `extractor`: descriptor to raw bytes (Secret, environment, filesystem)
//! - `validator`: decode, required keys, optional live check
//! - `probe`: the B2 `b2_authorize_account` live check
//! - `map`: decoded credentials document
//! - `error`: credential error taxonomy

mod error;
mod extractor;
mod map;
mod probe;
mod validator;

pub use error::{CredentialError, ProbeError};
pub use extractor::{CommonCredentialExtractor, CredentialExtractor, KubeSecretReader, SecretReader};
pub use map::CredentialMap;
pub use probe::{AuthorizationProbe, B2AuthorizationProbe};
pub use validator::{CredentialValidator, REQUIRED_KEYS};
