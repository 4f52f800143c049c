//! # Credential Map
//!
//! Decoded credentials document. Values are wiped when the map is dropped and
//! never appear in `Debug` output.

use crate::constants::{APPLICATION_KEY, APPLICATION_KEY_ID};
use std::collections::HashMap;
use std::fmt;
use zeroize::Zeroize;

#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialMap(HashMap<String, String>);

impl CredentialMap {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// The B2 application key ID, empty if absent
    #[must_use]
    pub fn application_key_id(&self) -> &str {
        self.get(APPLICATION_KEY_ID).unwrap_or_default()
    }

    /// The B2 application key, empty if absent
    #[must_use]
    pub fn application_key(&self) -> &str {
        self.get(APPLICATION_KEY).unwrap_or_default()
    }

    /// Keys that are absent or hold an empty value
    #[must_use]
    pub fn missing(&self, required: &[&'static str]) -> Vec<&'static str> {
        required
            .iter()
            .copied()
            .filter(|key| !matches!(self.get(key), Some(value) if !value.is_empty()))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<String, String>> for CredentialMap {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

impl fmt::Debug for CredentialMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.0.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("CredentialMap")
            .field("keys", &keys)
            .finish_non_exhaustive()
    }
}

impl Drop for CredentialMap {
    fn drop(&mut self) {
        for value in self.0.values_mut() {
            value.zeroize();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> CredentialMap {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect::<HashMap<_, _>>()
            .into()
    }

    #[test]
    fn test_missing_reports_absent_and_empty_keys() {
        let creds = map(&[("application_key_id", "abc"), ("application_key", "")]);
        assert_eq!(
            creds.missing(&["application_key_id", "application_key"]),
            vec!["application_key"]
        );

        let creds = map(&[("region", "us-west")]);
        assert_eq!(
            creds.missing(&["application_key_id", "application_key"]),
            vec!["application_key_id", "application_key"]
        );
    }

    #[test]
    fn test_debug_does_not_leak_values() {
        let creds = map(&[("application_key_id", "abc"), ("application_key", "s3cr3t")]);
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("application_key"));
        assert!(!rendered.contains("s3cr3t"));
    }
}
