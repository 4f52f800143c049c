//! # ProviderConfig Status
//!
//! Status types for reporting credential availability.
//!
//! A `ProviderConfig` carries a single `Ready` condition. `Available` means the
//! credentials passed every check the controller is configured to run;
//! `Unavailable` always carries the reason as the condition message.

use serde::{Deserialize, Serialize};

/// Condition type written by the controller
pub const READY_CONDITION: &str = "Ready";

/// Reason used when the credentials are usable
pub const REASON_AVAILABLE: &str = "Available";

/// Reason used when the credentials are not usable
pub const REASON_UNAVAILABLE: &str = "Unavailable";

/// Status of the ProviderConfig resource
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfigStatus {
    /// Conditions represent the latest available observations
    #[serde(default)]
    pub conditions: Vec<Condition>,
    /// Generation of the spec the conditions were computed from
    #[serde(default)]
    pub observed_generation: Option<i64>,
}

/// Condition represents a condition of a resource
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Type of condition
    pub r#type: String,
    /// Status of the condition (True, False, Unknown)
    pub status: String,
    /// Last transition time
    #[serde(default)]
    pub last_transition_time: Option<String>,
    /// Reason for the condition
    #[serde(default)]
    pub reason: Option<String>,
    /// Message describing the condition
    #[serde(default)]
    pub message: Option<String>,
}

impl Condition {
    /// Same observation, ignoring when it was made
    #[must_use]
    pub fn equivalent(&self, other: &Condition) -> bool {
        self.r#type == other.r#type
            && self.status == other.status
            && self.reason == other.reason
            && self.message == other.message
    }
}

/// Outcome of a credential check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Available,
    Unavailable(String),
}

impl Availability {
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available)
    }

    /// Render as the `Ready` condition, stamped with the current time
    #[must_use]
    pub fn to_condition(&self) -> Condition {
        let (status, reason, message) = match self {
            Availability::Available => ("True", REASON_AVAILABLE, None),
            Availability::Unavailable(message) => {
                ("False", REASON_UNAVAILABLE, Some(message.clone()))
            }
        };
        Condition {
            r#type: READY_CONDITION.to_string(),
            status: status.to_string(),
            last_transition_time: Some(chrono::Utc::now().to_rfc3339()),
            reason: Some(reason.to_string()),
            message,
        }
    }
}

impl ProviderConfigStatus {
    /// Set a condition, replacing any condition of the same type.
    ///
    /// An equivalent existing condition is kept as-is, so its
    /// `lastTransitionTime` only moves when the observation changes.
    pub fn set_condition(&mut self, condition: Condition) {
        match self
            .conditions
            .iter_mut()
            .find(|existing| existing.r#type == condition.r#type)
        {
            Some(existing) if existing.equivalent(&condition) => {}
            Some(existing) => *existing = condition,
            None => self.conditions.push(condition),
        }
    }

    /// Read the availability back from the `Ready` condition
    #[must_use]
    pub fn availability(&self) -> Option<Availability> {
        let ready = self
            .conditions
            .iter()
            .find(|c| c.r#type == READY_CONDITION)?;
        if ready.status == "True" {
            Some(Availability::Available)
        } else {
            Some(Availability::Unavailable(
                ready.message.clone().unwrap_or_default(),
            ))
        }
    }
}
