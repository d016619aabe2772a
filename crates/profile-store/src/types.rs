use crate::error::{Result, StoreError};
use crate::phone::normalize_phone;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch
#[must_use]
pub fn unix_now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

/// A farmer profile, keyed by `user_id`.
///
/// Field names serialize in camelCase, which is also the shape of the cloud
/// document. Everything apart from the identity keys and timestamps is opaque
/// to the sync layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Stable external identity; never changes once assigned
    #[serde(default)]
    pub user_id: String,

    /// Secondary lookup key, compared in normalized form
    #[serde(default)]
    pub phone_number: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub village: String,

    #[serde(default)]
    pub district: String,

    #[serde(default)]
    pub state: String,

    /// Crops the farmer grows, in preference order
    #[serde(default)]
    pub crops: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub land_acres: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_language: Option<String>,

    /// Creation time (ms since epoch)
    #[serde(default)]
    pub created_at: u64,

    /// Last local edit (ms since epoch); stamped by the edit flow only
    #[serde(default)]
    pub last_updated: u64,
}

impl Profile {
    /// Create a profile with both timestamps set to now
    #[must_use]
    pub fn new(user_id: impl Into<String>, phone_number: impl Into<String>) -> Self {
        let now = unix_now_ms();
        Self {
            user_id: user_id.into(),
            phone_number: phone_number.into(),
            created_at: now,
            last_updated: now,
            ..Default::default()
        }
    }

    /// Canonical digits of the phone number, if any
    #[must_use]
    pub fn normalized_phone(&self) -> Option<String> {
        normalize_phone(&self.phone_number)
    }

    /// Stamp `last_updated` with the current time. The stamp never moves
    /// backwards, even if the wall clock does.
    pub fn touch(&mut self) {
        self.last_updated = unix_now_ms().max(self.last_updated);
    }

    /// Check the identity keys a store relies on
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(StoreError::invalid("user_id must not be empty"));
        }
        if self.normalized_phone().is_none() {
            return Err(StoreError::invalid(format!(
                "phone number '{}' has no digits",
                self.phone_number
            )));
        }
        Ok(())
    }

    /// Equality that ignores `last_updated`
    #[must_use]
    pub fn same_content(&self, other: &Self) -> bool {
        let mut a = self.clone();
        a.last_updated = other.last_updated;
        &a == other
    }
}
