//! # Feature Flags
//!
//! The fixed set of gated features and their enabled state.
//!
//! Flags are established at design time. Lookups of unknown names fail
//! closed and writes to unknown names are ignored, so the mapping can never
//! grow keys at runtime.

use crate::primitives::DEFAULT_FLAG_STATE;
use crate::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// FEATURE
// =============================================================================

/// A gated functional area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Notifications,
    Documents,
    Transactions,
}

impl Feature {
    /// Every feature, in settings-page order.
    pub const ALL: [Feature; 3] = [
        Feature::Notifications,
        Feature::Documents,
        Feature::Transactions,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Notifications => "notifications",
            Self::Documents => "documents",
            Self::Transactions => "transactions",
        }
    }

    /// Exact-name lookup; `None` for anything outside the fixed set.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|feature| feature.as_str() == name)
    }

    /// Short description shown next to the admin toggle.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Notifications => "Toggle user notification access",
            Self::Documents => "Manage document feature visibility",
            Self::Transactions => "Control transaction feature access",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// FEATURE FLAGS
// =============================================================================

/// Enabled state per feature.
///
/// Always holds exactly one entry per [`Feature`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureFlags {
    flags: BTreeMap<Feature, bool>,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            flags: Feature::ALL
                .into_iter()
                .map(|feature| (feature, DEFAULT_FLAG_STATE))
                .collect(),
        }
    }
}

impl FeatureFlags {
    /// Flags with every feature at its default state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of a feature. Unknown names read as disabled.
    #[must_use]
    pub fn get(&self, name: &str) -> bool {
        Feature::parse(name).is_some_and(|feature| self.is_enabled(feature))
    }

    /// Typed lookup.
    #[must_use]
    pub fn is_enabled(&self, feature: Feature) -> bool {
        self.flags.get(&feature).copied().unwrap_or(false)
    }

    /// Set a feature's state.
    ///
    /// Returns `false` (and changes nothing) if `name` is not a known feature.
    pub fn set(&mut self, name: &str, value: bool) -> bool {
        match Feature::parse(name) {
            Some(feature) => {
                self.flags.insert(feature, value);
                true
            }
            None => false,
        }
    }

    /// Flip a feature's state, returning the new value.
    pub fn toggle(&mut self, name: &str) -> Option<bool> {
        let feature = Feature::parse(name)?;
        let next = !self.is_enabled(feature);
        self.flags.insert(feature, next);
        Some(next)
    }

    /// All flags in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = (Feature, bool)> + '_ {
        self.flags.iter().map(|(feature, enabled)| (*feature, *enabled))
    }

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------

    /// Encode as a JSON object keyed by feature name.
    pub fn to_json(&self) -> Result<String> {
        let named: BTreeMap<&str, bool> = self
            .iter()
            .map(|(feature, enabled)| (feature.as_str(), enabled))
            .collect();
        serde_json::to_string(&named).map_err(|e| CoreError::Serialization(e.to_string()))
    }

    /// Decode a persisted blob.
    ///
    /// Unknown keys are dropped and missing keys keep their defaults. A blob
    /// that is not a JSON object of booleans yields the defaults.
    #[must_use]
    pub fn from_json(raw: &str) -> Self {
        let mut flags = Self::default();
        match serde_json::from_str::<BTreeMap<String, bool>>(raw) {
            Ok(named) => {
                for (name, enabled) in named {
                    if !flags.set(&name, enabled) {
                        tracing::debug!(name = %name, "ignoring unknown persisted feature flag");
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "unreadable feature flags, using defaults");
            }
        }
        flags
    }
}

// =============================================================================
// TESTS
// =============================================================================
