//! # Preference Store
//!
//! Theme and feature flags, loaded from and written through to a
//! [`KeyValueStore`].
//!
//! The store is an explicit value owned by the application root (see
//! [`crate::context::AppContext`]). There is a single writer, so no locking
//! is involved: every mutation persists before it becomes visible.

use crate::features::FeatureFlags;
use crate::primitives::{DEFAULT_THEME, SETTINGS_KEY, THEME_ATTRIBUTE, THEME_KEY, THEME_NAMES};
use crate::storage::KeyValueStore;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// THEME
// =============================================================================

/// Visual theme of the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Idfc,
    Nubank,
    Rbl,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parse(DEFAULT_THEME).unwrap_or(Self::Idfc)
    }
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Idfc, Theme::Nubank, Theme::Rbl];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idfc => THEME_NAMES[0],
            Self::Nubank => THEME_NAMES[1],
            Self::Rbl => THEME_NAMES[2],
        }
    }

    /// Exact-name lookup.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|theme| theme.as_str() == name)
    }

    /// Name as shown in the theme picker ("Nubank").
    #[must_use]
    pub fn display_name(self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// DOCUMENT STATE
// =============================================================================

/// Document-level attributes read by theme-dependent consumers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentState {
    attributes: BTreeMap<String, String>,
}

impl DocumentState {
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_owned(), value.to_owned());
    }

    /// Shortcut for the `data-theme` attribute.
    #[must_use]
    pub fn theme(&self) -> Option<&str> {
        self.attribute(THEME_ATTRIBUTE)
    }
}

// =============================================================================
// PREFERENCE STORE
// =============================================================================

/// Persisted UI preferences.
#[derive(Debug)]
pub struct PreferenceStore<S: KeyValueStore> {
    store: S,
    flags: FeatureFlags,
    theme: Theme,
    document: DocumentState,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    /// Load preferences from `store`, falling back to defaults for anything
    /// missing or unreadable.
    pub fn open(store: S) -> Result<Self> {
        let theme = match store.get(THEME_KEY)? {
            Some(raw) => Theme::parse(&raw).unwrap_or_else(|| {
                tracing::warn!(stored = %raw, "unknown persisted theme, using default");
                Theme::default()
            }),
            None => Theme::default(),
        };

        let flags = store
            .get(SETTINGS_KEY)?
            .map(|raw| FeatureFlags::from_json(&raw))
            .unwrap_or_default();

        let mut document = DocumentState::default();
        document.set_attribute(THEME_ATTRIBUTE, theme.as_str());

        tracing::debug!(theme = %theme, "preferences loaded");
        Ok(Self {
            store,
            flags,
            theme,
            document,
        })
    }

    // -------------------------------------------------------------------------
    // Feature flags
    // -------------------------------------------------------------------------

    /// Enabled state of a feature; unknown names are disabled.
    #[must_use]
    pub fn get_flag(&self, name: &str) -> bool {
        self.flags.get(name)
    }

    /// Set a feature's state and persist the whole mapping.
    ///
    /// Returns `Ok(false)` without touching storage if `name` is unknown.
    pub fn set_flag(&mut self, name: &str, value: bool) -> Result<bool> {
        let mut next = self.flags.clone();
        if !next.set(name, value) {
            tracing::debug!(name, "ignoring unknown feature flag");
            return Ok(false);
        }
        self.commit_flags(next)?;
        Ok(true)
    }

    /// Flip a feature's state and persist, returning the new value.
    pub fn toggle_flag(&mut self, name: &str) -> Result<Option<bool>> {
        let mut next = self.flags.clone();
        let Some(enabled) = next.toggle(name) else {
            return Ok(None);
        };
        self.commit_flags(next)?;
        Ok(Some(enabled))
    }

    fn commit_flags(&mut self, next: FeatureFlags) -> Result<()> {
        self.store.set(SETTINGS_KEY, &next.to_json()?)?;
        self.flags = next;
        Ok(())
    }

    #[must_use]
    pub fn flags(&self) -> &FeatureFlags {
        &self.flags
    }

    // -------------------------------------------------------------------------
    // Theme
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn get_theme(&self) -> Theme {
        self.theme
    }

    /// Switch theme, persist it and update the `data-theme` attribute.
    ///
    /// Returns `Ok(false)` for an unknown theme name.
    pub fn set_theme(&mut self, name: &str) -> Result<bool> {
        let Some(theme) = Theme::parse(name) else {
            tracing::debug!(name, "ignoring unknown theme");
            return Ok(false);
        };
        self.store.set(THEME_KEY, theme.as_str())?;
        self.theme = theme;
        self.document.set_attribute(THEME_ATTRIBUTE, theme.as_str());
        Ok(true)
    }

    #[must_use]
    pub fn document(&self) -> &DocumentState {
        &self.document
    }

    // -------------------------------------------------------------------------
    // Backing store access
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Give the backing store back, e.g. to reopen it.
    pub fn into_store(self) -> S {
        self.store
    }
}

// =============================================================================
// TESTS
// =============================================================================
