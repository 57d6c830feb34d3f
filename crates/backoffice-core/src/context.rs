//! # Application Context
//!
//! The root-owned object every view reads from. It bundles the preference
//! store, the session and the in-memory collections so callers pass one
//! explicit value around instead of reaching for globals.

use crate::access::{self, Gated};
use crate::features::Feature;
use crate::form::{FormEngine, merchant_onboarding};
use crate::navigation::{self, MenuEntry};
use crate::preferences::{PreferenceStore, Theme};
use crate::records::{MerchantRegistry, TicketLog};
use crate::role::Role;
use crate::session::{LoginRequest, SessionContext, SignupRequest};
use crate::storage::KeyValueStore;
use crate::{CoreError, Result};

/// Everything the dashboard shell needs, owned in one place.
#[derive(Debug)]
pub struct AppContext<S: KeyValueStore> {
    preferences: PreferenceStore<S>,
    session: SessionContext,
    merchants: MerchantRegistry,
    tickets: TicketLog,
}

impl<S: KeyValueStore> AppContext<S> {
    /// Load preferences and restore the persisted session.
    pub fn open(store: S) -> Result<Self> {
        let session = SessionContext::restore(&store)?;
        let preferences = PreferenceStore::open(store)?;
        Ok(Self {
            preferences,
            session,
            merchants: MerchantRegistry::new(),
            tickets: TicketLog::new(),
        })
    }

    #[must_use]
    pub fn preferences(&self) -> &PreferenceStore<S> {
        &self.preferences
    }

    #[must_use]
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.session.role()
    }

    /// Release the backing store.
    pub fn into_store(self) -> S {
        self.preferences.into_store()
    }

    // -------------------------------------------------------------------------
    // Session
    // -------------------------------------------------------------------------

    pub fn login(&mut self, request: &LoginRequest) -> Result<Role> {
        self.session.login(self.preferences.store_mut(), request)
    }

    pub fn signup(&mut self, request: &SignupRequest) -> Result<Role> {
        self.session.signup(self.preferences.store_mut(), request)
    }

    pub fn logout(&mut self) -> Result<()> {
        self.session.logout(self.preferences.store_mut())
    }

    // -------------------------------------------------------------------------
    // Gating & navigation
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn can_render(&self, feature: &str) -> bool {
        access::can_render(self.role(), feature, self.preferences.flags())
    }

    pub fn gate<T>(&self, feature: &str, render: impl FnOnce() -> T) -> Gated<T> {
        access::gate(self.role(), feature, self.preferences.flags(), render)
    }

    /// Menu entries for the current role, each with whether its content is
    /// currently viewable.
    #[must_use]
    pub fn visible_menu(&self) -> Vec<(MenuEntry, bool)> {
        navigation::visible_entries(self.role())
            .into_iter()
            .map(|entry| {
                let viewable = entry
                    .guard()
                    .is_none_or(|feature| self.can_render(feature.as_str()));
                (entry, viewable)
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Preferences
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.preferences.get_theme()
    }

    pub fn set_theme(&mut self, name: &str) -> Result<bool> {
        self.preferences.set_theme(name)
    }

    /// Admin settings toggle. Returns the new state, `None` for unknown names.
    pub fn toggle_feature(&mut self, name: &str) -> Result<Option<bool>> {
        if !self.role().is_admin() {
            return Err(CoreError::PermissionDenied {
                action: format!("toggling feature '{name}'"),
            });
        }
        let toggled = self.preferences.toggle_flag(name)?;
        if let Some(enabled) = toggled {
            tracing::info!(feature = name, enabled, "feature toggled");
        }
        Ok(toggled)
    }

    /// Current state of every feature flag.
    pub fn features(&self) -> impl Iterator<Item = (Feature, bool)> + '_ {
        self.preferences.flags().iter()
    }

    // -------------------------------------------------------------------------
    // Merchants & tickets
    // -------------------------------------------------------------------------

    /// A fresh merchant onboarding form.
    pub fn onboarding(&self) -> Result<FormEngine> {
        Ok(FormEngine::new(merchant_onboarding()?))
    }

    /// Submit an onboarding form and register the merchant.
    ///
    /// Returns the new merchant id. On validation failure nothing is
    /// registered and the engine keeps its values and errors.
    pub fn complete_onboarding(&mut self, form: &mut FormEngine) -> Result<String> {
        let record = form.submit()?;
        Ok(self.merchants.add(record))
    }

    #[must_use]
    pub fn merchants(&self) -> &MerchantRegistry {
        &self.merchants
    }

    pub fn raise_ticket(&mut self, issue: impl Into<String>) -> String {
        self.tickets.raise(issue)
    }

    pub fn resolve_ticket(&mut self, id: &str) -> Result<()> {
        self.tickets.resolve(id)
    }

    #[must_use]
    pub fn tickets(&self) -> &TicketLog {
        &self.tickets
    }
}

// =============================================================================
// TESTS
// =============================================================================
