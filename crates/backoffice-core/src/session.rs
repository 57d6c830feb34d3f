//! # Session / Role Context
//!
//! The role chosen at login, persisted under `userRole`, plus the
//! authentication marker under `isAuthenticated`.
//!
//! The role is set once per login and is read-only afterwards. Whatever is
//! persisted, a session never resolves to a role above `user` unless the
//! stored value is exactly `admin`.

use crate::form::ValidationErrors;
use crate::primitives::{
    ADMIN_EMAIL_MARKER, AUTHENTICATED_KEY, EMAIL_PATTERN, MIN_PASSWORD_LEN, ROLE_KEY,
};
use crate::role::Role;
use crate::storage::KeyValueStore;
use crate::{CoreError, Result};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static EMAIL: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(EMAIL_PATTERN).ok());

// =============================================================================
// REQUESTS
// =============================================================================

/// Input of the login form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Role picked in the "Login As" selector.
    pub role: String,
}

/// Input of the signup form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

fn check_email(errors: &mut ValidationErrors, email: &str) {
    if email.is_empty() {
        errors.insert("email", "Email is required");
    } else if !EMAIL.as_ref().is_some_and(|re| re.is_match(email)) {
        errors.insert("email", "Invalid email address");
    }
}

fn check_password(errors: &mut ValidationErrors, password: &str) {
    if password.is_empty() {
        errors.insert("password", "Password is required");
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.insert(
            "password",
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        );
    }
}

impl LoginRequest {
    /// Field-level problems with this request, plus the role it asks for.
    pub fn validate(&self) -> std::result::Result<Role, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_email(&mut errors, &self.email);
        check_password(&mut errors, &self.password);

        let role = match self.role.as_str() {
            "" => {
                errors.insert("role", "Please select a role");
                Role::User
            }
            raw => Role::from_stored(Some(raw)),
        };
        if role.is_admin() && !self.email.contains(ADMIN_EMAIL_MARKER) {
            errors.insert("email", "Invalid email for admin role.");
        }

        if errors.is_empty() { Ok(role) } else { Err(errors) }
    }
}

impl SignupRequest {
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.name.is_empty() {
            errors.insert("name", "Name is required");
        }
        check_email(&mut errors, &self.email);
        check_password(&mut errors, &self.password);
        if self.confirm_password.is_empty() {
            errors.insert("confirmPassword", "Confirm Password is required");
        } else if self.confirm_password != self.password {
            errors.insert("confirmPassword", "Passwords must match");
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

// =============================================================================
// SESSION CONTEXT
// =============================================================================

/// Who is using the dashboard right now.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionContext {
    role: Role,
    authenticated: bool,
}

impl SessionContext {
    /// Anonymous session: unauthenticated, treated as `user`.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Rebuild the session from persisted keys.
    ///
    /// A stored role only counts while the authentication marker is set.
    pub fn restore(store: &impl KeyValueStore) -> Result<Self> {
        let authenticated = store.get(AUTHENTICATED_KEY)?.as_deref() == Some("true");
        let role = if authenticated {
            Role::from_stored(store.get(ROLE_KEY)?.as_deref())
        } else {
            Role::User
        };
        Ok(Self {
            role,
            authenticated,
        })
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Validate credentials and start a session with the requested role.
    ///
    /// Nothing is persisted when validation fails.
    pub fn login(&mut self, store: &mut impl KeyValueStore, request: &LoginRequest) -> Result<Role> {
        let role = request.validate().map_err(CoreError::InvalidCredentials)?;
        self.establish(store, role)?;
        tracing::info!(role = %role, "logged in");
        Ok(role)
    }

    /// Register a new account. New accounts are always `user`.
    pub fn signup(&mut self, store: &mut impl KeyValueStore, request: &SignupRequest) -> Result<Role> {
        request.validate().map_err(CoreError::InvalidCredentials)?;
        self.establish(store, Role::User)?;
        tracing::info!("signed up");
        Ok(Role::User)
    }

    /// End the session and forget the persisted role.
    pub fn logout(&mut self, store: &mut impl KeyValueStore) -> Result<()> {
        store.remove(ROLE_KEY)?;
        store.remove(AUTHENTICATED_KEY)?;
        *self = Self::anonymous();
        tracing::info!("logged out");
        Ok(())
    }

    /// Persist the role, then the authentication marker. The marker is never
    /// written unless the role write succeeded.
    fn establish(&mut self, store: &mut impl KeyValueStore, role: Role) -> Result<()> {
        store.set_many(&[(ROLE_KEY, role.as_str()), (AUTHENTICATED_KEY, "true")])?;
        self.role = role;
        self.authenticated = true;
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
