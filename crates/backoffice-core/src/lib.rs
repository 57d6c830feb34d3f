//! # Backoffice Core
//!
//! The synchronous logic behind the back-office dashboard.
//!
//! ## Components (leaf to root)
//!
//! - [`preferences::PreferenceStore`]: theme and feature flags, persisted
//!   through a [`storage::KeyValueStore`].
//! - [`access`]: decides whether a guarded unit renders or is replaced by the
//!   Access-Denied placeholder.
//! - [`form::FormEngine`]: linear multi-step form with per-step validation.
//! - [`session::SessionContext`]: the role established at login, read by the
//!   gate and by [`navigation`].
//!
//! [`context::AppContext`] composes all of them and is owned by the
//! application root. There are no globals.

pub mod access;
pub mod context;
pub mod features;
pub mod form;
pub mod navigation;
pub mod preferences;
pub mod primitives;
pub mod records;
pub mod role;
pub mod session;
pub mod storage;

pub use access::{AccessDenied, Gated, can_render, gate};
pub use context::AppContext;
pub use features::{Feature, FeatureFlags};
pub use form::{
    FieldDefinition, FieldValue, FormEngine, FormRecord, FormSchema, Position, Rule, Step,
    Transition, ValidationErrors, merchant_onboarding,
};
pub use navigation::{MenuEntry, visible_entries};
pub use preferences::{DocumentState, PreferenceStore, Theme};
pub use records::{Merchant, MerchantRegistry, Ticket, TicketLog, TicketStatus};
pub use role::Role;
pub use session::{LoginRequest, SessionContext, SignupRequest};
pub use storage::{KeyValueStore, MemoryStore, RedbStore};

use thiserror::Error;

// =============================================================================
// ERROR TYPE
// =============================================================================

/// Errors raised by the core.
///
/// Validation problems are values, not failures: they only surface here when
/// an operation that must be atomic (login, signup, submit) is rejected.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The backing key-value store failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// A persisted value could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A field's pattern rule does not compile.
    #[error("invalid pattern for field '{field}': {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    /// A form schema violates a structural requirement.
    #[error("invalid form schema: {0}")]
    InvalidSchema(String),

    /// Login or signup input was rejected.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(ValidationErrors),

    /// The current role may not perform the action.
    #[error("permission denied: {action} requires the admin role")]
    PermissionDenied { action: String },

    /// `submit` was called away from the review step.
    #[error("form can only be submitted from the review step")]
    NotOnReviewStep,

    /// `submit` found invalid fields.
    #[error("form validation failed: {0}")]
    ValidationFailed(ValidationErrors),

    /// No ticket carries the given id.
    #[error("unknown ticket: {0}")]
    UnknownTicket(String),
}

/// Result alias used throughout the core.
pub type Result<T> = std::result::Result<T, CoreError>;
