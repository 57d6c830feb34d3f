//! # Access Gate
//!
//! Decides whether a guarded unit renders its content or the fixed
//! Access-Denied placeholder.
//!
//! Admins bypass feature gating entirely. Everyone else sees a unit only
//! while its feature flag is enabled. The gate never blocks navigation to a
//! route; it only swaps the content rendered inside it.

use crate::features::FeatureFlags;
use crate::role::Role;
use serde::Serialize;

// =============================================================================
// ACCESS DENIED PLACEHOLDER
// =============================================================================

/// Placeholder rendered in place of gated content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessDenied {
    /// Feature whose flag blocked the render.
    pub feature: String,
}

impl AccessDenied {
    pub const TITLE: &'static str = "Access Denied";
    pub const MESSAGE: &'static str = "You don't have permission to access this feature. \
         It has been disabled by the administrator.";
    pub const CODE: u16 = 403;

    #[must_use]
    pub fn new(feature: impl Into<String>) -> Self {
        Self {
            feature: feature.into(),
        }
    }

    /// Plain-text rendering of the placeholder.
    #[must_use]
    pub fn to_text(&self) -> String {
        format!(
            "Error {} | {}\n{}\n(feature: {})",
            Self::CODE,
            Self::TITLE,
            Self::MESSAGE,
            self.feature
        )
    }
}

// =============================================================================
// GATED
// =============================================================================

/// Result of passing content through the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gated<T> {
    Granted(T),
    Denied(AccessDenied),
}

impl<T> Gated<T> {
    #[must_use]
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted(_))
    }

    /// The rendered content, if access was granted.
    pub fn granted(self) -> Option<T> {
        match self {
            Self::Granted(content) => Some(content),
            Self::Denied(_) => None,
        }
    }

    /// Collapse both arms into one type.
    pub fn unwrap_or_else(self, on_denied: impl FnOnce(AccessDenied) -> T) -> T {
        match self {
            Self::Granted(content) => content,
            Self::Denied(denied) => on_denied(denied),
        }
    }
}

// =============================================================================
// GATE
// =============================================================================

/// Visibility decision for one guarded unit.
#[must_use]
pub fn can_render(role: Role, feature: &str, flags: &FeatureFlags) -> bool {
    role.is_admin() || flags.get(feature)
}

/// Render `render` if the gate allows it, otherwise produce the placeholder.
///
/// `render` is not invoked on denial.
pub fn gate<T>(
    role: Role,
    feature: &str,
    flags: &FeatureFlags,
    render: impl FnOnce() -> T,
) -> Gated<T> {
    if can_render(role, feature, flags) {
        Gated::Granted(render())
    } else {
        tracing::info!(feature, role = %role, "access attempt denied");
        Gated::Denied(AccessDenied::new(feature))
    }
}

// =============================================================================
// TESTS
// =============================================================================
