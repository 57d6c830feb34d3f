//! # Role
//!
//! Coarse-grained permission class, set once at login.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two roles the dashboard knows about.
///
/// `User` is the default and the most restrictive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// All roles, in declaration order.
    pub const ALL: [Role; 2] = [Role::User, Role::Admin];

    /// Persisted string form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    /// Strict parse; `None` for anything but the two exact spellings.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "user" => Some(Self::User),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Interpret a stored role value.
    ///
    /// Missing or malformed values resolve to [`Role::User`]; a session is
    /// never elevated by accident.
    #[must_use]
    pub fn from_stored(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => Self::User,
            Some(value) => Self::parse(value).unwrap_or_else(|| {
                tracing::warn!(stored = value, "malformed role value, treating as user");
                Self::User
            }),
        }
    }

    #[must_use]
    pub fn is_admin(self) -> bool {
        self == Self::Admin
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
