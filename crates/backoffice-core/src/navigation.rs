//! # Navigation
//!
//! The fixed sidebar menu and its role filter.
//!
//! Filtering is plain set membership on each entry's declared roles: no
//! inheritance, no wildcards. An entry's guard feature never hides the entry;
//! it only decides (through [`crate::access`]) whether the content behind it
//! is replaced by the Access-Denied placeholder.

use crate::features::Feature;
use crate::role::Role;
use serde::Serialize;

/// One sidebar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MenuEntry {
    Dashboard,
    Clients,
    Transactions,
    History,
    Tickets,
    Documents,
    DocVerification,
    Settings,
}

impl MenuEntry {
    /// Every entry in display order.
    pub const ALL: [MenuEntry; 8] = [
        MenuEntry::Dashboard,
        MenuEntry::Clients,
        MenuEntry::Transactions,
        MenuEntry::History,
        MenuEntry::Tickets,
        MenuEntry::Documents,
        MenuEntry::DocVerification,
        MenuEntry::Settings,
    ];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Clients => "Clients",
            Self::Transactions => "Transactions",
            Self::History => "History",
            Self::Tickets => "Tickets",
            Self::Documents => "Documents",
            Self::DocVerification => "Doc Verification",
            Self::Settings => "Settings",
        }
    }

    #[must_use]
    pub fn route(self) -> &'static str {
        match self {
            Self::Dashboard => "/home",
            Self::Clients => "/clients",
            Self::Transactions => "/transactions",
            Self::History => "/history",
            Self::Tickets => "/tickets",
            Self::Documents => "/documents",
            Self::DocVerification => "/doc-verification",
            Self::Settings => "/settings",
        }
    }

    /// Roles allowed to see this entry.
    #[must_use]
    pub fn roles(self) -> &'static [Role] {
        const BOTH: &[Role] = &[Role::User, Role::Admin];
        const ADMIN: &[Role] = &[Role::Admin];
        const USER: &[Role] = &[Role::User];
        match self {
            Self::Clients | Self::DocVerification => ADMIN,
            Self::Documents => USER,
            Self::Dashboard
            | Self::Transactions
            | Self::History
            | Self::Tickets
            | Self::Settings => BOTH,
        }
    }

    /// Feature flag guarding the entry's content, if any.
    #[must_use]
    pub fn guard(self) -> Option<Feature> {
        match self {
            Self::Transactions => Some(Feature::Transactions),
            Self::Documents | Self::DocVerification => Some(Feature::Documents),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_visible_to(self, role: Role) -> bool {
        self.roles().contains(&role)
    }
}

/// Entries visible to `role`, in menu order.
#[must_use]
pub fn visible_entries(role: Role) -> Vec<MenuEntry> {
    MenuEntry::ALL
        .into_iter()
        .filter(|entry| entry.is_visible_to(role))
        .collect()
}
