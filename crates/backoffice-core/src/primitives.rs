//! # Primitives
//!
//! Fixed constants shared by every module: persisted key names, theme names,
//! validation patterns and defaults.

// =============================================================================
// STORAGE KEYS
// =============================================================================

/// Key holding the selected theme name.
pub const THEME_KEY: &str = "theme";

/// Key holding the role string chosen at login.
pub const ROLE_KEY: &str = "userRole";

/// Key holding `"true"` while a session is authenticated.
pub const AUTHENTICATED_KEY: &str = "isAuthenticated";

/// Key holding the feature-flag mapping as a JSON object.
pub const SETTINGS_KEY: &str = "settings";

// =============================================================================
// THEMES
// =============================================================================

/// Theme applied when nothing (or garbage) is persisted.
pub const DEFAULT_THEME: &str = "idfc";

/// Every theme the shell ships with.
pub const THEME_NAMES: [&str; 3] = ["idfc", "nubank", "rbl"];

/// Document attribute that dependent consumers read the theme from.
pub const THEME_ATTRIBUTE: &str = "data-theme";

// =============================================================================
// VALIDATION
// =============================================================================

/// E.164-style phone number: optional `+`, no leading zero, 2 to 15 ASCII
/// digits. `\d` would also match non-ASCII digits under Unicode mode.
pub const PHONE_PATTERN: &str = r"^\+?[1-9][0-9]{1,14}$";

/// Minimal `local@domain.tld` shape used by login and signup.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Minimum password length for login and signup.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Substring an email must contain to log in as admin.
pub const ADMIN_EMAIL_MARKER: &str = "admin";

// =============================================================================
// FEATURE FLAGS
// =============================================================================

/// Every gated feature starts enabled.
pub const DEFAULT_FLAG_STATE: bool = true;
