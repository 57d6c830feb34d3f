//! Integration tests for backoffice CLI commands.
//!
//! Uses tempfile for the redb store backing each test.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use backoffice::cli::{
    CliError, cmd_flags, cmd_login, cmd_logout, cmd_menu, cmd_onboard, cmd_signup, cmd_theme,
    cmd_toggle, cmd_view, cmd_whoami, fill_form, open_context,
};
use backoffice_core::{CoreError, FieldValue, MenuEntry, Role, Theme};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Create a temporary directory for tests.
fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn store_path(dir: &TempDir) -> PathBuf {
    dir.path().join("backoffice.redb")
}

fn login_admin(store: &Path) {
    cmd_login(store, false, "admin@bank.com", "s3cretpass", "admin").unwrap();
}

fn login_user(store: &Path) {
    cmd_login(store, false, "teller@bank.com", "s3cretpass", "user").unwrap();
}

/// Write a complete, valid onboarding application.
fn create_application(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("application.json");
    let content = r#"{
        "fullName": "Asha Rao",
        "dateOfBirth": "1990-04-12",
        "email": "asha@example.com",
        "phone": "+919876543210",
        "address": "12 MG Road",
        "city": "Pune",
        "postalCode": "411001",
        "nationality": "Indian",
        "idType": "passport",
        "idNumber": "Z1234567",
        "income": "50k-100k",
        "sourceOfFunds": "salary",
        "employmentStatus": "employed",
        "investmentExperience": "beginner",
        "riskTolerance": "moderate",
        "acceptedTerms": true
    }"#;
    std::fs::write(&path, content).unwrap();
    path
}

// =============================================================================
// SESSION COMMAND TESTS
// =============================================================================

#[test]
fn test_login_persists_role() {
    let temp = create_temp_dir();
    let store = store_path(&temp);

    login_admin(&store);

    let ctx = open_context(&store).unwrap();
    assert_eq!(ctx.role(), Role::Admin);
    assert!(ctx.session().is_authenticated());
}

#[test]
fn test_login_rejects_admin_without_admin_email() {
    let temp = create_temp_dir();
    let store = store_path(&temp);

    let result = cmd_login(&store, false, "teller@bank.com", "s3cretpass", "admin");
    assert!(matches!(
        result,
        Err(CliError::Core(CoreError::InvalidCredentials(_)))
    ));

    let ctx = open_context(&store).unwrap();
    assert!(!ctx.session().is_authenticated());
}

#[test]
fn test_signup_is_user() {
    let temp = create_temp_dir();
    let store = store_path(&temp);

    let result = cmd_signup(
        &store,
        true,
        "Asha",
        "admin.asha@example.com",
        "password1",
        "password1",
    );
    assert!(result.is_ok());
    assert_eq!(open_context(&store).unwrap().role(), Role::User);
}

#[test]
fn test_signup_password_mismatch() {
    let temp = create_temp_dir();
    let store = store_path(&temp);

    let result = cmd_signup(&store, false, "Asha", "asha@example.com", "password1", "password2");
    assert!(result.is_err());
}

#[test]
fn test_logout_clears_session() {
    let temp = create_temp_dir();
    let store = store_path(&temp);
    login_admin(&store);

    cmd_logout(&store, false).unwrap();

    let ctx = open_context(&store).unwrap();
    assert_eq!(ctx.role(), Role::User);
    assert!(!ctx.session().is_authenticated());
}

#[test]
fn test_whoami_on_fresh_store() {
    let temp = create_temp_dir();
    let store = store_path(&temp);

    assert!(cmd_whoami(&store, false).is_ok());
    assert!(cmd_whoami(&store, true).is_ok());
}

// =============================================================================
// PREFERENCE COMMAND TESTS
// =============================================================================

#[test]
fn test_theme_persists_across_runs() {
    let temp = create_temp_dir();
    let store = store_path(&temp);

    cmd_theme(&store, false, Some("nubank")).unwrap();
    assert!(cmd_theme(&store, true, None).is_ok());

    let ctx = open_context(&store).unwrap();
    assert_eq!(ctx.theme(), Theme::Nubank);
    assert_eq!(ctx.preferences().document().theme(), Some("nubank"));
}

#[test]
fn test_unknown_theme_is_rejected() {
    let temp = create_temp_dir();
    let store = store_path(&temp);
    cmd_theme(&store, false, Some("rbl")).unwrap();

    let result = cmd_theme(&store, false, Some("solarized"));
    assert!(matches!(result, Err(CliError::Usage(_))));
    assert_eq!(open_context(&store).unwrap().theme(), Theme::Rbl);
}

#[test]
fn test_flags_default_enabled() {
    let temp = create_temp_dir();
    let store = store_path(&temp);

    assert!(cmd_flags(&store, true).is_ok());
    let ctx = open_context(&store).unwrap();
    assert!(ctx.features().all(|(_, enabled)| enabled));
}

#[test]
fn test_toggle_requires_admin() {
    let temp = create_temp_dir();
    let store = store_path(&temp);
    login_user(&store);

    let result = cmd_toggle(&store, false, "documents");
    assert!(matches!(
        result,
        Err(CliError::Core(CoreError::PermissionDenied { .. }))
    ));
    assert!(open_context(&store).unwrap().preferences().get_flag("documents"));
}

#[test]
fn test_toggle_persists_for_admin() {
    let temp = create_temp_dir();
    let store = store_path(&temp);
    login_admin(&store);

    cmd_toggle(&store, false, "documents").unwrap();
    assert!(!open_context(&store).unwrap().preferences().get_flag("documents"));

    cmd_toggle(&store, true, "documents").unwrap();
    assert!(open_context(&store).unwrap().preferences().get_flag("documents"));
}

#[test]
fn test_toggle_unknown_feature() {
    let temp = create_temp_dir();
    let store = store_path(&temp);
    login_admin(&store);

    let result = cmd_toggle(&store, false, "payroll");
    assert!(matches!(result, Err(CliError::Usage(_))));
}

// =============================================================================
// NAVIGATION COMMAND TESTS
// =============================================================================

#[test]
fn test_menu_for_each_role() {
    let temp = create_temp_dir();
    let store = store_path(&temp);

    login_user(&store);
    assert!(cmd_menu(&store, false).is_ok());
    let entries: Vec<_> = open_context(&store)
        .unwrap()
        .visible_menu()
        .into_iter()
        .map(|(entry, _)| entry)
        .collect();
    assert!(entries.contains(&MenuEntry::Documents));
    assert!(!entries.contains(&MenuEntry::Clients));

    cmd_logout(&store, false).unwrap();
    login_admin(&store);
    assert!(cmd_menu(&store, true).is_ok());
    let entries: Vec<_> = open_context(&store)
        .unwrap()
        .visible_menu()
        .into_iter()
        .map(|(entry, _)| entry)
        .collect();
    assert!(entries.contains(&MenuEntry::Clients));
    assert!(!entries.contains(&MenuEntry::Documents));
}

#[test]
fn test_view_denied_is_not_an_error() {
    let temp = create_temp_dir();
    let store = store_path(&temp);
    login_admin(&store);
    cmd_toggle(&store, false, "documents").unwrap();
    assert!(cmd_view(&store, false, "documents").is_ok());

    cmd_logout(&store, false).unwrap();
    login_user(&store);
    assert!(cmd_view(&store, true, "documents").is_ok());
    assert!(!open_context(&store).unwrap().can_render("documents"));
}

// =============================================================================
// ONBOARD COMMAND TESTS
// =============================================================================

#[test]
fn test_onboard_complete_application() {
    let temp = create_temp_dir();
    let store = store_path(&temp);
    let input = create_application(&temp);

    assert!(cmd_onboard(&store, false, &input).is_ok());
    assert!(cmd_onboard(&store, true, &input).is_ok());
}

#[test]
fn test_onboard_missing_field_fails() {
    let temp = create_temp_dir();
    let store = store_path(&temp);
    let input = temp.path().join("partial.json");
    std::fs::write(&input, r#"{"fullName": "Asha Rao"}"#).unwrap();

    match cmd_onboard(&store, false, &input) {
        Err(CliError::Core(CoreError::ValidationFailed(errors))) => {
            assert!(errors.contains("phone"));
            assert!(!errors.contains("fullName"));
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn test_onboard_invalid_json() {
    let temp = create_temp_dir();
    let store = store_path(&temp);
    let input = temp.path().join("bad.json");
    std::fs::write(&input, "not valid json").unwrap();

    let result = cmd_onboard(&store, false, &input);
    assert!(matches!(result, Err(CliError::Json(_))));
}

#[test]
fn test_onboard_missing_file() {
    let temp = create_temp_dir();
    let store = store_path(&temp);

    let result = cmd_onboard(&store, false, &temp.path().join("nope.json"));
    assert!(matches!(result, Err(CliError::Io(_))));
}

#[test]
fn test_fill_form_value_kinds() {
    let temp = create_temp_dir();
    let ctx = open_context(&store_path(&temp)).unwrap();
    let mut form = ctx.onboarding().unwrap();

    let input = serde_json::json!({ "city": "Pune", "acceptedTerms": true, "unknown": "x" });
    fill_form(&mut form, &input).unwrap();
    assert_eq!(form.value("city"), Some(&FieldValue::Text("Pune".into())));
    assert_eq!(form.value("acceptedTerms"), Some(&FieldValue::Flag(true)));

    let bad = serde_json::json!({ "income": 50000 });
    assert!(matches!(fill_form(&mut form, &bad), Err(CliError::Usage(_))));
    assert!(matches!(
        fill_form(&mut form, &serde_json::json!(["city"])),
        Err(CliError::Usage(_))
    ));
}
