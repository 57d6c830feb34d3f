//! # CLI Commands
//!
//! One function per subcommand. Each opens the redb store at `store_path`,
//! builds an [`AppContext`], performs a single action and prints the result
//! either as text or, with `json`, as one JSON document on stdout.

use backoffice_core::primitives::THEME_NAMES;
use backoffice_core::{
    AccessDenied, AppContext, CoreError, Feature, FieldValue, FormEngine, Gated, LoginRequest,
    RedbStore, SignupRequest, Transition,
};
use serde_json::{Map, Value, json};
use std::path::Path;
use thiserror::Error;

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Usage(String),
}

// =============================================================================
// HELPERS
// =============================================================================

/// Open (or create) the store and restore the session from it.
pub fn open_context(store_path: &Path) -> Result<AppContext<RedbStore>, CliError> {
    let store = RedbStore::open(store_path)?;
    Ok(AppContext::open(store)?)
}

fn emit(json_output: bool, value: &Value, text: impl FnOnce() -> String) -> Result<(), CliError> {
    if json_output {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text());
    }
    Ok(())
}

// =============================================================================
// SESSION COMMANDS
// =============================================================================

pub fn cmd_login(
    store_path: &Path,
    json_output: bool,
    email: &str,
    password: &str,
    role: &str,
) -> Result<(), CliError> {
    let mut ctx = open_context(store_path)?;
    let request = LoginRequest {
        email: email.to_owned(),
        password: password.to_owned(),
        role: role.to_owned(),
    };
    let role = ctx.login(&request)?;
    emit(json_output, &json!({ "authenticated": true, "role": role }), || {
        format!("Logged in as {role}")
    })
}

pub fn cmd_signup(
    store_path: &Path,
    json_output: bool,
    name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), CliError> {
    let mut ctx = open_context(store_path)?;
    let request = SignupRequest {
        name: name.to_owned(),
        email: email.to_owned(),
        password: password.to_owned(),
        confirm_password: confirm_password.to_owned(),
    };
    let role = ctx.signup(&request)?;
    emit(json_output, &json!({ "authenticated": true, "role": role }), || {
        format!("Account created for {name} ({role})")
    })
}

pub fn cmd_logout(store_path: &Path, json_output: bool) -> Result<(), CliError> {
    let mut ctx = open_context(store_path)?;
    ctx.logout()?;
    emit(json_output, &json!({ "authenticated": false }), || {
        "Logged out".to_owned()
    })
}

pub fn cmd_whoami(store_path: &Path, json_output: bool) -> Result<(), CliError> {
    let ctx = open_context(store_path)?;
    let session = ctx.session();
    let value = json!({
        "authenticated": session.is_authenticated(),
        "role": session.role(),
        "theme": ctx.theme().as_str(),
    });
    emit(json_output, &value, || {
        let state = if session.is_authenticated() {
            "authenticated"
        } else {
            "anonymous"
        };
        format!(
            "Role:  {}\nState: {state}\nTheme: {}",
            session.role(),
            ctx.theme().display_name()
        )
    })
}

// =============================================================================
// PREFERENCE COMMANDS
// =============================================================================

/// Show the current theme, or switch to `name`.
pub fn cmd_theme(store_path: &Path, json_output: bool, name: Option<&str>) -> Result<(), CliError> {
    let mut ctx = open_context(store_path)?;
    if let Some(name) = name {
        if !ctx.set_theme(name)? {
            return Err(CliError::Usage(format!(
                "unknown theme '{name}' (expected one of: {})",
                THEME_NAMES.join(", ")
            )));
        }
    }
    let theme = ctx.theme();
    emit(json_output, &json!({ "theme": theme.as_str() }), || {
        format!("Theme: {}", theme.display_name())
    })
}

pub fn cmd_flags(store_path: &Path, json_output: bool) -> Result<(), CliError> {
    let ctx = open_context(store_path)?;
    let mut flags = Map::new();
    for (feature, enabled) in ctx.features() {
        flags.insert(feature.as_str().to_owned(), Value::Bool(enabled));
    }
    emit(json_output, &Value::Object(flags), || {
        ctx.features()
            .map(|(feature, enabled)| {
                let state = if enabled { "on " } else { "off" };
                format!("[{state}] {:<14} {}", feature.as_str(), feature.description())
            })
            .collect::<Vec<_>>()
            .join("\n")
    })
}

/// Flip a feature flag. Admin only.
pub fn cmd_toggle(store_path: &Path, json_output: bool, feature: &str) -> Result<(), CliError> {
    let mut ctx = open_context(store_path)?;
    let Some(enabled) = ctx.toggle_feature(feature)? else {
        return Err(CliError::Usage(format!("unknown feature '{feature}'")));
    };
    emit(
        json_output,
        &json!({ "feature": feature, "enabled": enabled }),
        || format!("{feature}: {}", if enabled { "enabled" } else { "disabled" }),
    )
}

// =============================================================================
// NAVIGATION COMMANDS
// =============================================================================

pub fn cmd_menu(store_path: &Path, json_output: bool) -> Result<(), CliError> {
    let ctx = open_context(store_path)?;
    let menu = ctx.visible_menu();
    let entries: Vec<Value> = menu
        .iter()
        .map(|(entry, viewable)| {
            json!({
                "entry": entry,
                "title": entry.title(),
                "route": entry.route(),
                "viewable": viewable,
            })
        })
        .collect();
    emit(json_output, &Value::Array(entries), || {
        menu.iter()
            .map(|(entry, viewable)| {
                let marker = if *viewable { " " } else { "x" };
                format!("{marker} {:<18} {}", entry.title(), entry.route())
            })
            .collect::<Vec<_>>()
            .join("\n")
    })
}

/// Render a gated feature page, or the Access-Denied placeholder.
pub fn cmd_view(store_path: &Path, json_output: bool, feature: &str) -> Result<(), CliError> {
    let ctx = open_context(store_path)?;
    let gated = ctx.gate(feature, || match Feature::parse(feature) {
        Some(known) => format!("{}: {}", known.as_str(), known.description()),
        None => feature.to_owned(),
    });
    let value = match &gated {
        Gated::Granted(content) => json!({ "feature": feature, "granted": true, "content": content }),
        Gated::Denied(_) => json!({
            "feature": feature,
            "granted": false,
            "error": {
                "code": AccessDenied::CODE,
                "title": AccessDenied::TITLE,
                "message": AccessDenied::MESSAGE,
            },
        }),
    };
    emit(json_output, &value, || gated.unwrap_or_else(|denied| denied.to_text()))
}

// =============================================================================
// ONBOARDING
// =============================================================================

/// Load a JSON object of field values into `form`.
///
/// Strings fill text fields and booleans fill checkboxes; other JSON types
/// are rejected. Unknown fields are skipped with a warning.
pub fn fill_form(form: &mut FormEngine, input: &Value) -> Result<(), CliError> {
    let Value::Object(fields) = input else {
        return Err(CliError::Usage(
            "onboarding input must be a JSON object".to_owned(),
        ));
    };
    for (name, raw) in fields {
        let value = match raw {
            Value::String(s) => FieldValue::Text(s.clone()),
            Value::Bool(b) => FieldValue::Flag(*b),
            other => {
                return Err(CliError::Usage(format!(
                    "field '{name}' must be a string or boolean, got {other}"
                )));
            }
        };
        if !form.set_field(name, value) {
            tracing::warn!(field = %name, "skipping field not accepted by the form");
        }
    }
    Ok(())
}

/// Drive the merchant onboarding form from a JSON file through to submit.
pub fn cmd_onboard(store_path: &Path, json_output: bool, input: &Path) -> Result<(), CliError> {
    let raw = std::fs::read_to_string(input)?;
    let data: Value = serde_json::from_str(&raw)?;

    let mut ctx = open_context(store_path)?;
    let mut form = ctx.onboarding()?;
    fill_form(&mut form, &data)?;

    while !form.is_on_review() {
        match form.next() {
            Transition::Moved { .. } => {}
            Transition::Blocked => {
                return Err(CoreError::ValidationFailed(form.errors().clone()).into());
            }
            Transition::Ignored => break,
        }
    }

    let review = form.review();
    let id = ctx.complete_onboarding(&mut form)?;
    let Some(merchant) = ctx.merchants().get(&id) else {
        return Err(CliError::Usage(format!("merchant {id} was not registered")));
    };
    emit(json_output, &serde_json::to_value(merchant)?, || {
        let mut out = format!("Merchant {id} onboarded\n");
        for section in &review {
            out.push_str(&format!("\n{}\n", section.title));
            for (label, shown) in &section.entries {
                out.push_str(&format!("  {label:<28} {shown}\n"));
            }
        }
        out
    })
}
