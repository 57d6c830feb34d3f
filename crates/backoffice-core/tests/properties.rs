//! Property tests for gating, preferences and the onboarding form.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use backoffice_core::{
    FeatureFlags, FieldValue, FormEngine, MemoryStore, Position, PreferenceStore, Role,
    Transition, can_render, gate, merchant_onboarding,
};
use proptest::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

fn feature_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("notifications".to_owned()),
        Just("documents".to_owned()),
        Just("transactions".to_owned()),
        "[a-z]{1,12}",
    ]
}

fn flags() -> impl Strategy<Value = FeatureFlags> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(n, d, t)| {
        let mut flags = FeatureFlags::new();
        flags.set("notifications", n);
        flags.set("documents", d);
        flags.set("transactions", t);
        flags
    })
}

const PERSONAL: [&str; 10] = [
    "fullName",
    "dateOfBirth",
    "email",
    "phone",
    "address",
    "city",
    "postalCode",
    "nationality",
    "idType",
    "idNumber",
];

fn fill_everything(form: &mut FormEngine, phone: &str) {
    for name in PERSONAL {
        let value = if name == "phone" { phone } else { "filled" };
        assert!(form.set_field(name, value));
    }
    for name in [
        "income",
        "sourceOfFunds",
        "employmentStatus",
        "investmentExperience",
        "riskTolerance",
    ] {
        assert!(form.set_field(name, "filled"));
    }
    assert!(form.set_field("acceptedTerms", true));
}

// =============================================================================
// ACCESS GATE
// =============================================================================

proptest! {
    #[test]
    fn user_visibility_follows_flag(name in feature_name(), flags in flags()) {
        prop_assert_eq!(can_render(Role::User, &name, &flags), flags.get(&name));
    }

    #[test]
    fn admin_always_sees(name in feature_name(), flags in flags()) {
        prop_assert!(can_render(Role::Admin, &name, &flags));
        prop_assert!(gate(Role::Admin, &name, &flags, || ()).is_granted());
    }

    #[test]
    fn denied_never_renders(name in feature_name(), flags in flags()) {
        let mut rendered = false;
        let outcome = gate(Role::User, &name, &flags, || rendered = true);
        prop_assert_eq!(outcome.is_granted(), rendered);
    }
}

// =============================================================================
// PREFERENCES
// =============================================================================

proptest! {
    #[test]
    fn set_then_get_flag(name in feature_name(), value in any::<bool>()) {
        let mut prefs = PreferenceStore::open(MemoryStore::new()).unwrap();
        let known = prefs.set_flag(&name, value).unwrap();
        if known {
            prop_assert_eq!(prefs.get_flag(&name), value);
            let reopened = PreferenceStore::open(prefs.into_store()).unwrap();
            prop_assert_eq!(reopened.get_flag(&name), value);
        } else {
            prop_assert!(!prefs.get_flag(&name));
        }
    }

    #[test]
    fn theme_is_always_supported(name in "[a-z]{0,10}") {
        let mut prefs = PreferenceStore::open(MemoryStore::new()).unwrap();
        let before = prefs.get_theme();
        let changed = prefs.set_theme(&name).unwrap();
        if changed {
            prop_assert_eq!(prefs.get_theme().as_str(), name.as_str());
        } else {
            prop_assert_eq!(prefs.get_theme(), before);
        }
        prop_assert_eq!(prefs.document().theme(), Some(prefs.get_theme().as_str()));
    }
}

// =============================================================================
// FORM ENGINE
// =============================================================================

proptest! {
    #[test]
    fn missing_fields_block_first_step(filled in proptest::collection::btree_set(0..PERSONAL.len(), 0..PERSONAL.len())) {
        let mut form = FormEngine::new(merchant_onboarding().unwrap());
        for &i in &filled {
            let value = if PERSONAL[i] == "phone" { "+14155550100" } else { "filled" };
            form.set_field(PERSONAL[i], value);
        }

        prop_assert_eq!(form.next(), Transition::Blocked);
        prop_assert_eq!(form.position(), Position::Step(0));
        prop_assert_eq!(form.errors().len(), PERSONAL.len() - filled.len());
        for (i, name) in PERSONAL.iter().enumerate() {
            prop_assert_eq!(form.errors().contains(name), !filled.contains(&i));
        }
    }

    #[test]
    fn valid_phone_advances(phone in "\\+?[1-9][0-9]{1,14}") {
        let mut form = FormEngine::new(merchant_onboarding().unwrap());
        fill_everything(&mut form, &phone);
        prop_assert_eq!(form.next(), Transition::Moved { from: 0, to: 1 });
        prop_assert!(form.errors().is_empty());
    }

    #[test]
    fn back_preserves_values(phone in "[1-9][0-9]{4,10}", city in "[A-Za-z]{1,16}") {
        let mut form = FormEngine::new(merchant_onboarding().unwrap());
        fill_everything(&mut form, &phone);
        form.set_field("city", city.as_str());
        form.next();
        form.next();
        let before: Vec<_> = form.values().map(|(k, v)| (k.to_owned(), v.clone())).collect();

        prop_assert_eq!(form.back(), Transition::Moved { from: 2, to: 1 });
        prop_assert_eq!(form.back(), Transition::Moved { from: 1, to: 0 });
        let after: Vec<_> = form.values().map(|(k, v)| (k.to_owned(), v.clone())).collect();
        prop_assert_eq!(before, after);
        prop_assert_eq!(form.value("city"), Some(&FieldValue::Text(city)));
    }

    #[test]
    fn submit_emits_state_then_resets(phone in "[1-9][0-9]{4,10}", pep in any::<bool>()) {
        let mut form = FormEngine::new(merchant_onboarding().unwrap());
        fill_everything(&mut form, &phone);
        form.set_field("isPoliticallyExposed", pep);
        form.next();
        form.next();
        prop_assert!(form.is_on_review());

        let record = form.submit().unwrap();
        prop_assert_eq!(record.text("phone"), Some(phone.as_str()));
        prop_assert_eq!(record.get("isPoliticallyExposed"), Some(&FieldValue::Flag(pep)));
        prop_assert_eq!(form.position(), Position::Submitted);
        prop_assert_eq!(form.value("phone"), Some(&FieldValue::Text(String::new())));
    }
}
