//! # Form Module
//!
//! Linear multi-step forms with per-step validation.
//!
//! - `schema`: field definitions, rules and steps (what to collect)
//! - `engine`: the step state machine over a schema (how it is collected)
//! - `merchant`: the merchant onboarding schema
//!
//! The engine owns its values and errors exclusively. Nothing here touches
//! storage; a finished application leaves as an immutable [`FormRecord`].

mod engine;
mod merchant;
mod schema;
mod validation;

pub use engine::{FormEngine, FormRecord, Position, ReviewSection, Transition};
pub use merchant::merchant_onboarding;
pub use schema::{FieldDefinition, FieldValue, FormSchema, Rule, Step};
pub use validation::ValidationErrors;
