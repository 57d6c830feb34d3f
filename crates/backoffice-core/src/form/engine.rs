//! Step state machine over a [`FormSchema`].
//!
//! ```text
//!   Step(0) ──next──► Step(1) ──next──► … ──► Step(review) ──submit──► Submitted
//!      ◄──back───        ◄──back───              │
//!                                                └─ invalid: stays, errors shown
//! ```
//!
//! `next` only advances when every field of the current step validates.
//! `back` never validates. Validation never alters a value; it only changes
//! the error annotation attached to it.

use super::schema::{FieldValue, FormSchema, Step};
use super::validation::ValidationErrors;
use crate::{CoreError, Result};
use serde::Serialize;
use std::collections::BTreeMap;

// =============================================================================
// POSITION & TRANSITION
// =============================================================================

/// Where the engine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    /// Zero-based step index.
    Step(usize),
    /// Terminal state after a successful submit.
    Submitted,
}

/// Outcome of `next` or `back`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Moved { from: usize, to: usize },
    /// The current step has invalid fields; see [`FormEngine::errors`].
    Blocked,
    /// Not applicable in the current position.
    Ignored,
}

// =============================================================================
// FORM RECORD
// =============================================================================

/// Immutable snapshot of a submitted form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormRecord {
    values: BTreeMap<String, FieldValue>,
}

impl FormRecord {
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// Text value of a field, if it is a text field.
    #[must_use]
    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_text)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One titled block of the review page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewSection {
    pub title: String,
    /// `(label, display value)` pairs in field order.
    pub entries: Vec<(String, String)>,
}

// =============================================================================
// FORM ENGINE
// =============================================================================

/// A live form instance.
#[derive(Debug, Clone)]
pub struct FormEngine {
    schema: FormSchema,
    position: Position,
    values: BTreeMap<String, FieldValue>,
    errors: ValidationErrors,
}

impl FormEngine {
    /// Start at the first step with every field at its default.
    #[must_use]
    pub fn new(schema: FormSchema) -> Self {
        let values = defaults(&schema);
        Self {
            schema,
            position: Position::Step(0),
            values,
            errors: ValidationErrors::new(),
        }
    }

    #[must_use]
    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// The step being shown, `None` once submitted.
    #[must_use]
    pub fn current_step(&self) -> Option<&Step> {
        match self.position {
            Position::Step(index) => self.schema.step(index),
            Position::Submitted => None,
        }
    }

    #[must_use]
    pub fn is_on_review(&self) -> bool {
        self.position == Position::Step(self.schema.review_index())
    }

    // -------------------------------------------------------------------------
    // Values
    // -------------------------------------------------------------------------

    /// Update one field and drop its error annotation.
    ///
    /// Unknown fields and values of the wrong kind are ignored (returns
    /// `false`). Editing a submitted form starts a new one at the first step.
    pub fn set_field(&mut self, name: &str, value: impl Into<FieldValue>) -> bool {
        let value = value.into();
        let Some(field) = self.schema.field(name) else {
            tracing::debug!(field = name, "ignoring unknown form field");
            return false;
        };
        if !field.accepts(&value) {
            tracing::debug!(field = name, "ignoring value of the wrong kind");
            return false;
        }
        if self.position == Position::Submitted {
            self.position = Position::Step(0);
        }
        self.values.insert(name.to_owned(), value);
        self.errors.clear_field(name);
        true
    }

    #[must_use]
    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn values(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Validate the current step and advance if it is clean.
    ///
    /// Ignored on the review step and after submission.
    pub fn next(&mut self) -> Transition {
        let Position::Step(index) = self.position else {
            return Transition::Ignored;
        };
        if index >= self.schema.review_index() {
            return Transition::Ignored;
        }

        let errors = self.validate_step(index);
        if !errors.is_empty() {
            tracing::debug!(step = index, invalid = errors.len(), "step blocked");
            self.errors = errors;
            return Transition::Blocked;
        }

        self.errors.clear();
        let to = index.saturating_add(1);
        self.position = Position::Step(to);
        tracing::debug!(from = index, to, "step advanced");
        Transition::Moved { from: index, to }
    }

    /// Go back one step without validating. Ignored on the first step.
    pub fn back(&mut self) -> Transition {
        match self.position {
            Position::Step(index) if index > 0 => {
                let to = index.saturating_sub(1);
                self.position = Position::Step(to);
                Transition::Moved { from: index, to }
            }
            _ => Transition::Ignored,
        }
    }

    /// Validate every step and, if clean, emit the record and reset.
    ///
    /// Atomic: on any failure nothing is emitted, values stay as they were
    /// and the engine remains on the review step with all errors attached.
    pub fn submit(&mut self) -> Result<FormRecord> {
        if !self.is_on_review() {
            return Err(CoreError::NotOnReviewStep);
        }

        let mut errors = ValidationErrors::new();
        for index in 0..self.schema.len() {
            errors.extend(self.validate_step(index));
        }
        if !errors.is_empty() {
            self.errors = errors.clone();
            return Err(CoreError::ValidationFailed(errors));
        }

        let record = FormRecord {
            values: std::mem::replace(&mut self.values, defaults(&self.schema)),
        };
        self.errors.clear();
        self.position = Position::Submitted;
        tracing::debug!(fields = record.len(), "form submitted");
        Ok(record)
    }

    /// Discard all input and return to the first step.
    pub fn reset(&mut self) {
        self.values = defaults(&self.schema);
        self.errors.clear();
        self.position = Position::Step(0);
    }

    // -------------------------------------------------------------------------
    // Review
    // -------------------------------------------------------------------------

    /// Current values grouped by step, for the review page.
    #[must_use]
    pub fn review(&self) -> Vec<ReviewSection> {
        self.schema
            .steps()
            .iter()
            .filter(|step| !step.fields.is_empty())
            .map(|step| ReviewSection {
                title: step.title.clone(),
                entries: step
                    .fields
                    .iter()
                    .map(|field| {
                        let shown = self
                            .values
                            .get(&field.name)
                            .map(FieldValue::display)
                            .unwrap_or_default();
                        (field.label.clone(), shown)
                    })
                    .collect(),
            })
            .collect()
    }

    fn validate_step(&self, index: usize) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        let Some(step) = self.schema.step(index) else {
            return errors;
        };
        for field in &step.fields {
            let value = self.values.get(&field.name).unwrap_or(&field.default);
            if let Some(message) = field.validate(value) {
                errors.insert(field.name.clone(), message);
            }
        }
        errors
    }
}

fn defaults(schema: &FormSchema) -> BTreeMap<String, FieldValue> {
    schema
        .fields()
        .map(|field| (field.name.clone(), field.default.clone()))
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
