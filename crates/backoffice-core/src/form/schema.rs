//! Form schema: fields, rules and steps.

use crate::{CoreError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// =============================================================================
// FIELD VALUE
// =============================================================================

/// Current value of one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    /// Empty text and unchecked flags count as "not filled in".
    #[must_use]
    pub fn is_present(&self) -> bool {
        match self {
            Self::Text(text) => !text.is_empty(),
            Self::Flag(checked) => *checked,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Flag(_) => None,
        }
    }

    /// Human-readable form used on the review step.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Flag(true) => "Yes".to_owned(),
            Self::Flag(false) => "No".to_owned(),
        }
    }

    fn same_kind(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::Text(_), Self::Text(_)) | (Self::Flag(_), Self::Flag(_))
        )
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

// =============================================================================
// RULES
// =============================================================================

/// A format check applied once a field has a value.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Text must match the regex.
    Pattern { regex: Regex, message: String },
}

impl Rule {
    fn check(&self, value: &FieldValue) -> Option<&str> {
        match self {
            Self::Pattern { regex, message } => match value.as_text() {
                Some(text) if regex.is_match(text) => None,
                _ => Some(message.as_str()),
            },
        }
    }
}

// =============================================================================
// FIELD DEFINITION
// =============================================================================

/// One input of a step.
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    pub name: String,
    pub label: String,
    pub default: FieldValue,
    /// Message shown when the field is left empty; `None` for optional fields.
    pub required: Option<String>,
    pub rules: Vec<Rule>,
}

impl FieldDefinition {
    /// Free-text field, empty by default, optional until [`Self::required`].
    #[must_use]
    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            default: FieldValue::Text(String::new()),
            required: None,
            rules: Vec::new(),
        }
    }

    /// Checkbox field, unchecked by default. Required means "must be checked".
    #[must_use]
    pub fn flag(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            default: FieldValue::Flag(false),
            required: None,
            rules: Vec::new(),
        }
    }

    #[must_use]
    pub fn required(mut self, message: impl Into<String>) -> Self {
        self.required = Some(message.into());
        self
    }

    /// Add a pattern rule. Fails if `pattern` is not a valid regex.
    pub fn pattern(mut self, pattern: &str, message: impl Into<String>) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| CoreError::InvalidPattern {
            field: self.name.clone(),
            source,
        })?;
        self.rules.push(Rule::Pattern {
            regex,
            message: message.into(),
        });
        Ok(self)
    }

    /// Whether `value` has the same kind (text or flag) as this field.
    #[must_use]
    pub fn accepts(&self, value: &FieldValue) -> bool {
        self.default.same_kind(value)
    }

    /// The first failing check's message, if any.
    ///
    /// Rules only run once the field has a value, so an empty optional field
    /// is always valid.
    #[must_use]
    pub fn validate(&self, value: &FieldValue) -> Option<String> {
        if !value.is_present() {
            return self.required.clone();
        }
        self.rules
            .iter()
            .find_map(|rule| rule.check(value))
            .map(str::to_owned)
    }
}

// =============================================================================
// STEP & SCHEMA
// =============================================================================

/// One page of the form.
#[derive(Debug, Clone)]
pub struct Step {
    pub title: String,
    pub fields: Vec<FieldDefinition>,
}

impl Step {
    #[must_use]
    pub fn new(title: impl Into<String>, fields: Vec<FieldDefinition>) -> Self {
        Self {
            title: title.into(),
            fields,
        }
    }
}

/// Ordered steps. The last step is the review step.
#[derive(Debug, Clone)]
pub struct FormSchema {
    steps: Vec<Step>,
}

impl FormSchema {
    /// Build a schema. Requires at least one step and unique field names.
    pub fn new(steps: Vec<Step>) -> Result<Self> {
        if steps.is_empty() {
            return Err(CoreError::InvalidSchema("a form needs at least one step".into()));
        }
        let mut seen = BTreeSet::new();
        for field in steps.iter().flat_map(|step| &step.fields) {
            if !seen.insert(field.name.as_str()) {
                return Err(CoreError::InvalidSchema(format!(
                    "duplicate field '{}'",
                    field.name
                )));
            }
        }
        Ok(Self { steps })
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[must_use]
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always `false`; a schema has at least one step.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Index of the review step.
    #[must_use]
    pub fn review_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.steps.iter().flat_map(|step| step.fields.iter())
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields().find(|field| field.name == name)
    }
}

// =============================================================================
// TESTS
// =============================================================================
