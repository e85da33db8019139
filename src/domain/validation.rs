//! Field-scoped validation results shared by every aggregate.
//!
//! Aggregates derive [`validator::Validate`]; the resulting
//! [`ValidationErrors`] are flattened into [`FieldErrors`], which keeps exactly
//! one human readable message per offending field.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::Serialize;
use validator::{ValidationError, ValidationErrors};

/// Ordered map of field name to the first message reported for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a result holding a single message.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Records a message unless the field already has one.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    /// Records `message` for `field` when `ok` is false.
    pub fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.add(field, message);
        }
    }

    /// Adds every message of `other`, keeping existing ones.
    pub fn merge(&mut self, other: FieldErrors) {
        for (field, message) in other.0 {
            self.add(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Re-keys every field under `collection[index].`.
    pub fn nested(self, collection: &str, index: usize) -> Self {
        Self(
            self.0
                .into_iter()
                .map(|(field, message)| (format!("{collection}[{index}].{field}"), message))
                .collect(),
        )
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{joined}")
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut result = FieldErrors::new();
        for (field, field_errors) in errors.field_errors() {
            let field = field.to_string();
            if let Some(error) = field_errors.first() {
                let message = describe(&field, error);
                result.add(field, message);
            }
        }
        result
    }
}

fn describe(field: &str, error: &ValidationError) -> String {
    match &error.message {
        Some(message) => format!("{field} {message}"),
        None => match error.code.as_ref() {
            "email" => format!("{field} must be a valid email address"),
            "range" => format!("{field} is out of range"),
            "length" => format!("{field} has an invalid length"),
            code => format!("{field} is invalid ({code})"),
        },
    }
}

fn error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

fn required_text(value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("required", "is required"));
    }
    if value.chars().count() > max {
        return Err(error(
            "length",
            format!("must not exceed {max} characters"),
        ));
    }
    Ok(())
}

/// Non-blank text of at most 255 characters.
pub fn required_text_255(value: &str) -> Result<(), ValidationError> {
    required_text(value, 255)
}

/// Non-blank text of at most 80 characters.
pub fn required_text_80(value: &str) -> Result<(), ValidationError> {
    required_text(value, 80)
}

/// Non-blank text of at most 60 characters.
pub fn required_text_60(value: &str) -> Result<(), ValidationError> {
    required_text(value, 60)
}
