//! Field-level validation shared by the resource forms.
//!
//! Request bodies are deserialized into form structs where every field is
//! optional. A form is then resolved against the stored record (if any) using
//! a [WriteMode], collecting every problem into [FieldErrors] so the client
//! gets all messages at once.

use std::{collections::BTreeMap, fmt::Display};

use serde::{Deserialize, Deserializer, Serialize};

use crate::Error;

/// The message for a required field that was not submitted.
pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// The validation messages for a request, keyed by field name.
///
/// Serializes as `{"field": ["message", ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Create an empty set of errors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create errors holding a single message for `field`.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Record `message` against `field`.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    /// Whether no errors have been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The messages recorded for `field`.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;

        for (field, messages) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {}", messages.join(" "))?;
            first = false;
        }

        Ok(())
    }
}

impl From<FieldErrors> for Error {
    fn from(errors: FieldErrors) -> Self {
        Error::Validation(errors)
    }
}

/// How a submitted form relates to the stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// A new record, every required field must be submitted.
    Create,
    /// A full update (PUT), every required field must be submitted and
    /// omitted fields with defaults keep their stored value.
    Replace,
    /// A partial update (PATCH), omitted fields keep their stored value.
    Patch,
}

/// Strip leading and trailing whitespace from a submitted text field.
pub fn trim(value: Option<String>) -> Option<String> {
    value.map(|value| value.trim().to_owned())
}

/// Resolve a required field.
///
/// Returns the submitted value, or the stored value for [WriteMode::Patch].
/// Records [REQUIRED_MESSAGE] and returns `None` if neither applies.
pub fn resolve_required<T: Clone>(
    errors: &mut FieldErrors,
    field: &str,
    submitted: Option<T>,
    stored: Option<&T>,
    mode: WriteMode,
) -> Option<T> {
    match (submitted, mode) {
        (Some(value), _) => Some(value),
        (None, WriteMode::Patch) if stored.is_some() => stored.cloned(),
        (None, _) => {
            errors.add(field, REQUIRED_MESSAGE);
            None
        }
    }
}

/// Resolve a field that falls back to `default` on creation.
///
/// Updates keep the stored value when the field is omitted.
pub fn resolve_or<T: Clone>(
    submitted: Option<T>,
    stored: Option<&T>,
    mode: WriteMode,
    default: T,
) -> T {
    match (submitted, mode, stored) {
        (Some(value), _, _) => value,
        (None, WriteMode::Create, _) | (None, _, None) => default,
        (None, _, Some(stored)) => stored.clone(),
    }
}

/// Check that `value` is not blank, has no null characters and is at most
/// `max_chars` characters long.
pub fn check_text(errors: &mut FieldErrors, field: &str, value: Option<&str>, max_chars: usize) {
    let Some(value) = value else {
        return;
    };

    if value.trim().is_empty() {
        errors.add(field, "This field may not be blank.");
    }

    if value.contains('\0') {
        errors.add(field, "Null characters are not allowed.");
    }

    if value.chars().count() > max_chars {
        errors.add(
            field,
            format!("Ensure this field has no more than {max_chars} characters."),
        );
    }
}

/// Check that a price is a finite, non-negative number.
pub fn check_price(errors: &mut FieldErrors, field: &str, value: Option<f64>) {
    match value {
        Some(price) if !price.is_finite() => errors.add(field, "A valid number is required."),
        Some(price) if price < 0.0 => {
            errors.add(field, "Ensure this value is greater than or equal to 0.")
        }
        _ => {}
    }
}

/// Deserialize a present field as `Some`, so that `Option<Option<T>>` can tell
/// an explicit `null` apart from an omitted field.
///
/// Use together with `#[serde(default)]`.
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod field_errors_tests {
    use serde_json::json;

    use super::FieldErrors;

    #[test]
    fn serializes_as_field_map() {
        let mut errors = FieldErrors::new();
        errors.add("slug", "slug is required");
        errors.add("title", "This field may not be blank.");
        errors.add("title", "Null characters are not allowed.");

        let got = serde_json::to_value(&errors).unwrap();

        assert_eq!(
            got,
            json!({
                "slug": ["slug is required"],
                "title": ["This field may not be blank.", "Null characters are not allowed."],
            })
        );
    }

    #[test]
    fn display_joins_fields() {
        let mut errors = FieldErrors::new();
        errors.add("code", "a");
        errors.add("name", "b");

        assert_eq!(errors.to_string(), "code: a; name: b");
    }
}
