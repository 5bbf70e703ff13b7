use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Key used for errors that belong to the form as a whole.
pub const NON_FIELD_ERRORS: &str = "__all__";

/// Field-scoped validation messages, in submission order per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Unwraps a field validator's result, recording its message on failure.
    pub fn capture<T>(&mut self, field: &str, result: AppResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(AppError::ValidationError(msg)) => {
                self.add(field, msg);
                None
            }
            Err(other) => {
                self.add(field, other.to_string());
                None
            }
        }
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok(value)` when nothing was recorded.
    pub fn finish<T>(self, value: impl FnOnce() -> Option<T>) -> Result<T, FormErrors> {
        if !self.is_empty() {
            return Err(self);
        }
        // every field captured a value when no errors were recorded
        value().ok_or_else(|| FormErrors::single(NON_FIELD_ERRORS, "Invalid form submission"))
    }
}

/// Returns the trimmed value, or records `message` when it is blank.
pub fn required(
    errors: &mut FormErrors,
    field: &str,
    value: &str,
    message: &str,
) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, message);
        None
    } else {
        Some(value.to_string())
    }
}

/// Records an error when `value` exceeds `max` characters.
pub fn max_length(
    errors: &mut FormErrors,
    field: &str,
    value: Option<String>,
    max: usize,
) -> Option<String> {
    match value {
        Some(v) if v.chars().count() > max => {
            errors.add(
                field,
                format!("Ensure this value has at most {max} characters."),
            );
            None
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_collect_per_field() {
        let mut errors = FormErrors::default();
        errors.add("email", "Email is required");
        errors.add("email", "Enter a valid email address");
        errors.add("password", "Password is required");

        assert_eq!(errors.get("email").len(), 2);
        assert!(errors.has("password"));
        assert!(errors.get("id_number").is_empty());

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["password"][0], "Password is required");
    }

    #[test]
    fn test_required_and_max_length() {
        let mut errors = FormErrors::default();
        assert_eq!(
            required(&mut errors, "first_name", "  Wanjiku ", "First name is required"),
            Some("Wanjiku".to_string())
        );
        assert_eq!(required(&mut errors, "last_name", "   ", "Last name is required"), None);
        assert_eq!(errors.get("last_name"), ["Last name is required".to_string()]);

        let long = Some("x".repeat(256));
        assert_eq!(max_length(&mut errors, "first_name", long, 255), None);
        assert!(errors.has("first_name"));
    }
}
