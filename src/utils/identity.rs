use regex::Regex;
use std::sync::LazyLock;

use crate::error::{AppError, AppResult};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex")
});

/// Strips everything but digits and checks for an 8 or 9 digit national ID.
pub fn normalize_id_number(raw: &str) -> AppResult<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.is_empty() {
        return Err(AppError::ValidationError("ID number is required".to_string()));
    }
    if !(8..=9).contains(&digits.len()) {
        return Err(AppError::ValidationError(
            "ID number must be 8 or 9 digits".to_string(),
        ));
    }

    Ok(digits)
}

/// Trims and lower-cases an email address, rejecting anything that does not look like one.
pub fn normalize_email(raw: &str) -> AppResult<String> {
    let email = raw.trim().to_lowercase();

    if email.is_empty() {
        return Err(AppError::ValidationError("Email is required".to_string()));
    }
    if !EMAIL.is_match(&email) {
        return Err(AppError::ValidationError(
            "Enter a valid email address".to_string(),
        ));
    }

    Ok(email)
}
