use regex::Regex;
use std::sync::LazyLock;

use crate::error::{AppError, AppResult};

static KENYAN_PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+254\d{9}$").expect("valid phone regex"));

/// Validates the stored phone format `+254XXXXXXXXX`.
pub fn validate_kenyan_phone(phone: &str) -> AppResult<()> {
    if !KENYAN_PHONE.is_match(phone) {
        return Err(AppError::ValidationError(
            "Phone must be in the format +254XXXXXXXXX".to_string(),
        ));
    }

    Ok(())
}

/// Formats a phone number to `+254…`.
///
/// Accepts `0712 345 678`, `712345678`, `254712345678` and `+254 712 345 678`.
/// Input that does not end up as 9 subscriber digits is still formatted and
/// rejected later by [`validate_kenyan_phone`].
pub fn format_kenyan_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    let digits = digits.strip_prefix('0').unwrap_or(&digits);

    if digits.starts_with("254") && digits.len() > 9 {
        format!("+{digits}")
    } else {
        format!("+254{digits}")
    }
}
