//! Input validation helpers
//!
//! Text length limits and validation functions for registration payloads.
//! SQLite TEXT has no built-in length enforcement.

use shared::error::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Registration titles
pub const MAX_TITLE_LEN: usize = 200;

/// Categories and organization names
pub const MAX_NAME_LEN: usize = 200;

/// Event codes
pub const MAX_CODE_LEN: usize = 64;

/// Contact names
pub const MAX_PERSON_NAME_LEN: usize = 100;

/// Phone numbers
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Serialized custom-field bag
pub const MAX_CUSTOM_FIELDS_BYTES: usize = 16 * 1024;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty"))
            .with_detail("field", field));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that an optional string, if present, is non-empty and within the limit.
///
/// Used for patch fields whose stored column is required.
pub fn validate_present_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    match value {
        Some(v) => validate_required_text(v, field, max_len),
        None => Ok(()),
    }
}

/// Validate an event date (Unix millis, must be positive)
pub fn validate_eventdate(value: i64) -> Result<(), AppError> {
    if value <= 0 {
        return Err(AppError::validation("eventdate must be a positive timestamp")
            .with_detail("field", "eventdate"));
    }
    Ok(())
}

/// Validate the size of a custom-field bag once serialized
pub fn validate_custom_fields(
    value: &Option<shared::models::CustomFields>,
) -> Result<(), AppError> {
    if let Some(fields) = value {
        let size = serde_json::to_vec(fields)
            .map_err(|e| AppError::invalid(format!("customFields: {e}")))?
            .len();
        if size > MAX_CUSTOM_FIELDS_BYTES {
            return Err(AppError::validation(format!(
                "customFields is too large ({size} bytes, max {MAX_CUSTOM_FIELDS_BYTES})"
            ))
            .with_detail("field", "customFields"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("City Run", "title", MAX_TITLE_LEN).is_ok());

        let err = validate_required_text("   ", "title", MAX_TITLE_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, "title must not be empty");

        let long = "x".repeat(MAX_CODE_LEN + 1);
        assert!(validate_required_text(&long, "code", MAX_CODE_LEN).is_err());
    }

    #[test]
    fn test_optional_and_present_text() {
        assert!(validate_optional_text(&None, "orgname", MAX_NAME_LEN).is_ok());
        assert!(validate_optional_text(&Some(String::new()), "orgname", MAX_NAME_LEN).is_ok());
        assert!(validate_present_text(&Some(String::new()), "title", MAX_TITLE_LEN).is_err());
        assert!(validate_present_text(&None, "title", MAX_TITLE_LEN).is_ok());
    }

    #[test]
    fn test_eventdate_and_custom_fields() {
        assert!(validate_eventdate(1_746_057_600_000).is_ok());
        assert!(validate_eventdate(0).is_err());

        let mut big = shared::models::CustomFields::new();
        big.insert("blob".into(), "x".repeat(MAX_CUSTOM_FIELDS_BYTES).into());
        assert!(validate_custom_fields(&Some(big)).is_err());
        assert!(validate_custom_fields(&None).is_ok());
    }
}
