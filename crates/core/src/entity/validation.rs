//! Field checks shared by the entity definitions.

use chrono::NaiveDate;

use crate::query::SqlValue;

use super::error::ValidationError;

/// Trims `value` and checks it is non-empty and at most `max` characters.
pub fn require_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<SqlValue, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(SqlValue::Text(trimmed.to_string()))
}

/// Checks a login: non-empty, at most `max` characters, no whitespace.
pub fn require_login(value: &str, max: usize) -> Result<SqlValue, ValidationError> {
    if value.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidField {
            field: "login",
            reason: "must not contain whitespace".to_string(),
        });
    }
    require_text("login", value, max)
}

/// Checks a phone number: optional leading `+`, then 7 to 15 digits.
/// Spaces and dashes between digits are allowed and dropped.
pub fn require_phone(value: &str) -> Result<SqlValue, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField {
            field: "phone_number",
        });
    }
    if !is_valid_phone(trimmed) {
        return Err(ValidationError::InvalidField {
            field: "phone_number",
            reason: format!("not a phone number: {trimmed}"),
        });
    }
    Ok(SqlValue::Text(
        trimmed.chars().filter(|c| !matches!(c, ' ' | '-')).collect(),
    ))
}

fn is_valid_phone(value: &str) -> bool {
    let digits = value.strip_prefix('+').unwrap_or(value);
    let mut count = 0;
    for c in digits.chars() {
        match c {
            '0'..='9' => count += 1,
            ' ' | '-' => {}
            _ => return false,
        }
    }
    (7..=15).contains(&count)
}

/// Format a NaiveDate for storage (YYYY-MM-DD).
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text_counts_characters_not_bytes() {
        assert!(require_text("name", "ééé", 3).is_ok());
        assert_eq!(
            require_text("name", "éééé", 3),
            Err(ValidationError::TooLong {
                field: "name",
                max: 3
            })
        );
    }

    #[test]
    fn test_require_login_rejects_whitespace() {
        assert!(require_login("jane doe", 64).is_err());
        assert!(require_login("jane_doe", 64).is_ok());
    }

    #[test]
    fn test_phone_numbers() {
        assert_eq!(
            require_phone("+998 90-123-45-67").unwrap(),
            SqlValue::Text("+998901234567".to_string())
        );
        assert!(require_phone("5551234").is_ok());
        assert!(require_phone("12345").is_err());
        assert!(require_phone("555-CALL-NOW").is_err());
        assert!(require_phone("++5551234").is_err());
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
        assert_eq!(format_date(&date), "2024-06-05");
    }
}
