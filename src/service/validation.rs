//! Request field validation.

use crate::error::AppError;
use regex::Regex;

pub struct RequestValidator;

impl RequestValidator {
    /// Field must be present and contain something other than whitespace.
    pub fn require_non_blank(field: &str, value: &str) -> Result<(), AppError> {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{} is required", field)));
        }
        Ok(())
    }

    pub fn require_email(field: &str, value: &str) -> Result<(), AppError> {
        Self::require_non_blank(field, value)?;
        let re = Regex::new(r"^[^@\s]+@[^@\s]+$")
            .map_err(|_| AppError::Internal(format!("invalid pattern for {}", field)))?;
        if !re.is_match(value.trim()) {
            return Err(AppError::Validation(format!("{} must be a valid email", field)));
        }
        Ok(())
    }

    pub fn require_range(field: &str, value: i64, min: i64, max: i64) -> Result<(), AppError> {
        if value < min || value > max {
            return Err(AppError::Validation(format!(
                "{} must be between {} and {}",
                field, min, max
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_rejected() {
        assert!(RequestValidator::require_non_blank("GameName", "Foo").is_ok());
        let err = RequestValidator::require_non_blank("GameName", "   ").unwrap_err();
        assert_eq!(err.to_string(), "GameName is required");
    }

    #[test]
    fn email_needs_local_and_domain_part() {
        assert!(RequestValidator::require_email("Email", "bob@example.com").is_ok());
        for bad in ["bob", "@example.com", "bob@", "bo b@example.com", ""] {
            assert!(RequestValidator::require_email("Email", bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn range_is_inclusive() {
        assert!(RequestValidator::require_range("count", 1, 1, 100).is_ok());
        assert!(RequestValidator::require_range("count", 100, 1, 100).is_ok());
        assert!(RequestValidator::require_range("count", 0, 1, 100).is_err());
        assert!(RequestValidator::require_range("count", 101, 1, 100).is_err());
    }
}
