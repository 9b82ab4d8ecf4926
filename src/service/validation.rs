//! Input validation for request schemas. Failures map to 422.

use crate::error::AppError;
use crate::models::{RestaurantCreate, RestaurantUpdate};
use crate::patch::Patch;
use regex::Regex;

/// Upper bound of every string column on `restaurant`.
pub const MAX_FIELD_LENGTH: usize = 255;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 40;
const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

pub struct RequestValidator;

impl RequestValidator {
    pub fn validate_create(input: &RestaurantCreate) -> Result<(), AppError> {
        validate_length("title", &input.title, 1, MAX_FIELD_LENGTH)?;
        for (field, value) in [
            ("description", &input.description),
            ("revo_tenant", &input.revo_tenant),
            ("revo_client_key", &input.revo_client_key),
            ("revo_api_key", &input.revo_api_key),
        ] {
            if let Some(v) = value {
                validate_length(field, v, 0, MAX_FIELD_LENGTH)?;
            }
        }
        Ok(())
    }

    /// Only present fields are checked; `title` may be omitted but not nulled.
    pub fn validate_update(input: &RestaurantUpdate) -> Result<(), AppError> {
        match &input.title {
            Patch::Absent => {}
            Patch::Null => return Err(AppError::Validation("title cannot be null".into())),
            Patch::Value(title) => validate_length("title", title, 1, MAX_FIELD_LENGTH)?,
        }
        for (field, value) in [
            ("description", &input.description),
            ("revo_tenant", &input.revo_tenant),
            ("revo_client_key", &input.revo_client_key),
            ("revo_api_key", &input.revo_api_key),
        ] {
            if let Patch::Value(v) = value {
                validate_length(field, v, 0, MAX_FIELD_LENGTH)?;
            }
        }
        Ok(())
    }

    pub fn validate_password(password: &str) -> Result<(), AppError> {
        validate_length("new_password", password, MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH)
    }

    pub fn validate_email(field: &str, email: &str) -> Result<(), AppError> {
        let re = Regex::new(EMAIL_PATTERN)
            .map_err(|_| AppError::Internal(format!("invalid pattern for {}", field)))?;
        if email.len() > MAX_FIELD_LENGTH || !re.is_match(email) {
            return Err(AppError::Validation(format!("{} must be a valid email", field)));
        }
        Ok(())
    }

    /// Offset paging parameters must not be negative.
    pub fn validate_page(skip: i64, limit: i64) -> Result<(), AppError> {
        if skip < 0 {
            return Err(AppError::Validation("skip must be at least 0".into()));
        }
        if limit < 0 {
            return Err(AppError::Validation("limit must be at least 0".into()));
        }
        Ok(())
    }
}

fn validate_length(field: &str, value: &str, min: usize, max: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len < min {
        return Err(AppError::Validation(format!(
            "{} must be at least {} characters",
            field, min
        )));
    }
    if len > max {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(title: &str) -> RestaurantCreate {
        RestaurantCreate {
            title: title.into(),
            description: None,
            revo_tenant: None,
            revo_client_key: None,
            revo_api_key: None,
        }
    }

    #[test]
    fn title_bounds() {
        assert!(RequestValidator::validate_create(&create("Foo")).is_ok());
        assert!(RequestValidator::validate_create(&create("")).is_err());
        assert!(RequestValidator::validate_create(&create(&"x".repeat(256))).is_err());
        assert!(RequestValidator::validate_create(&create(&"é".repeat(255))).is_ok());
    }

    #[test]
    fn update_rejects_null_title_but_allows_null_optionals() {
        let null_title = RestaurantUpdate {
            title: Patch::Null,
            ..Default::default()
        };
        assert!(matches!(
            RequestValidator::validate_update(&null_title),
            Err(AppError::Validation(_))
        ));
        let clear_description = RestaurantUpdate {
            description: Patch::Null,
            ..Default::default()
        };
        assert!(RequestValidator::validate_update(&clear_description).is_ok());
    }

    #[test]
    fn emails_and_passwords() {
        assert!(RequestValidator::validate_email("email", "chef@example.com").is_ok());
        assert!(RequestValidator::validate_email("email", "chef@example").is_err());
        assert!(RequestValidator::validate_email("email", "not an email").is_err());
        assert!(matches!(
            RequestValidator::validate_email("email_to", "@example.com"),
            Err(AppError::Validation(_))
        ));
        assert!(RequestValidator::validate_password("short").is_err());
        assert!(RequestValidator::validate_password("long-enough").is_ok());
    }

    #[test]
    fn negative_paging_is_rejected() {
        assert!(RequestValidator::validate_page(0, 100).is_ok());
        assert!(RequestValidator::validate_page(-1, 10).is_err());
        assert!(RequestValidator::validate_page(0, -10).is_err());
    }
}
