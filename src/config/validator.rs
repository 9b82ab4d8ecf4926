//! Sanity checks on loaded settings.

use crate::config::types::Settings;
use crate::error::ConfigError;

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        key: key.to_string(),
        message: message.into(),
    }
}

/// Reject settings the service cannot run with.
pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    if !settings.api_v1_str.starts_with('/') || settings.api_v1_str.ends_with('/') {
        return Err(invalid("API_V1_STR", "must start with '/' and not end with '/'"));
    }
    if settings.access_token_expire_minutes <= 0 {
        return Err(invalid("ACCESS_TOKEN_EXPIRE_MINUTES", "must be positive"));
    }
    if settings.email_reset_token_expire_hours <= 0 {
        return Err(invalid("EMAIL_RESET_TOKEN_EXPIRE_HOURS", "must be positive"));
    }
    if settings.database_max_connections == 0 {
        return Err(invalid("DATABASE_MAX_CONNECTIONS", "must be at least 1"));
    }
    if settings.first_superuser.is_some() && settings.first_superuser_password.is_none() {
        return Err(ConfigError::Missing("FIRST_SUPERUSER_PASSWORD"));
    }
    Ok(())
}
