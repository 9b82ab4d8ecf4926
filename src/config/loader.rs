//! Build `Settings` from environment variables (or any key lookup, for tests).

use crate::config::types::{Settings, SmtpSettings};
use crate::config::validate;
use crate::error::ConfigError;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_PROJECT_NAME: &str = "Restaurant API";
const DEFAULT_ACCESS_TOKEN_MINUTES: i64 = 60 * 24 * 8;
const DEFAULT_RESET_TOKEN_HOURS: i64 = 48;

impl Settings {
    /// Read settings from the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let project_name = get("PROJECT_NAME").unwrap_or_else(|| DEFAULT_PROJECT_NAME.into());
        let settings = Settings {
            api_v1_str: get("API_V1_STR").unwrap_or_else(|| "/api/v1".into()),
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8000".into()),
            database_url: get("DATABASE_URL")
                .unwrap_or_else(|| "postgres://postgres@localhost/app".into()),
            database_max_connections: parse(&get, "DATABASE_MAX_CONNECTIONS", 5)?,
            secret_key: get("SECRET_KEY").unwrap_or_else(random_secret),
            access_token_expire_minutes: parse(
                &get,
                "ACCESS_TOKEN_EXPIRE_MINUTES",
                DEFAULT_ACCESS_TOKEN_MINUTES,
            )?,
            email_reset_token_expire_hours: parse(
                &get,
                "EMAIL_RESET_TOKEN_EXPIRE_HOURS",
                DEFAULT_RESET_TOKEN_HOURS,
            )?,
            frontend_host: get("FRONTEND_HOST").unwrap_or_else(|| "http://localhost:5173".into()),
            first_superuser: get("FIRST_SUPERUSER"),
            first_superuser_password: get("FIRST_SUPERUSER_PASSWORD"),
            email_templates_dir: get("EMAIL_TEMPLATES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("email-templates/build")),
            max_body_bytes: parse(&get, "MAX_BODY_BYTES", 1024 * 1024)?,
            smtp: smtp_from(&get, "", &project_name)?,
            smtp_real: smtp_from(&get, "_REAL", &project_name)?,
            project_name,
        };
        validate(&settings)?;
        Ok(settings)
    }
}

/// Reads `SMTP_*{suffix}` and `EMAILS_FROM_*{suffix}`. The sender name falls back to the project name.
fn smtp_from<G>(get: &G, suffix: &str, project_name: &str) -> Result<SmtpSettings, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    let key = |base: &str| format!("{}{}", base, suffix);
    Ok(SmtpSettings {
        host: get(&key("SMTP_HOST")),
        port: parse(get, &key("SMTP_PORT"), 587)?,
        tls: parse_bool(get, &key("SMTP_TLS"), true)?,
        ssl: parse_bool(get, &key("SMTP_SSL"), false)?,
        user: get(&key("SMTP_USER")),
        password: get(&key("SMTP_PASSWORD")),
        from_email: get(&key("EMAILS_FROM_EMAIL")),
        from_name: get(&key("EMAILS_FROM_NAME")).or_else(|| Some(project_name.to_string())),
    })
}

fn parse<G, T>(get: &G, key: &str, default: T) -> Result<T, ConfigError>
where
    G: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key: key.to_string(),
            message: format!("{raw:?}: {e}"),
        }),
    }
}

fn parse_bool<G>(get: &G, key: &str, default: bool) -> Result<bool, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    let Some(raw) = get(key) else {
        return Ok(default);
    };
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key: key.to_string(),
            message: format!("{raw:?} is not a boolean"),
        }),
    }
}

fn random_secret() -> String {
    tracing::warn!("SECRET_KEY not set, using a random key; issued tokens will not survive a restart");
    format!("{}{}", uuid::Uuid::new_v4().simple(), uuid::Uuid::new_v4().simple())
}
