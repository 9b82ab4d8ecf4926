//! Settings types. Built once at start-up and shared read-only through `AppState`.

use std::fmt;
use std::path::PathBuf;

const REDACTED: &str = "<redacted>";

/// How a transport secures its SMTP connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SmtpSecurity {
    /// Plain connection upgraded with STARTTLS.
    StartTls,
    /// Implicit TLS from the first byte.
    Ssl,
    None,
}

/// One SMTP transport. The service has two: a sandbox one and a "real" one,
/// each switched on independently.
#[derive(Clone, Default)]
pub struct SmtpSettings {
    pub host: Option<String>,
    pub port: u16,
    pub tls: bool,
    pub ssl: bool,
    pub user: Option<String>,
    pub password: Option<String>,
    pub from_email: Option<String>,
    pub from_name: Option<String>,
}

impl SmtpSettings {
    /// A transport sends only when both a host and a sender address are configured.
    pub fn enabled(&self) -> bool {
        self.host.as_deref().is_some_and(|h| !h.is_empty())
            && self.from_email.as_deref().is_some_and(|e| !e.is_empty())
    }

    /// `tls` wins over `ssl` when both are set.
    pub fn security(&self) -> SmtpSecurity {
        if self.tls {
            SmtpSecurity::StartTls
        } else if self.ssl {
            SmtpSecurity::Ssl
        } else {
            SmtpSecurity::None
        }
    }

    /// Credentials are only sent over STARTTLS and only when both halves are present.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.user.as_deref(), self.password.as_deref()) {
            (Some(u), Some(p)) if self.tls && !u.is_empty() && !p.is_empty() => Some((u, p)),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct Settings {
    pub project_name: String,
    /// Prefix for versioned routes, e.g. `/api/v1`.
    pub api_v1_str: String,
    pub bind_addr: String,
    pub database_url: String,
    pub database_max_connections: u32,
    pub secret_key: String,
    pub access_token_expire_minutes: i64,
    pub email_reset_token_expire_hours: i64,
    pub frontend_host: String,
    pub first_superuser: Option<String>,
    pub first_superuser_password: Option<String>,
    pub email_templates_dir: PathBuf,
    pub max_body_bytes: usize,
    /// Sandbox transport (mailcatcher and the like).
    pub smtp: SmtpSettings,
    /// Production transport with its own credentials.
    pub smtp_real: SmtpSettings,
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("tls", &self.tls)
            .field("ssl", &self.ssl)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| REDACTED))
            .field("from_email", &self.from_email)
            .field("from_name", &self.from_name)
            .finish()
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("project_name", &self.project_name)
            .field("api_v1_str", &self.api_v1_str)
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &REDACTED)
            .field("database_max_connections", &self.database_max_connections)
            .field("secret_key", &REDACTED)
            .field("access_token_expire_minutes", &self.access_token_expire_minutes)
            .field("email_reset_token_expire_hours", &self.email_reset_token_expire_hours)
            .field("frontend_host", &self.frontend_host)
            .field("first_superuser", &self.first_superuser)
            .field(
                "first_superuser_password",
                &self.first_superuser_password.as_ref().map(|_| REDACTED),
            )
            .field("email_templates_dir", &self.email_templates_dir)
            .field("max_body_bytes", &self.max_body_bytes)
            .field("smtp", &self.smtp)
            .field("smtp_real", &self.smtp_real)
            .finish()
    }
}

impl Settings {
    pub fn emails_enabled(&self) -> bool {
        self.smtp.enabled()
    }

    pub fn emails_enabled_real(&self) -> bool {
        self.smtp_real.enabled()
    }
}
