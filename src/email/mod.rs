//! Outgoing emails: template rendering, builders for each message, SMTP dispatch.

pub mod render;
pub mod send;

use crate::config::Settings;
use crate::error::AppError;
use serde::Serialize;

pub use render::render_email_template;
pub use send::{send_email, DeliveryOutcome, EmailReport};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailData {
    pub subject: String,
    pub html_content: String,
}

#[derive(Serialize)]
struct TestEmailContext<'a> {
    project_name: &'a str,
    email: &'a str,
}

#[derive(Serialize)]
struct ResetPasswordContext<'a> {
    project_name: &'a str,
    username: &'a str,
    email: &'a str,
    valid_hours: i64,
    link: String,
}

#[derive(Serialize)]
struct NewAccountContext<'a> {
    project_name: &'a str,
    username: &'a str,
    password: &'a str,
    email: &'a str,
    link: &'a str,
}

pub fn generate_test_email(settings: &Settings, email_to: &str) -> Result<EmailData, AppError> {
    let project_name = settings.project_name.as_str();
    let html_content = render_email_template(
        &settings.email_templates_dir,
        "test_email.html",
        TestEmailContext {
            project_name,
            email: email_to,
        },
    )?;
    Ok(EmailData {
        subject: format!("{project_name} - Test email"),
        html_content,
    })
}

pub fn generate_reset_password_email(
    settings: &Settings,
    email_to: &str,
    email: &str,
    token: &str,
) -> Result<EmailData, AppError> {
    let project_name = settings.project_name.as_str();
    let html_content = render_email_template(
        &settings.email_templates_dir,
        "reset_password.html",
        ResetPasswordContext {
            project_name,
            username: email,
            email: email_to,
            valid_hours: settings.email_reset_token_expire_hours,
            link: format!("{}/reset-password?token={}", settings.frontend_host, token),
        },
    )?;
    Ok(EmailData {
        subject: format!("{project_name} - Password recovery for user {email}"),
        html_content,
    })
}

pub fn generate_new_account_email(
    settings: &Settings,
    email_to: &str,
    username: &str,
    password: &str,
) -> Result<EmailData, AppError> {
    let project_name = settings.project_name.as_str();
    let html_content = render_email_template(
        &settings.email_templates_dir,
        "new_account.html",
        NewAccountContext {
            project_name,
            username,
            password,
            email: email_to,
            link: &settings.frontend_host,
        },
    )?;
    Ok(EmailData {
        subject: format!("{project_name} - New account for user {username}"),
        html_content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn settings() -> Settings {
        let templates = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("email-templates/build");
        Settings {
            email_templates_dir: templates,
            ..Settings::from_lookup(|k| match k {
                "PROJECT_NAME" => Some("Pizzeria".into()),
                "FRONTEND_HOST" => Some("https://app.pizzeria.test".into()),
                "EMAIL_RESET_TOKEN_EXPIRE_HOURS" => Some("12".into()),
                _ => None,
            })
            .unwrap()
        }
    }

    #[test]
    fn test_email_names_project() {
        let data = generate_test_email(&settings(), "guest@example.com").unwrap();
        assert_eq!(data.subject, "Pizzeria - Test email");
        assert!(data.html_content.contains("Pizzeria"));
        assert!(data.html_content.contains("guest@example.com"));
    }

    #[test]
    fn reset_email_carries_link_and_validity() {
        let data =
            generate_reset_password_email(&settings(), "to@example.com", "chef@example.com", "tok123")
                .unwrap();
        assert_eq!(data.subject, "Pizzeria - Password recovery for user chef@example.com");
        assert!(data
            .html_content
            .contains("https://app.pizzeria.test/reset-password?token=tok123"));
        assert!(data.html_content.contains("12 hours"));
    }

    #[test]
    fn new_account_email_includes_credentials() {
        let data =
            generate_new_account_email(&settings(), "to@example.com", "chef", "s3cret-pass").unwrap();
        assert_eq!(data.subject, "Pizzeria - New account for user chef");
        assert!(data.html_content.contains("s3cret-pass"));
        assert!(data.html_content.contains("https://app.pizzeria.test"));
    }
}
