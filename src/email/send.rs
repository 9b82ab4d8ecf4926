//! SMTP delivery through the sandbox and "real" transports.
//!
//! Each enabled transport is tried on its own; the outcome of one never
//! affects the other. Nothing here returns an error: the caller gets an
//! `EmailReport` and logs it.

use crate::config::{Settings, SmtpSecurity, SmtpSettings};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::response::Response;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Sent,
    /// The server answered with a non-success code.
    Rejected { code: String, reason: String },
    /// Could not build the message or talk to the server.
    Failed { reason: String },
}

/// Per-transport outcome; `None` means the transport is disabled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailReport {
    pub email_to: String,
    pub sandbox: Option<DeliveryOutcome>,
    pub real: Option<DeliveryOutcome>,
}

impl EmailReport {
    pub fn log(&self) {
        for (transport, outcome) in [("sandbox", &self.sandbox), ("real", &self.real)] {
            match outcome {
                None => tracing::debug!(transport, email_to = %self.email_to, "email transport disabled"),
                Some(DeliveryOutcome::Sent) => {
                    tracing::info!(transport, email_to = %self.email_to, "email sent")
                }
                Some(DeliveryOutcome::Rejected { code, reason }) => tracing::error!(
                    transport,
                    email_to = %self.email_to,
                    code = %code,
                    reason = %reason,
                    "email rejected"
                ),
                Some(DeliveryOutcome::Failed { reason }) => tracing::error!(
                    transport,
                    email_to = %self.email_to,
                    reason = %reason,
                    "email send failed"
                ),
            }
        }
    }
}

pub async fn send_email(
    settings: &Settings,
    email_to: &str,
    subject: &str,
    html_content: &str,
) -> EmailReport {
    let sandbox = if settings.emails_enabled() {
        Some(deliver(&settings.smtp, email_to, subject, html_content).await)
    } else {
        None
    };
    let real = if settings.emails_enabled_real() {
        Some(deliver(&settings.smtp_real, email_to, subject, html_content).await)
    } else {
        None
    };
    EmailReport {
        email_to: email_to.to_string(),
        sandbox,
        real,
    }
}

async fn deliver(
    smtp: &SmtpSettings,
    email_to: &str,
    subject: &str,
    html_content: &str,
) -> DeliveryOutcome {
    let message = match build_message(smtp, email_to, subject, html_content) {
        Ok(m) => m,
        Err(reason) => return DeliveryOutcome::Failed { reason },
    };
    let transport = match build_transport(smtp) {
        Ok(t) => t,
        Err(reason) => return DeliveryOutcome::Failed { reason },
    };
    tracing::debug!(
        host = smtp.host.as_deref().unwrap_or_default(),
        port = smtp.port,
        security = ?smtp.security(),
        "sending email"
    );
    match transport.send(message).await {
        Ok(response) => outcome_from_response(&response),
        Err(e) => match e.status() {
            Some(code) => DeliveryOutcome::Rejected {
                code: code.to_string(),
                reason: e.to_string(),
            },
            None => DeliveryOutcome::Failed {
                reason: e.to_string(),
            },
        },
    }
}

fn outcome_from_response(response: &Response) -> DeliveryOutcome {
    if response.is_positive() {
        return DeliveryOutcome::Sent;
    }
    DeliveryOutcome::Rejected {
        code: response.code().to_string(),
        reason: response.message().collect::<Vec<_>>().join(" "),
    }
}

fn build_message(
    smtp: &SmtpSettings,
    email_to: &str,
    subject: &str,
    html_content: &str,
) -> Result<Message, String> {
    let from_email: Address = smtp
        .from_email
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(|e| format!("invalid sender address: {e}"))?;
    let to: Mailbox = email_to
        .parse()
        .map_err(|e| format!("invalid recipient address: {e}"))?;
    Message::builder()
        .from(Mailbox::new(smtp.from_name.clone(), from_email))
        .to(to)
        .subject(subject)
        .header(ContentType::TEXT_HTML)
        .body(html_content.to_string())
        .map_err(|e| format!("invalid message: {e}"))
}

fn build_transport(smtp: &SmtpSettings) -> Result<AsyncSmtpTransport<Tokio1Executor>, String> {
    let host = smtp.host.as_deref().unwrap_or_default();
    let builder = match smtp.security() {
        SmtpSecurity::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|e| format!("smtp starttls setup: {e}"))?,
        SmtpSecurity::Ssl => AsyncSmtpTransport::<Tokio1Executor>::relay(host)
            .map_err(|e| format!("smtp tls setup: {e}"))?,
        SmtpSecurity::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host),
    };
    let mut builder = builder.port(smtp.port);
    if let Some((user, password)) = smtp.credentials() {
        builder = builder.credentials(Credentials::new(user.to_string(), password.to_string()));
    }
    Ok(builder.build())
}
