//! Operational helpers under the versioned prefix.

use crate::email::{generate_test_email, send_email};
use crate::error::AppError;
use crate::extractors::CurrentSuperuser;
use crate::response::{created, Message};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TestEmailQuery {
    pub email_to: String,
}

/// POST /utils/test-email/?email_to= (superuser only)
pub async fn test_email(
    State(state): State<AppState>,
    CurrentSuperuser(user): CurrentSuperuser,
    Query(query): Query<TestEmailQuery>,
) -> Result<impl IntoResponse, AppError> {
    RequestValidator::validate_email("email_to", &query.email_to)?;
    let data = generate_test_email(&state.settings, &query.email_to)?;
    let report = send_email(&state.settings, &query.email_to, &data.subject, &data.html_content).await;
    report.log();
    tracing::info!(requested_by = %user.id, "test email dispatched");
    Ok(created(Message::new("Test email sent")))
}

/// GET /utils/health-check/
pub async fn health_check() -> Json<bool> {
    Json(true)
}
