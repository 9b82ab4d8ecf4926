//! Password login and recovery.

use crate::error::AppError;
use crate::models::{NewPassword, Token};
use crate::response::{ok, Message};
use crate::security::create_access_token;
use crate::service::AuthService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Form, Json,
};
use serde::Deserialize;

/// OAuth2 password-grant form; `username` carries the email.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// POST /login/access-token
pub async fn access_token(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthService::authenticate(state.store.as_ref(), &form.username, &form.password)
        .await?
        .ok_or_else(|| AppError::BadRequest("Incorrect email or password".into()))?;
    if !user.is_active {
        return Err(AppError::BadRequest("Inactive user".into()));
    }
    let token = create_access_token(&state.settings, user.id)?;
    Ok(ok(Token::bearer(token)))
}

/// POST /password-recovery/:email
pub async fn recover_password(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let report = AuthService::recover_password(state.store.as_ref(), &state.settings, &email).await?;
    report.log();
    Ok(ok(Message::new("Password recovery email sent")))
}

/// POST /reset-password/
pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<NewPassword>,
) -> Result<impl IntoResponse, AppError> {
    AuthService::reset_password(
        state.store.as_ref(),
        &state.settings,
        &body.token,
        &body.new_password,
    )
    .await?;
    Ok(ok(Message::new("Password updated successfully")))
}
