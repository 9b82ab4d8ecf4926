//! Login, password recovery and first-superuser bootstrap.

use crate::config::Settings;
use crate::email::{generate_reset_password_email, send_email, EmailReport};
use crate::error::AppError;
use crate::models::{NewUser, User};
use crate::security::{
    generate_password_reset_token, hash_password, verify_password, verify_password_reset_token,
};
use crate::service::RequestValidator;
use crate::store::Store;

pub struct AuthService;

impl AuthService {
    /// The user with `email` if `password` matches. Unknown email and wrong password look the same.
    pub async fn authenticate(
        store: &dyn Store,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, AppError> {
        let Some(user) = store.get_user_by_email(email).await? else {
            return Ok(None);
        };
        if !verify_password(password, &user.hashed_password) {
            return Ok(None);
        }
        Ok(Some(user))
    }

    /// Send a reset link to `email`. Delivery problems end up in the report, not in the result.
    pub async fn recover_password(
        store: &dyn Store,
        settings: &Settings,
        email: &str,
    ) -> Result<EmailReport, AppError> {
        store.get_user_by_email(email).await?.ok_or_else(|| {
            AppError::NotFound("The user with this email does not exist in the system.".into())
        })?;
        let token = generate_password_reset_token(settings, email)?;
        let data = generate_reset_password_email(settings, email, email, &token)?;
        Ok(send_email(settings, email, &data.subject, &data.html_content).await)
    }

    pub async fn reset_password(
        store: &dyn Store,
        settings: &Settings,
        token: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        RequestValidator::validate_password(new_password)?;
        let email = verify_password_reset_token(settings, token)
            .ok_or_else(|| AppError::BadRequest("Invalid token".into()))?;
        let user = store.get_user_by_email(&email).await?.ok_or_else(|| {
            AppError::NotFound("The user with this email does not exist in the system.".into())
        })?;
        if !user.is_active {
            return Err(AppError::BadRequest("Inactive user".into()));
        }
        let hashed = hash_password(new_password)?;
        store.set_user_password(user.id, &hashed).await?;
        tracing::info!(user_id = %user.id, "password reset");
        Ok(())
    }

    /// Create `FIRST_SUPERUSER` unless it already exists. No-op when unset.
    pub async fn init_db(store: &dyn Store, settings: &Settings) -> Result<Option<User>, AppError> {
        let (Some(email), Some(password)) = (
            settings.first_superuser.as_deref(),
            settings.first_superuser_password.as_deref(),
        ) else {
            return Ok(None);
        };
        if let Some(existing) = store.get_user_by_email(email).await? {
            return Ok(Some(existing));
        }
        let user = store
            .insert_user(NewUser {
                email: email.to_string(),
                full_name: None,
                hashed_password: hash_password(password)?,
                is_active: true,
                is_superuser: true,
            })
            .await?;
        tracing::info!(user_id = %user.id, email = %user.email, "created first superuser");
        Ok(Some(user))
    }
}
