//! Signed tokens (HS256) and password hashing.

use crate::config::Settings;
use crate::error::AppError;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Debug, Serialize, Deserialize)]
struct AccessClaims {
    exp: i64,
    sub: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ResetClaims {
    exp: i64,
    nbf: i64,
    sub: String,
}

fn sign<T: Serialize>(settings: &Settings, claims: &T) -> Result<String, AppError> {
    encode(
        &Header::new(ALGORITHM),
        claims,
        &EncodingKey::from_secret(settings.secret_key.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("token encode: {e}")))
}

fn strict_validation(required: &[&str]) -> Validation {
    let mut validation = Validation::new(ALGORITHM);
    validation.leeway = 0;
    validation.validate_exp = true;
    validation.validate_nbf = true;
    validation.set_required_spec_claims(required);
    validation
}

/// Access token naming `user_id` as subject, valid for `ACCESS_TOKEN_EXPIRE_MINUTES`.
pub fn create_access_token(settings: &Settings, user_id: Uuid) -> Result<String, AppError> {
    let expires = Utc::now() + Duration::minutes(settings.access_token_expire_minutes);
    sign(
        settings,
        &AccessClaims {
            exp: expires.timestamp(),
            sub: user_id.to_string(),
        },
    )
}

/// The user id of a valid access token.
pub fn decode_access_token(settings: &Settings, token: &str) -> Option<Uuid> {
    let data = decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(settings.secret_key.as_bytes()),
        &strict_validation(&["exp", "sub"]),
    )
    .ok()?;
    Uuid::parse_str(&data.claims.sub).ok()
}

pub fn generate_password_reset_token(settings: &Settings, email: &str) -> Result<String, AppError> {
    generate_password_reset_token_at(settings, email, Utc::now())
}

/// Reset token for `email` issued at `now`, expiring `EMAIL_RESET_TOKEN_EXPIRE_HOURS` later.
pub fn generate_password_reset_token_at(
    settings: &Settings,
    email: &str,
    now: DateTime<Utc>,
) -> Result<String, AppError> {
    let expires = now + Duration::hours(settings.email_reset_token_expire_hours);
    sign(
        settings,
        &ResetClaims {
            exp: expires.timestamp(),
            nbf: now.timestamp(),
            sub: email.to_string(),
        },
    )
}

/// The email a reset token was issued for, or `None` if the token is unusable
/// for any reason (bad signature, expired, not yet valid, malformed).
pub fn verify_password_reset_token(settings: &Settings, token: &str) -> Option<String> {
    decode::<ResetClaims>(
        token,
        &DecodingKey::from_secret(settings.secret_key.as_bytes()),
        &strict_validation(&["exp", "nbf", "sub"]),
    )
    .map(|data| data.claims.sub)
    .ok()
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("password hash: {e}")))
}

pub fn verify_password(password: &str, hashed_password: &str) -> bool {
    PasswordHash::new(hashed_password)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}
