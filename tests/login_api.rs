mod common;

use axum::http::{Method, StatusCode};
use common::{TestApp, PASSWORD};
use restaurant_api::security::{generate_password_reset_token, hash_password};
use restaurant_api::models::NewUser;
use restaurant_api::Store;
use serde_json::json;

#[tokio::test]
async fn login_returns_bearer_token_usable_on_api() {
    let app = TestApp::new();
    app.normal_user().await;
    let (status, body) = app
        .form("/api/v1/login/access-token", &format!("username=cook%40example.com&password={PASSWORD}"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");
    let token = body["access_token"].as_str().unwrap();

    let (status, _) = app.json(Method::GET, "/api/v1/restaurants/", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn login_with_wrong_password_fails() {
    let app = TestApp::new();
    app.normal_user().await;
    let (status, body) = app
        .form("/api/v1/login/access-token", "username=cook%40example.com&password=nope")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Incorrect email or password");
}

#[tokio::test]
async fn inactive_users_cannot_log_in() {
    let app = TestApp::new();
    app.state
        .store
        .insert_user(NewUser {
            email: "retired@example.com".into(),
            full_name: Some("Retired Chef".into()),
            hashed_password: hash_password(PASSWORD).unwrap(),
            is_active: false,
            is_superuser: false,
        })
        .await
        .unwrap();
    let (status, body) = app
        .form(
            "/api/v1/login/access-token",
            &format!("username=retired%40example.com&password={PASSWORD}"),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Inactive user");
}

#[tokio::test]
async fn password_recovery_for_known_and_unknown_email() {
    let app = TestApp::new();
    app.normal_user().await;
    let (status, body) = app
        .json(Method::POST, "/api/v1/password-recovery/cook@example.com", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Password recovery email sent");

    let (status, body) = app
        .json(Method::POST, "/api/v1/password-recovery/ghost@example.com", None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "The user with this email does not exist in the system.");
}

#[tokio::test]
async fn password_recovery_for_malformed_email_is_not_found() {
    let app = TestApp::new();
    let (status, body) = app
        .json(Method::POST, "/api/v1/password-recovery/not-an-email", None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "The user with this email does not exist in the system.");
}

#[tokio::test]
async fn reset_password_flow() {
    let app = TestApp::new();
    app.normal_user().await;
    let token = generate_password_reset_token(&app.state.settings, "cook@example.com").unwrap();

    let (status, body) = app
        .json(
            Method::POST,
            "/api/v1/reset-password/",
            None,
            Some(json!({ "token": token, "new_password": "a-new-password" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Password updated successfully");

    let (status, _) = app
        .form("/api/v1/login/access-token", "username=cook%40example.com&password=a-new-password")
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn reset_password_with_invalid_token() {
    let app = TestApp::new();
    let (status, body) = app
        .json(
            Method::POST,
            "/api/v1/reset-password/",
            None,
            Some(json!({ "token": "invalid", "new_password": "a-new-password" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Invalid token");
}

#[tokio::test]
async fn test_email_requires_superuser() {
    let app = TestApp::new();
    let (_, cook) = app.normal_user().await;
    let (status, body) = app
        .json(Method::POST, "/api/v1/utils/test-email/?email_to=guest@example.com", Some(&cook), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["detail"], "The user doesn't have enough privileges");

    let (_, admin) = app.superuser().await;
    let (status, body) = app
        .json(Method::POST, "/api/v1/utils/test-email/?email_to=guest@example.com", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Test email sent");
}

#[tokio::test]
async fn health_endpoints() {
    let app = TestApp::new();
    let (status, body) = app.json(Method::GET, "/api/v1/utils/health-check/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(true));

    let (status, body) = app.json(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = app.json(Method::GET, "/ready", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");
}
