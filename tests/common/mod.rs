//! Shared harness: the full router over an in-memory store.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use restaurant_api::models::{NewUser, User};
use restaurant_api::security::{create_access_token, hash_password};
use restaurant_api::{app, AppState, MemoryStore, Settings, Store};
use serde_json::Value;
use std::path::PathBuf;
use tower::ServiceExt;

pub const PASSWORD: &str = "correct-horse";

pub struct TestApp {
    pub state: AppState,
    router: Router,
}

pub fn test_settings() -> Settings {
    Settings {
        email_templates_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("email-templates/build"),
        ..Settings::from_lookup(|k| match k {
            "SECRET_KEY" => Some("integration-test-secret".into()),
            "PROJECT_NAME" => Some("Pizzeria".into()),
            _ => None,
        })
        .unwrap()
    }
}

impl TestApp {
    pub fn new() -> Self {
        let state = AppState::new(MemoryStore::new(), test_settings());
        let router = app(state.clone());
        TestApp { state, router }
    }

    /// Insert an active user and return it with a valid access token.
    pub async fn user(&self, email: &str, is_superuser: bool) -> (User, String) {
        let user = self
            .state
            .store
            .insert_user(NewUser {
                email: email.into(),
                full_name: None,
                hashed_password: hash_password(PASSWORD).unwrap(),
                is_active: true,
                is_superuser,
            })
            .await
            .unwrap();
        let token = create_access_token(&self.state.settings, user.id).unwrap();
        (user, token)
    }

    pub async fn superuser(&self) -> (User, String) {
        self.user("admin@example.com", true).await
    }

    pub async fn normal_user(&self) -> (User, String) {
        self.user("cook@example.com", false).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn json(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    pub async fn form(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }
}
