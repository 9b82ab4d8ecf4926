use crate::handlers::login::{access_token, recover_password, reset_password};
use crate::state::AppState;
use axum::{routing::post, Router};

pub fn login_routes(state: AppState) -> Router {
    Router::new()
        .route("/login/access-token", post(access_token))
        .route("/password-recovery/:email", post(recover_password))
        .route("/reset-password/", post(reset_password))
        .with_state(state)
}
