use crate::handlers::utils::{health_check, test_email};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn utils_routes(state: AppState) -> Router {
    Router::new()
        .route("/utils/test-email/", post(test_email))
        .route("/utils/health-check/", get(health_check))
        .with_state(state)
}
