//! Router assembly. Versioned routes are nested under `API_V1_STR`.

pub mod common;
pub mod login;
pub mod restaurants;
pub mod utils;

use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

pub use common::common_routes;
pub use login::login_routes;
pub use restaurants::restaurant_routes;
pub use utils::utils_routes;

/// Routes under the versioned prefix, without the prefix.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .merge(login_routes(state.clone()))
        .merge(restaurant_routes(state.clone()))
        .merge(utils_routes(state))
}

/// The whole application: common routes at the root, API under `API_V1_STR`.
pub fn app(state: AppState) -> Router {
    let prefix = state.settings.api_v1_str.clone();
    let max_body_bytes = state.settings.max_body_bytes;
    Router::new()
        .merge(common_routes(state.clone()))
        .nest(&prefix, api_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(max_body_bytes)),
        )
}
