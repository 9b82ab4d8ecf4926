//! Restaurant CRUD routes. Both `/restaurants` and `/restaurants/` serve the collection.

use crate::handlers::restaurants::{create, delete, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn restaurant_routes(state: AppState) -> Router {
    Router::new()
        .route("/restaurants/", get(list).post(create))
        .route("/restaurants", get(list).post(create))
        .route("/restaurants/:id", get(read).put(update).delete(delete))
        .with_state(state)
}
