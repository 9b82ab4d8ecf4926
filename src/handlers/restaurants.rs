//! Restaurant CRUD handlers. Ownership rules live in `RestaurantService`.

use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::models::{RestaurantCreate, RestaurantUpdate};
use crate::response::{ok, Message};
use crate::service::restaurant::DEFAULT_LIMIT;
use crate::service::RestaurantService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

/// GET /restaurants/?skip=&limit=
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(page): Query<Pagination>,
) -> Result<impl IntoResponse, AppError> {
    let restaurants =
        RestaurantService::list(state.store.as_ref(), &user, page.skip, page.limit).await?;
    Ok(ok(restaurants))
}

/// GET /restaurants/:id
pub async fn read(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let restaurant = RestaurantService::read(state.store.as_ref(), &user, id).await?;
    Ok(ok(restaurant))
}

/// POST /restaurants/
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<RestaurantCreate>,
) -> Result<impl IntoResponse, AppError> {
    let restaurant = RestaurantService::create(state.store.as_ref(), &user, input).await?;
    Ok(ok(restaurant))
}

/// PUT /restaurants/:id
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(input): Json<RestaurantUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let restaurant = RestaurantService::update(state.store.as_ref(), &user, id, input).await?;
    Ok(ok(restaurant))
}

/// DELETE /restaurants/:id
pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    RestaurantService::delete(state.store.as_ref(), &user, id).await?;
    Ok(ok(Message::new("restaurant deleted successfully")))
}
