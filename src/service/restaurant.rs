//! Ownership-scoped restaurant operations.
//!
//! A superuser sees and changes every restaurant. Anyone else only reaches
//! rows whose `owner_id` is their own id; touching another user's row is
//! reported as `PermissionDenied`, a missing row as `NotFound`.

use crate::error::AppError;
use crate::models::{Restaurant, RestaurantCreate, RestaurantUpdate, RestaurantsPublic, User};
use crate::service::RequestValidator;
use crate::store::Store;
use uuid::Uuid;

pub const DEFAULT_LIMIT: i64 = 100;

pub struct RestaurantService;

impl RestaurantService {
    pub async fn list(
        store: &dyn Store,
        principal: &User,
        skip: i64,
        limit: i64,
    ) -> Result<RestaurantsPublic, AppError> {
        RequestValidator::validate_page(skip, limit)?;
        let owner = if principal.is_superuser {
            None
        } else {
            Some(principal.id)
        };
        let (data, count) = store.list_restaurants(owner, skip, limit).await?;
        Ok(RestaurantsPublic { data, count })
    }

    pub async fn read(store: &dyn Store, principal: &User, id: Uuid) -> Result<Restaurant, AppError> {
        Self::load_owned(store, principal, id).await
    }

    /// The principal becomes the owner.
    pub async fn create(
        store: &dyn Store,
        principal: &User,
        input: RestaurantCreate,
    ) -> Result<Restaurant, AppError> {
        RequestValidator::validate_create(&input)?;
        let restaurant = input.into_restaurant(principal.id);
        let created = store.insert_restaurant(&restaurant).await?;
        tracing::info!(restaurant_id = %created.id, owner_id = %created.owner_id, "restaurant created");
        Ok(created)
    }

    pub async fn update(
        store: &dyn Store,
        principal: &User,
        id: Uuid,
        input: RestaurantUpdate,
    ) -> Result<Restaurant, AppError> {
        RequestValidator::validate_update(&input)?;
        Self::load_owned(store, principal, id).await?;
        store
            .update_restaurant(id, &input)
            .await?
            .ok_or_else(AppError::restaurant_not_found)
    }

    pub async fn delete(store: &dyn Store, principal: &User, id: Uuid) -> Result<(), AppError> {
        Self::load_owned(store, principal, id).await?;
        if !store.delete_restaurant(id).await? {
            return Err(AppError::restaurant_not_found());
        }
        tracing::info!(restaurant_id = %id, principal_id = %principal.id, "restaurant deleted");
        Ok(())
    }

    async fn load_owned(store: &dyn Store, principal: &User, id: Uuid) -> Result<Restaurant, AppError> {
        let restaurant = store
            .get_restaurant(id)
            .await?
            .ok_or_else(AppError::restaurant_not_found)?;
        if !can_access(principal, &restaurant) {
            tracing::debug!(restaurant_id = %id, principal_id = %principal.id, "ownership check failed");
            return Err(AppError::not_enough_permissions());
        }
        Ok(restaurant)
    }
}

pub fn can_access(principal: &User, restaurant: &Restaurant) -> bool {
    principal.is_superuser || restaurant.owner_id == principal.id
}
