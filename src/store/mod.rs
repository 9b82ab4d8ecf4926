//! Persistence seam. Handlers and services only see `dyn Store`.

pub mod memory;
pub mod postgres;

use crate::error::AppError;
use crate::models::{NewUser, Restaurant, RestaurantUpdate, User};
use async_trait::async_trait;
use uuid::Uuid;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, PgStore};

#[async_trait]
pub trait Store: Send + Sync {
    /// Cheap round trip used by `GET /ready`.
    async fn ping(&self) -> Result<(), AppError>;

    /// One page of restaurants and the total matching count. `owner` limits both to one owner.
    async fn list_restaurants(
        &self,
        owner: Option<Uuid>,
        skip: i64,
        limit: i64,
    ) -> Result<(Vec<Restaurant>, i64), AppError>;

    async fn get_restaurant(&self, id: Uuid) -> Result<Option<Restaurant>, AppError>;

    async fn insert_restaurant(&self, restaurant: &Restaurant) -> Result<Restaurant, AppError>;

    /// Write only the columns present in `patch`; every other column keeps its
    /// current stored value. `None` if the row is gone.
    async fn update_restaurant(
        &self,
        id: Uuid,
        patch: &RestaurantUpdate,
    ) -> Result<Option<Restaurant>, AppError>;

    /// Returns whether a row was removed.
    async fn delete_restaurant(&self, id: Uuid) -> Result<bool, AppError>;

    async fn get_user(&self, id: Uuid) -> Result<Option<User>, AppError>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn insert_user(&self, user: NewUser) -> Result<User, AppError>;

    async fn set_user_password(&self, id: Uuid, hashed_password: &str) -> Result<(), AppError>;

    /// Removes the user and, by cascade, every restaurant it owns.
    async fn delete_user(&self, id: Uuid) -> Result<bool, AppError>;
}
