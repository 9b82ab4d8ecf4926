//! In-process store with the same constraints as the SQL schema (owner FK with
//! cascade, unique email). Used by the test suite and for database-less runs.

use crate::error::AppError;
use crate::models::{NewUser, Restaurant, RestaurantUpdate, User};
use crate::store::Store;
use async_trait::async_trait;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    /// Kept in insertion order.
    restaurants: Vec<Restaurant>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, AppError> {
        self.tables
            .read()
            .map_err(|_| AppError::Internal("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, AppError> {
        self.tables
            .write()
            .map_err(|_| AppError::Internal("memory store lock poisoned".into()))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }

    async fn list_restaurants(
        &self,
        owner: Option<Uuid>,
        skip: i64,
        limit: i64,
    ) -> Result<(Vec<Restaurant>, i64), AppError> {
        let tables = self.read()?;
        let visible: Vec<&Restaurant> = tables
            .restaurants
            .iter()
            .filter(|r| owner.map_or(true, |o| r.owner_id == o))
            .collect();
        let count = visible.len() as i64;
        let page = visible
            .into_iter()
            .skip(usize::try_from(skip).unwrap_or(0))
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect();
        Ok((page, count))
    }

    async fn get_restaurant(&self, id: Uuid) -> Result<Option<Restaurant>, AppError> {
        Ok(self.read()?.restaurants.iter().find(|r| r.id == id).cloned())
    }

    async fn insert_restaurant(&self, restaurant: &Restaurant) -> Result<Restaurant, AppError> {
        let mut tables = self.write()?;
        if !tables.users.iter().any(|u| u.id == restaurant.owner_id) {
            return Err(AppError::Internal(format!(
                "restaurant.owner_id {} violates foreign key to user",
                restaurant.owner_id
            )));
        }
        if tables.restaurants.iter().any(|r| r.id == restaurant.id) {
            return Err(AppError::Internal(format!("duplicate restaurant id {}", restaurant.id)));
        }
        tables.restaurants.push(restaurant.clone());
        Ok(restaurant.clone())
    }

    async fn update_restaurant(
        &self,
        id: Uuid,
        patch: &RestaurantUpdate,
    ) -> Result<Option<Restaurant>, AppError> {
        let mut tables = self.write()?;
        let Some(slot) = tables.restaurants.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        patch.apply_to(slot);
        Ok(Some(slot.clone()))
    }

    async fn delete_restaurant(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.write()?;
        let before = tables.restaurants.len();
        tables.restaurants.retain(|r| r.id != id);
        Ok(tables.restaurants.len() != before)
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.read()?.users.iter().find(|u| u.id == id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.read()?.users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, AppError> {
        let mut tables = self.write()?;
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Internal(format!("duplicate user email {}", user.email)));
        }
        let user = user.into_user();
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn set_user_password(&self, id: Uuid, hashed_password: &str) -> Result<(), AppError> {
        let mut tables = self.write()?;
        if let Some(user) = tables.users.iter_mut().find(|u| u.id == id) {
            user.hashed_password = hashed_password.to_string();
        }
        Ok(())
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.write()?;
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        if tables.users.len() == before {
            return Ok(false);
        }
        tables.restaurants.retain(|r| r.owner_id != id);
        Ok(true)
    }
}
