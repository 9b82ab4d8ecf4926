//! Request/response schemas and persisted records.

pub mod restaurant;
pub mod user;

pub use restaurant::{Restaurant, RestaurantCreate, RestaurantUpdate, RestaurantsPublic};
pub use user::{NewPassword, NewUser, Token, User};
