//! Business rules on top of the store.

pub mod auth;
pub mod restaurant;
mod validation;

pub use auth::AuthService;
pub use restaurant::RestaurantService;
pub use validation::RequestValidator;
