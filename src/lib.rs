//! Restaurant API: ownership-scoped restaurant CRUD over PostgreSQL, with
//! password login, reset tokens and SMTP notifications.

pub mod config;
pub mod email;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod models;
pub mod patch;
pub mod response;
pub mod routes;
pub mod security;
pub mod service;
pub mod state;
pub mod store;

pub use config::{Settings, SmtpSettings};
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use routes::{api_routes, app, common_routes};
pub use service::{AuthService, RestaurantService};
pub use state::AppState;
pub use store::{ensure_database_exists, MemoryStore, PgStore, Store};
