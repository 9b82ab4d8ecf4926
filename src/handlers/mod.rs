//! HTTP handlers for restaurants, login/recovery and utilities.

pub mod login;
pub mod restaurants;
pub mod utils;
