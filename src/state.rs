//! Shared application state for all routes.

use crate::config::Settings;
use crate::store::Store;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    /// Read-only after start-up.
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new<S: Store + 'static>(store: S, settings: Settings) -> Self {
        AppState {
            store: Arc::new(store),
            settings: Arc::new(settings),
        }
    }
}
