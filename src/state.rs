//! Shared application state passed through the axum router.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::services::store::FuelStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn FuelStore>,
    pub config: EnvironmentConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn FuelStore>, config: EnvironmentConfig) -> Self {
        Self { store, config }
    }
}
