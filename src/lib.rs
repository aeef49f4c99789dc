//! Bookstore catalog server
//!
//! Stores book records, serves listing and search over them, and sells
//! copies through an atomic stock decrement, exposed as a REST JSON API.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod seed;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Build the state over an already constructed store
    pub fn new(config: AppConfig, store: repository::SharedStore) -> Self {
        let services = services::Services::new(store, config.catalog.clone());
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}
