//! Business logic services

pub mod catalog;

use crate::{config::CatalogConfig, repository::SharedStore};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
}

impl Services {
    /// Create all services over the given store
    pub fn new(store: SharedStore, catalog_config: CatalogConfig) -> Self {
        Self {
            catalog: catalog::CatalogService::new(store, catalog_config),
        }
    }
}
