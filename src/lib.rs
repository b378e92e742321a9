pub mod catalog;
pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod services;
pub mod views;

use tracing::info;

use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::services::BookingEngine;

// Состояние всего приложения. Единственный владелец мест - engine.
pub struct AppState {
    pub config: config::Config,
    pub engine: BookingEngine,
}

impl AppState {
    pub fn new(config: config::Config) -> Result<Self, CatalogError> {
        let catalog = Catalog::load(config.catalog.path.as_deref())?;
        Ok(Self::with_catalog(config, catalog))
    }

    pub fn with_catalog(config: config::Config, catalog: Catalog) -> Self {
        let engine = BookingEngine::new(catalog, &config);
        info!(
            "Box office ready: {} movies, {} showtimes",
            engine.catalog().movies().len(),
            engine.catalog().showtimes().len()
        );
        Self { config, engine }
    }
}
