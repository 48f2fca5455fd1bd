//! Application state for the payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::store::{AdminDataSource, AdminStore};

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// loaded configuration and the admin store built over a data source.
#[derive(Clone)]
pub struct AppState {
    /// The loaded payroll configuration.
    config: Arc<ConfigLoader>,
    /// The admin data store.
    store: Arc<AdminStore>,
}

impl AppState {
    /// Creates a new application state over the given data source.
    pub fn new(config: ConfigLoader, source: Arc<dyn AdminDataSource>) -> Self {
        let config = Arc::new(config);
        let store = Arc::new(AdminStore::new(source, Arc::clone(&config)));
        Self { config, store }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the admin store.
    pub fn store(&self) -> &AdminStore {
        &self.store
    }
}
