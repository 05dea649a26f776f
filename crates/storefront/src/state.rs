//! Application state shared across handlers.

use std::sync::{Arc, Mutex, MutexGuard};

use processor_hub_core::Catalog;

use crate::config::StorefrontConfig;
use crate::error::AppError;
use crate::storage::{FileStore, KeyValueStore, StorageError};
use crate::store::ShopStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Shopper state lives behind a
/// single mutex so that each mutation, including its persistence write,
/// finishes before the next one starts. The write is synchronous file I/O on
/// the handling worker thread.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    shop: Mutex<ShopStore>,
}

impl AppState {
    /// Create application state persisting to the configured data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn new(config: StorefrontConfig, catalog: &'static Catalog) -> Result<Self, StorageError> {
        let storage = FileStore::open(&config.data_dir)?;
        tracing::info!(dir = %storage.dir().display(), "Using file storage");
        Ok(Self::with_storage(config, catalog, Arc::new(storage)))
    }

    /// Create application state on top of an explicit storage backend.
    #[must_use]
    pub fn with_storage(
        config: StorefrontConfig,
        catalog: &'static Catalog,
        storage: Arc<dyn KeyValueStore>,
    ) -> Self {
        let shop = ShopStore::open(catalog, storage);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                shop: Mutex::new(shop),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Lock the shop store.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if a previous holder panicked.
    pub fn shop(&self) -> Result<MutexGuard<'_, ShopStore>, AppError> {
        self.inner
            .shop
            .lock()
            .map_err(|_| AppError::Internal("shop store lock poisoned".to_string()))
    }
}
