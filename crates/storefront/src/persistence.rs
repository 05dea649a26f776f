//! Persistence bridge between the shop store and durable storage.
//!
//! At startup the bridge restores the cart and favorites. Afterwards it is
//! subscribed to the [`ShopStore`](crate::store::ShopStore) and rewrites the
//! whole changed collection on every event.
//!
//! Reads fail open: missing or malformed data restores as an empty
//! collection and is only logged. A failed write is logged and kept until
//! taken with [`PersistenceBridge::take_error`].

use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

use processor_hub_core::{CartLedger, FavoriteSet};

use crate::storage::{KeyValueStore, StorageError};
use crate::store::{StoreEvent, StoreObserver};

/// Storage key holding the serialized cart.
pub const CART_KEY: &str = "processorCart";

/// Storage key holding the serialized favorites.
pub const FAVORITES_KEY: &str = "processorFavorites";

/// Errors writing shopper state.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Shopper state as restored from storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShopperState {
    pub cart: CartLedger,
    pub favorites: FavoriteSet,
}

/// Reads and writes the cart and favorites collections.
///
/// Clones share the storage backend and the last write error.
#[derive(Clone)]
pub struct PersistenceBridge {
    storage: Arc<dyn KeyValueStore>,
    last_error: Arc<Mutex<Option<PersistenceError>>>,
}

impl PersistenceBridge {
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            last_error: Arc::new(Mutex::new(None)),
        }
    }

    /// Take the most recent write error seen by the observer, if any.
    pub fn take_error(&self) -> Option<PersistenceError> {
        self.last_error.lock().ok().and_then(|mut slot| slot.take())
    }

    /// Restore both collections. Never fails.
    #[must_use]
    pub fn restore(&self) -> ShopperState {
        let state = ShopperState {
            cart: self.load(CART_KEY),
            favorites: self.load(FAVORITES_KEY),
        };
        tracing::info!(
            cart_entries = state.cart.len(),
            favorites = state.favorites.len(),
            "Restored shopper state"
        );
        state
    }

    /// Write the full cart under [`CART_KEY`].
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if serialization or the storage write fails.
    pub fn save_cart(&self, cart: &CartLedger) -> Result<(), PersistenceError> {
        self.save(CART_KEY, cart)
    }

    /// Write the full favorites set under [`FAVORITES_KEY`].
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if serialization or the storage write fails.
    pub fn save_favorites(&self, favorites: &FavoriteSet) -> Result<(), PersistenceError> {
        self.save(FAVORITES_KEY, favorites)
    }

    fn load<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let raw = match self.storage.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read stored data, starting empty");
                return T::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(key, error = %e, "Stored data is malformed, starting empty");
            T::default()
        })
    }

    #[instrument(skip(self, value))]
    fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(value)?;
        self.storage.set(key, &json)?;
        tracing::debug!(bytes = json.len(), "Persisted collection");
        Ok(())
    }
}

impl StoreObserver for PersistenceBridge {
    fn on_change(&self, event: &StoreEvent<'_>) {
        let (key, result) = match event {
            StoreEvent::CartChanged(cart) => (CART_KEY, self.save_cart(cart)),
            StoreEvent::FavoritesChanged(favorites) => {
                (FAVORITES_KEY, self.save_favorites(favorites))
            }
        };
        if let Err(e) = result {
            tracing::error!(key, error = %e, "Failed to persist shopper state");
            if let Ok(mut slot) = self.last_error.lock() {
                *slot = Some(e);
            }
        }
    }
}
