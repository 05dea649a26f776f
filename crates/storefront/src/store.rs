//! The shop store: single owner of the shopper's cart and favorites.
//!
//! Every mutation updates the in-memory state first, then notifies the
//! subscribed observers synchronously, then returns the [`Notice`] to show
//! the shopper. Observers (such as the
//! [`PersistenceBridge`](crate::persistence::PersistenceBridge)) never see
//! state that has not been applied yet.

use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;

use processor_hub_core::{
    CartLedger, Catalog, FavoriteSet, FavoriteToggle, Product, ProductId,
};

use crate::persistence::{PersistenceBridge, PersistenceError};
use crate::storage::KeyValueStore;

/// Errors from shop store mutations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The product id is not in the catalog.
    #[error("unknown product: {0}")]
    UnknownProduct(ProductId),
}

/// A change to shopper state, carrying the full updated collection.
#[derive(Debug, Clone, Copy)]
pub enum StoreEvent<'a> {
    CartChanged(&'a CartLedger),
    FavoritesChanged(&'a FavoriteSet),
}

/// Receives every change applied to a [`ShopStore`].
pub trait StoreObserver: Send + Sync {
    fn on_change(&self, event: &StoreEvent<'_>);
}

/// Short, user-facing confirmation of an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
}

impl Notice {
    fn new(title: &str, description: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            description: description.into(),
        }
    }

    fn added_to_cart(product: &Product) -> Self {
        Self::new(
            "Added to cart!",
            format!("{} was added to your cart", product.name),
        )
    }

    fn removed_from_cart() -> Self {
        Self::new("Item removed", "The item was removed from your cart")
    }

    fn favorite_added() -> Self {
        Self::new("Added to favorites!", "The item was added to your favorites")
    }

    fn favorite_removed() -> Self {
        Self::new(
            "Removed from favorites",
            "The item was removed from your favorites",
        )
    }
}

/// Owner of the cart ledger and favorites set.
pub struct ShopStore {
    catalog: &'static Catalog,
    cart: CartLedger,
    favorites: FavoriteSet,
    observers: Vec<Box<dyn StoreObserver>>,
    persistence: Option<PersistenceBridge>,
}

impl std::fmt::Debug for ShopStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopStore")
            .field("cart", &self.cart)
            .field("favorites", &self.favorites)
            .field("observers", &self.observers.len())
            .field("persisted", &self.persistence.is_some())
            .finish_non_exhaustive()
    }
}

impl ShopStore {
    /// Create a store with the given state and no observers.
    #[must_use]
    pub const fn new(catalog: &'static Catalog, cart: CartLedger, favorites: FavoriteSet) -> Self {
        Self {
            catalog,
            cart,
            favorites,
            observers: Vec::new(),
            persistence: None,
        }
    }

    /// Restore state from `storage` and persist every later change back to it.
    ///
    /// Restored cart entries take the catalog's current product record, and
    /// cart entries or favorites for products missing from the catalog are
    /// dropped.
    #[must_use]
    pub fn open(catalog: &'static Catalog, storage: Arc<dyn KeyValueStore>) -> Self {
        let bridge = PersistenceBridge::new(storage);
        let mut restored = bridge.restore();

        let dropped_entries = restored.cart.reconcile(catalog);
        let dropped_favorites = restored.favorites.reconcile(catalog);
        if dropped_entries + dropped_favorites > 0 {
            tracing::warn!(
                dropped_entries,
                dropped_favorites,
                "Dropped stored products missing from the catalog"
            );
        }

        let mut store = Self::new(catalog, restored.cart, restored.favorites);
        store.subscribe(bridge.clone());
        store.persistence = Some(bridge);
        store
    }

    /// Take the most recent persistence failure since the last call.
    ///
    /// Always `None` for a store built with [`ShopStore::new`].
    pub fn take_persist_error(&self) -> Option<PersistenceError> {
        self.persistence.as_ref().and_then(PersistenceBridge::take_error)
    }

    /// Register an observer for all future changes.
    pub fn subscribe(&mut self, observer: impl StoreObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    #[must_use]
    pub const fn catalog(&self) -> &'static Catalog {
        self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &CartLedger {
        &self.cart
    }

    #[must_use]
    pub const fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    /// Add one unit of a catalog product to the cart.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UnknownProduct` if `id` is not in the catalog.
    #[instrument(skip(self))]
    pub fn add_to_cart(&mut self, id: ProductId) -> Result<Notice, StoreError> {
        let product = self.product(id)?;
        let quantity = self.cart.add(product);
        tracing::info!(quantity, "Added to cart");
        self.emit_cart();
        Ok(Notice::added_to_cart(product))
    }

    /// Remove a product's entry from the cart. Absent entries are a no-op.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&mut self, id: ProductId) -> Notice {
        if self.cart.remove(id).is_some() {
            tracing::info!("Removed from cart");
            self.emit_cart();
        }
        Notice::removed_from_cart()
    }

    /// Set the quantity of a cart entry. Zero removes the entry.
    ///
    /// Unknown entries are left alone. Only a removal produces a notice.
    #[instrument(skip(self))]
    pub fn update_quantity(&mut self, id: ProductId, quantity: u32) -> Option<Notice> {
        if quantity == 0 {
            return Some(self.remove_from_cart(id));
        }
        if self.cart.set_quantity(id, quantity) {
            self.emit_cart();
        } else {
            tracing::debug!("Quantity update for product not in cart ignored");
        }
        None
    }

    /// Toggle a catalog product in the favorites set.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UnknownProduct` if `id` is not in the catalog.
    #[instrument(skip(self))]
    pub fn toggle_favorite(
        &mut self,
        id: ProductId,
    ) -> Result<(FavoriteToggle, Notice), StoreError> {
        self.product(id)?;
        let outcome = self.favorites.toggle(id);
        tracing::info!(?outcome, "Toggled favorite");
        self.emit(StoreEvent::FavoritesChanged(&self.favorites));
        let notice = match outcome {
            FavoriteToggle::Added => Notice::favorite_added(),
            FavoriteToggle::Removed => Notice::favorite_removed(),
        };
        Ok((outcome, notice))
    }

    fn product(&self, id: ProductId) -> Result<&'static Product, StoreError> {
        self.catalog.get(id).ok_or(StoreError::UnknownProduct(id))
    }

    fn emit_cart(&self) {
        self.emit(StoreEvent::CartChanged(&self.cart));
    }

    fn emit(&self, event: StoreEvent<'_>) {
        for observer in &self.observers {
            observer.on_change(&event);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::persistence::{CART_KEY, FAVORITES_KEY};
    use crate::storage::{MemoryStore, StorageError, StorageResult};
    use processor_hub_core::{Price, catalog};

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> StorageResult<Option<String>> {
            Ok(None)
        }

        fn set(&self, key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Io {
                key: key.to_string(),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            })
        }
    }

    /// Records the kind of every event it sees, plus the cart size at the time.
    #[derive(Clone, Default)]
    struct Recorder {
        seen: Arc<Mutex<Vec<String>>>,
    }

    impl StoreObserver for Recorder {
        fn on_change(&self, event: &StoreEvent<'_>) {
            let line = match event {
                StoreEvent::CartChanged(cart) => format!("cart:{}", cart.total_items()),
                StoreEvent::FavoritesChanged(favorites) => format!("favorites:{}", favorites.len()),
            };
            self.seen.lock().unwrap().push(line);
        }
    }

    fn recorded_store() -> (ShopStore, Recorder) {
        let mut store = ShopStore::new(catalog(), CartLedger::new(), FavoriteSet::new());
        let recorder = Recorder::default();
        store.subscribe(recorder.clone());
        (store, recorder)
    }

    #[test]
    fn test_events_reflect_applied_state() {
        let (mut store, recorder) = recorded_store();
        store.add_to_cart(ProductId::new(1)).unwrap();
        store.add_to_cart(ProductId::new(1)).unwrap();
        store.toggle_favorite(ProductId::new(2)).unwrap();
        store.update_quantity(ProductId::new(1), 5);
        store.remove_from_cart(ProductId::new(1));

        assert_eq!(
            *recorder.seen.lock().unwrap(),
            vec!["cart:1", "cart:2", "favorites:1", "cart:5", "cart:0"]
        );
    }

    #[test]
    fn test_noops_emit_nothing() {
        let (mut store, recorder) = recorded_store();
        store.remove_from_cart(ProductId::new(3));
        assert_eq!(store.update_quantity(ProductId::new(3), 4), None);
        assert!(recorder.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_add_notice_names_product() {
        let (mut store, _) = recorded_store();
        let notice = store.add_to_cart(ProductId::new(4)).unwrap();
        assert_eq!(notice.title, "Added to cart!");
        assert_eq!(
            notice.description,
            "AMD Ryzen 7 7800X3D was added to your cart"
        );
    }

    #[test]
    fn test_unknown_product_is_rejected() {
        let (mut store, recorder) = recorded_store();
        assert!(matches!(
            store.add_to_cart(ProductId::new(99)),
            Err(StoreError::UnknownProduct(_))
        ));
        assert!(store.toggle_favorite(ProductId::new(99)).is_err());
        assert!(store.cart().is_empty());
        assert!(recorder.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_quantity_to_zero_removes_with_notice() {
        let (mut store, _) = recorded_store();
        store.add_to_cart(ProductId::new(1)).unwrap();
        let notice = store.update_quantity(ProductId::new(1), 0).unwrap();
        assert_eq!(notice.title, "Item removed");
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_toggle_favorite_notices() {
        let (mut store, _) = recorded_store();
        let (outcome, notice) = store.toggle_favorite(ProductId::new(5)).unwrap();
        assert_eq!(outcome, FavoriteToggle::Added);
        assert_eq!(notice.title, "Added to favorites!");

        let (outcome, notice) = store.toggle_favorite(ProductId::new(5)).unwrap();
        assert_eq!(outcome, FavoriteToggle::Removed);
        assert_eq!(notice.title, "Removed from favorites");
        assert!(store.favorites().is_empty());
    }

    #[test]
    fn test_open_persists_and_restores() {
        let storage = Arc::new(MemoryStore::new());
        {
            let mut store = ShopStore::open(catalog(), storage.clone());
            store.add_to_cart(ProductId::new(1)).unwrap();
            store.add_to_cart(ProductId::new(3)).unwrap();
            store.toggle_favorite(ProductId::new(6)).unwrap();
        }
        assert!(storage.get(CART_KEY).unwrap().is_some());
        assert_eq!(storage.get(FAVORITES_KEY).unwrap().as_deref(), Some("[6]"));

        let store = ShopStore::open(catalog(), storage);
        assert_eq!(store.cart().total_price(), Price::from_dollars(998));
        assert_eq!(store.cart().total_items(), 2);
        assert!(store.favorites().is_favorite(ProductId::new(6)));
    }

    #[test]
    fn test_open_reanchors_restored_state_to_catalog() {
        let storage = Arc::new(MemoryStore::new());
        let mut entry = serde_json::to_value(catalog().get(ProductId::new(1)).unwrap()).unwrap();
        entry["price"] = "79228162514264337593543950335".into();
        entry["quantity"] = 2.into();
        let mut stale = entry.clone();
        stale["id"] = 99.into();
        let cart = serde_json::Value::Array(vec![entry, stale]);
        storage.set(CART_KEY, &cart.to_string()).unwrap();
        storage.set(FAVORITES_KEY, "[99,3]").unwrap();

        let store = ShopStore::open(catalog(), storage);

        assert_eq!(store.cart().len(), 1);
        assert_eq!(store.cart().total_price(), Price::from_dollars(1178));
        assert_eq!(store.favorites().ids(), [ProductId::new(3)]);
    }

    #[test]
    fn test_failed_write_is_reported() {
        let mut store = ShopStore::open(catalog(), Arc::new(ReadOnlyStore));
        store.add_to_cart(ProductId::new(1)).unwrap();

        assert!(matches!(
            store.take_persist_error(),
            Some(PersistenceError::Storage(_))
        ));
        assert!(store.take_persist_error().is_none());
        assert_eq!(store.cart().total_items(), 1);
    }
}
