//! Cart ledger: the products selected for checkout and their quantities.
//!
//! Invariants:
//! - at most one entry per product id
//! - every entry has a quantity of at least 1 (reaching 0 removes it)
//!
//! The ledger performs no I/O. Persistence is handled by whoever observes
//! its changes.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::types::{Price, Product, ProductId};

/// A product snapshot and how many units of it are in the cart.
///
/// Serializes flat, as the product fields plus a `quantity` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartEntry {
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_price(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// Ordered collection of cart entries, in the order products were first added.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CartEntry>", into = "Vec<CartEntry>")]
pub struct CartLedger {
    entries: Vec<CartEntry>,
}

impl CartLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `product`, creating the entry if needed.
    ///
    /// Returns the entry's new quantity.
    pub fn add(&mut self, product: &Product) -> u32 {
        if let Some(entry) = self.entry_mut(product.id) {
            entry.quantity = entry.quantity.saturating_add(1);
            return entry.quantity;
        }
        self.entries.push(CartEntry {
            product: product.clone(),
            quantity: 1,
        });
        1
    }

    /// Remove the entry for `id`. Absent entries are a no-op.
    ///
    /// Returns the removed entry, if there was one.
    pub fn remove(&mut self, id: ProductId) -> Option<CartEntry> {
        let index = self.entries.iter().position(|e| e.id() == id)?;
        Some(self.entries.remove(index))
    }

    /// Set the quantity of an existing entry. Zero removes it.
    ///
    /// Setting a quantity for a product that is not in the cart is a no-op.
    /// Returns `true` if an entry was changed or removed.
    pub fn set_quantity(&mut self, id: ProductId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(id).is_some();
        }
        match self.entry_mut(id) {
            Some(entry) => {
                entry.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Sum of price times quantity over every entry.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.entries.iter().map(CartEntry::line_price).sum()
    }

    /// Sum of quantities over every entry.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.entries
            .iter()
            .fold(0u32, |total, e| total.saturating_add(e.quantity))
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace every entry's product snapshot with the catalog's record for
    /// the same id, dropping entries whose product is not in the catalog.
    ///
    /// Quantities and order are kept. Returns the number of entries dropped.
    pub fn reconcile(&mut self, catalog: &Catalog) -> usize {
        let before = self.entries.len();
        self.entries.retain_mut(|entry| match catalog.get(entry.id()) {
            Some(product) => {
                entry.product.clone_from(product);
                true
            }
            None => false,
        });
        before - self.entries.len()
    }

    fn entry_mut(&mut self, id: ProductId) -> Option<&mut CartEntry> {
        self.entries.iter_mut().find(|e| e.id() == id)
    }
}

impl From<Vec<CartEntry>> for CartLedger {
    /// Build a ledger from raw entries, restoring the invariants: zero
    /// quantities are dropped and repeated ids are merged.
    fn from(raw: Vec<CartEntry>) -> Self {
        let mut ledger = Self::new();
        for entry in raw.into_iter().filter(|e| e.quantity > 0) {
            match ledger.entry_mut(entry.id()) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(entry.quantity);
                }
                None => ledger.entries.push(entry),
            }
        }
        ledger
    }
}

impl From<CartLedger> for Vec<CartEntry> {
    fn from(ledger: CartLedger) -> Self {
        ledger.entries
    }
}
