//! Favorites: the set of products a shopper marked for later.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::types::ProductId;

/// Outcome of [`FavoriteSet::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteToggle {
    Added,
    Removed,
}

/// Set of favorited product ids, kept in the order they were added.
///
/// Serializes as a plain JSON array of ids. Duplicates in stored data are
/// dropped on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ProductId>", into = "Vec<ProductId>")]
pub struct FavoriteSet {
    ids: Vec<ProductId>,
}

impl FavoriteSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` if absent, remove it if present.
    pub fn toggle(&mut self, id: ProductId) -> FavoriteToggle {
        if let Some(index) = self.ids.iter().position(|&f| f == id) {
            self.ids.remove(index);
            FavoriteToggle::Removed
        } else {
            self.ids.push(id);
            FavoriteToggle::Added
        }
    }

    #[must_use]
    pub fn is_favorite(&self, id: ProductId) -> bool {
        self.ids.contains(&id)
    }

    /// Favorited ids in insertion order.
    #[must_use]
    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    /// Drop ids that are not in `catalog`. Returns the number dropped.
    pub fn reconcile(&mut self, catalog: &Catalog) -> usize {
        let before = self.ids.len();
        self.ids.retain(|&id| catalog.get(id).is_some());
        before - self.ids.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl From<Vec<ProductId>> for FavoriteSet {
    fn from(raw: Vec<ProductId>) -> Self {
        let mut ids = Vec::with_capacity(raw.len());
        for id in raw {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Self { ids }
    }
}

impl From<FavoriteSet> for Vec<ProductId> {
    fn from(set: FavoriteSet) -> Self {
        set.ids
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut favorites = FavoriteSet::new();
        let id = ProductId::new(2);

        assert_eq!(favorites.toggle(id), FavoriteToggle::Added);
        assert!(favorites.is_favorite(id));
        assert_eq!(favorites.toggle(id), FavoriteToggle::Removed);
        assert!(!favorites.is_favorite(id));
    }

    #[test]
    fn test_double_toggle_restores_prior_state() {
        let mut favorites = FavoriteSet::from(vec![ProductId::new(1), ProductId::new(4)]);
        let before = favorites.clone();

        for id in [1, 3, 4] {
            favorites.toggle(ProductId::new(id));
            favorites.toggle(ProductId::new(id));
            assert_eq!(favorites.ids().len(), before.len());
        }
        assert!(favorites.is_favorite(ProductId::new(1)));
        assert!(!favorites.is_favorite(ProductId::new(3)));
        assert_eq!(favorites.len(), 2);
    }

    #[test]
    fn test_serializes_as_id_array() {
        let mut favorites = FavoriteSet::new();
        favorites.toggle(ProductId::new(5));
        favorites.toggle(ProductId::new(1));
        assert_eq!(serde_json::to_string(&favorites).unwrap(), "[5,1]");
    }

    #[test]
    fn test_reconcile_drops_ids_missing_from_catalog() {
        let mut favorites: FavoriteSet = serde_json::from_str("[99,4,0,2]").unwrap();
        assert_eq!(favorites.reconcile(crate::catalog()), 2);
        assert_eq!(favorites.ids(), [ProductId::new(4), ProductId::new(2)]);
    }

    #[test]
    fn test_deserialize_drops_duplicates() {
        let favorites: FavoriteSet = serde_json::from_str("[3,3,6,3]").unwrap();
        assert_eq!(favorites.ids(), [ProductId::new(3), ProductId::new(6)]);
    }
}
