//! Saved favorites commands.

use clap::Subcommand;
use processor_hub_core::ProductId;
use processor_hub_storefront::store::ShopStore;

use super::{CliError, ensure_saved, notice_line, product_line};

#[derive(Debug, Subcommand)]
pub enum FavoritesAction {
    /// List favorites in the order they were added
    List,
    /// Add or remove a product from favorites
    Toggle {
        /// Product id
        id: i32,
    },
}

/// Apply `action` to the store.
///
/// # Errors
///
/// Returns `CliError::Store` when toggling a product that is not in the catalog,
/// and `CliError::Persistence` when the change could not be saved.
pub fn run(store: &mut ShopStore, action: FavoritesAction) -> Result<String, CliError> {
    match action {
        FavoritesAction::List => Ok(list(store)),
        FavoritesAction::Toggle { id } => {
            let (_, notice) = store.toggle_favorite(ProductId::new(id))?;
            ensure_saved(store)?;
            Ok(notice_line(&notice))
        }
    }
}

fn list(store: &ShopStore) -> String {
    let lines: Vec<String> = store
        .favorites()
        .ids()
        .iter()
        .filter_map(|id| store.catalog().get(*id))
        .map(product_line)
        .collect();

    if lines.is_empty() {
        "No favorites yet".to_string()
    } else {
        lines.join("\n")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use processor_hub_core::catalog;
    use processor_hub_storefront::storage::{
        KeyValueStore, MemoryStore, StorageError, StorageResult,
    };

    use super::*;

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> StorageResult<Option<String>> {
            Ok(None)
        }

        fn set(&self, key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::InvalidKey(key.to_string()))
        }
    }

    #[test]
    fn test_toggle_and_list() {
        let mut store = ShopStore::open(catalog(), Arc::new(MemoryStore::new()));
        assert_eq!(run(&mut store, FavoritesAction::List).unwrap(), "No favorites yet");

        let output = run(&mut store, FavoritesAction::Toggle { id: 4 }).unwrap();
        assert!(output.starts_with("Added to favorites!"));
        run(&mut store, FavoritesAction::Toggle { id: 1 }).unwrap();

        let output = run(&mut store, FavoritesAction::List).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("AMD Ryzen 7 7800X3D"));
        assert!(lines[1].contains("Intel Core i9-13900K"));

        let output = run(&mut store, FavoritesAction::Toggle { id: 4 }).unwrap();
        assert!(output.starts_with("Removed from favorites"));
    }

    #[test]
    fn test_unsaved_toggle_is_an_error() {
        let mut store = ShopStore::open(catalog(), Arc::new(FailingStore));
        let result = run(&mut store, FavoritesAction::Toggle { id: 2 });
        assert!(matches!(result, Err(CliError::Persistence(_))));
    }
}
