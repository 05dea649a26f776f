//! CLI subcommands.
//!
//! Each command returns its output as a string; `main` does the printing.

pub mod cart;
pub mod catalog;
pub mod favorites;

use processor_hub_core::{ParseCriteriaError, Product};
use processor_hub_storefront::persistence::PersistenceError;
use processor_hub_storefront::storage::StorageError;
use processor_hub_storefront::store::{Notice, ShopStore, StoreError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Data directory could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Shop store rejected the change.
    #[error("{0}")]
    Store(#[from] StoreError),

    /// Invalid catalog filter.
    #[error("Invalid query: {0}")]
    Query(#[from] ParseCriteriaError),

    /// The change was applied but could not be saved.
    #[error("Change not saved: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Fail if the store could not save the last change.
pub fn ensure_saved(store: &ShopStore) -> Result<(), CliError> {
    store.take_persist_error().map_or(Ok(()), |e| Err(e.into()))
}

/// One line per product: id, name, brand, price and rating.
pub fn product_line(product: &Product) -> String {
    let price = product.discount_percent().map_or_else(
        || product.price.to_string(),
        |pct| format!("{} (-{pct}% from {})", product.price, product.original_price),
    );
    format!(
        "{:>3}  {:<22} {:<6} {:<26} {:.1}/5 ({} reviews)",
        product.id.as_i32(),
        product.name,
        product.brand.label(),
        price,
        product.rating,
        product.reviews
    )
}

pub fn notice_line(notice: &Notice) -> String {
    format!("{}: {}", notice.title, notice.description)
}
