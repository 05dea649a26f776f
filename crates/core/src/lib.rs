//! ProcessorHub Core - catalog and shopping state.
//!
//! This crate provides the domain logic shared by every ProcessorHub component:
//! - `storefront` - Web storefront (axum + askama)
//! - `cli` - Command-line access to the catalog, cart and favorites
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no storage,
//! no HTTP. State types expose their mutations and leave persistence to the
//! caller.
//!
//! # Modules
//!
//! - [`types`] - Product records, ids and prices
//! - [`catalog`] - The embedded product catalog
//! - [`query`] - Search, filter and sort pipeline
//! - [`cart`] - Cart ledger
//! - [`favorites`] - Favorites set

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod favorites;
pub mod query;
pub mod types;

pub use cart::{CartEntry, CartLedger};
pub use catalog::{Catalog, catalog};
pub use favorites::{FavoriteSet, FavoriteToggle};
pub use query::{Filter, ParseCriteriaError, QueryCriteria, SortKey, visible_products};
pub use types::*;
