//! Saved cart commands.
//!
//! # Usage
//!
//! ```bash
//! hub-cli cart show
//! hub-cli cart add 1
//! hub-cli cart set 1 3
//! hub-cli cart remove 1
//! ```

use clap::Subcommand;
use processor_hub_core::{CartLedger, ProductId};
use processor_hub_storefront::store::ShopStore;

use super::{CliError, ensure_saved, notice_line};

#[derive(Debug, Subcommand)]
pub enum CartAction {
    /// Show cart contents and total
    Show,
    /// Add one unit of a product
    Add {
        /// Product id
        id: i32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        id: i32,
    },
    /// Set the quantity of a product already in the cart (0 removes it)
    Set {
        /// Product id
        id: i32,
        /// New quantity
        quantity: u32,
    },
}

/// Apply `action` to the store and describe the resulting cart.
///
/// # Errors
///
/// Returns `CliError::Store` when adding a product that is not in the catalog,
/// and `CliError::Persistence` when the change could not be saved.
pub fn run(store: &mut ShopStore, action: CartAction) -> Result<String, CliError> {
    let notice = match action {
        CartAction::Show => None,
        CartAction::Add { id } => Some(store.add_to_cart(ProductId::new(id))?),
        CartAction::Remove { id } => Some(store.remove_from_cart(ProductId::new(id))),
        CartAction::Set { id, quantity } => store.update_quantity(ProductId::new(id), quantity),
    };
    ensure_saved(store)?;

    let mut output = notice.map(|n| notice_line(&n)).into_iter().collect::<Vec<_>>();
    output.push(summary(store.cart()));
    Ok(output.join("\n\n"))
}

fn summary(cart: &CartLedger) -> String {
    if cart.is_empty() {
        return "Your cart is empty".to_string();
    }

    let mut lines: Vec<String> = cart
        .entries()
        .iter()
        .map(|entry| {
            format!(
                "{:>3}  {:<22} {:>3} x {:<6} {}",
                entry.id().as_i32(),
                entry.product.name,
                entry.quantity,
                entry.product.price.to_string(),
                entry.line_price()
            )
        })
        .collect();
    lines.push(format!(
        "Total: {} ({} items)",
        cart.total_price(),
        cart.total_items()
    ));
    lines.join("\n")
}
