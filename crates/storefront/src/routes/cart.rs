//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Every mutation goes through the shop store, which persists the cart
//! before the response is rendered.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use processor_hub_core::{CartEntry, CartLedger, ProductId};

use crate::error::{Result, add_breadcrumb};
use crate::routes::hx_trigger;
use crate::state::AppState;

/// Event fired after any cart change.
pub const CART_UPDATED: &str = "cart-updated";

/// Cart item display data for templates.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub product_id: i32,
    pub name: String,
    pub brand: &'static str,
    pub price: String,
    pub line_price: String,
    pub quantity: u32,
    /// Quantity submitted by the minus button. Zero removes the item.
    pub decrement: u32,
    pub increment: u32,
}

impl From<&CartEntry> for CartItemView {
    fn from(entry: &CartEntry) -> Self {
        Self {
            product_id: entry.id().as_i32(),
            name: entry.product.name.clone(),
            brand: entry.product.brand.label(),
            price: entry.product.price.to_string(),
            line_price: entry.line_price().to_string(),
            quantity: entry.quantity,
            decrement: entry.quantity.saturating_sub(1),
            increment: entry.quantity.saturating_add(1),
        }
    }
}

/// Cart display data for templates.
#[derive(Debug, Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u32,
}

impl From<&CartLedger> for CartView {
    fn from(cart: &CartLedger) -> Self {
        Self {
            items: cart.entries().iter().map(CartItemView::from).collect(),
            total: cart.total_price().to_string(),
            item_count: cart.total_items(),
        }
    }
}

/// Form data naming a single product.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub product_id: i32,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: i32,
    pub quantity: u32,
}

/// Cart modal fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_modal.html")]
pub struct CartModalTemplate {
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

fn cart_view(state: &AppState) -> Result<CartView> {
    Ok(CartView::from(state.shop()?.cart()))
}

/// Display the cart modal (HTMX).
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<CartModalTemplate> {
    Ok(CartModalTemplate {
        cart: cart_view(&state)?,
    })
}

/// Add one unit of a product to the cart (HTMX).
///
/// Returns the updated count badge and a toast naming the product.
#[instrument(skip(state))]
pub async fn add(State(state): State<AppState>, Form(form): Form<ProductForm>) -> Result<Response> {
    let id = ProductId::new(form.product_id);
    let (notice, count) = {
        let mut shop = state.shop()?;
        let notice = shop.add_to_cart(id)?;
        (notice, shop.cart().total_items())
    };

    let product_id = id.to_string();
    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", product_id.as_str())]));

    Ok((
        hx_trigger(CART_UPDATED, Some(&notice)),
        CartCountTemplate { count },
    )
        .into_response())
}

/// Update cart item quantity (HTMX).
///
/// A quantity of zero removes the item and shows a toast.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let (notice, cart) = {
        let mut shop = state.shop()?;
        let notice = shop.update_quantity(ProductId::new(form.product_id), form.quantity);
        (notice, CartView::from(shop.cart()))
    };

    Ok((
        hx_trigger(CART_UPDATED, notice.as_ref()),
        CartItemsTemplate { cart },
    )
        .into_response())
}

/// Remove an item from the cart (HTMX).
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let (notice, cart) = {
        let mut shop = state.shop()?;
        let notice = shop.remove_from_cart(ProductId::new(form.product_id));
        (notice, CartView::from(shop.cart()))
    };

    Ok((
        hx_trigger(CART_UPDATED, Some(&notice)),
        CartItemsTemplate { cart },
    )
        .into_response())
}

/// Get cart count badge (HTMX).
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Result<CartCountTemplate> {
    let count = state.shop()?.cart().total_items();
    Ok(CartCountTemplate { count })
}
