//! Favorites route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use processor_hub_core::{FavoriteToggle, ProductId};

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::routes::cart::{CartView, ProductForm};
use crate::routes::catalog::{FavoriteButtonView, ProductCardView};
use crate::routes::hx_trigger;
use crate::state::AppState;

/// Event fired after any favorites change.
pub const FAVORITES_UPDATED: &str = "favorites-updated";

/// Favorites page template.
#[derive(Template, WebTemplate)]
#[template(path = "favorites.html")]
pub struct FavoritesTemplate {
    pub cards: Vec<ProductCardView>,
    pub show_cart: bool,
    pub cart: CartView,
    pub cart_count: u32,
}

/// Heart toggle fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/favorite_button.html")]
pub struct FavoriteButtonTemplate {
    pub button: FavoriteButtonView,
}

/// Display favorited products, in the order they were added.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<FavoritesTemplate> {
    let (cards, cart) = {
        let shop = state.shop()?;
        let favorites = shop.favorites();
        let cards: Vec<ProductCardView> = favorites
            .ids()
            .iter()
            .filter_map(|id| shop.catalog().get(*id))
            .map(|product| ProductCardView::new(product, favorites))
            .collect();
        (cards, CartView::from(shop.cart()))
    };

    Ok(FavoritesTemplate {
        cards,
        show_cart: false,
        cart_count: cart.item_count,
        cart,
    })
}

/// Toggle a product's favorite status (HTMX).
///
/// Returns the heart button in its new state.
#[instrument(skip(state))]
pub async fn toggle(
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let id = ProductId::new(form.product_id);
    let (outcome, notice) = state.shop()?.toggle_favorite(id)?;

    let product_id = id.to_string();
    add_breadcrumb(
        "favorites",
        "Toggled favorite",
        Some(&[("product_id", product_id.as_str())]),
    );

    let button = FavoriteButtonView::new(id.as_i32(), outcome == FavoriteToggle::Added);
    Ok((
        hx_trigger(FAVORITES_UPDATED, Some(&notice)),
        FavoriteButtonTemplate { button },
    )
        .into_response())
}
