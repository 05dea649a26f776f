//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Catalog page (q, brand, category, sort, filters, cart)
//! GET  /health                 - Health check
//! GET  /static/*               - Stylesheet and scripts
//!
//! # Catalog (HTMX fragments)
//! GET  /products               - Product grid fragment for live filtering
//!
//! # Favorites
//! GET  /favorites              - Favorited products page
//! POST /favorites/toggle       - Toggle favorite (returns heart button fragment)
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart modal fragment
//! POST /cart/add               - Add to cart (returns count badge, triggers cart-updated)
//! POST /cart/update            - Update quantity (returns cart_items fragment)
//! POST /cart/remove            - Remove item (returns cart_items fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//! ```
//!
//! Mutating routes announce their result through an `HX-Trigger` header
//! carrying the update event and a `toast` event with the notice to display.

pub mod cart;
pub mod catalog;
pub mod favorites;

use axum::{
    Router,
    extract::Request,
    middleware,
    response::AppendHeaders,
    routing::{get, post},
};
use serde_json::{Map, Value};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::middleware::{request_id_middleware, security_headers_middleware};
use crate::state::AppState;
use crate::store::Notice;

/// Response header htmx reads client-side events from.
pub const HX_TRIGGER: &str = "HX-Trigger";

/// Build an `HX-Trigger` header firing `event`, plus a toast for `notice`.
pub fn hx_trigger(event: &str, notice: Option<&Notice>) -> AppendHeaders<[(&'static str, String); 1]> {
    let mut events = Map::new();
    events.insert(event.to_string(), Value::Null);
    if let Some(notice) = notice {
        events.insert(
            "toast".to_string(),
            serde_json::to_value(notice).unwrap_or(Value::Null),
        );
    }
    AppendHeaders([(HX_TRIGGER, Value::Object(events).to_string())])
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the favorites routes router.
pub fn favorite_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(favorites::index))
        .route("/toggle", post(favorites::toggle))
}

/// Create all page and fragment routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/", get(catalog::index))
        .route("/products", get(catalog::grid))
        // Cart routes
        .nest("/cart", cart_routes())
        // Favorites routes
        .nest("/favorites", favorite_routes())
}

/// Build the full application router with static files and middleware.
///
/// Sentry layers are left to the caller so tests can run without a client.
pub fn app(state: AppState) -> Router {
    let static_dir = state.config().static_dir.clone();

    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
pub async fn health() -> &'static str {
    "ok"
}
