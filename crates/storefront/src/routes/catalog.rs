//! Catalog route handlers.
//!
//! The full page and the HTMX grid fragment both run the same query
//! pipeline; the fragment lets the filter bar update results in place.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::instrument;

use processor_hub_core::{
    Brand, Category, FavoriteSet, ParseCriteriaError, Product, QueryCriteria, SortKey, query::ALL,
    visible_products,
};

use crate::error::Result;
use crate::filters;
use crate::routes::cart::CartView;
use crate::state::AppState;

/// Catalog query parameters.
///
/// `filters` and `cart` only control what the page shows for this request.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CatalogQuery {
    pub q: String,
    pub brand: String,
    pub category: String,
    pub sort: String,
    pub filters: bool,
    pub cart: bool,
}

impl CatalogQuery {
    fn criteria(&self) -> std::result::Result<QueryCriteria, ParseCriteriaError> {
        QueryCriteria::parse(&self.q, &self.brand, &self.category, &self.sort)
    }
}

/// Heart toggle display data.
#[derive(Debug, Clone, Copy)]
pub struct FavoriteButtonView {
    pub product_id: i32,
    pub pressed: &'static str,
    pub icon: &'static str,
    pub label: &'static str,
}

impl FavoriteButtonView {
    #[must_use]
    pub const fn new(product_id: i32, favorite: bool) -> Self {
        if favorite {
            Self {
                product_id,
                pressed: "true",
                icon: "\u{2665}",
                label: "Remove from favorites",
            }
        } else {
            Self {
                product_id,
                pressed: "false",
                icon: "\u{2661}",
                label: "Add to favorites",
            }
        }
    }
}

/// Product card display data for templates.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub id: i32,
    pub name: String,
    pub brand: &'static str,
    pub description: String,
    pub price: String,
    pub original_price: String,
    /// Present only when the product is discounted.
    pub discount: Option<u32>,
    pub cores: u16,
    pub threads: u16,
    pub boost_freq: String,
    pub features: Vec<String>,
    /// `"filled"` or `"empty"` for each of the five stars.
    pub stars: Vec<&'static str>,
    pub rating: String,
    pub reviews: u32,
    pub favorite: FavoriteButtonView,
}

impl ProductCardView {
    #[must_use]
    pub fn new(product: &Product, favorites: &FavoriteSet) -> Self {
        let full = usize::from(product.full_stars());
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            brand: product.brand.label(),
            description: product.description.clone(),
            price: product.price.to_string(),
            original_price: product.original_price.to_string(),
            discount: product.discount_percent(),
            cores: product.cores,
            threads: product.threads,
            boost_freq: product.boost_freq.clone(),
            features: product.highlighted_features().to_vec(),
            stars: (0..5)
                .map(|i| if i < full { "filled" } else { "empty" })
                .collect(),
            rating: format!("{:.1}", product.rating),
            reviews: product.reviews,
            favorite: FavoriteButtonView::new(
                product.id.as_i32(),
                favorites.is_favorite(product.id),
            ),
        }
    }
}

/// A `<select>` option in the filter bar.
#[derive(Debug, Clone)]
pub struct FilterOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

fn brand_options(criteria: &QueryCriteria) -> Vec<FilterOption> {
    let selected = criteria.brand.to_string();
    std::iter::once((ALL, "All brands"))
        .chain(Brand::ALL.iter().map(|b| (b.label(), b.label())))
        .map(|(value, label)| FilterOption {
            value,
            label,
            selected: value == selected,
        })
        .collect()
}

fn category_options(criteria: &QueryCriteria) -> Vec<FilterOption> {
    let selected = criteria.category.to_string();
    std::iter::once((ALL, "All categories"))
        .chain(Category::ALL.iter().map(|c| (c.as_str(), c.label())))
        .map(|(value, label)| FilterOption {
            value,
            label,
            selected: value == selected,
        })
        .collect()
}

fn sort_options(criteria: &QueryCriteria) -> Vec<FilterOption> {
    SortKey::ALL
        .iter()
        .map(|key| FilterOption {
            value: key.as_str(),
            label: key.label(),
            selected: *key == criteria.sort,
        })
        .collect()
}

/// Catalog page link that keeps the active search, filters and sort.
///
/// Defaults are left out of the query string.
fn catalog_href(criteria: &QueryCriteria, show_filters: bool) -> String {
    let brand = criteria.brand.to_string();
    let category = criteria.category.to_string();

    let mut params = Vec::new();
    if !criteria.search.is_empty() {
        params.push(format!("q={}", urlencoding::encode(&criteria.search)));
    }
    if brand != ALL {
        params.push(format!("brand={}", urlencoding::encode(&brand)));
    }
    if category != ALL {
        params.push(format!("category={}", urlencoding::encode(&category)));
    }
    if criteria.sort != SortKey::default() {
        params.push(format!("sort={}", criteria.sort.as_str()));
    }
    if show_filters {
        params.push("filters=true".to_string());
    }

    if params.is_empty() {
        "/".to_string()
    } else {
        format!("/?{}", params.join("&"))
    }
}

/// A hidden form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenField {
    pub name: &'static str,
    pub value: String,
}

/// Active brand and category filters, kept as hidden fields while the
/// filter panel is closed.
fn hidden_filters(criteria: &QueryCriteria) -> Vec<HiddenField> {
    [
        ("brand", criteria.brand.to_string()),
        ("category", criteria.category.to_string()),
    ]
    .into_iter()
    .filter(|(_, value)| value != ALL)
    .map(|(name, value)| HiddenField { name, value })
    .collect()
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct CatalogTemplate {
    pub cards: Vec<ProductCardView>,
    pub search: String,
    pub brands: Vec<FilterOption>,
    pub categories: Vec<FilterOption>,
    pub sorts: Vec<FilterOption>,
    pub show_filters: bool,
    /// Link that opens the filter panel, or closes it when already open.
    pub toggle_filters_href: String,
    pub hidden_filters: Vec<HiddenField>,
    pub show_cart: bool,
    pub cart: CartView,
    pub cart_count: u32,
}

/// Product grid fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_grid.html")]
pub struct ProductGridTemplate {
    pub cards: Vec<ProductCardView>,
}

fn cards(state: &AppState, criteria: &QueryCriteria) -> Result<(Vec<ProductCardView>, CartView)> {
    let shop = state.shop()?;
    let cards = visible_products(shop.catalog().products(), criteria)
        .into_iter()
        .map(|product| ProductCardView::new(product, shop.favorites()))
        .collect();
    Ok((cards, CartView::from(shop.cart())))
}

/// Display the catalog page.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<CatalogTemplate> {
    let criteria = query.criteria()?;
    let (cards, cart) = cards(&state, &criteria)?;
    tracing::debug!(results = cards.len(), "Rendering catalog");

    Ok(CatalogTemplate {
        brands: brand_options(&criteria),
        categories: category_options(&criteria),
        sorts: sort_options(&criteria),
        toggle_filters_href: catalog_href(&criteria, !query.filters),
        hidden_filters: hidden_filters(&criteria),
        search: criteria.search,
        cards,
        show_filters: query.filters,
        show_cart: query.cart,
        cart_count: cart.item_count,
        cart,
    })
}

/// Render the filtered product grid (HTMX).
#[instrument(skip(state))]
pub async fn grid(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<ProductGridTemplate> {
    let criteria = query.criteria()?;
    let (cards, _) = cards(&state, &criteria)?;
    Ok(ProductGridTemplate { cards })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::StatusCode;
    use processor_hub_core::{ProductId, catalog};

    use super::*;
    use crate::routes::test_support::{body_text, get, test_app};

    #[test]
    fn test_card_view_for_discounted_product() {
        let product = catalog().get(ProductId::new(1)).unwrap();
        let card = ProductCardView::new(product, &FavoriteSet::new());

        assert_eq!(card.price, "$589");
        assert_eq!(card.original_price, "$649");
        assert_eq!(card.discount, Some(9));
        assert_eq!(card.features, vec!["Overclocking", "DDR5"]);
        assert_eq!(card.stars, vec!["filled", "filled", "filled", "filled", "empty"]);
        assert_eq!(card.rating, "4.8");
        assert_eq!(card.favorite.pressed, "false");
    }

    #[test]
    fn test_options_mark_selection() {
        let criteria = QueryCriteria::parse("", "AMD", "gaming", "rating").unwrap();

        let brands = brand_options(&criteria);
        assert_eq!(brands.len(), 3);
        assert!(brands.iter().any(|o| o.value == "AMD" && o.selected));
        assert!(!brands[0].selected);

        let categories = category_options(&criteria);
        assert!(categories.iter().any(|o| o.value == "gaming" && o.selected));

        let sorts = sort_options(&criteria);
        assert_eq!(sorts.iter().filter(|o| o.selected).count(), 1);
        assert!(sorts.iter().any(|o| o.value == "rating" && o.selected));
    }

    #[test]
    fn test_default_criteria_selects_all() {
        let criteria = QueryCriteria::default();
        assert!(brand_options(&criteria)[0].selected);
        assert!(category_options(&criteria)[0].selected);
        assert!(sort_options(&criteria)[0].selected);
    }

    #[test]
    fn test_catalog_href_keeps_criteria() {
        let criteria = QueryCriteria::parse("core i9", "Intel", "high-end", "rating").unwrap();
        assert_eq!(
            catalog_href(&criteria, true),
            "/?q=core%20i9&brand=Intel&category=high-end&sort=rating&filters=true"
        );
        assert_eq!(
            catalog_href(&criteria, false),
            "/?q=core%20i9&brand=Intel&category=high-end&sort=rating"
        );
        assert_eq!(catalog_href(&QueryCriteria::default(), false), "/");
    }

    #[test]
    fn test_hidden_filters_skip_defaults() {
        let criteria = QueryCriteria::parse("", "AMD", "", "").unwrap();
        assert_eq!(
            hidden_filters(&criteria),
            vec![HiddenField {
                name: "brand",
                value: "AMD".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_filter_toggle_link_keeps_search() {
        let app = test_app();
        let body = body_text(get(&app, "/?q=ryzen&sort=rating").await).await;
        assert!(body.contains("q=ryzen"), "missing search in link: {body}");
        assert!(body.contains("filters=true"));

        let body = body_text(get(&app, "/?q=ryzen&brand=AMD&filters=true").await).await;
        assert!(body.contains("Hide filters"));
        assert!(body.contains("brand=AMD"));
        assert!(!body.contains("filters=true"));
    }

    #[tokio::test]
    async fn test_index_renders_every_product() {
        let app = test_app();
        let response = get(&app, "/").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_text(response).await;
        for product in catalog().products() {
            assert!(body.contains(&product.name), "missing {}", product.name);
        }
    }

    #[tokio::test]
    async fn test_grid_applies_search_and_sort() {
        let app = test_app();
        let body = body_text(get(&app, "/products?q=ryzen&sort=price-high").await).await;

        let r9 = body.find("AMD Ryzen 9 7950X").unwrap();
        let r7 = body.find("AMD Ryzen 7 7800X3D").unwrap();
        let r5 = body.find("AMD Ryzen 5 7600X").unwrap();
        assert!(r9 < r7 && r7 < r5);
        assert!(!body.contains("Intel Core"));
    }

    #[tokio::test]
    async fn test_grid_empty_state() {
        let app = test_app();
        let body = body_text(get(&app, "/products?q=pentium").await).await;
        assert!(body.contains("No processors found"));
    }

    #[tokio::test]
    async fn test_unknown_brand_is_bad_request() {
        let app = test_app();
        let response = get(&app, "/products?brand=Cyrix").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
