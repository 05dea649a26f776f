//! Catalog query pipeline: search, filter and sort.
//!
//! [`visible_products`] is a pure function of the catalog and the current
//! [`QueryCriteria`]. The stages run in a fixed order: text search, brand
//! filter, category filter, then a stable sort.

use std::cmp::Ordering;
use std::str::FromStr;

use thiserror::Error;

use crate::types::{Brand, Category, LabelError, Product};

/// Filter value meaning "no filter".
pub const ALL: &str = "all";

/// Error parsing query criteria from user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCriteriaError {
    #[error(transparent)]
    Label(#[from] LabelError),
}

/// A filter over an enumerated attribute: everything, or one exact value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Filter<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Filter<T> {
    /// Whether `value` passes the filter.
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }
}

impl<T: FromStr<Err = LabelError>> Filter<T> {
    /// Parse a filter value. Empty input and `"all"` mean no filter.
    ///
    /// # Errors
    ///
    /// Returns `ParseCriteriaError` if the value is not a known label.
    pub fn parse(value: &str) -> Result<Self, ParseCriteriaError> {
        match value {
            "" | ALL => Ok(Self::All),
            other => Ok(Self::Only(other.parse()?)),
        }
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Filter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Only(value) => value.fmt(f),
        }
    }
}

/// Catalog sort order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Case-insensitive name, ascending.
    #[default]
    Name,
    PriceAsc,
    PriceDesc,
    /// Highest rated first.
    Rating,
}

impl SortKey {
    /// Every sort key, in the order they are offered.
    pub const ALL: [Self; 4] = [Self::Name, Self::PriceAsc, Self::PriceDesc, Self::Rating];

    /// Parse from a URL or CLI parameter value.
    ///
    /// Unknown values fall back to [`SortKey::Name`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "price-low" | "price-ascending" => Self::PriceAsc,
            "price-high" | "price-descending" => Self::PriceDesc,
            "rating" => Self::Rating,
            _ => Self::Name,
        }
    }

    /// Convert to URL parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::PriceAsc => "price-low",
            Self::PriceDesc => "price-high",
            Self::Rating => "rating",
        }
    }

    /// Human-readable description.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Sort by name",
            Self::PriceAsc => "Price: low to high",
            Self::PriceDesc => "Price: high to low",
            Self::Rating => "Top rated",
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            Self::PriceAsc => a.price.cmp(&b.price),
            Self::PriceDesc => b.price.cmp(&a.price),
            Self::Rating => b.rating.total_cmp(&a.rating),
        }
    }
}

/// The current search, filter and sort selections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryCriteria {
    /// Free-text substring matched against name and brand.
    pub search: String,
    pub brand: Filter<Brand>,
    pub category: Filter<Category>,
    pub sort: SortKey,
}

impl QueryCriteria {
    /// Parse criteria from raw user input.
    ///
    /// # Errors
    ///
    /// Returns `ParseCriteriaError` if the brand or category is not a known label.
    pub fn parse(
        search: &str,
        brand: &str,
        category: &str,
        sort: &str,
    ) -> Result<Self, ParseCriteriaError> {
        Ok(Self {
            search: search.to_string(),
            brand: Filter::parse(brand)?,
            category: Filter::parse(category)?,
            sort: SortKey::parse(sort),
        })
    }

    fn matches_text(&self, product: &Product) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        product.name.to_lowercase().contains(&needle)
            || product.brand.label().to_lowercase().contains(&needle)
    }
}

/// Derive the ordered list of products to display.
///
/// An empty result is a valid state, not an error.
#[must_use]
pub fn visible_products<'a>(catalog: &'a [Product], criteria: &QueryCriteria) -> Vec<&'a Product> {
    let mut visible: Vec<&Product> = catalog
        .iter()
        .filter(|p| criteria.matches_text(p))
        .filter(|p| criteria.brand.matches(&p.brand))
        .filter(|p| criteria.category.matches(&p.category))
        .collect();

    // slice::sort_by is stable, so ties keep their filtered order
    visible.sort_by(|a, b| criteria.sort.compare(a, b));
    visible
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::catalog;
    use crate::types::{Price, ProductId};

    fn names(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.name.clone()).collect()
    }

    fn ids(products: &[&Product]) -> Vec<i32> {
        products.iter().map(|p| p.id.as_i32()).collect()
    }

    fn with_sort(sort: SortKey) -> QueryCriteria {
        QueryCriteria {
            sort,
            ..QueryCriteria::default()
        }
    }

    #[test]
    fn test_default_criteria_returns_everything_sorted_by_name() {
        let visible = visible_products(catalog().products(), &QueryCriteria::default());
        assert_eq!(
            names(&visible),
            vec![
                "AMD Ryzen 5 7600X",
                "AMD Ryzen 7 7800X3D",
                "AMD Ryzen 9 7950X",
                "Intel Core i5-13600K",
                "Intel Core i7-13700K",
                "Intel Core i9-13900K",
            ]
        );
    }

    #[test]
    fn test_every_sort_key_keeps_every_product() {
        for sort in SortKey::ALL {
            let visible = visible_products(catalog().products(), &with_sort(sort));
            assert_eq!(visible.len(), catalog().len(), "{sort:?}");
        }
    }

    #[test]
    fn test_search_ryzen_scenario() {
        let criteria = QueryCriteria::parse("ryzen", "all", "all", "name").unwrap();
        let visible = visible_products(catalog().products(), &criteria);
        assert_eq!(ids(&visible), vec![6, 4, 2]);
        assert_eq!(
            names(&visible),
            vec!["AMD Ryzen 5 7600X", "AMD Ryzen 7 7800X3D", "AMD Ryzen 9 7950X"]
        );
    }

    #[test]
    fn test_search_matches_brand_case_insensitively() {
        let criteria = QueryCriteria {
            search: "iNtEl".to_string(),
            ..QueryCriteria::default()
        };
        let visible = visible_products(catalog().products(), &criteria);
        assert_eq!(visible.len(), 3);
        assert!(visible.iter().all(|p| p.brand == Brand::Intel));
    }

    #[test]
    fn test_search_without_match_is_empty() {
        let criteria = QueryCriteria {
            search: "threadripper".to_string(),
            ..QueryCriteria::default()
        };
        assert!(visible_products(catalog().products(), &criteria).is_empty());
    }

    #[test]
    fn test_brand_and_category_filters_combine() {
        let criteria = QueryCriteria::parse("", "Intel", "mid-range", "price-low").unwrap();
        let visible = visible_products(catalog().products(), &criteria);
        assert_eq!(ids(&visible), vec![5, 3]);
    }

    #[test]
    fn test_price_sorts_are_reverses_without_ties() {
        let ascending = visible_products(catalog().products(), &with_sort(SortKey::PriceAsc));
        let mut descending = visible_products(catalog().products(), &with_sort(SortKey::PriceDesc));
        assert_eq!(ids(&ascending), vec![6, 5, 3, 4, 1, 2]);
        descending.reverse();
        assert_eq!(ids(&ascending), ids(&descending));
    }

    #[test]
    fn test_rating_sort_is_stable_for_ties() {
        // 2 and 4 share a 4.9 rating and keep catalog order
        let visible = visible_products(catalog().products(), &with_sort(SortKey::Rating));
        assert_eq!(ids(&visible), vec![2, 4, 1, 3, 5, 6]);
    }

    #[test]
    fn test_name_sort_is_case_insensitive() {
        let template = catalog().get(ProductId::new(1)).unwrap();
        let make = |id: i32, name: &str| Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price: Price::from_dollars(100),
            ..template.clone()
        };
        let products = vec![make(1, "beta"), make(2, "Alpha"), make(3, "alpha")];
        let visible = visible_products(&products, &QueryCriteria::default());
        assert_eq!(ids(&visible), vec![2, 3, 1]);
    }

    #[test]
    fn test_parse_rejects_unknown_brand() {
        let err = QueryCriteria::parse("", "Cyrix", "all", "name").unwrap_err();
        assert_eq!(
            err,
            ParseCriteriaError::Label(LabelError::UnknownBrand("Cyrix".to_string()))
        );
    }

    #[test]
    fn test_sort_key_parse_falls_back_to_name() {
        assert_eq!(SortKey::parse("price-ascending"), SortKey::PriceAsc);
        assert_eq!(SortKey::parse("price-high"), SortKey::PriceDesc);
        assert_eq!(SortKey::parse("bogus"), SortKey::Name);
        for sort in SortKey::ALL {
            assert_eq!(SortKey::parse(sort.as_str()), sort);
        }
    }

    #[test]
    fn test_filter_display() {
        assert_eq!(Filter::<Brand>::All.to_string(), "all");
        assert_eq!(Filter::Only(Category::Gaming).to_string(), "gaming");
    }
}
