//! The embedded product catalog.
//!
//! The catalog is fixed at build time and never mutated. Use [`catalog()`]
//! to get the shared instance.

use std::sync::LazyLock;

use crate::types::{Brand, Category, Price, Product, ProductId};

static CATALOG: LazyLock<Catalog> = LazyLock::new(Catalog::builtin);

/// The shared, immutable catalog.
#[must_use]
pub fn catalog() -> &'static Catalog {
    &CATALOG
}

/// An ordered, immutable list of products with unique ids.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from an explicit product list.
    ///
    /// Later duplicates of an id are dropped.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        let mut unique: Vec<Product> = Vec::with_capacity(products.len());
        for product in products {
            if !unique.iter().any(|p| p.id == product.id) {
                unique.push(product);
            }
        }
        Self { products: unique }
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    fn builtin() -> Self {
        Self::new(vec![
            processor(
                Spec {
                    id: 1,
                    name: "Intel Core i9-13900K",
                    brand: Brand::Intel,
                    price: 589,
                    original_price: 649,
                    cores: 24,
                    threads: 32,
                    base_freq: "3.0 GHz",
                    boost_freq: "5.8 GHz",
                    socket: "LGA1700",
                    rating: 4.8,
                    reviews: 1247,
                    category: Category::HighEnd,
                },
                &["Overclocking", "DDR5", "PCIe 5.0"],
                "Intel's most powerful processor for gaming and content creation",
            ),
            processor(
                Spec {
                    id: 2,
                    name: "AMD Ryzen 9 7950X",
                    brand: Brand::Amd,
                    price: 699,
                    original_price: 799,
                    cores: 16,
                    threads: 32,
                    base_freq: "4.5 GHz",
                    boost_freq: "5.7 GHz",
                    socket: "AM5",
                    rating: 4.9,
                    reviews: 892,
                    category: Category::HighEnd,
                },
                &["Zen 4", "DDR5", "PCIe 5.0"],
                "Exceptional performance for workstations and extreme gaming",
            ),
            processor(
                Spec {
                    id: 3,
                    name: "Intel Core i7-13700K",
                    brand: Brand::Intel,
                    price: 409,
                    original_price: 459,
                    cores: 16,
                    threads: 24,
                    base_freq: "3.4 GHz",
                    boost_freq: "5.4 GHz",
                    socket: "LGA1700",
                    rating: 4.7,
                    reviews: 2156,
                    category: Category::MidRange,
                },
                &["Overclocking", "DDR5", "PCIe 5.0"],
                "The right balance between performance and price",
            ),
            processor(
                Spec {
                    id: 4,
                    name: "AMD Ryzen 7 7800X3D",
                    brand: Brand::Amd,
                    price: 449,
                    original_price: 499,
                    cores: 8,
                    threads: 16,
                    base_freq: "4.2 GHz",
                    boost_freq: "5.0 GHz",
                    socket: "AM5",
                    rating: 4.9,
                    reviews: 1834,
                    category: Category::Gaming,
                },
                &["3D V-Cache", "Gaming Optimized", "DDR5"],
                "The best gaming processor, built on 3D V-Cache technology",
            ),
            processor(
                Spec {
                    id: 5,
                    name: "Intel Core i5-13600K",
                    brand: Brand::Intel,
                    price: 319,
                    original_price: 359,
                    cores: 14,
                    threads: 20,
                    base_freq: "3.5 GHz",
                    boost_freq: "5.1 GHz",
                    socket: "LGA1700",
                    rating: 4.6,
                    reviews: 3421,
                    category: Category::MidRange,
                },
                &["Overclocking", "DDR5", "Value"],
                "An excellent choice for gaming and productivity",
            ),
            processor(
                Spec {
                    id: 6,
                    name: "AMD Ryzen 5 7600X",
                    brand: Brand::Amd,
                    price: 299,
                    original_price: 329,
                    cores: 6,
                    threads: 12,
                    base_freq: "4.7 GHz",
                    boost_freq: "5.3 GHz",
                    socket: "AM5",
                    rating: 4.5,
                    reviews: 1567,
                    category: Category::Budget,
                },
                &["Zen 4", "DDR5", "Efficient"],
                "Solid performance for 1080p and 1440p gaming",
            ),
        ])
    }
}

/// Scalar fields of a built-in catalog entry.
struct Spec {
    id: i32,
    name: &'static str,
    brand: Brand,
    price: i64,
    original_price: i64,
    cores: u16,
    threads: u16,
    base_freq: &'static str,
    boost_freq: &'static str,
    socket: &'static str,
    rating: f64,
    reviews: u32,
    category: Category,
}

fn processor(spec: Spec, features: &[&str], description: &str) -> Product {
    Product {
        id: ProductId::new(spec.id),
        name: spec.name.to_string(),
        brand: spec.brand,
        price: Price::from_dollars(spec.price),
        original_price: Price::from_dollars(spec.original_price),
        cores: spec.cores,
        threads: spec.threads,
        base_freq: spec.base_freq.to_string(),
        boost_freq: spec.boost_freq.to_string(),
        socket: spec.socket.to_string(),
        rating: spec.rating,
        reviews: spec.reviews,
        category: spec.category,
        features: features.iter().map(|f| (*f).to_string()).collect(),
        description: description.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_has_six_unique_products() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 6);
        for (index, product) in catalog.products().iter().enumerate() {
            let expected = i32::try_from(index).unwrap() + 1;
            assert_eq!(product.id, ProductId::new(expected));
        }
    }

    #[test]
    fn test_prices_never_exceed_original() {
        for product in catalog().products() {
            assert!(product.price <= product.original_price, "{}", product.name);
            assert!((0.0..=5.0).contains(&product.rating));
        }
    }

    #[test]
    fn test_discount_percentages() {
        let discounts: Vec<Option<u32>> = catalog()
            .products()
            .iter()
            .map(Product::discount_percent)
            .collect();
        assert_eq!(
            discounts,
            vec![Some(9), Some(13), Some(11), Some(10), Some(11), Some(9)]
        );
    }

    #[test]
    fn test_highlighted_features_caps_at_two() {
        let product = catalog().get(ProductId::new(4)).unwrap();
        assert_eq!(product.highlighted_features(), ["3D V-Cache", "Gaming Optimized"]);

        let mut bare = product.clone();
        bare.features.truncate(1);
        assert_eq!(bare.highlighted_features().len(), 1);
    }

    #[test]
    fn test_get_unknown_id() {
        assert!(catalog().get(ProductId::new(42)).is_none());
    }

    #[test]
    fn test_new_drops_duplicate_ids() {
        let first = catalog().get(ProductId::new(1)).unwrap().clone();
        let mut dup = first.clone();
        dup.name = "Duplicate".to_string();
        let catalog = Catalog::new(vec![first, dup]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.products()[0].name, "Intel Core i9-13900K");
    }
}
