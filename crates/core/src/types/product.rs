//! Product records and their enumerated attributes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::ProductId;
use super::price::Price;

/// Error parsing an enumerated product attribute from its label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    #[error("unknown brand: {0}")]
    UnknownBrand(String),
    #[error("unknown category: {0}")]
    UnknownCategory(String),
}

/// Processor manufacturer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Brand {
    Intel,
    #[serde(rename = "AMD")]
    Amd,
}

impl Brand {
    /// Every brand, in the order they are offered as filters.
    pub const ALL: [Self; 2] = [Self::Intel, Self::Amd];

    /// Display label, also used as the filter value.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Intel => "Intel",
            Self::Amd => "AMD",
        }
    }
}

impl std::fmt::Display for Brand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Brand {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Intel" => Ok(Self::Intel),
            "AMD" => Ok(Self::Amd),
            _ => Err(LabelError::UnknownBrand(s.to_string())),
        }
    }
}

/// Market segment a processor is sold in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    HighEnd,
    MidRange,
    Gaming,
    Budget,
}

impl Category {
    /// Every category, in the order they are offered as filters.
    pub const ALL: [Self; 4] = [Self::HighEnd, Self::MidRange, Self::Gaming, Self::Budget];

    /// Filter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HighEnd => "high-end",
            Self::MidRange => "mid-range",
            Self::Gaming => "gaming",
            Self::Budget => "budget",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::HighEnd => "High End",
            Self::MidRange => "Mid Range",
            Self::Gaming => "Gaming",
            Self::Budget => "Budget",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high-end" => Ok(Self::HighEnd),
            "mid-range" => Ok(Self::MidRange),
            "gaming" => Ok(Self::Gaming),
            "budget" => Ok(Self::Budget),
            _ => Err(LabelError::UnknownCategory(s.to_string())),
        }
    }
}

/// A processor offered in the catalog.
///
/// Field names serialize in camelCase so persisted cart snapshots keep the
/// shape the browser storefront wrote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: Brand,
    /// Current selling price.
    pub price: Price,
    /// Price before discount. Never lower than `price`.
    pub original_price: Price,
    pub cores: u16,
    pub threads: u16,
    pub base_freq: String,
    pub boost_freq: String,
    pub socket: String,
    /// Average review score between 0 and 5.
    pub rating: f64,
    pub reviews: u32,
    pub category: Category,
    pub features: Vec<String>,
    pub description: String,
}

impl Product {
    /// Discount percentage shown on the card, if the product is on sale.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u32> {
        self.price.discount_from(self.original_price)
    }

    /// The feature tags highlighted on a product card.
    #[must_use]
    pub fn highlighted_features(&self) -> &[String] {
        let end = self.features.len().min(2);
        self.features.get(..end).unwrap_or_default()
    }

    /// Number of filled stars in a five-star rating row.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to 0..=5
    pub fn full_stars(&self) -> u8 {
        self.rating.clamp(0.0, 5.0).floor() as u8
    }
}
