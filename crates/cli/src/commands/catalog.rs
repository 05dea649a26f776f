//! Catalog query command.
//!
//! # Usage
//!
//! ```bash
//! hub-cli catalog --search ryzen --sort rating
//! hub-cli catalog --category mid-range
//! ```

use clap::Args;
use processor_hub_core::{QueryCriteria, catalog, query::ALL, visible_products};

use super::{CliError, product_line};

/// Search, filter and sort options.
#[derive(Debug, Args)]
pub struct CatalogArgs {
    /// Case-insensitive text matched against name and brand
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Brand filter (`Intel`, `AMD` or `all`)
    #[arg(short, long, default_value = ALL)]
    pub brand: String,

    /// Category filter (`high-end`, `mid-range`, `gaming`, `budget` or `all`)
    #[arg(short, long, default_value = ALL)]
    pub category: String,

    /// Sort order (`name`, `price-low`, `price-high`, `rating`)
    #[arg(long, default_value = "name")]
    pub sort: String,
}

/// List the catalog products matching `args`.
///
/// # Errors
///
/// Returns `CliError::Query` if the brand or category is not recognized.
pub fn run(args: &CatalogArgs) -> Result<String, CliError> {
    let criteria = QueryCriteria::parse(&args.search, &args.brand, &args.category, &args.sort)?;
    let products = visible_products(catalog().products(), &criteria);

    if products.is_empty() {
        return Ok("No processors found".to_string());
    }

    let lines: Vec<String> = products.iter().map(|p| product_line(p)).collect();
    Ok(lines.join("\n"))
}
