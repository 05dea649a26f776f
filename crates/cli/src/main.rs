//! ProcessorHub CLI - catalog queries and saved shopper state.
//!
//! Reads and writes the same data directory as the storefront, so a cart
//! built here shows up in the browser and vice versa.
//!
//! # Usage
//!
//! ```bash
//! # List AMD processors, most expensive first
//! hub-cli catalog --brand AMD --sort price-high
//!
//! # Add the Ryzen 7 7800X3D to the cart, then buy two
//! hub-cli cart add 4
//! hub-cli cart set 4 2
//!
//! # Toggle a favorite
//! hub-cli favorites toggle 2
//! ```
//!
//! # Commands
//!
//! - `catalog` - Search, filter and sort the catalog
//! - `cart` - Show or change the saved cart
//! - `favorites` - List or toggle saved favorites
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATA_DIR` - Data directory (default `data`), overridden by `--data-dir`

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use processor_hub_core::catalog;
use processor_hub_storefront::storage::FileStore;
use processor_hub_storefront::store::ShopStore;

mod commands;

use commands::{CliError, cart::CartAction, catalog::CatalogArgs, favorites::FavoritesAction};

#[derive(Parser)]
#[command(name = "hub-cli")]
#[command(author, version, about = "ProcessorHub CLI tools")]
struct Cli {
    /// Directory holding the saved cart and favorites
    #[arg(long, global = true, env = "STOREFRONT_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search, filter and sort the catalog
    Catalog(CatalogArgs),
    /// Show or change the saved cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// List or toggle saved favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
}

fn main() {
    // Load .env before clap reads STOREFRONT_DATA_DIR
    dotenvy::dotenv().ok();

    // Logs go to stderr so command output stays pipeable
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => print_output(&output),
        Err(e) => {
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<String, CliError> {
    match cli.command {
        Commands::Catalog(args) => commands::catalog::run(&args),
        Commands::Cart { action } => {
            let mut store = open_store(cli.data_dir)?;
            commands::cart::run(&mut store, action)
        }
        Commands::Favorites { action } => {
            let mut store = open_store(cli.data_dir)?;
            commands::favorites::run(&mut store, action)
        }
    }
}

fn open_store(data_dir: PathBuf) -> Result<ShopStore, CliError> {
    let storage = FileStore::open(data_dir)?;
    tracing::debug!(dir = %storage.dir().display(), "Using file storage");
    Ok(ShopStore::open(catalog(), Arc::new(storage)))
}

#[allow(clippy::print_stdout)]
fn print_output(output: &str) {
    println!("{output}");
}
