//! wrench - command-line inventory search against MyRepairApp
//!
//! A thin demo binary around the library: loads configuration, connects,
//! runs an inventory search for the given query, and prints one line per
//! matching item.
//!
//! # Configuration
//!
//! Set the following environment variables (or use a `.env` file):
//!
//! - `MRA_API_KEY`: API key for authentication
//! - `MRA_BASE_URL`: optional override of the hosted service URL
//!
//! # Usage
//!
//! ```bash
//! MRA_API_KEY=xxx ./wrench "iPhone 13 screen"
//! ```

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

use wrench::{config, shop_client};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore errors if not found)
    dotenvy::dotenv().ok();

    // Initialize logging to stderr; the library itself never installs a
    // subscriber.
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wrench=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let query = std::env::args()
        .nth(1)
        .context("usage: wrench <search query>")?;

    let config = config::Config::from_env().context("Failed to load configuration")?;

    tracing::debug!("Configuration loaded, base_url: {}", config.base_url);

    let client = shop_client::ShopClient::connect(&config)
        .await
        .context("Failed to create MyRepairApp client")?;

    let items = client
        .search_inventory(&query)
        .await
        .context("Inventory search failed")?;

    if items.is_empty() {
        println!("No items matched {:?}", query);
        return Ok(());
    }

    for item in items {
        println!(
            "{:<40} {:>5} in stock  {:>10}",
            item.display_name(),
            item.in_stock.unwrap_or(0),
            item.price
                .map(|p| format!("{:.2}", p))
                .unwrap_or_else(|| "-".to_string()),
        );
    }

    Ok(())
}
