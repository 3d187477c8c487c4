//! # Wrench
//!
//! Wrench is a Rust client for the MyRepairApp repair-shop management
//! REST API.
//!
//! It authenticates with an API key, searches inventory and checkin
//! tickets, patches inventory items, and maps the service's JSON into
//! typed domain objects with a strict category/type taxonomy.
//!
//! ## Features
//!
//! - **Search**: inventory items and checkin tickets by free-text query
//! - **Update**: PATCH inventory items with a partial changed-fields map
//! - **Typed taxonomy**: item category/type strings parse into enums, and
//!   invalid strings fail loudly instead of defaulting
//! - **Rate-limit handling**: automatic jittered backoff on HTTP 429 with
//!   a configurable attempt bound
//! - **Security**: the API key is never logged or exposed in errors
//!
//! ## Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`config`] - Configuration loading from environment variables
//! - [`error`] - Error taxonomy with security-conscious message sanitization
//! - [`shop_client`] - HTTP client for the MyRepairApp API
//! - [`models`] - Domain objects and their JSON wire conversion
//!
//! ## Configuration
//!
//! - `MRA_API_KEY` (required): API key for authentication
//! - `MRA_BASE_URL` (optional): overrides the hosted service URL
//! - `RUST_LOG` (optional): log level (e.g. `wrench=debug`)
//!
//! ## Example
//!
//! ```ignore
//! use wrench::config::Config;
//! use wrench::shop_client::ShopClient;
//!
//! async fn example() -> Result<(), wrench::error::WrenchError> {
//!     let config = Config::from_env()?;
//!     let client = ShopClient::connect(&config).await?;
//!
//!     for item in client.search_inventory("iPhone 13 screen").await? {
//!         println!("{}: {} in stock", item.display_name(), item.in_stock.unwrap_or(0));
//!     }
//!
//!     let tickets = client.search_tickets("12345", false).await?;
//!     for ticket in tickets {
//!         println!("{}", ticket);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Security Considerations
//!
//! The API key is stored only in memory and is:
//! - Never logged at any log level
//! - Sanitized from all error messages
//! - Redacted from `Debug` output of the configuration

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod models;
pub mod shop_client;
