//! # Farmer Reference Data
//!
//! Read-only reference lists served by a plain HTTP endpoint: pest alerts,
//! mandi (market) prices, and government schemes. Each resource is a JSON
//! array at a fixed path under the configured base URL.
//!
//! ## Example
//!
//! ```no_run
//! use farmer_reference_data::{MarketPriceQuery, ReferenceDataClient, ReferenceDataConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ReferenceDataClient::new(ReferenceDataConfig {
//!         base_url: "https://data.example.org/api".to_string(),
//!         ..Default::default()
//!     })?;
//!
//!     let query = MarketPriceQuery::default().commodity("Onion").state("Maharashtra");
//!     for price in client.market_prices(&query).await? {
//!         println!("{} @ {}: {}", price.commodity, price.market, price.modal_price);
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::{
    ReferenceDataClient, ReferenceDataConfig, MARKET_PRICES_PATH, PEST_ALERTS_PATH, SCHEMES_PATH,
};
pub use error::{ReferenceDataError, Result};
pub use types::{GovernmentScheme, MarketPrice, MarketPriceQuery, PestAlert};
