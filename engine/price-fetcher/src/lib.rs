//! Product Price Fetcher
//!
//! Loads a `name,id` product catalog and looks up discounted retail prices
//! from the vendor's product service, one request per product.

pub mod catalog;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod models;

pub use catalog::Catalog;
pub use config::{CatalogConfig, PriceFetcherConfig, VendorConfig};
pub use error::{
    CatalogError, CatalogResult, ConfigError, ConfigResult, DiscountError, FetchError, FetchResult,
};
pub use fetcher::{quote_from_body, PriceSource, VendorPriceFetcher};
pub use models::*;
