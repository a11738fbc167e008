use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration for the price fetcher and the catalog it serves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceFetcherConfig {
    /// Vendor endpoint configuration
    pub vendor: VendorConfig,

    /// Catalog configuration
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VendorConfig {
    /// Scheme and host of the vendor API (no trailing slash)
    pub base_url: String,

    /// Store the prices are scoped to
    pub store_id: String,

    /// Response language
    pub lang: String,

    /// Field set requested from the product service
    pub fields: String,

    /// User-Agent sent with every request; the vendor rejects unknown clients
    pub user_agent: String,

    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path of the `name,id` catalog file
    pub path: String,

    /// Discount factor a new session starts with
    pub default_discount: f64,
}

impl Default for VendorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.homedepot.ca".to_string(),
            store_id: "7173".to_string(),
            lang: "en".to_string(),
            fields: "BASIC_SPA".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 6.1; Win64; x64)".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { path: "product_id.txt".to_string(), default_discount: 1.0 }
    }
}

impl Default for PriceFetcherConfig {
    fn default() -> Self {
        Self { vendor: VendorConfig::default(), catalog: CatalogConfig::default() }
    }
}

impl VendorConfig {
    /// Product endpoint for a single product ID
    pub fn product_url(&self, product_id: &str) -> String {
        format!(
            "{}/api/productsvc/v1/products/{}/store/{}?fields={}&lang={}",
            self.base_url.trim_end_matches('/'),
            product_id,
            self.store_id,
            self.fields,
            self.lang
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl PriceFetcherConfig {
    /// Load configuration from a TOML file; missing keys keep their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: PriceFetcherConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from environment variables on top of the defaults
    pub fn from_env() -> ConfigResult<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Override fields with environment variables if present
    pub fn apply_env(&mut self) -> ConfigResult<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup("PRICE_FETCHER_BASE_URL") {
            self.vendor.base_url = base_url;
        }

        if let Some(store_id) = lookup("PRICE_FETCHER_STORE_ID") {
            self.vendor.store_id = store_id;
        }

        if let Some(lang) = lookup("PRICE_FETCHER_LANG") {
            self.vendor.lang = lang;
        }

        if let Some(timeout) = lookup("PRICE_FETCHER_TIMEOUT_SECS") {
            self.vendor.timeout_secs =
                timeout.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: "PRICE_FETCHER_TIMEOUT_SECS",
                    reason: format!("{timeout:?} is not a whole number of seconds"),
                })?;
        }

        if let Some(path) = lookup("PRICE_FETCHER_CATALOG") {
            self.catalog.path = path;
        }

        Ok(())
    }

    /// Reject values that would produce a broken request
    pub fn validate(&self) -> ConfigResult<()> {
        let required = [
            ("vendor.base_url", &self.vendor.base_url),
            ("vendor.store_id", &self.vendor.store_id),
            ("vendor.lang", &self.vendor.lang),
            ("vendor.fields", &self.vendor.fields),
            ("vendor.user_agent", &self.vendor.user_agent),
            ("catalog.path", &self.catalog.path),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue { key, reason: "must not be empty".to_string() });
            }
        }

        if self.vendor.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "vendor.timeout_secs",
                reason: "must be at least one second".to_string(),
            });
        }

        if !self.catalog.default_discount.is_finite() {
            return Err(ConfigError::InvalidValue {
                key: "catalog.default_discount",
                reason: "must be a finite number".to_string(),
            });
        }

        Ok(())
    }
}
