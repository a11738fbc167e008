//! Error types for catalog loading, configuration and price lookups

use thiserror::Error;

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Errors raised while loading the product catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("I/O error reading catalog: {0}")]
    Io(#[from] std::io::Error),

    /// A line did not contain exactly one `,` separator
    #[error("Malformed catalog line {line_number}: expected `name,id`, found {separators} separators in {content:?}")]
    MalformedLine { line_number: usize, content: String, separators: usize },
}

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error reading configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// Errors raised by a price lookup that are not a simple unknown product ID
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Connection, TLS or timeout failure
    #[error("Request for product {product_id} failed: {source}")]
    Transport {
        product_id: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Vendor returned HTTP {status} for product {product_id}")]
    HttpStatus { product_id: String, status: u16 },

    #[error("Vendor response for product {product_id} is not valid JSON: {source}")]
    MalformedJson {
        product_id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Vendor price for product {product_id} is not a number: {value}")]
    NonNumericPrice { product_id: String, value: String },

    #[error("Cannot apply discount {discount} to price {price} for product {product_id}")]
    PriceArithmetic { product_id: String, price: String, discount: String },
}

impl FetchError {
    /// Product ID the failure relates to, when there is one
    pub fn product_id(&self) -> Option<&str> {
        match self {
            Self::ClientBuild(_) => None,
            Self::Transport { product_id, .. }
            | Self::HttpStatus { product_id, .. }
            | Self::MalformedJson { product_id, .. }
            | Self::NonNumericPrice { product_id, .. }
            | Self::PriceArithmetic { product_id, .. } => Some(product_id),
        }
    }

    /// True for failures of the network path rather than of the payload
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::HttpStatus { .. })
    }
}

/// Errors raised while parsing a discount factor typed by the user
#[derive(Error, Debug, PartialEq)]
pub enum DiscountError {
    #[error("{0:?} is not a number")]
    NotANumber(String),

    #[error("{0:?} is not a finite number")]
    NotFinite(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_line_message_names_content() {
        let err = CatalogError::MalformedLine {
            line_number: 3,
            content: "a,b,c".to_string(),
            separators: 2,
        };
        let message = err.to_string();
        assert!(message.contains("line 3"));
        assert!(message.contains("a,b,c"));
    }

    #[test]
    fn test_fetch_error_classification() {
        let status = FetchError::HttpStatus { product_id: "42".to_string(), status: 503 };
        assert!(status.is_network());
        assert_eq!(status.product_id(), Some("42"));

        let price = FetchError::NonNumericPrice {
            product_id: "42".to_string(),
            value: "\"n/a\"".to_string(),
        };
        assert!(!price.is_network());
    }
}
