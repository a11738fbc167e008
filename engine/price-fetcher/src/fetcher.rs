use crate::config::VendorConfig;
use crate::error::{FetchError, FetchResult};
use crate::models::{Discount, PriceQuote, ProductResponse};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

/// Anything that can quote a discounted price for a vendor product ID
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Look up one product. An unknown ID is an `Ok` quote, not an error.
    async fn fetch_price(
        &self,
        product_id: &str,
        discount: Discount,
    ) -> FetchResult<PriceQuote>;

    /// Look up one product and render the result for display, errors included
    async fn fetch_price_text(&self, product_id: &str, discount: Discount) -> String {
        match self.fetch_price(product_id, discount).await {
            Ok(quote) => quote.to_string(),
            Err(e) => format!("Error: {e}"),
        }
    }
}

/// Price fetcher for the vendor's product service
///
/// Holds a single HTTP client so repeated lookups share its connection pool.
pub struct VendorPriceFetcher {
    config: VendorConfig,
    client: Client,
}

impl VendorPriceFetcher {
    /// Create a new fetcher instance
    pub fn new(config: VendorConfig) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(FetchError::ClientBuild)?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &VendorConfig {
        &self.config
    }
}

#[async_trait]
impl PriceSource for VendorPriceFetcher {
    async fn fetch_price(
        &self,
        product_id: &str,
        discount: Discount,
    ) -> FetchResult<PriceQuote> {
        let url = self.config.product_url(product_id);
        info!("Fetching price for product {} from: {}", product_id, url);

        let transport = |source: reqwest::Error| FetchError::Transport {
            product_id: product_id.to_string(),
            source,
        };

        let response = self.client.get(&url).send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            warn!("Vendor returned {} for product {}", status, product_id);
            return Err(FetchError::HttpStatus {
                product_id: product_id.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        debug!("Received {} bytes for product {}", body.len(), product_id);

        quote_from_body(product_id, &body, discount)
    }
}

/// Turn a product service response body into a quote
pub fn quote_from_body(
    product_id: &str,
    body: &[u8],
    discount: Discount,
) -> FetchResult<PriceQuote> {
    let response: ProductResponse = serde_json::from_slice(body).map_err(|source| {
        FetchError::MalformedJson { product_id: product_id.to_string(), source }
    })?;

    let Some(value) = response.display_price() else {
        warn!("No display price for product {}; treating the ID as invalid", product_id);
        return Ok(PriceQuote::invalid(product_id));
    };

    let price = value.as_f64().ok_or_else(|| FetchError::NonNumericPrice {
        product_id: product_id.to_string(),
        value: value.to_string(),
    })?;

    let amount = discount.apply(price).ok_or_else(|| FetchError::PriceArithmetic {
        product_id: product_id.to_string(),
        price: price.to_string(),
        discount: discount.to_string(),
    })?;

    debug!("Product {}: displayed {} x {} = {}", product_id, price, discount, amount);
    Ok(PriceQuote::price(product_id, amount))
}
