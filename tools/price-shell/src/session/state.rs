use price_fetcher::{Catalog, Discount, PriceSource};
use tracing::{debug, info};

/// State of one interactive pricing session
///
/// The catalog is fixed for the session; the discount applies to every
/// lookup until it is changed.
pub struct Session<S: PriceSource> {
    catalog: Catalog,
    discount: Discount,
    source: S,
}

impl<S: PriceSource> Session<S> {
    pub fn new(catalog: Catalog, source: S, discount: Discount) -> Self {
        Self { catalog, discount, source }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn discount(&self) -> Discount {
        self.discount
    }

    pub fn set_discount(&mut self, discount: Discount) {
        info!("Discount factor changed from {} to {}", self.discount, discount);
        self.discount = discount;
    }

    /// Display price for a product name, or `None` if the name is not in the catalog
    pub async fn price_of(&self, name: &str) -> Option<String> {
        let Some(product_id) = self.catalog.get(name) else {
            debug!("Product {:?} is not in the catalog", name);
            return None;
        };
        Some(self.price_for_id(product_id).await)
    }

    /// Display price for a vendor product ID; failures are rendered, not returned
    pub async fn price_for_id(&self, product_id: &str) -> String {
        self.source.fetch_price_text(product_id, self.discount).await
    }
}
