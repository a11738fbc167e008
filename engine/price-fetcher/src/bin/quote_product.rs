use anyhow::Context;
use price_fetcher::{Discount, PriceFetcherConfig, PriceSource, VendorPriceFetcher};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Quote one or more product IDs without the interactive shell.
///
/// Usage: quote-product [--discount <factor>] <product-id>...
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok()))
        .with_writer(std::io::stderr)
        .init();

    let mut discount = Discount::NONE;
    let mut product_ids = Vec::new();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--discount" {
            let value = args.next().context("--discount needs a value")?;
            discount = value.parse().with_context(|| format!("Invalid discount {value:?}"))?;
        } else {
            product_ids.push(arg);
        }
    }

    if product_ids.is_empty() {
        anyhow::bail!("Usage: quote-product [--discount <factor>] <product-id>...");
    }

    let config = PriceFetcherConfig::from_env()?;
    config.validate()?;
    info!("Quoting {} products from store {}", product_ids.len(), config.vendor.store_id);

    let fetcher = VendorPriceFetcher::new(config.vendor)?;

    let mut failures = 0;
    for product_id in &product_ids {
        match fetcher.fetch_price(product_id, discount).await {
            Ok(quote) => println!("{}: {}", product_id, quote),
            Err(e) => {
                error!("❌ {}", e);
                println!("{}: Error: {}", product_id, e);
                failures += 1;
            }
        }
    }

    info!("Done: {} quoted, {} failed", product_ids.len() - failures, failures);
    Ok(())
}

/// `RUST_LOG` directives when set and valid, `info` otherwise
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}
