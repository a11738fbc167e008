mod cli;
mod session;

use anyhow::Context;
use clap::Parser;
use cli::args::Cli;
use cli::interactive::InteractiveCLI;
use colored::*;
use price_fetcher::{Catalog, Discount, VendorPriceFetcher};
use session::Session;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // stdout belongs to the menu; logs go to stderr
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = cli.load_config()?;

    if let Some(path) = &cli.dump_config {
        config
            .save_to_file(path)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Wrote configuration to {}", path.display());
        return Ok(());
    }

    let catalog = Catalog::load_from_file(&config.catalog.path)
        .with_context(|| format!("Failed to load catalog {}", config.catalog.path))?;
    let discount = Discount::new(config.catalog.default_discount)?;
    info!(
        "Starting session: {} products, store {}, discount {}",
        catalog.len(),
        config.vendor.store_id,
        discount
    );

    println!(
        "{}",
        format!(
            "🛒 {} products loaded, store {}, discount {}",
            catalog.len(),
            config.vendor.store_id,
            discount
        )
        .green()
    );

    let fetcher = VendorPriceFetcher::new(config.vendor)?;
    let session = Session::new(catalog, fetcher, discount);

    let stdin = std::io::stdin();
    let mut shell = InteractiveCLI::new(session, stdin.lock(), std::io::stdout());
    shell.run().await?;
    info!("Session ended with discount {}", shell.session().discount());

    Ok(())
}
