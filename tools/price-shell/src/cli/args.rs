use anyhow::Context;
use clap::Parser;
use price_fetcher::{Discount, PriceFetcherConfig};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "price-fetcher.toml";

#[derive(Parser, Debug)]
#[command(name = "price-shell")]
#[command(about = "Look up discounted product prices from a name,id catalog")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Catalog file with one `name,id` per line
    #[arg(short, long)]
    pub catalog: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Store the prices are scoped to
    #[arg(long)]
    pub store: Option<String>,

    /// Starting discount factor
    #[arg(short, long)]
    pub discount: Option<Discount>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Write the effective configuration to this file and exit
    #[arg(long)]
    pub dump_config: Option<PathBuf>,
}

impl Cli {
    /// Configuration from file, then environment, then command-line flags
    pub fn load_config(&self) -> anyhow::Result<PriceFetcherConfig> {
        let mut config = match &self.config {
            Some(path) => PriceFetcherConfig::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                PriceFetcherConfig::from_file(DEFAULT_CONFIG_FILE)
                    .with_context(|| format!("Failed to load config from {DEFAULT_CONFIG_FILE}"))?
            }
            None => PriceFetcherConfig::default(),
        };

        config.apply_env()?;
        self.apply_to(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Override configuration with the flags that were given
    pub fn apply_to(&self, config: &mut PriceFetcherConfig) {
        if let Some(catalog) = &self.catalog {
            config.catalog.path = catalog.to_string_lossy().into_owned();
        }
        if let Some(store) = &self.store {
            config.vendor.store_id = store.clone();
        }
        if let Some(discount) = self.discount {
            config.catalog.default_discount = discount.factor();
        }
        if let Some(timeout) = self.timeout {
            config.vendor.timeout_secs = timeout;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "price-shell",
            "--catalog",
            "tools.txt",
            "--store",
            "7001",
            "-d",
            "0.8",
            "--timeout",
            "5",
        ])
        .unwrap();

        let mut config = PriceFetcherConfig::default();
        cli.apply_to(&mut config);

        assert_eq!(config.catalog.path, "tools.txt");
        assert_eq!(config.vendor.store_id, "7001");
        assert_eq!(config.catalog.default_discount, 0.8);
        assert_eq!(config.vendor.timeout_secs, 5);
        assert_eq!(config.vendor.lang, "en");
    }

    #[test]
    fn test_no_flags_keep_config() {
        let cli = Cli::try_parse_from(["price-shell"]).unwrap();
        let mut config = PriceFetcherConfig::default();
        cli.apply_to(&mut config);
        assert_eq!(config, PriceFetcherConfig::default());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_rejects_non_numeric_discount() {
        assert!(Cli::try_parse_from(["price-shell", "--discount", "lots"]).is_err());
    }

    #[test]
    fn test_explicit_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.toml");
        std::fs::write(&path, "[vendor]\nstore_id = \"4321\"\n").unwrap();

        let path = path.to_str().unwrap();
        let cli = Cli::try_parse_from(["price-shell", "--config", path, "--store", "5555"]).unwrap();
        let config = cli.load_config().unwrap();

        assert_eq!(config.vendor.store_id, "5555");
        assert_eq!(config.vendor.fields, "BASIC_SPA");
    }
}
