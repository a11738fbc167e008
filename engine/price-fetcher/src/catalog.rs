use crate::error::{CatalogError, CatalogResult};
use indexmap::IndexMap;
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, info, warn};

/// Product catalog - maps human-readable product names to vendor product IDs
///
/// Listing order is the order in which each name first appeared. A name that
/// appears again keeps its position but takes the later ID.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: IndexMap<String, String>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the catalog from a `name,id` text file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        info!("Loading product catalog from: {:?}", path.as_ref());

        let file = std::fs::File::open(&path)?;
        let catalog = Self::from_reader(std::io::BufReader::new(file))?;

        info!("Loaded {} products", catalog.len());
        Ok(catalog)
    }

    /// Parse a catalog from any line source. The first malformed line aborts the load.
    pub fn from_reader<R: BufRead>(reader: R) -> CatalogResult<Self> {
        let mut catalog = Self::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let (name, product_id) = parse_line(index + 1, &line)?;

            if let Some(previous) = catalog.products.insert(name.to_string(), product_id.to_string())
            {
                debug!("Duplicate product {:?}: replacing ID {} with {}", name, previous, product_id);
            }
        }

        Ok(catalog)
    }

    /// Parse a catalog held in memory
    pub fn parse(content: &str) -> CatalogResult<Self> {
        Self::from_reader(content.as_bytes())
    }

    /// Product ID for a name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.products.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.products.contains_key(name)
    }

    /// Product names in listing order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.products.keys().map(String::as_str)
    }

    /// `(name, id)` pairs in listing order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.products.iter().map(|(name, id)| (name.as_str(), id.as_str()))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

fn parse_line(line_number: usize, line: &str) -> CatalogResult<(&str, &str)> {
    let trimmed = line.trim();

    let separators = trimmed.matches(',').count();
    let Some((name, product_id)) = trimmed.split_once(',').filter(|_| separators == 1) else {
        return Err(CatalogError::MalformedLine {
            line_number,
            content: line.to_string(),
            separators,
        });
    };

    if name.is_empty() || product_id.is_empty() {
        warn!("Catalog line {} has an empty name or product ID: {:?}", line_number, line);
    }

    Ok((name, product_id))
}
