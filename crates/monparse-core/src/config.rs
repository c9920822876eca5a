//! Configuration structures for price and currency extraction.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::currency::{CurrencyResolver, CurrencyTable};
use crate::error::Result;
use crate::price::{DEFAULT_DEC_POINT, PriceNormalizer};

/// Main configuration for monparse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonparseConfig {
    /// Price normalization configuration.
    pub price: PriceConfig,

    /// Currency detection configuration.
    pub currency: CurrencyConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Price normalization configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceConfig {
    /// Decimal point written into canonical prices.
    pub dec_point: String,

    /// Value reported when no single price is found.
    pub default: Option<String>,
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            dec_point: DEFAULT_DEC_POINT.to_string(),
            default: None,
        }
    }
}

/// Currency detection configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyConfig {
    /// Custom currency table (JSON). The built-in table is used when unset.
    pub table_path: Option<PathBuf>,

    /// Code reported when no single currency is found.
    pub default: Option<String>,
}

/// Output format of batch results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON array
    #[default]
    Json,
    /// CSV with header
    Csv,
    /// Plain text lines
    Text,
}

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default batch output format.
    pub format: OutputFormat,
}

impl MonparseConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> std::result::Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> std::result::Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }

    /// Price normalizer set up from this configuration.
    pub fn price_normalizer(&self) -> PriceNormalizer {
        PriceNormalizer::new().with_dec_point(self.price.dec_point.clone())
    }

    /// Currency table selected by this configuration.
    pub fn currency_table(&self) -> Result<Arc<CurrencyTable>> {
        match &self.currency.table_path {
            Some(path) => CurrencyTable::from_file(path).map(Arc::new),
            None => CurrencyTable::builtin(),
        }
    }

    /// Currency resolver over the configured table.
    pub fn currency_resolver(&self) -> Result<CurrencyResolver> {
        self.currency_table().map(CurrencyResolver::new)
    }
}
