//! Static currency information keyed by ISO 4217 code.
//!
//! The built-in table is derived from the Unicode CLDR currency data and is
//! embedded into the library. It is parsed once per process and shared.
//!
//! ```text
//! codes()          => ["AED", "AFN", "ALL", ..., "ZAR", "ZMW"]
//! symbols("UAH")   => ["UAH", "грн.", "₴"]
//! decimals("BHD")  => 3
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DataSourceError, MonparseError, Result};

/// Embedded table source.
static BUILTIN_JSON: &str = include_str!("../../data/currency.json");

lazy_static! {
    static ref BUILTIN_TABLE: std::result::Result<Arc<CurrencyTable>, String> =
        CurrencyTable::from_json_str(BUILTIN_JSON)
            .map(Arc::new)
            .map_err(|e| e.to_string());
}

/// Information about one currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyInfo {
    /// Number of digits in the fractional part of a price.
    pub decimals: u32,
    /// Display symbols, the code itself first.
    pub symbols: Vec<String>,
}

impl CurrencyInfo {
    /// Put the code first and drop repeated symbols, keeping their order.
    fn normalized(code: &str, info: CurrencyInfo) -> Self {
        let mut symbols: Vec<String> = Vec::with_capacity(info.symbols.len() + 1);
        symbols.push(code.to_string());
        for symbol in info.symbols {
            if !symbol.is_empty() && !symbols.contains(&symbol) {
                symbols.push(symbol);
            }
        }
        Self {
            decimals: info.decimals,
            symbols,
        }
    }
}

/// Read-only currency table sorted by code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrencyTable {
    currencies: BTreeMap<String, CurrencyInfo>,
}

impl CurrencyTable {
    /// The table shipped with the library.
    pub fn builtin() -> Result<Arc<CurrencyTable>> {
        match &*BUILTIN_TABLE {
            Ok(table) => Ok(Arc::clone(table)),
            Err(reason) => Err(DataSourceError::Builtin(reason.clone()).into()),
        }
    }

    /// Build a table from `(code, info)` entries.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, CurrencyInfo)>,
    {
        let mut currencies = BTreeMap::new();
        for (code, info) in entries {
            if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
                return Err(DataSourceError::InvalidCode(code).into());
            }
            let info = CurrencyInfo::normalized(&code, info);
            currencies.insert(code, info);
        }
        Ok(Self { currencies })
    }

    /// Parse a table from JSON text.
    ///
    /// Format: `{ "<CODE>": { "decimals": <n>, "symbols": ["<SYMBOL>", ...] }, ... }`
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, CurrencyInfo> =
            serde_json::from_str(json).map_err(DataSourceError::from)?;
        let table = Self::from_entries(raw)?;
        debug!("loaded currency table with {} codes", table.len());
        Ok(table)
    }

    /// Parse a table from a JSON reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let raw: BTreeMap<String, CurrencyInfo> =
            serde_json::from_reader(reader).map_err(DataSourceError::from)?;
        Self::from_entries(raw)
    }

    /// Load a table from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(DataSourceError::from)?;
        let table = Self::from_reader(BufReader::new(file))?;
        debug!(
            "loaded currency table with {} codes from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Currency codes formatted according to ISO 4217, sorted.
    pub fn codes(&self) -> Vec<&str> {
        self.currencies.keys().map(String::as_str).collect()
    }

    /// Currency symbols for a code.
    pub fn symbols(&self, code: &str) -> Result<&[String]> {
        self.lookup(code).map(|info| info.symbols.as_slice())
    }

    /// Number of decimal digits in the fractional part of a price.
    ///
    /// JPY => 0, USD => 2, BHD => 3
    pub fn decimals(&self, code: &str) -> Result<u32> {
        self.lookup(code).map(|info| info.decimals)
    }

    /// Entry of `code`, if present.
    pub fn get(&self, code: &str) -> Option<&CurrencyInfo> {
        self.currencies.get(code)
    }

    /// Whether `code` is in the table.
    pub fn contains(&self, code: &str) -> bool {
        self.currencies.contains_key(code)
    }

    /// Number of currencies.
    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    /// Whether the table has no currencies.
    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }

    /// Entries in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CurrencyInfo)> {
        self.currencies.iter().map(|(code, info)| (code.as_str(), info))
    }

    fn lookup(&self, code: &str) -> Result<&CurrencyInfo> {
        self.currencies
            .get(code)
            .ok_or_else(|| MonparseError::UnknownCurrencyCode(code.to_string()))
    }
}
