//! Error types for the monparse-core library.

use thiserror::Error;

/// Main error type for the monparse library.
#[derive(Error, Debug)]
pub enum MonparseError {
    /// The raw value is not text (non UTF-8 bytes, JSON number, null...).
    #[error("wrong raw value type \"{found}\" (expected text)")]
    InvalidInputType { found: String },

    /// No price digits were found.
    #[error("raw price value \"{input}\" does not contain valid price digits")]
    NoPriceFound { input: String },

    /// More than one separate number was found.
    #[error("raw price value \"{input}\" contains more than one price value: {candidates:?}")]
    AmbiguousPrice {
        input: String,
        candidates: Vec<String>,
    },

    /// The canonical price was rejected by the decimal parser.
    #[error("invalid decimal price: {0}")]
    InvalidDecimal(#[from] bigdecimal::ParseBigDecimalError),

    /// No currency code or symbol was found.
    #[error("raw currency value \"{input}\" does not contain currency code")]
    NoCurrencyFound { input: String },

    /// Symbols of more than one currency were found.
    #[error("raw currency value \"{input}\" matches more than one currency code: {codes:?}")]
    AmbiguousCurrency { input: String, codes: Vec<String> },

    /// Table lookup miss.
    #[error("currency code \"{0}\" not found")]
    UnknownCurrencyCode(String),

    /// The currency table could not be loaded.
    #[error("currency data error: {0}")]
    DataSource(#[from] DataSourceError),
}

impl MonparseError {
    /// Whether a caller supplied default may replace this error.
    ///
    /// Only a broken currency table is fatal.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, MonparseError::DataSource(_))
    }
}

/// Errors related to loading the currency table.
#[derive(Error, Debug)]
pub enum DataSourceError {
    /// Failed to read the table file.
    #[error("failed to read currency table: {0}")]
    Io(#[from] std::io::Error),

    /// The table is not valid JSON or has the wrong shape.
    #[error("failed to decode currency table: {0}")]
    Json(#[from] serde_json::Error),

    /// A key is not a 3-letter uppercase code.
    #[error("invalid currency code \"{0}\" in currency table")]
    InvalidCode(String),

    /// The embedded table failed to load earlier in this process.
    #[error("built-in currency table is unusable: {0}")]
    Builtin(String),
}

/// Result type for the monparse library.
pub type Result<T> = std::result::Result<T, MonparseError>;

/// Replace recoverable failures with a caller supplied default.
pub trait OrDefault<T> {
    /// Returns `default` instead of a recoverable error when one is given.
    ///
    /// `None` means no default was supplied and the error is returned as is.
    /// Data source errors always propagate.
    fn or_default_value(self, default: Option<T>) -> Result<T>;
}

impl<T> OrDefault<T> for Result<T> {
    fn or_default_value(self, default: Option<T>) -> Result<T> {
        match (self, default) {
            (Err(err), Some(default)) if err.is_recoverable() => {
                tracing::debug!("using default value instead of error: {}", err);
                Ok(default)
            }
            (result, _) => result,
        }
    }
}
