//! Core library for extracting money from free-form text.
//!
//! This crate provides:
//! - Price normalization: find exactly one number in noisy text and rewrite it
//!   as a canonical price, resolving thousands vs decimal separators for
//!   Western, European and Indian grouping
//! - Currency detection: map codes and symbols found in text to an ISO 4217
//!   code using a static currency table
//! - Configuration shared by front-ends

pub mod config;
pub mod currency;
pub mod error;
pub mod extractor;
pub mod input;
pub mod price;

pub use config::MonparseConfig;
pub use currency::{
    CurrencyInfo, CurrencyResolver, CurrencyTable, currency_decimals, currency_symbols,
    list_currency_codes, resolve_currency_code,
};
pub use error::{DataSourceError, MonparseError, OrDefault, Result};
pub use extractor::Extractor;
pub use input::RawText;
pub use price::{
    PriceMatch, PriceNormalizer, extract_price, normalize_price_decimal, normalize_price_string,
};

/// Re-export of the decimal type returned by [`normalize_price_decimal`].
pub use bigdecimal::BigDecimal;
