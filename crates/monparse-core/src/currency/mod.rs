//! Currency detection backed by a static ISO 4217 table.

mod resolver;
mod table;

pub use resolver::CurrencyResolver;
pub use table::{CurrencyInfo, CurrencyTable};

use crate::error::{OrDefault, Result};
use crate::extractor::Extractor;
use crate::input::RawText;

/// Get the currency code from a raw value using the built-in table.
///
/// ```text
/// UAH    =>  UAH
/// US$    =>  USD
/// සිෆ්එ  =>  XOF
/// $      =>  <ambiguous>
/// ```
///
/// Returns `default` instead of a recoverable failure when one is given.
pub fn resolve_currency_code<R: RawText + ?Sized>(
    raw_currency: &R,
    default: Option<String>,
) -> Result<String> {
    CurrencyResolver::builtin()?
        .extract(raw_currency)
        .or_default_value(default)
}

/// Codes of the built-in table, sorted.
pub fn list_currency_codes() -> Result<Vec<String>> {
    let table = CurrencyTable::builtin()?;
    Ok(table.codes().into_iter().map(String::from).collect())
}

/// Symbols of a code in the built-in table.
pub fn currency_symbols(code: &str) -> Result<Vec<String>> {
    CurrencyTable::builtin()?.symbols(code).map(<[String]>::to_vec)
}

/// Decimal digits of a code in the built-in table.
pub fn currency_decimals(code: &str) -> Result<u32> {
    CurrencyTable::builtin()?.decimals(code)
}
