//! Common interface of the price and currency extractors.

use crate::error::{OrDefault, Result};
use crate::input::RawText;

/// Trait for "exactly one match or fail" extractors.
pub trait Extractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the value from text.
    fn extract_text(&self, text: &str) -> Result<Self::Output>;

    /// Extract the value from a raw value that may not be text.
    fn extract<R: RawText + ?Sized>(&self, raw: &R) -> Result<Self::Output> {
        self.extract_text(raw.as_text()?)
    }

    /// Extract the value, falling back to `default` on recoverable failures.
    fn extract_or<R: RawText + ?Sized>(
        &self,
        raw: &R,
        default: Option<Self::Output>,
    ) -> Result<Self::Output> {
        self.extract(raw).or_default_value(default)
    }

    /// Extract values from many raw values, one result per input.
    fn extract_all<'a, R, I>(&self, raws: I) -> Vec<Result<Self::Output>>
    where
        R: RawText + ?Sized + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        raws.into_iter().map(|raw| self.extract(raw)).collect()
    }
}
