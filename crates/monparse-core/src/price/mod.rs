//! Price extraction and normalization.
//!
//! Finds exactly one number in free-form text and rewrites it as a canonical
//! price: optional `-`, integer digits without grouping or leading zeros, and
//! an optional fractional part of one or two digits.
//!
//! ```text
//! 12.007          => 12007
//! 00012,33        => 12.33
//! - 520.05        => -520.05
//! 1.777.000,99    => 1777000.99
//! 99.77.11.000,1  => 997711000.1
//! NIO5,242        => 5242
//! 90 BH 210       => <ambiguous>
//! ```

mod scan;

use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{MonparseError, OrDefault, Result};
use crate::extractor::Extractor;
use crate::input::RawText;

/// Default decimal point of canonical prices.
pub const DEFAULT_DEC_POINT: &str = ".";

/// A price found in raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceMatch {
    /// Canonical price string.
    pub value: String,
    /// The matched run as it appeared once whitespace was removed.
    pub original: String,
}

/// Price normalizer.
#[derive(Debug, Clone)]
pub struct PriceNormalizer {
    dec_point: String,
}

impl PriceNormalizer {
    /// Create a normalizer producing `.` as decimal point.
    pub fn new() -> Self {
        Self {
            dec_point: DEFAULT_DEC_POINT.to_string(),
        }
    }

    /// Set the decimal point written into canonical prices.
    pub fn with_dec_point(mut self, dec_point: impl Into<String>) -> Self {
        self.dec_point = dec_point.into();
        self
    }

    /// Decimal point written into canonical prices.
    pub fn dec_point(&self) -> &str {
        &self.dec_point
    }

    /// Find the single price in `text`.
    pub fn find_price(&self, text: &str) -> Result<PriceMatch> {
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        let runs = scan::find_runs(&compact);
        trace!("price runs in {:?}: {:?}", text, runs);

        let original = match runs.as_slice() {
            [] => {
                return Err(MonparseError::NoPriceFound {
                    input: text.to_string(),
                });
            }
            [run] => *run,
            _ => {
                return Err(MonparseError::AmbiguousPrice {
                    input: text.to_string(),
                    candidates: runs.iter().map(|r| r.to_string()).collect(),
                });
            }
        };

        // Truncated decimal (e.g. 99. -> 99)
        let price = original.trim_end_matches(['.', ',']);

        let (negative, unsigned) = match price.as_bytes().first() {
            Some(b'-') => (true, &price[1..]),
            Some(b'+') => (false, &price[1..]),
            _ => (false, price),
        };

        let (integer, fraction) = scan::split_fraction(unsigned);

        let mut value = String::with_capacity(unsigned.len() + self.dec_point.len() + 1);
        if negative {
            value.push('-');
        }
        value.push_str(&scan::integer_digits(integer));
        if let Some(fraction) = fraction {
            value.push_str(&self.dec_point);
            value.push_str(&scan::ascii_digits(fraction));
        }

        debug!("normalized price {:?} => {}", text, value);

        Ok(PriceMatch {
            value,
            original: original.to_string(),
        })
    }

    /// Normalize the single price of a raw value.
    pub fn normalize<R: RawText + ?Sized>(&self, raw: &R) -> Result<String> {
        self.extract(raw)
    }

    /// Normalize the single price of a raw value into an exact decimal.
    ///
    /// Every digit of the canonical price is kept, however long it is.
    /// The configured decimal point is ignored; parsing always goes through `.`.
    pub fn normalize_decimal<R: RawText + ?Sized>(&self, raw: &R) -> Result<BigDecimal> {
        let text = raw.as_text()?;
        let value = if self.dec_point == DEFAULT_DEC_POINT {
            self.find_price(text)?.value
        } else {
            PriceNormalizer::new().find_price(text)?.value
        };

        Ok(BigDecimal::from_str(&value)?)
    }
}

impl Default for PriceNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for PriceNormalizer {
    type Output = String;

    fn extract_text(&self, text: &str) -> Result<String> {
        self.find_price(text).map(|m| m.value)
    }
}

/// Search and clean the price in a raw value.
///
/// Returns `default` instead of a failure when one is given.
pub fn normalize_price_string<R: RawText + ?Sized>(
    raw_price: &R,
    default: Option<String>,
    dec_point: &str,
) -> Result<String> {
    PriceNormalizer::new()
        .with_dec_point(dec_point)
        .normalize(raw_price)
        .or_default_value(default)
}

/// Price of a raw value as an exact `BigDecimal`.
///
/// Returns `default` instead of a failure when one is given.
pub fn normalize_price_decimal<R: RawText + ?Sized>(
    raw_price: &R,
    default: Option<BigDecimal>,
) -> Result<BigDecimal> {
    PriceNormalizer::new()
        .normalize_decimal(raw_price)
        .or_default_value(default)
}

/// Canonical price together with the run it was built from.
pub fn extract_price<R: RawText + ?Sized>(raw_price: &R, dec_point: &str) -> Result<PriceMatch> {
    PriceNormalizer::new()
        .with_dec_point(dec_point)
        .find_price(raw_price.as_text()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn price(raw: &str) -> String {
        normalize_price_string(raw, None, ".").unwrap()
    }

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    const PRICE_CASES: &[(&str, &str)] = &[
        // Integer
        ("0", "0"),
        ("42", "42"),
        ("1234", "1234"),
        ("1 234", "1234"),
        ("1 234 567", "1234567"),
        ("12.007", "12007"),
        ("12,007", "12007"),
        ("1.234.567", "1234567"),
        ("1,234,567", "1234567"),
        ("1,034.550", "1034550"),
        // Start with zero
        ("042", "42"),
        ("0.01", "0.01"),
        ("00.1", "0.1"),
        ("0 234", "234"),
        ("000 567", "567"),
        ("012.33", "12.33"),
        ("00012,33", "12.33"),
        // Signed
        ("+1", "1"),
        ("-2.99", "-2.99"),
        ("-520", "-520"),
        ("+520", "520"),
        ("- 520.05", "-520.05"),
        ("+ 520.05", "520.05"),
        // Truncated decimal
        ("99.", "99"),
        ("99,", "99"),
        ("1,099.", "1099"),
        ("1.099,", "1099"),
        // One decimal digit
        ("42.0", "42.0"),
        ("42,0", "42.0"),
        ("10 380,5", "10380.5"),
        ("10 380.5", "10380.5"),
        ("10.380,5", "10380.5"),
        ("10,380.5", "10380.5"),
        ("1 000 777.5", "1000777.5"),
        ("1 000 777,5", "1000777.5"),
        ("1.000.777,5", "1000777.5"),
        ("1,000,777.5", "1000777.5"),
        // Two decimal digits
        ("10.99", "10.99"),
        ("10,99", "10.99"),
        ("1234567.89", "1234567.89"),
        ("1234567,89", "1234567.89"),
        ("12 345,09", "12345.09"),
        ("12 345.09", "12345.09"),
        ("12.345,09", "12345.09"),
        ("12,345.09", "12345.09"),
        ("1 234 567.89", "1234567.89"),
        ("1 234 567,89", "1234567.89"),
        ("1.234.567,89", "1234567.89"),
        ("1,234,567.89", "1234567.89"),
        // Indian numbering system
        ("5,00,111", "500111"),
        ("5.00.111", "500111"),
        ("12,13,14,007", "121314007"),
        ("12.13.14.007", "121314007"),
        ("7,01,02,03,999", "7010203999"),
        ("7.01.02.03.999", "7010203999"),
        ("1,00,222.1", "100222.1"),
        ("1.00.222,1", "100222.1"),
        ("99,77,11,000.1", "997711000.1"),
        ("99.77.11.000,1", "997711000.1"),
        ("5,00,111.99", "500111.99"),
        ("5.00.111,99", "500111.99"),
        ("12,13,14,007.99", "121314007.99"),
        ("12.13.14.007,99", "121314007.99"),
        // Price with rubbish
        ("  42  \t \n", "42"),
        ("|620|\" ]", "620"),
        ("|620.0|\" ]", "620.0"),
        ("|620,99'|\" ]", "620.99"),
        ("[ * |\"620.99\"| * ]", "620.99"),
        ("\u{200e} \\500 \"\n \n", "500"),
        ("\"855.000|", "855000"),
        ("NIO5,242", "5242"),
        ("NIO5.242", "5242"),
        ("NIO5,242.7", "5242.7"),
        ("CFA10,615", "10615"),
        ("$10.99", "10.99"),
        ("USD 10,99", "10.99"),
        ("10.99$", "10.99"),
        ("10,99USD", "10.99"),
        ("99 ₣", "99"),
        ("Price:-9.99$", "-9.99"),
        ("Price:- 9,99 ₪", "-9.99"),
        ("Start with DOT.45", "45"),
        ("Start with COMMA,45", "45"),
        ("Not a MINUS-.45", "45"),
        ("Not a PLUS+,45", "45"),
    ];

    const NOT_A_PRICE: &[&str] = &["", "   ", "+", "-", "USD", "-NuN", "+inf"];

    const TWO_PRICES: &[&str] = &[
        "1...2",
        "90 BH 210",
        "90-60",
        "451 °F = 233 °C",
        "50.431782|30.516382",
    ];

    #[test]
    fn test_price_cases() {
        for (raw, expected) in PRICE_CASES {
            assert_eq!(&price(raw), expected, "raw price {:?}", raw);
        }
    }

    #[test]
    fn test_no_price_found() {
        for raw in NOT_A_PRICE {
            assert!(
                matches!(
                    normalize_price_string(*raw, None, "."),
                    Err(MonparseError::NoPriceFound { .. })
                ),
                "raw price {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_ambiguous_price() {
        for raw in TWO_PRICES {
            assert!(
                matches!(
                    normalize_price_string(*raw, None, "."),
                    Err(MonparseError::AmbiguousPrice { .. })
                ),
                "raw price {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_ambiguous_price_lists_runs() {
        match normalize_price_string("90 BH 210", None, ".") {
            Err(MonparseError::AmbiguousPrice { input, candidates }) => {
                assert_eq!(input, "90 BH 210");
                assert_eq!(candidates, vec!["90".to_string(), "210".to_string()]);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_wrong_input_type() {
        let values = [json!(null), json!(23), json!(24.3), json!({"price": "1"})];
        for value in &values {
            assert!(matches!(
                normalize_price_string(value, None, "."),
                Err(MonparseError::InvalidInputType { .. })
            ));
        }
        assert_eq!(normalize_price_string(&json!("22"), None, ".").unwrap(), "22");
    }

    #[test]
    fn test_default_value() {
        let default = Some("n/a".to_string());
        for raw in NOT_A_PRICE.iter().chain(TWO_PRICES) {
            assert_eq!(
                normalize_price_string(*raw, default.clone(), ".").unwrap(),
                "n/a"
            );
        }
        assert_eq!(
            normalize_price_string(&json!(23), default.clone(), ".").unwrap(),
            "n/a"
        );
        assert_eq!(normalize_price_string("7", default, ".").unwrap(), "7");
    }

    #[test]
    fn test_dec_point() {
        assert_eq!(normalize_price_string("9,99", None, ".").unwrap(), "9.99");
        assert_eq!(normalize_price_string("9,99", None, "|").unwrap(), "9|99");
        assert_eq!(normalize_price_string("1 000", None, "|").unwrap(), "1000");
    }

    #[test]
    fn test_idempotent_on_canonical_prices() {
        for (_, canonical) in PRICE_CASES {
            assert_eq!(&price(canonical), canonical);
        }
    }

    #[test]
    fn test_digits_are_preserved() {
        for (raw, expected) in PRICE_CASES {
            let found = extract_price(*raw, ".").unwrap();
            let run_digits: String = found
                .original
                .chars()
                .filter(|c| c.is_ascii_digit())
                .collect();
            let out_digits: String = expected.chars().filter(|c| c.is_ascii_digit()).collect();
            let run_digits = run_digits.trim_start_matches('0');
            let out_digits = out_digits.trim_start_matches('0');
            assert_eq!(run_digits, out_digits, "raw price {:?}", raw);
        }
    }

    #[test]
    fn test_extract_price_keeps_original() {
        let found = extract_price("Price:- 9,99 ₪", ".").unwrap();
        assert_eq!(
            found,
            PriceMatch {
                value: "-9.99".to_string(),
                original: "-9,99".to_string(),
            }
        );

        let found = extract_price("1.099,", ".").unwrap();
        assert_eq!(found.original, "1.099,");
        assert_eq!(found.value, "1099");
    }

    #[test]
    fn test_price_decimal_value() {
        assert_eq!(normalize_price_decimal("+1", None).unwrap(), dec("1"));
        assert_eq!(normalize_price_decimal(": -10.99$", None).unwrap(), dec("-10.99"));
    }

    #[test]
    fn test_price_decimal_default() {
        assert_eq!(normalize_price_decimal("", Some(dec("0"))).unwrap(), dec("0"));
        assert_eq!(
            normalize_price_decimal("1..10", Some(BigDecimal::from(0))).unwrap(),
            BigDecimal::from(0)
        );
        assert_eq!(
            normalize_price_decimal("410.5 - 555", Some(dec("-1"))).unwrap(),
            dec("-1")
        );
    }

    #[test]
    fn test_price_decimal_error() {
        assert!(matches!(
            normalize_price_decimal("", None),
            Err(MonparseError::NoPriceFound { .. })
        ));
        assert!(matches!(
            normalize_price_decimal("7 | 128", None),
            Err(MonparseError::AmbiguousPrice { .. })
        ));
    }

    #[test]
    fn test_price_decimal_matches_string() {
        for (raw, _) in PRICE_CASES {
            assert_eq!(
                normalize_price_decimal(*raw, None).unwrap(),
                dec(&normalize_price_string(*raw, None, ".").unwrap())
            );
        }
    }

    #[test]
    fn test_price_decimal_ignores_custom_dec_point() {
        let normalizer = PriceNormalizer::new().with_dec_point(",");
        assert_eq!(normalizer.normalize("12.345,09").unwrap(), "12345,09");
        assert_eq!(normalizer.normalize_decimal("12.345,09").unwrap(), dec("12345.09"));
    }

    #[test]
    fn test_price_decimal_keeps_every_digit() {
        let raw = "1234567890123456789012345678.99";
        let value = normalize_price_decimal(raw, None).unwrap();
        assert_eq!(value, dec(&price(raw)));
        assert_eq!(value.to_string(), "1234567890123456789012345678.99");
        assert_eq!(value.as_bigint_and_exponent().1, 2);

        let raw = "-98.765.432.109.876.543.210.987.654.321,5";
        let value = normalize_price_decimal(raw, None).unwrap();
        assert_eq!(price(raw), "-98765432109876543210987654321.5");
        assert_eq!(value, dec("-98765432109876543210987654321.5"));

        let raw = "1".repeat(40);
        assert_eq!(normalize_price_decimal(raw.as_str(), None).unwrap(), dec(&raw));
    }

    #[test]
    fn test_digits_of_other_scripts() {
        assert_eq!(price("١٢٣"), "123");
        assert_eq!(price("٠٠١٢,٣٣ ج.م.\u{200f}"), "12.33");
        assert_eq!(price("₹ १,२३,४५६.७८"), "123456.78");
        assert_eq!(price("１２.５"), "12.5");
        assert_eq!(normalize_price_decimal("٩٩,٩٩", None).unwrap(), dec("99.99"));
        assert!(matches!(
            normalize_price_string("٩٠ - ٦٠", None, "."),
            Err(MonparseError::AmbiguousPrice { .. })
        ));
    }
}
