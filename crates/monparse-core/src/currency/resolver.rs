//! Currency code detection in raw text.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::{debug, trace};

use super::table::CurrencyTable;
use crate::error::{MonparseError, Result};
use crate::extractor::Extractor;

const NO_BREAK_SPACE: char = '\u{00a0}';
const RIGHT_TO_LEFT_MARK: char = '\u{200f}';

/// Byte range where one or more symbols occur in the cleaned input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Span {
    start: usize,
    end: usize,
}

impl Span {
    fn len(&self) -> usize {
        self.end - self.start
    }

    /// Strictly longer and covering `other`.
    fn covers(&self, other: &Span) -> bool {
        self.len() > other.len() && self.start <= other.start && other.end <= self.end
    }
}

/// Codes matched at each span of the input.
type SpanCodes<'a> = BTreeMap<Span, BTreeSet<&'a str>>;

/// Resolves raw currency text ("US$", "грн.", "NIO5,242") to a currency code.
#[derive(Debug, Clone)]
pub struct CurrencyResolver {
    table: Arc<CurrencyTable>,
}

impl CurrencyResolver {
    /// Create a resolver over the given table.
    pub fn new(table: Arc<CurrencyTable>) -> Self {
        Self { table }
    }

    /// Create a resolver over the built-in table.
    pub fn builtin() -> Result<Self> {
        CurrencyTable::builtin().map(Self::new)
    }

    /// Table used by this resolver.
    pub fn table(&self) -> &CurrencyTable {
        &self.table
    }

    /// Every currency code found in `text`.
    ///
    /// A code is found when the code itself or one of its symbols occurs in
    /// the cleaned text, unless that occurrence is covered by a longer symbol
    /// of another currency (`$` inside `US$`).
    pub fn candidates(&self, text: &str) -> BTreeSet<&str> {
        let currency = clean(text);
        let mut spans = SpanCodes::new();
        let mut longest = 0;

        for (code, info) in self.table.iter() {
            for symbol in &info.symbols {
                let symbol = symbol.strip_suffix(RIGHT_TO_LEFT_MARK).unwrap_or(symbol);
                if symbol.is_empty() {
                    continue;
                }
                for (start, matched) in currency.match_indices(symbol) {
                    let span = Span {
                        start,
                        end: start + matched.len(),
                    };
                    longest = longest.max(span.len());
                    spans.entry(span).or_default().insert(code);
                }
            }
        }

        trace!("currency spans in {:?}: {:?}", text, spans);

        let mut candidates = BTreeSet::new();
        for (span, codes) in &spans {
            for &code in codes {
                if !is_shadowed(&spans, span, code, longest) {
                    candidates.insert(code);
                }
            }
        }
        candidates
    }

    /// Resolve the single currency code of `text`.
    pub fn resolve_text(&self, text: &str) -> Result<String> {
        if clean(text).is_empty() {
            return Err(MonparseError::NoCurrencyFound {
                input: text.to_string(),
            });
        }

        let candidates = self.candidates(text);
        let mut codes = candidates.iter();
        match (codes.next(), codes.next()) {
            (None, _) => Err(MonparseError::NoCurrencyFound {
                input: text.to_string(),
            }),
            (Some(code), None) => {
                debug!("resolved currency {:?} => {}", text, code);
                Ok(code.to_string())
            }
            (Some(_), Some(_)) => Err(MonparseError::AmbiguousCurrency {
                input: text.to_string(),
                codes: candidates.iter().map(|c| c.to_string()).collect(),
            }),
        }
    }
}

impl Extractor for CurrencyResolver {
    type Output = String;

    fn extract_text(&self, text: &str) -> Result<String> {
        self.resolve_text(text)
    }
}

/// Whether `code` at `span` lies inside a longer match of another currency.
///
/// A covering span starts at most `longest` bytes before `span`, so only that
/// window of the map is visited.
fn is_shadowed(spans: &SpanCodes<'_>, span: &Span, code: &str, longest: usize) -> bool {
    let from = Span {
        start: span.start.saturating_sub(longest),
        end: 0,
    };
    let to = Span {
        start: span.start,
        end: usize::MAX,
    };
    spans.range(from..=to).any(|(other, codes)| {
        other.covers(span) && codes.iter().any(|&other_code| other_code != code)
    })
}

/// Drop no-break spaces and right-to-left marks, trim the rest.
fn clean(raw: &str) -> String {
    raw.chars()
        .filter(|&c| c != NO_BREAK_SPACE && c != RIGHT_TO_LEFT_MARK)
        .collect::<String>()
        .trim()
        .to_string()
}
