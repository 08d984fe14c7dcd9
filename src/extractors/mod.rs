//! Price extraction strategies
//!
//! Each module locates currency-tagged amounts in free text. Both produce
//! [`RawPrice`] values so a session can swap one for the other.

mod grammar_extractor;
mod token_extractor;

pub use grammar_extractor::*;
pub use token_extractor::*;

pub(crate) use grammar_extractor::price_pattern;

use std::fmt;

use crate::currency::CurrencySet;

/// Normalized `<marker> <amount>` (or `<marker> <low> - <high>`) fragment.
///
/// Always lowercased, so equality is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RawPrice(String);

impl RawPrice {
    pub fn new(text: impl AsRef<str>) -> Self {
        Self(text.as_ref().trim().to_lowercase())
    }

    pub fn from_parts(marker: &str, low: &str, high: Option<&str>) -> Self {
        match high {
            Some(high) => Self::new(format!("{marker} {low} - {high}")),
            None => Self::new(format!("{marker} {low}")),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RawPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which extractor a session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionPath {
    #[default]
    Grammar,
    TokenStream,
}

impl ExtractionPath {
    pub fn from_use_nlp(use_nlp: bool) -> Self {
        if use_nlp {
            ExtractionPath::TokenStream
        } else {
            ExtractionPath::Grammar
        }
    }

    pub fn uses_nlp(self) -> bool {
        matches!(self, ExtractionPath::TokenStream)
    }

    pub fn extractor<'c>(self, currencies: &'c CurrencySet) -> Box<dyn PriceExtractor + 'c> {
        match self {
            ExtractionPath::Grammar => Box::new(GrammarExtractor::new(currencies)),
            ExtractionPath::TokenStream => Box::new(TokenStreamExtractor::new(currencies)),
        }
    }
}

/// Finds price fragments in a block of text.
pub trait PriceExtractor {
    fn extract(&self, text: &str) -> Vec<RawPrice>;

    fn path(&self) -> ExtractionPath;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Locale;

    #[test]
    fn test_raw_price_normalizes_case() {
        assert_eq!(RawPrice::new("S$ 250"), RawPrice::new("s$ 250"));
        assert_eq!(RawPrice::new(" SGD 10 ").as_str(), "sgd 10");
    }

    #[test]
    fn test_raw_price_from_parts() {
        assert_eq!(RawPrice::from_parts("S$", "10", None).as_str(), "s$ 10");
        assert_eq!(
            RawPrice::from_parts("S$", "10", Some("20")).as_str(),
            "s$ 10 - 20"
        );
    }

    #[test]
    fn test_path_selects_extractor() {
        let currencies = Locale::Singapore.currencies();
        assert_eq!(
            ExtractionPath::from_use_nlp(false).extractor(currencies).path(),
            ExtractionPath::Grammar
        );
        assert_eq!(
            ExtractionPath::from_use_nlp(true).extractor(currencies).path(),
            ExtractionPath::TokenStream
        );
    }
}
