//! Pattern-based price extraction
//!
//! Matches `<marker> [$] <amount> [- <amount>]` with a regex compiled once per
//! currency set.

use tracing::trace;

use super::{ExtractionPath, PriceExtractor, RawPrice};
use crate::currency::CurrencySet;

/// Amount with optional thousands separators and up to two decimals
const AMOUNT: &str = r"[\d,]+(?:\.\d{2})?";

/// Build the currency grammar for an escaped marker alternation.
///
/// Group 1 is the marker, group 2 the (low) amount, group 3 the optional
/// upper bound of a range. Callers reject markers that follow a word character.
pub(crate) fn price_pattern(alternation: &str) -> String {
    format!(r"(?i)({alternation})\s*\$?\s*({AMOUNT})(?:\s*-\s*\$?\s*({AMOUNT}))?")
}

/// Extracts prices with the currency grammar.
#[derive(Debug, Clone, Copy)]
pub struct GrammarExtractor<'c> {
    currencies: &'c CurrencySet,
}

impl<'c> GrammarExtractor<'c> {
    pub fn new(currencies: &'c CurrencySet) -> Self {
        Self { currencies }
    }
}

impl PriceExtractor for GrammarExtractor<'_> {
    fn extract(&self, text: &str) -> Vec<RawPrice> {
        let prices: Vec<RawPrice> = self
            .currencies
            .price_regex()
            .captures_iter(text)
            .filter_map(|caps| {
                let marker = caps.get(1)?;
                if follows_word_char(text, marker.start()) {
                    return None;
                }
                let marker = marker.as_str();
                let low = caps.get(2)?.as_str();
                let high = caps.get(3).map(|m| m.as_str());
                Some(RawPrice::from_parts(marker, low, high))
            })
            .collect();

        trace!(found = prices.len(), "grammar scan");
        prices
    }

    fn path(&self) -> ExtractionPath {
        ExtractionPath::Grammar
    }
}

fn follows_word_char(text: &str, at: usize) -> bool {
    text[..at]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Locale;
    use rstest::rstest;

    fn extract(text: &str) -> Vec<String> {
        GrammarExtractor::new(Locale::Singapore.currencies())
            .extract(text)
            .into_iter()
            .map(|p| p.as_str().to_string())
            .collect()
    }

    #[rstest]
    #[case("available for s$99 and s$150", vec!["s$ 99", "s$ 150"])]
    #[case("Now S$1,234.50 only", vec!["s$ 1,234.50"])]
    #[case("SGD 20 - 35 per set", vec!["sgd 20 - 35"])]
    #[case("from sgd$45", vec!["sgd 45"])]
    #[case("costs $sgd12", vec!["$sgd 12"])]
    #[case("price: $99", vec!["$ 99"])]
    #[case("$5 coupon", vec!["$ 5"])]
    fn test_extracts_prices(#[case] text: &str, #[case] expected: Vec<&str>) {
        assert_eq!(extract(text), expected);
    }

    #[rstest]
    #[case("no prices here")]
    #[case("US$10 on the US store")]
    #[case("")]
    fn test_no_match(#[case] text: &str) {
        assert!(extract(text).is_empty());
    }

    #[test]
    fn test_range_keeps_both_bounds() {
        assert_eq!(extract("S$10.50 - $20.00"), vec!["s$ 10.50 - 20.00"]);
    }

    #[test]
    fn test_range_needs_bare_upper_bound() {
        assert_eq!(extract("S$10.50-S$20.00"), vec!["s$ 10.50", "s$ 20.00"]);
    }

    #[test]
    fn test_adjacent_matches_do_not_overlap() {
        assert_eq!(extract("s$1 s$2"), vec!["s$ 1", "s$ 2"]);
    }

    #[rstest]
    #[case("s$10,s$20", vec!["s$ 10,", "s$ 20"])]
    #[case("sgd 5,sgd 6", vec!["sgd 5,", "sgd 6"])]
    #[case("us$10,s$20", vec!["s$ 20"])]
    fn test_comma_separated_prices(#[case] text: &str, #[case] expected: Vec<&str>) {
        assert_eq!(extract(text), expected);
    }
}
