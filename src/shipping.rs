//! Shipping cost detection
//!
//! Costs stated within a few words of the shipping keyword are collected so
//! the aggregator can drop them from the product prices. Only a fixed window
//! on either side of the keyword is inspected.

use tracing::debug;

use crate::currency::CurrencySet;
use crate::extractors::{GrammarExtractor, PriceExtractor, RawPrice};

#[derive(Debug, Clone)]
pub struct ShippingFilter<'c> {
    keyword: String,
    window: usize,
    grammar: GrammarExtractor<'c>,
}

impl<'c> ShippingFilter<'c> {
    pub fn new(currencies: &'c CurrencySet, keyword: &str, window: usize) -> Self {
        Self {
            keyword: keyword.to_lowercase(),
            window,
            grammar: GrammarExtractor::new(currencies),
        }
    }

    pub fn mentions_shipping(&self, text: &str) -> bool {
        !self.keyword.is_empty() && text.to_lowercase().contains(&self.keyword)
    }

    /// Prices found next to any occurrence of the keyword.
    pub fn shipping_costs(&self, text: &str) -> Vec<RawPrice> {
        if self.keyword.is_empty() {
            return Vec::new();
        }

        let text = text.to_lowercase();
        let mut costs = Vec::new();

        for (start, keyword) in text.match_indices(self.keyword.as_str()) {
            let end = start + keyword.len();

            let prefix = format!("{} {keyword}", self.prefix_window(&text[..start]));
            let suffix = self.suffix_window(&text[end..]);

            costs.extend(self.grammar.extract(&prefix));
            costs.extend(self.grammar.extract(&suffix));
        }

        if !costs.is_empty() {
            debug!(count = costs.len(), "shipping costs identified");
        }
        costs
    }

    /// Last `window` words before the keyword
    fn prefix_window(&self, before: &str) -> String {
        let words: Vec<&str> = before.split_whitespace().collect();
        words[words.len().saturating_sub(self.window)..].join(" ")
    }

    /// First `window` words after the keyword
    fn suffix_window(&self, after: &str) -> String {
        after
            .split_whitespace()
            .take(self.window)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
