//! Token-stream price extraction
//!
//! Walks the shared tokenizer's output; a token starting with a currency
//! marker opens a phrase that absorbs the number-like tokens right after it.
//! Catches spelled-out amounts and odd spacing the grammar misses, at the
//! cost of picking up stray number words.

use tracing::trace;

use super::{ExtractionPath, PriceExtractor, RawPrice};
use crate::currency::CurrencySet;
use crate::tokenizer::Tokenizer;

#[derive(Debug, Clone, Copy)]
pub struct TokenStreamExtractor<'c> {
    currencies: &'c CurrencySet,
    tokenizer: &'static Tokenizer,
}

impl<'c> TokenStreamExtractor<'c> {
    pub fn new(currencies: &'c CurrencySet) -> Self {
        Self {
            currencies,
            tokenizer: Tokenizer::shared(),
        }
    }
}

impl PriceExtractor for TokenStreamExtractor<'_> {
    fn extract(&self, text: &str) -> Vec<RawPrice> {
        let tokens = self.tokenizer.tokenize(text);
        let mut prices = Vec::new();

        for token in &tokens {
            let Some(marker) = self.currencies.marker_prefix(token.text) else {
                continue;
            };

            // `sgd250` reads as `sgd 250`
            let rest = &token.text[marker.len()..];
            let mut phrase = if !rest.is_empty() && self.tokenizer.like_num(rest) {
                format!("{marker} {rest}")
            } else {
                token.text.to_string()
            };
            let mut next = token.index + 1;
            while let Some(following) = tokens.get(next).filter(|t| t.like_num) {
                phrase.push(' ');
                phrase.push_str(following.text);
                next += 1;
            }
            prices.push(RawPrice::new(phrase));
        }

        trace!(tokens = tokens.len(), found = prices.len(), "token scan");
        prices
    }

    fn path(&self) -> ExtractionPath {
        ExtractionPath::TokenStream
    }
}
