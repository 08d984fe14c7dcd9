//! Reduction of raw price strings to a min/max summary

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::amount::parse_amount;
use crate::currency::CurrencySet;
use crate::extractors::RawPrice;

/// `{min, max}` over the parsed amounts; both 0 when nothing was found.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ResultSummary {
    pub min: f64,
    pub max: f64,
}

/// Set of parsed amounts. Equal values collapse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumericResult {
    amounts: Vec<f64>,
}

impl NumericResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false for duplicates and non-finite values.
    pub fn insert(&mut self, amount: f64) -> bool {
        if !amount.is_finite() || self.amounts.contains(&amount) {
            return false;
        }
        self.amounts.push(amount);
        true
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.amounts.iter().copied()
    }

    pub fn summary(&self) -> ResultSummary {
        let mut amounts = self.iter();
        let Some(first) = amounts.next() else {
            return ResultSummary::default();
        };
        let (min, max) = amounts.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        ResultSummary { min, max }
    }
}

/// Extracted costs that were not identified as shipping.
pub fn product_costs<'a>(
    extracted: &'a BTreeSet<RawPrice>,
    shipping: &'a BTreeSet<RawPrice>,
) -> impl Iterator<Item = &'a RawPrice> + 'a {
    extracted.difference(shipping)
}

/// Parse every product cost into `result`.
pub fn aggregate(
    extracted: &BTreeSet<RawPrice>,
    shipping: &BTreeSet<RawPrice>,
    currencies: &CurrencySet,
    result: &mut NumericResult,
) {
    for cost in product_costs(extracted, shipping) {
        if let Some(amount) = parse_amount(cost.as_str(), currencies) {
            result.insert(amount);
        }
    }
}
