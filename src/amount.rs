//! Amount parsing for raw price strings

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::currency::CurrencySet;
use crate::error::SkipReason;

static SPLIT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([^\d.,]+)([\d,]+(?:\.\d{2})?)").expect("amount split pattern is valid")
});

/// Split `"S$ 1,234.50"` into `("S$", "1,234.50")`.
///
/// The marker is everything before the first digit or separator, trimmed.
/// For ranges only the first amount is returned.
pub fn split_currency_amount(text: &str) -> Option<(&str, &str)> {
    let caps = SPLIT_PATTERN.captures(text)?;
    let marker = caps.get(1)?.as_str().trim();
    let amount = caps.get(2)?.as_str();
    Some((marker, amount))
}

/// Numeric value of a raw price whose marker belongs to `currencies`.
pub fn parse_amount(text: &str, currencies: &CurrencySet) -> Option<f64> {
    let Some((marker, amount)) = split_currency_amount(text) else {
        trace!(text, reason = %SkipReason::ParseSkip, "no currency+amount shape");
        return None;
    };

    if !currencies.is_marker(marker) {
        trace!(text, marker, reason = %SkipReason::ParseSkip, "unrecognized marker");
        return None;
    }

    amount.replace(',', "").parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Locale;
    use rstest::rstest;

    #[rstest]
    #[case("S$ 1,234.50", Some(1234.50))]
    #[case("s$ 250", Some(250.0))]
    #[case("sgd 1,000", Some(1000.0))]
    #[case("sgd 1000", Some(1000.0))]
    #[case("s$ 10 - 20", Some(10.0))]
    #[case("$ 99.99", Some(99.99))]
    #[case("US$ 10", None)]
    #[case("usd 10", None)]
    #[case("s$", None)]
    #[case("s$ five hundred", None)]
    #[case("s$ ,", None)]
    #[case("", None)]
    fn test_parse_amount(#[case] text: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_amount(text, Locale::Singapore.currencies()), expected);
    }

    #[test]
    fn test_split_currency_amount() {
        assert_eq!(split_currency_amount("S$ 1,234.50"), Some(("S$", "1,234.50")));
        assert_eq!(split_currency_amount("250"), None);
    }
}
