//! Currency markers and locale keywords
//!
//! A [`CurrencySet`] is built once per locale and shared for the life of the
//! process. It owns the compiled patterns every extractor needs, so sessions
//! never compile regexes on the request path.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::extractors::price_pattern;

/// Phrases in a related question that signal it asks for a price.
pub const HOW_MUCH_MARKERS: &[&str] = &["how much"];

const SINGAPORE_MARKERS: &[&str] = &["s$", "$sgd", "sgd", "$"];

static SINGAPORE: Lazy<CurrencySet> = Lazy::new(|| {
    CurrencySet::new(SINGAPORE_MARKERS)
        .expect("built-in currency markers form a valid pattern")
});

/// Target market whose currency markers are recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Singapore,
}

impl Locale {
    /// Shared currency set for this locale
    pub fn currencies(self) -> &'static CurrencySet {
        match self {
            Locale::Singapore => &SINGAPORE,
        }
    }
}

/// Immutable, case-insensitive set of currency markers.
#[derive(Debug)]
pub struct CurrencySet {
    /// Lowercased, longest first so alternations prefer `$sgd` over `$`
    markers: Vec<String>,
    mention: Regex,
    price: Regex,
}

impl CurrencySet {
    pub fn new(markers: &[&str]) -> Result<Self, regex::Error> {
        let mut markers: Vec<String> = markers.iter().map(|m| m.to_lowercase()).collect();
        markers.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        markers.dedup();

        let alternation = markers
            .iter()
            .map(|m| regex::escape(m))
            .collect::<Vec<_>>()
            .join("|");

        let mention = Regex::new(&format!(r"(?i)(?:^|[^\w])(?:{alternation})"))?;
        let price = Regex::new(&price_pattern(&alternation))?;

        Ok(Self {
            markers,
            mention,
            price,
        })
    }

    pub fn markers(&self) -> impl Iterator<Item = &str> {
        self.markers.iter().map(String::as_str)
    }

    /// Exact (case-insensitive) membership test
    pub fn is_marker(&self, candidate: &str) -> bool {
        let candidate = candidate.to_lowercase();
        self.markers.iter().any(|m| *m == candidate)
    }

    /// Whether any marker occurs anywhere in `text`, even inside a word.
    pub fn contains_marker(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.markers.iter().any(|m| text.contains(m.as_str()))
    }

    /// Longest marker `token` starts with, as a slice of `token`.
    pub fn marker_prefix<'t>(&self, token: &'t str) -> Option<&'t str> {
        self.markers
            .iter()
            .find(|m| {
                token
                    .as_bytes()
                    .get(..m.len())
                    .is_some_and(|head| head.eq_ignore_ascii_case(m.as_bytes()))
            })
            .and_then(|m| token.get(..m.len()))
    }

    /// Whether a marker occurs at a word start, so `US$` does not count as `$`.
    pub fn mentions(&self, text: &str) -> bool {
        self.mention.is_match(text)
    }

    /// Currency grammar compiled for this set's markers
    pub(crate) fn price_regex(&self) -> &Regex {
        &self.price
    }
}
