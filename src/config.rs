//! Extractor configuration
//!
//! Every field has a default, so an empty settings file (or none at all)
//! yields the standard Singapore grammar-path setup.

use std::path::Path;

use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::currency::Locale;
use crate::error::Result;
use crate::extractors::ExtractionPath;

/// Prefix for environment overrides, e.g. `PRICE_EXTRACTION_USE_NLP=true`
pub const ENV_PREFIX: &str = "PRICE_EXTRACTION";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Use the token-stream extractor instead of the currency grammar
    pub use_nlp: bool,

    /// Minimum query/ad-title similarity (exclusive, in percent) before an
    /// ad's hidden text is read.
    pub similarity_threshold: u32,

    pub shipping_keyword: String,

    /// Words inspected on each side of the shipping keyword
    pub shipping_window: usize,

    pub locale: Locale,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            use_nlp: false,
            similarity_threshold: 40,
            shipping_keyword: "shipping".to_string(),
            shipping_window: 2,
            locale: Locale::Singapore,
        }
    }
}

impl ExtractorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layer an optional settings file and `PRICE_EXTRACTION_*` variables.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn with_use_nlp(mut self, use_nlp: bool) -> Self {
        self.use_nlp = use_nlp;
        self
    }

    pub fn with_similarity_threshold(mut self, threshold: u32) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    pub fn with_shipping_window(mut self, window: usize) -> Self {
        self.shipping_window = window;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn extraction_path(&self) -> ExtractionPath {
        ExtractionPath::from_use_nlp(self.use_nlp)
    }
}
