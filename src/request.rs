//! Inbound request and outbound report
//!
//! These are the only shapes exchanged with the transport layer.

use serde::{Deserialize, Serialize};

use crate::aggregate::NumericResult;
use crate::config::ExtractorConfig;
use crate::extractors::ExtractionPath;

/// Status reported alongside a completed extraction
pub const STATUS_OK: u16 = 200;

/// A product price lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub product: String,
    pub country: String,
    #[serde(default)]
    pub use_nlp: bool,
}

impl SearchRequest {
    /// Query string sent to the search provider; ad titles are scored against it.
    pub fn search_query(&self) -> String {
        format!(
            "location:${} allinurl:sg {} price in ($, SGD)",
            self.country, self.product
        )
    }

    /// `base` with this request's extraction path applied
    pub fn config(&self, base: &ExtractorConfig) -> ExtractorConfig {
        base.clone().with_use_nlp(self.use_nlp)
    }
}

/// Result of one extraction, ready to be serialized.
///
/// `prices_found == 0` with `status == 200` means the payload held no usable
/// price, which is not a failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceReport {
    pub min: f64,
    pub max: f64,
    pub use_nlp: bool,
    pub status: u16,
    pub prices_found: usize,
}

impl PriceReport {
    pub fn new(result: &NumericResult, path: ExtractionPath) -> Self {
        let summary = result.summary();
        Self {
            min: summary.min,
            max: summary.max,
            use_nlp: path.uses_nlp(),
            status: STATUS_OK,
            prices_found: result.len(),
        }
    }
}
