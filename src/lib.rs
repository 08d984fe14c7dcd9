//! Price range extraction from search-result payloads
//!
//! Finds currency-tagged amounts across the sections of a SerpAPI-style
//! response and reduces them to a min/max estimate:
//! - organic results (title, snippet, highlighted words, rich snippets)
//! - ads (verbatim prices, hidden text gated by title similarity)
//! - answer box
//! - related "how much" questions
//!
//! Shipping costs found next to the word "shipping" are left out.

pub mod aggregate;
pub mod amount;
pub mod config;
pub mod currency;
pub mod error;
pub mod extractors;
pub mod ffi;
pub mod payload;
pub mod request;
pub mod session;
pub mod shipping;
pub mod similarity;
pub mod tokenizer;

pub use aggregate::{NumericResult, ResultSummary};
pub use config::ExtractorConfig;
pub use currency::{CurrencySet, Locale};
pub use error::{PriceExtractionError, Result, SkipReason};
pub use extractors::{ExtractionPath, PriceExtractor, RawPrice};
pub use payload::SearchResultPayload;
pub use request::{PriceReport, SearchRequest};
pub use session::ExtractionSession;

use tracing::info;
use tracing_subscriber::EnvFilter;

/// Run one extraction session over `payload`.
///
/// `query` is what ad titles are scored against.
pub fn extract_prices(
    payload: &SearchResultPayload,
    query: &str,
    config: &ExtractorConfig,
) -> PriceReport {
    let mut session = ExtractionSession::new(query, config);
    session.walk(payload);
    let report = session.report();

    info!(
        min = report.min,
        max = report.max,
        prices_found = report.prices_found,
        use_nlp = report.use_nlp,
        "extraction finished"
    );
    report
}

/// Extract for a product lookup, using the request's own query and path.
pub fn extract_for_request(
    request: &SearchRequest,
    payload: &SearchResultPayload,
    base: &ExtractorConfig,
) -> PriceReport {
    let config = request.config(base);
    extract_prices(payload, &request.search_query(), &config)
}

/// Install a `RUST_LOG`-driven fmt subscriber; later calls are no-ops.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
