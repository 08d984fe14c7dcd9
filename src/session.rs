//! Extraction session
//!
//! Walks one payload, feeding every text field to the configured extractor and
//! the shipping filter, then reduces what was found. A session owns its
//! working sets and is discarded after producing a report.

use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::aggregate::{aggregate, NumericResult, ResultSummary};
use crate::config::ExtractorConfig;
use crate::currency::{CurrencySet, HOW_MUCH_MARKERS};
use crate::error::SkipReason;
use crate::extractors::{PriceExtractor, RawPrice};
use crate::payload::{
    Ad, AdTitle, AnswerBox, OrganicResult, RelatedQuestion, RichSnippetNode, SearchResultPayload,
};
use crate::request::PriceReport;
use crate::shipping::ShippingFilter;
use crate::similarity::{passes_gate, similarity_percentage};

pub struct ExtractionSession<'a> {
    query: &'a str,
    config: &'a ExtractorConfig,
    currencies: &'static CurrencySet,
    extractor: Box<dyn PriceExtractor + 'static>,
    shipping: ShippingFilter<'static>,
    extracted_costs: BTreeSet<RawPrice>,
    shipping_costs: BTreeSet<RawPrice>,
    /// Amounts read from structured fields, bypassing string extraction
    direct_amounts: NumericResult,
}

impl<'a> ExtractionSession<'a> {
    pub fn new(query: &'a str, config: &'a ExtractorConfig) -> Self {
        let currencies = config.locale.currencies();
        Self {
            query,
            config,
            currencies,
            extractor: config.extraction_path().extractor(currencies),
            shipping: ShippingFilter::new(
                currencies,
                &config.shipping_keyword,
                config.shipping_window,
            ),
            extracted_costs: BTreeSet::new(),
            shipping_costs: BTreeSet::new(),
            direct_amounts: NumericResult::new(),
        }
    }

    pub fn extracted_costs(&self) -> &BTreeSet<RawPrice> {
        &self.extracted_costs
    }

    pub fn shipping_costs(&self) -> &BTreeSet<RawPrice> {
        &self.shipping_costs
    }

    pub fn walk(&mut self, payload: &SearchResultPayload) {
        for organic in &payload.organic_results {
            self.visit_organic(organic);
        }
        for ad in &payload.ads {
            self.visit_ad(ad);
        }
        if let Some(answer_box) = &payload.answer_box {
            self.visit_answer_box(answer_box);
        }
        for question in &payload.related_questions {
            self.visit_related_question(question);
        }

        debug!(
            extracted = self.extracted_costs.len(),
            shipping = self.shipping_costs.len(),
            direct = self.direct_amounts.len(),
            "payload walked"
        );
    }

    /// Product amounts: everything extracted minus shipping, plus direct amounts.
    pub fn numeric_result(&self) -> NumericResult {
        let mut result = self.direct_amounts.clone();
        aggregate(
            &self.extracted_costs,
            &self.shipping_costs,
            self.currencies,
            &mut result,
        );
        result
    }

    pub fn summary(&self) -> ResultSummary {
        self.numeric_result().summary()
    }

    pub fn report(&self) -> PriceReport {
        PriceReport::new(&self.numeric_result(), self.extractor.path())
    }

    fn visit_organic(&mut self, organic: &OrganicResult) {
        self.extract_text(organic.title.as_deref());
        self.extract_text(organic.snippet.as_deref());
        for word in &organic.snippet_highlighted_words {
            self.extract_text(Some(word));
        }
        if let Some(rich_snippet) = &organic.rich_snippet {
            self.visit_rich_snippet(rich_snippet);
        }
    }

    fn visit_ad(&mut self, ad: &Ad) {
        let (similarity, hidden) = match &ad.title {
            Some(AdTitle::VisibleHidden { visible, hidden }) => {
                (Some(similarity_percentage(self.query, visible)), hidden.as_deref())
            }
            Some(AdTitle::Plain(title)) => (
                Some(similarity_percentage(self.query, &title.to_lowercase())),
                None,
            ),
            None => (None, None),
        };

        if let Some(score) = similarity {
            if passes_gate(score, self.config.similarity_threshold) {
                self.extract_text(hidden);
            } else {
                trace!(score, "ad title too far from query, hidden text ignored");
            }
        }

        let Some(details) = ad.details.as_deref().filter(|d| !d.is_empty()) else {
            return;
        };
        if details.eq_ignore_ascii_case("used") {
            return;
        }
        if let Some(price) = ad.price.as_deref() {
            if self.currencies.contains_marker(price) {
                self.extracted_costs.insert(RawPrice::new(price));
            }
        }
    }

    fn visit_answer_box(&mut self, answer_box: &AnswerBox) {
        self.extract_text(answer_box.title.as_deref());
        self.extract_text(answer_box.snippet.as_deref());
        self.extract_text(answer_box.result.as_deref());
        for snippet in &answer_box.highlighted_snippets {
            self.extract_text(Some(snippet));
        }
    }

    fn visit_related_question(&mut self, related: &RelatedQuestion) {
        let Some(question) = related.question.as_deref() else {
            return;
        };
        let question = question.to_lowercase();
        if !HOW_MUCH_MARKERS.iter().any(|m| question.contains(m)) {
            return;
        }

        match related.snippet.as_deref() {
            Some(snippet) if self.currencies.contains_marker(snippet) => {
                self.extract_text(Some(snippet));
            }
            _ => trace!(question = %question, "price question without a currency in its answer"),
        }
    }

    fn visit_rich_snippet(&mut self, node: &RichSnippetNode) {
        match node {
            // labels only
            RichSnippetNode::Leaf(_) => {}
            RichSnippetNode::List(items) => {
                for item in items {
                    let cleaned = strip_special_characters(item);
                    self.extract_text(Some(&cleaned));
                }
            }
            RichSnippetNode::Record { currency, price } => {
                let Some(currency) = currency.as_deref() else {
                    return;
                };
                if !self.currencies.mentions(currency) {
                    trace!(currency, reason = %SkipReason::ParseSkip, "rich snippet in foreign currency");
                    return;
                }
                // a zero price is a placeholder
                if let Some(price) = price.filter(|p| *p != 0.0) {
                    self.direct_amounts.insert(price);
                }
            }
            RichSnippetNode::Nested(children) => {
                for child in children.values() {
                    self.visit_rich_snippet(child);
                }
            }
        }
    }

    fn extract_text(&mut self, text: Option<&str>) {
        let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
            trace!(reason = %SkipReason::EmptyInput, "skipping field");
            return;
        };
        let text = text.to_lowercase();

        if self.shipping.mentions_shipping(&text) {
            self.shipping_costs.extend(self.shipping.shipping_costs(&text));
        }
        self.extracted_costs.extend(self.extractor.extract(&text));
    }
}

/// Drop everything but word characters, whitespace and periods.
fn strip_special_characters(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace() || *c == '.')
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> SearchResultPayload {
        serde_json::from_value(value).unwrap()
    }

    fn summarize(query: &str, config: &ExtractorConfig, value: serde_json::Value) -> ResultSummary {
        let mut session = ExtractionSession::new(query, config);
        session.walk(&payload(value));
        session.summary()
    }

    fn summary(min: f64, max: f64) -> ResultSummary {
        ResultSummary { min, max }
    }

    #[test]
    fn test_empty_payload_is_zero() {
        let config = ExtractorConfig::default();
        let result = summarize(
            "lamp",
            &config,
            json!({"organic_results": [], "ads": [], "answer_box": null, "related_questions": []}),
        );
        assert_eq!(result, summary(0.0, 0.0));
    }

    #[test]
    fn test_organic_snippet_prices() {
        let config = ExtractorConfig::default();
        let result = summarize(
            "lamp",
            &config,
            json!({"organic_results": [{"snippet": "available for s$99 and s$150"}]}),
        );
        assert_eq!(result, summary(99.0, 150.0));
    }

    #[test]
    fn test_shipping_only_price_is_excluded() {
        let config = ExtractorConfig::default();
        let mut session = ExtractionSession::new("lamp", &config);
        session.walk(&payload(json!({
            "organic_results": [{"snippet": "price: s$250 shipping included"}]
        })));

        assert!(session.shipping_costs().contains(&RawPrice::new("s$ 250")));
        assert_eq!(session.summary(), summary(0.0, 0.0));
    }

    #[test]
    fn test_shipping_only_price_is_excluded_on_token_path() {
        let config = ExtractorConfig::default().with_use_nlp(true);
        for snippet in ["price: s$250 shipping included", "price sgd250 shipping included"] {
            let result = summarize("lamp", &config, json!({"organic_results": [{"snippet": snippet}]}));
            assert_eq!(result, summary(0.0, 0.0), "{snippet}");
        }
    }

    #[test]
    fn test_unrelated_ad_hidden_text_ignored() {
        let config = ExtractorConfig::default();
        let result = summarize(
            "rare antique lamp",
            &config,
            json!({"ads": [{"title": {"visible": "unrelated gadget", "hidden": "s$500"}}]}),
        );
        assert_eq!(result, summary(0.0, 0.0));
    }

    #[test]
    fn test_related_ad_hidden_text_extracted() {
        let config = ExtractorConfig::default();
        let result = summarize(
            "rare antique lamp",
            &config,
            json!({"ads": [{"title": {"visible": "rare antique lamps", "hidden": "now s$500"}}]}),
        );
        assert_eq!(result, summary(500.0, 500.0));
    }

    #[test]
    fn test_ad_price_taken_verbatim_unless_used() {
        let config = ExtractorConfig::default();
        let result = summarize(
            "lamp",
            &config,
            json!({"ads": [
                {"title": "Lamp", "price": "S$1,299.00", "details": "New"},
                {"title": "Lamp", "price": "S$20", "details": "Used"},
                {"title": "Lamp", "price": "S$15"},
                {"title": "Lamp", "price": "US$5", "details": "New"}
            ]}),
        );
        assert_eq!(result, summary(1299.0, 1299.0));
    }

    #[test]
    fn test_ambiguous_ad_title_skips_hidden_text() {
        let config = ExtractorConfig::default().with_similarity_threshold(0);
        let result = summarize(
            "lamp",
            &config,
            json!({"ads": [{"title": ["lamp"], "hidden": "s$5"}]}),
        );
        assert_eq!(result, summary(0.0, 0.0));
    }

    #[test]
    fn test_answer_box_fields() {
        let config = ExtractorConfig::default();
        let result = summarize(
            "lamp",
            &config,
            json!({"answer_box": {
                "title": "Lamps from S$30",
                "result": "SGD 45",
                "highlighted_snippets": ["up to s$80"]
            }}),
        );
        assert_eq!(result, summary(30.0, 80.0));
    }

    #[test]
    fn test_related_questions_need_how_much_and_currency() {
        let config = ExtractorConfig::default();
        let result = summarize(
            "lamp",
            &config,
            json!({"related_questions": [
                {"question": "How much is a brass lamp?", "snippet": "Around S$60 to S$90."},
                {"question": "Where to buy a lamp?", "snippet": "Shops sell them from S$5"},
                {"question": "How much does it weigh?", "snippet": "About 2kg"}
            ]}),
        );
        assert_eq!(result, summary(60.0, 90.0));
    }

    #[test]
    fn test_rich_snippet_record_and_lists() {
        let config = ExtractorConfig::default();
        let result = summarize(
            "lamp",
            &config,
            json!({"organic_results": [{
                "rich_snippet": {
                    "top": {
                        "detected_extensions": {"price": 42.5, "currency": "S$"},
                        "extensions": ["In stock", "SGD 70.00"]
                    },
                    "bottom": {
                        "detected_extensions": {"price": 9.0, "currency": "USD"},
                        "extensions": ["S$12"]
                    }
                }
            }]}),
        );
        // "S$12" loses its "$" to cleaning and no longer matches
        assert_eq!(result, summary(42.5, 70.0));
    }

    #[test]
    fn test_highlighted_words() {
        let config = ExtractorConfig::default();
        let result = summarize(
            "lamp",
            &config,
            json!({"organic_results": [{"snippet_highlighted_words": ["S$19.90"]}]}),
        );
        assert_eq!(result, summary(19.9, 19.9));
    }

    #[test]
    fn test_token_path_spelled_amounts_are_skipped() {
        let config = ExtractorConfig::default().with_use_nlp(true);
        let mut session = ExtractionSession::new("lamp", &config);
        session.walk(&payload(json!({
            "organic_results": [{"snippet": "about sgd five hundred or s$ 450"}]
        })));

        assert!(session.extracted_costs().contains(&RawPrice::new("sgd five hundred")));
        assert_eq!(session.summary(), summary(450.0, 450.0));
        assert!(session.report().use_nlp);
    }

    #[test]
    fn test_strip_special_characters() {
        assert_eq!(strip_special_characters(" S$12.50 (sale)! "), "S12.50 sale");
    }
}
