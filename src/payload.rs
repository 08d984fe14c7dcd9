//! Search-result payload model
//!
//! Built from a raw `serde_json::Value` so that missing sections and fields of
//! the wrong JSON type simply become absent instead of failing the whole
//! payload. Polymorphic fields are resolved into enums once, here.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::trace;

use crate::error::SkipReason;

/// Provider response, reduced to the sections prices are read from.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct SearchResultPayload {
    pub organic_results: Vec<OrganicResult>,
    pub ads: Vec<Ad>,
    pub answer_box: Option<AnswerBox>,
    pub related_questions: Vec<RelatedQuestion>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrganicResult {
    pub title: Option<String>,
    pub snippet: Option<String>,
    pub snippet_highlighted_words: Vec<String>,
    pub rich_snippet: Option<RichSnippetNode>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ad {
    /// `None` when absent or of an unrecognized shape
    pub title: Option<AdTitle>,
    pub price: Option<String>,
    pub details: Option<String>,
}

/// Ad titles arrive either as plain text or split into visible/hidden parts.
#[derive(Debug, Clone, PartialEq)]
pub enum AdTitle {
    Plain(String),
    VisibleHidden {
        visible: String,
        hidden: Option<String>,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerBox {
    pub title: Option<String>,
    pub snippet: Option<String>,
    pub result: Option<String>,
    pub highlighted_snippets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelatedQuestion {
    pub question: Option<String>,
    pub snippet: Option<String>,
}

/// Rich snippets are free-form nested objects; only these shapes matter.
#[derive(Debug, Clone, PartialEq)]
pub enum RichSnippetNode {
    Leaf(String),
    List(Vec<String>),
    /// An object carrying a `currency` field
    Record {
        currency: Option<String>,
        price: Option<f64>,
    },
    Nested(BTreeMap<String, RichSnippetNode>),
}

impl From<Value> for SearchResultPayload {
    fn from(value: Value) -> Self {
        Self::from_value(&value)
    }
}

impl SearchResultPayload {
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            trace!(reason = %SkipReason::EmptyInput, "payload is not an object");
            return Self::default();
        };

        Self {
            organic_results: records(obj, "organic_results", OrganicResult::from_object),
            ads: records(obj, "ads", Ad::from_object),
            answer_box: obj
                .get("answer_box")
                .and_then(Value::as_object)
                .map(AnswerBox::from_object),
            related_questions: records(obj, "related_questions", RelatedQuestion::from_object),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.organic_results.is_empty()
            && self.ads.is_empty()
            && self.answer_box.is_none()
            && self.related_questions.is_empty()
    }
}

impl OrganicResult {
    fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            title: text(obj, "title"),
            snippet: text(obj, "snippet"),
            snippet_highlighted_words: texts(obj, "snippet_highlighted_words"),
            rich_snippet: obj.get("rich_snippet").and_then(RichSnippetNode::from_value),
        }
    }
}

impl Ad {
    fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            title: obj.get("title").and_then(AdTitle::from_value),
            price: text(obj, "price"),
            details: text(obj, "details"),
        }
    }
}

impl AdTitle {
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(AdTitle::Plain(s.clone())),
            Value::Object(obj) => match obj.get("visible").and_then(Value::as_str) {
                Some(visible) => Some(AdTitle::VisibleHidden {
                    visible: visible.to_string(),
                    hidden: text(obj, "hidden"),
                }),
                None => {
                    trace!(reason = %SkipReason::AmbiguousShape, "ad title record without visible text");
                    None
                }
            },
            Value::Null => None,
            _ => {
                trace!(reason = %SkipReason::AmbiguousShape, "ad title is neither text nor record");
                None
            }
        }
    }
}

impl AnswerBox {
    fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            title: text(obj, "title"),
            snippet: text(obj, "snippet"),
            result: text(obj, "result"),
            highlighted_snippets: texts(obj, "highlighted_snippets"),
        }
    }
}

impl RelatedQuestion {
    fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            question: text(obj, "question"),
            snippet: text(obj, "snippet"),
        }
    }
}

impl RichSnippetNode {
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(RichSnippetNode::Leaf(s.clone())),
            Value::Array(items) => Some(RichSnippetNode::List(
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect(),
            )),
            Value::Object(obj) if obj.contains_key("currency") => Some(RichSnippetNode::Record {
                currency: text(obj, "currency"),
                price: obj.get("price").and_then(number),
            }),
            Value::Object(obj) => Some(RichSnippetNode::Nested(
                obj.iter()
                    .filter_map(|(k, v)| Some((k.clone(), RichSnippetNode::from_value(v)?)))
                    .collect(),
            )),
            _ => None,
        }
    }
}

fn records<T>(obj: &Map<String, Value>, key: &str, build: fn(&Map<String, Value>) -> T) -> Vec<T> {
    match obj.get(key) {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_object).map(build).collect(),
        _ => Vec::new(),
    }
}

fn text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(String::from)
}

fn texts(obj: &Map<String, Value>, key: &str) -> Vec<String> {
    match obj.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect(),
        _ => Vec::new(),
    }
}

/// JSON number, or a string holding one
fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
