//! Web search collaborator: query in, ordered result records out.
//!
//! `SearchClient` is the seam the searcher node calls. `TavilySearch` talks to the
//! Tavily REST API; `MockSearch` returns fixed results for tests and examples.
//! Results are returned in provider order; nothing here ranks, filters or dedupes.

mod mock;
mod tavily;

pub use mock::MockSearch;
pub use tavily::{TavilySearch, TAVILY_MAX_RESULTS};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// One search result describing a past project.
///
/// The provider's record is kept verbatim, including `null` values and fields
/// this crate does not know about. `title`, `url`, `content` (the snippet) and
/// `score` are read through accessors; a missing or non-string value reads as
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseStudy {
    fields: Map<String, Value>,
}

impl CaseStudy {
    /// Creates a record with title, url and snippet and no other fields.
    pub fn new(title: impl Into<String>, url: impl Into<String>, content: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("title".into(), Value::String(title.into()));
        fields.insert("url".into(), Value::String(url.into()));
        fields.insert("content".into(), Value::String(content.into()));
        Self { fields }
    }

    /// Wraps a provider record as-is.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    fn text(&self, key: &str) -> &str {
        self.fields.get(key).and_then(Value::as_str).unwrap_or("")
    }

    pub fn title(&self) -> &str {
        self.text("title")
    }

    pub fn url(&self) -> &str {
        self.text("url")
    }

    /// Snippet text returned by the provider.
    pub fn content(&self) -> &str {
        self.text("content")
    }

    /// Provider relevance score, when given as a number.
    pub fn score(&self) -> Option<f64> {
        self.fields.get("score").and_then(Value::as_f64)
    }

    /// Any field of the record, by provider name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }
}

/// Error from a search provider.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Request could not be sent or the response body could not be read.
    #[error("transport error: {0}")]
    Transport(String),
    /// Provider answered with a non-success status (bad key, quota, bad request).
    #[error("search API error {status}: {body}")]
    Api { status: u16, body: String },
    /// Response body was not the expected JSON shape.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Search provider: free-text query plus result cap in, ordered results out.
///
/// **Interaction**: Used by `SearchCaseStudiesNode`.
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Runs one search and returns at most `max_results` results in provider order.
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<CaseStudy>, SearchError>;
}
