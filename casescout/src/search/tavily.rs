//! Tavily web search client (`POST /search`).

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, trace, warn};

use super::{CaseStudy, SearchClient, SearchError};

const TAVILY_SEARCH_URL: &str = "https://api.tavily.com/search";

/// Largest `max_results` Tavily accepts.
pub const TAVILY_MAX_RESULTS: usize = 20;

fn tavily_search_url() -> String {
    std::env::var("TAVILY_SEARCH_URL").unwrap_or_else(|_| TAVILY_SEARCH_URL.to_string())
}

/// Parameters for a single Tavily search request.
struct TavilySearchParams<'a> {
    query: &'a str,
    max_results: usize,
    search_depth: &'a str,
    topic: &'a str,
}

impl TavilySearchParams<'_> {
    fn build_body(&self) -> serde_json::Value {
        json!({
            "query": self.query,
            "max_results": self.max_results.min(TAVILY_MAX_RESULTS),
            "search_depth": self.search_depth,
            "topic": self.topic,
            "include_answer": false,
            "include_raw_content": false,
            "include_images": false,
        })
    }
}

/// Tavily response body; only `results` is read and it must be present.
#[derive(Debug, Deserialize)]
struct TavilyResponse {
    results: Vec<CaseStudy>,
    #[serde(default)]
    response_time: Option<f64>,
}

/// Web search via Tavily.
///
/// Endpoint defaults to `https://api.tavily.com/search`; `TAVILY_SEARCH_URL`
/// or [`TavilySearch::with_endpoint`] override it.
pub struct TavilySearch {
    api_key: String,
    endpoint: String,
    search_depth: String,
    topic: String,
    client: reqwest::Client,
}

impl TavilySearch {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: tavily_search_url(),
            search_depth: "basic".to_string(),
            topic: "general".to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Sends requests to `endpoint` instead of the default URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// `"basic"` or `"advanced"`.
    pub fn with_search_depth(mut self, depth: impl Into<String>) -> Self {
        self.search_depth = depth.into();
        self
    }

    /// `"general"` or `"news"`.
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    fn params<'a>(&'a self, query: &'a str, max_results: usize) -> TavilySearchParams<'a> {
        TavilySearchParams {
            query,
            max_results,
            search_depth: &self.search_depth,
            topic: &self.topic,
        }
    }
}

#[async_trait]
impl SearchClient for TavilySearch {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<CaseStudy>, SearchError> {
        let body = self.params(query, max_results).build_body();
        debug!(
            url = %self.endpoint,
            query = %query,
            max_results,
            "Tavily search"
        );
        trace!(url = %self.endpoint, request = %body, "Tavily request body");

        let res = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;
        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = match res.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!(status, error = %e, "Tavily error body unreadable");
                    format!("<unreadable body: {}>", e)
                }
            };
            return Err(SearchError::Api { status, body });
        }
        let text = res
            .text()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;
        trace!(url = %self.endpoint, response = %text, "Tavily response body");
        let out: TavilyResponse =
            serde_json::from_str(&text).map_err(|e| SearchError::Decode(e.to_string()))?;
        debug!(
            results = out.results.len(),
            response_time = ?out.response_time,
            "Tavily search complete"
        );
        Ok(out.results)
    }
}
