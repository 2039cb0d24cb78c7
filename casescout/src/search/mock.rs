//! Mock search client for tests and examples.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{CaseStudy, SearchClient, SearchError};

/// Mock search: fixed results (cut to `max_results`), or a fixed failure.
///
/// Records every `(query, max_results)` pair it receives.
pub struct MockSearch {
    results: Vec<CaseStudy>,
    /// When Some, every call fails with `SearchError::Api { status, body }`.
    error: Option<(u16, String)>,
    call_count: AtomicUsize,
    requests: Mutex<Vec<(String, usize)>>,
}

impl MockSearch {
    /// Creates a mock that returns `results` for every query.
    pub fn new(results: Vec<CaseStudy>) -> Self {
        Self {
            results,
            error: None,
            call_count: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Creates a mock whose every call fails with an API error.
    pub fn failing(status: u16, body: impl Into<String>) -> Self {
        Self {
            error: Some((status, body.into())),
            ..Self::new(Vec::new())
        }
    }

    /// Number of `search` calls so far.
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// `(query, max_results)` of each call, in call order.
    pub fn requests(&self) -> Vec<(String, usize)> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SearchClient for MockSearch {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<CaseStudy>, SearchError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push((query.to_string(), max_results));
        }
        if let Some((status, body)) = &self.error {
            return Err(SearchError::Api {
                status: *status,
                body: body.clone(),
            });
        }
        Ok(self.results.iter().take(max_results).cloned().collect())
    }
}
