//! Searcher node: runs the generated query and stores the results as-is.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::AgentError;
use crate::graph::Node;
use crate::search::SearchClient;

use super::state::{CaseStudyState, CaseStudyUpdate};

/// Node id of the searcher.
pub const SEARCH_CASE_STUDIES_NODE: &str = "search_case_studies";

/// Result cap passed to the search provider on every call.
pub const CASE_STUDY_MAX_RESULTS: usize = 20;

/// Searcher: one search call per run with `state.query`.
///
/// Results are stored in provider order without filtering or ranking.
pub struct SearchCaseStudiesNode {
    search: Arc<dyn SearchClient>,
}

impl SearchCaseStudiesNode {
    pub fn new(search: Arc<dyn SearchClient>) -> Self {
        Self { search }
    }
}

#[async_trait]
impl Node<CaseStudyState> for SearchCaseStudiesNode {
    fn id(&self) -> &str {
        SEARCH_CASE_STUDIES_NODE
    }

    async fn run(&self, state: &CaseStudyState) -> Result<CaseStudyUpdate, AgentError> {
        let query = state
            .query
            .as_deref()
            .ok_or(AgentError::MissingState("query"))?;
        let results = self.search.search(query, CASE_STUDY_MAX_RESULTS).await?;
        debug!(query = %query, results = results.len(), "case-study search complete");
        Ok(CaseStudyUpdate::case_studies(results))
    }
}
