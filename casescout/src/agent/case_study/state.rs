//! Case-study state and its partial update.

use serde::{Deserialize, Serialize};

use crate::channels::GraphState;
use crate::search::CaseStudy;

/// State threaded through the case-study graph.
///
/// Created with only `project_details`; `generate_query` writes `query`,
/// `search_case_studies` writes `case_studies`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseStudyState {
    /// Project description the run was started with.
    pub project_details: String,
    /// Search query produced by the model; `None` until the generator ran.
    #[serde(default)]
    pub query: Option<String>,
    /// Search results in provider order; empty until the searcher ran.
    #[serde(default)]
    pub case_studies: Vec<CaseStudy>,
}

impl CaseStudyState {
    /// Initial state for a run.
    pub fn new(project_details: impl Into<String>) -> Self {
        Self {
            project_details: project_details.into(),
            ..Default::default()
        }
    }
}

/// Fields written by one node. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseStudyUpdate {
    pub query: Option<String>,
    pub case_studies: Option<Vec<CaseStudy>>,
}

impl CaseStudyUpdate {
    /// Update that sets only `query`.
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Default::default()
        }
    }

    /// Update that sets only `case_studies`.
    pub fn case_studies(case_studies: Vec<CaseStudy>) -> Self {
        Self {
            case_studies: Some(case_studies),
            ..Default::default()
        }
    }
}

impl GraphState for CaseStudyState {
    type Update = CaseStudyUpdate;

    fn merge(&self, update: &CaseStudyUpdate) -> Self {
        Self {
            project_details: self.project_details.clone(),
            query: update.query.clone().or_else(|| self.query.clone()),
            case_studies: update
                .case_studies
                .clone()
                .unwrap_or_else(|| self.case_studies.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_has_only_project_details() {
        let s = CaseStudyState::new("app");
        assert_eq!(s.project_details, "app");
        assert!(s.query.is_none());
        assert!(s.case_studies.is_empty());
    }

    #[test]
    fn merge_query_keeps_other_fields() {
        let s = CaseStudyState::new("app");
        let next = s.merge(&CaseStudyUpdate::query("q"));
        assert_eq!(next.query.as_deref(), Some("q"));
        assert_eq!(next.project_details, "app");
        assert!(next.case_studies.is_empty());
        assert!(s.query.is_none());
    }

    #[test]
    fn merge_case_studies_replaces_list_and_keeps_query() {
        let s = CaseStudyState::new("app").merge(&CaseStudyUpdate::query("q"));
        let results = vec![CaseStudy::new("t", "https://t", "c")];
        let next = s.merge(&CaseStudyUpdate::case_studies(results.clone()));
        assert_eq!(next.case_studies, results);
        assert_eq!(next.query.as_deref(), Some("q"));
    }

    #[test]
    fn empty_update_is_identity() {
        let s = CaseStudyState::new("app").merge(&CaseStudyUpdate::query("q"));
        assert_eq!(s.merge(&CaseStudyUpdate::default()), s);
    }
}
