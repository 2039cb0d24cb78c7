//! Agents built on the state graph.
//!
//! - [`case_study`]: project description → search query → case-study results.

pub mod case_study;

pub use case_study::{
    build_case_study_initial_state, build_case_study_runner, BuildRunnerError, CaseStudyConfig,
    CaseStudyRunError, CaseStudyRunner, CaseStudyState, CaseStudyUpdate, ConfigError,
    GenerateQueryNode, ProjectInput, SearchCaseStudiesNode, SearchQuery, CASE_STUDY_MAX_RESULTS,
};
