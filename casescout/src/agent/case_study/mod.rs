//! Case-study search: project description → LLM search query → web search results.
//!
//! Two nodes over [`CaseStudyState`]: [`GenerateQueryNode`] writes `query`,
//! [`SearchCaseStudiesNode`] writes `case_studies`. [`CaseStudyRunner`] compiles
//! them into `START → generate_query → search_case_studies → END`.

mod config;
mod generate_query_node;
mod input;
mod runner;
mod schema;
mod search_node;
mod state;

pub use config::{CaseStudyConfig, ConfigError, APP_NAME, DEFAULT_MODEL};
pub use generate_query_node::{GenerateQueryNode, GENERATE_QUERY_NODE};
pub use input::ProjectInput;
pub use runner::{
    build_case_study_initial_state, build_case_study_runner, BuildRunnerError, CaseStudyRunError,
    CaseStudyRunner,
};
pub use schema::SearchQuery;
pub use search_node::{SearchCaseStudiesNode, CASE_STUDY_MAX_RESULTS, SEARCH_CASE_STUDIES_NODE};
pub use state::{CaseStudyState, CaseStudyUpdate};
