//! # casescout
//!
//! Finds case studies of past projects similar to a new one. A project description
//! goes in; an LLM turns it into one web search query (schema-constrained output);
//! a search provider returns up to 20 results, which come back unchanged.
//!
//! The pipeline is a two-node linear [`StateGraph`] over [`CaseStudyState`]:
//!
//! ```text
//! START → generate_query → search_case_studies → END
//! ```
//!
//! Each node reads the current state and returns a partial update; the graph merges
//! it and moves on. The first node error ends the run.
//!
//! ## Main modules
//!
//! - [`agent`]: [`CaseStudyRunner`], [`GenerateQueryNode`], [`SearchCaseStudiesNode`],
//!   [`CaseStudyConfig`], [`build_case_study_runner`].
//! - [`graph`]: [`StateGraph`], [`CompiledStateGraph`], [`Node`], [`NodeMiddleware`].
//! - [`channels`]: [`GraphState`] and [`StateUpdater`] (how updates are merged).
//! - [`llm`]: [`LlmClient`], [`ChatOpenAI`], [`MockLlm`], structured output.
//! - [`search`]: [`SearchClient`], [`TavilySearch`], [`MockSearch`], [`CaseStudy`].
//! - [`prompts`]: query-generator prompt text.
//! - [`stream`]: [`StreamEvent`] for [`CompiledStateGraph::stream`].
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use casescout::{build_case_study_runner, CaseStudyConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CaseStudyConfig::load(None)?;
//! let runner = build_case_study_runner(&config)?;
//! let results = runner
//!     .search("A mobile app for tracking daily water intake")
//!     .await?;
//! for r in &results {
//!     println!("{} {}", r.title(), r.url());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! See the `casescout-examples` crate for a runnable version.

pub mod agent;
pub mod channels;
pub mod error;
pub mod graph;
pub mod llm;
pub mod message;
pub mod prompts;
pub mod search;
pub mod stream;

pub use agent::{
    build_case_study_initial_state, build_case_study_runner, BuildRunnerError, CaseStudyConfig,
    CaseStudyRunError, CaseStudyRunner, CaseStudyState, CaseStudyUpdate, ConfigError,
    GenerateQueryNode, ProjectInput, SearchCaseStudiesNode, SearchQuery, CASE_STUDY_MAX_RESULTS,
};
pub use channels::{FieldBasedUpdater, GraphState, MergeUpdater, StateUpdater};
pub use error::AgentError;
pub use graph::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
    log_state_update, CompilationError, CompiledStateGraph, LoggingNodeMiddleware, Node,
    NodeMiddleware, StateGraph, END, START,
};
pub use llm::{
    invoke_structured, parse_structured, ChatOpenAI, LlmClient, LlmResponse, LlmUsage, MockLlm,
    ResponseSchema, StructuredOutput,
};
pub use message::Message;
pub use search::{CaseStudy, MockSearch, SearchClient, SearchError, TavilySearch};
pub use stream::StreamEvent;
