//! Case-study graph runner: build, initial state, invoke and stream.
//!
//! Graph: START → generate_query → search_case_studies → END.

use std::sync::Arc;

use async_openai::config::OpenAIConfig;
use tokio_stream::wrappers::ReceiverStream;

use crate::error::AgentError;
use crate::graph::{
    CompilationError, CompiledStateGraph, LoggingNodeMiddleware, NodeMiddleware, StateGraph, END,
    START,
};
use crate::llm::{ChatOpenAI, LlmClient};
use crate::search::{CaseStudy, SearchClient, TavilySearch};
use crate::stream::StreamEvent;

use super::config::{CaseStudyConfig, ConfigError};
use super::generate_query_node::{GenerateQueryNode, GENERATE_QUERY_NODE};
use super::input::ProjectInput;
use super::search_node::{SearchCaseStudiesNode, SEARCH_CASE_STUDIES_NODE};
use super::state::CaseStudyState;

/// Error type for CaseStudyRunner operations.
#[derive(Debug, thiserror::Error)]
pub enum CaseStudyRunError {
    #[error("compilation failed: {0}")]
    Compilation(#[from] CompilationError),
    #[error("execution failed: {0}")]
    Execution(#[from] AgentError),
}

/// Error from [`build_case_study_runner`].
#[derive(Debug, thiserror::Error)]
pub enum BuildRunnerError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("compilation failed: {0}")]
    Compilation(#[from] CompilationError),
}

/// Builds the initial state from flat text or a message history.
pub fn build_case_study_initial_state<I>(input: &I) -> Result<CaseStudyState, AgentError>
where
    I: ProjectInput + ?Sized,
{
    Ok(CaseStudyState::new(input.project_description()?))
}

/// Case-study runner: holds the compiled two-node graph.
///
/// Each run is independent; the runner keeps no state between calls and can be
/// shared across tasks.
#[derive(Clone)]
pub struct CaseStudyRunner {
    compiled: CompiledStateGraph<CaseStudyState>,
}

impl CaseStudyRunner {
    /// Creates a runner over the given LLM and search clients.
    pub fn new(
        llm: Arc<dyn LlmClient>,
        search: Arc<dyn SearchClient>,
    ) -> Result<Self, CompilationError> {
        Self::build(llm, search, None)
    }

    /// Like [`CaseStudyRunner::new`], wrapping every node run in `middleware`.
    pub fn with_middleware(
        llm: Arc<dyn LlmClient>,
        search: Arc<dyn SearchClient>,
        middleware: Arc<dyn NodeMiddleware<CaseStudyState>>,
    ) -> Result<Self, CompilationError> {
        Self::build(llm, search, Some(middleware))
    }

    fn build(
        llm: Arc<dyn LlmClient>,
        search: Arc<dyn SearchClient>,
        middleware: Option<Arc<dyn NodeMiddleware<CaseStudyState>>>,
    ) -> Result<Self, CompilationError> {
        let mut graph = StateGraph::<CaseStudyState>::new();
        graph
            .add_node(GENERATE_QUERY_NODE, Arc::new(GenerateQueryNode::new(llm)))
            .add_node(
                SEARCH_CASE_STUDIES_NODE,
                Arc::new(SearchCaseStudiesNode::new(search)),
            )
            .add_edge(START, GENERATE_QUERY_NODE)
            .add_edge(GENERATE_QUERY_NODE, SEARCH_CASE_STUDIES_NODE)
            .add_edge(SEARCH_CASE_STUDIES_NODE, END);

        let compiled = match middleware {
            Some(m) => graph.compile_with_middleware(m)?,
            None => graph.compile()?,
        };
        Ok(Self { compiled })
    }

    /// Node ids in execution order.
    pub fn node_ids(&self) -> &[String] {
        self.compiled.node_ids()
    }

    /// Runs the graph and returns the final state.
    pub async fn invoke<I>(&self, input: &I) -> Result<CaseStudyState, CaseStudyRunError>
    where
        I: ProjectInput + ?Sized,
    {
        let state = build_case_study_initial_state(input)?;
        Ok(self.compiled.invoke(state).await?)
    }

    /// Runs the graph and returns only the search results.
    pub async fn search<I>(&self, input: &I) -> Result<Vec<CaseStudy>, CaseStudyRunError>
    where
        I: ProjectInput + ?Sized,
    {
        Ok(self.invoke(input).await?.case_studies)
    }

    /// Runs the graph in a background task and yields per-node events.
    ///
    /// Input errors are returned before anything is spawned; node errors arrive
    /// as `TaskEnd` with `Err` and end the stream.
    pub fn stream<I>(
        &self,
        input: &I,
    ) -> Result<ReceiverStream<StreamEvent<CaseStudyState>>, CaseStudyRunError>
    where
        I: ProjectInput + ?Sized,
    {
        let state = build_case_study_initial_state(input)?;
        Ok(self.compiled.stream(state))
    }
}

/// Builds a runner backed by OpenAI and Tavily from `config`, with node logging.
pub fn build_case_study_runner(config: &CaseStudyConfig) -> Result<CaseStudyRunner, BuildRunnerError> {
    if config.tavily_api_key.trim().is_empty() {
        return Err(ConfigError::MissingEnv("TAVILY_API_KEY").into());
    }

    let mut openai = OpenAIConfig::new();
    if let Some(key) = &config.openai_api_key {
        openai = openai.with_api_key(key.clone());
    }
    if let Some(base) = &config.openai_base_url {
        openai = openai.with_api_base(base.clone());
    }
    let llm = ChatOpenAI::with_config(openai, config.model.clone()).with_temperature(config.temperature);

    let mut search = TavilySearch::new(config.tavily_api_key.clone());
    if let Some(url) = &config.tavily_search_url {
        search = search.with_endpoint(url.clone());
    }

    tracing::debug!(model = %config.model, "building case-study runner");
    Ok(CaseStudyRunner::with_middleware(
        Arc::new(llm),
        Arc::new(search),
        Arc::new(LoggingNodeMiddleware::<CaseStudyState>::default()),
    )?)
}
