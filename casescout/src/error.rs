//! Node execution error types.
//!
//! Returned by `Node::run` and surfaced unchanged by `CompiledStateGraph::invoke`.
//! The graph never catches or rewrites these: the first node error ends the run.

use async_openai::error::OpenAIError;
use thiserror::Error;

use crate::search::SearchError;

/// Error raised while running one node of a graph.
///
/// Collaborator failures keep the collaborator's own error value as source
/// (`Llm`, `Search`), so callers can match on what went wrong.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Execution failed with a message (e.g. empty graph, mock LLM failure).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// OpenAI-compatible chat call failed (transport, auth, rate limit, API error).
    #[error("LLM call failed: {0}")]
    Llm(#[from] OpenAIError),

    /// Model reply did not match the requested response schema.
    #[error("structured output invalid: {0}")]
    StructuredOutput(String),

    /// Search provider call failed.
    #[error("search failed: {0}")]
    Search(#[from] SearchError),

    /// Run input is unusable (e.g. empty project description).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A node ran before the field it reads was written.
    #[error("state field not set: {0}")]
    MissingState(&'static str),
}
