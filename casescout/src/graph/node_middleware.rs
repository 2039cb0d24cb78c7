//! Around-hook for node runs, passed to `StateGraph::compile_with_middleware`.

use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;

use crate::channels::GraphState;
use crate::error::AgentError;

/// Boxed future produced by the wrapped node call.
pub type NodeFuture<U> = Pin<Box<dyn Future<Output = Result<U, AgentError>> + Send>>;

/// Async middleware that wraps node.run; implemented externally.
///
/// Must call `inner` exactly once to run the node; may observe or replace the
/// result. The graph adds no retry of its own, so a middleware that retries
/// changes run semantics.
#[async_trait]
pub trait NodeMiddleware<S>: Send + Sync
where
    S: GraphState,
{
    /// Wraps node.run.
    ///
    /// - `node_id`: current node id
    /// - `state`: snapshot passed to the node
    /// - `inner`: actual node.run logic
    async fn around_run(
        &self,
        node_id: &str,
        state: S,
        inner: Box<dyn FnOnce(S) -> NodeFuture<S::Update> + Send>,
    ) -> Result<S::Update, AgentError>;
}
