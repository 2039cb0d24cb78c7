//! Logging middleware that records node enter/exit around each node.run call.

use async_trait::async_trait;
use std::time::Instant;

use crate::channels::GraphState;
use crate::error::AgentError;

use super::node_middleware::NodeFuture;
use super::NodeMiddleware;

/// Middleware that logs node enter/exit (with elapsed time) around each node.run call.
///
/// Generic over state type `S`; only node id, timing and error text are logged.
pub struct LoggingNodeMiddleware<S> {
    _phantom: std::marker::PhantomData<S>,
}

impl<S> Default for LoggingNodeMiddleware<S> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

#[async_trait]
impl<S> NodeMiddleware<S> for LoggingNodeMiddleware<S>
where
    S: GraphState,
{
    async fn around_run(
        &self,
        node_id: &str,
        state: S,
        inner: Box<dyn FnOnce(S) -> NodeFuture<S::Update> + Send>,
    ) -> Result<S::Update, AgentError> {
        tracing::info!(node = node_id, "node enter");
        let started = Instant::now();
        let result = inner(state).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => tracing::info!(node = node_id, elapsed_ms, "node exit"),
            Err(e) => tracing::warn!(node = node_id, elapsed_ms, error = %e, "node exit with error"),
        }
        result
    }
}
