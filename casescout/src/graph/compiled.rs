//! Compiled state graph: immutable, supports invoke and stream.
//!
//! Built by `StateGraph::compile`. Holds nodes in chain order, the state updater
//! and optional middleware. Runs nodes strictly one after another; the first
//! node error aborts the run and is returned as-is.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::channels::{BoxedStateUpdater, GraphState};
use crate::error::AgentError;
use crate::stream::StreamEvent;

use super::logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
    log_node_state, log_state_update,
};
use super::node_middleware::{NodeFuture, NodeMiddleware};
use super::Node;

/// Buffer size of the channel behind `stream`.
const STREAM_BUFFER: usize = 64;

/// Compiled graph: immutable structure, supports invoke and stream.
///
/// Created by `StateGraph::compile()`. Runs from the first node along the chain.
#[derive(Clone)]
pub struct CompiledStateGraph<S>
where
    S: GraphState,
{
    pub(super) nodes: HashMap<String, Arc<dyn Node<S>>>,
    /// Chain order from START to END (exclusive).
    pub(super) edge_order: Vec<String>,
    /// Set when built with `compile_with_middleware`.
    pub(super) middleware: Option<Arc<dyn NodeMiddleware<S>>>,
    /// Merges each node's partial update into the next snapshot.
    pub(super) state_updater: BoxedStateUpdater<S>,
}

impl<S> CompiledStateGraph<S>
where
    S: GraphState,
{
    /// Node ids in execution order.
    pub fn node_ids(&self) -> &[String] {
        &self.edge_order
    }

    /// Runs one node, through the middleware when one is set.
    async fn execute_node(&self, node: Arc<dyn Node<S>>, state: &S) -> Result<S::Update, AgentError> {
        match &self.middleware {
            Some(middleware) => {
                let node_id = node.id().to_string();
                let inner: Box<dyn FnOnce(S) -> NodeFuture<S::Update> + Send> =
                    Box::new(move |s: S| -> NodeFuture<S::Update> {
                        Box::pin(async move { node.run(&s).await })
                    });
                middleware.around_run(&node_id, state.clone(), inner).await
            }
            None => node.run(state).await,
        }
    }

    /// Shared run loop used by invoke() and stream(): steps through the chain.
    ///
    /// When `tx` is set, progress events are sent through it; a dropped receiver
    /// does not stop the run.
    async fn run_loop_inner(
        &self,
        state: S,
        tx: Option<&mpsc::Sender<StreamEvent<S>>>,
    ) -> Result<S, AgentError> {
        log_graph_start(self.edge_order.len());
        let mut state = state;

        for node_id in &self.edge_order {
            let node = match self.nodes.get(node_id) {
                Some(n) => n.clone(),
                None => {
                    let e = AgentError::ExecutionFailed(format!("node missing: {}", node_id));
                    log_graph_error(node_id, &e);
                    return Err(e);
                }
            };

            log_node_start(node_id);
            log_node_state(node_id, &state);
            if let Some(tx) = tx {
                let _ = tx
                    .send(StreamEvent::TaskStart {
                        node_id: node_id.clone(),
                    })
                    .await;
            }

            let update = match self.execute_node(node, &state).await {
                Ok(update) => update,
                Err(e) => {
                    if let Some(tx) = tx {
                        let _ = tx
                            .send(StreamEvent::TaskEnd {
                                node_id: node_id.clone(),
                                result: Err(e.to_string()),
                            })
                            .await;
                    }
                    log_graph_error(node_id, &e);
                    return Err(e);
                }
            };

            log_node_complete(node_id, &update);
            if let Some(tx) = tx {
                let _ = tx
                    .send(StreamEvent::Updates {
                        node_id: node_id.clone(),
                        update: update.clone(),
                    })
                    .await;
            }

            state = self.state_updater.apply_update(&state, &update);
            log_state_update(node_id);

            if let Some(tx) = tx {
                let _ = tx.send(StreamEvent::Values(state.clone())).await;
                let _ = tx
                    .send(StreamEvent::TaskEnd {
                        node_id: node_id.clone(),
                        result: Ok(()),
                    })
                    .await;
            }
        }

        log_graph_complete();
        Ok(state)
    }

    /// Runs the graph with the given state and returns the final snapshot.
    ///
    /// Nodes run in chain order; each update is merged before the next node starts.
    /// The first node error is returned unchanged and no later node runs.
    pub async fn invoke(&self, state: S) -> Result<S, AgentError> {
        if self.edge_order.is_empty() {
            return Err(AgentError::ExecutionFailed("empty graph".into()));
        }
        self.run_loop_inner(state, None).await
    }

    /// Runs the graph on a spawned task and returns its events as a stream.
    ///
    /// The last `Values` event carries the final state. On failure the stream ends
    /// after the failing node's `TaskEnd`. Must be called inside a tokio runtime.
    pub fn stream(&self, state: S) -> ReceiverStream<StreamEvent<S>> {
        let (tx, rx) = mpsc::channel(STREAM_BUFFER);
        let graph = self.clone();
        tokio::spawn(async move {
            let _ = graph.run_loop_inner(state, Some(&tx)).await;
        });
        ReceiverStream::new(rx)
    }
}
