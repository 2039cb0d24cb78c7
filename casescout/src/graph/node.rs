//! Graph node trait: one step in a StateGraph.
//!
//! Receives a borrowed state snapshot `&S`, returns `S::Update` (a partial update).
//! The node never mutates the snapshot; `CompiledStateGraph` merges the update.

use async_trait::async_trait;

use crate::channels::GraphState;
use crate::error::AgentError;

/// One step in a graph: snapshot in, partial update out.
///
/// **Interaction**: Registered via `StateGraph::add_node`; run by
/// `CompiledStateGraph::invoke` and `CompiledStateGraph::stream` in edge order.
#[async_trait]
pub trait Node<S>: Send + Sync
where
    S: GraphState,
{
    /// Node id (e.g. `"generate_query"`). Must be unique within a graph.
    fn id(&self) -> &str;

    /// One step: read the snapshot, return the fields this node writes.
    async fn run(&self, state: &S) -> Result<S::Update, AgentError>;
}
