//! Streaming events for graph runs.
//!
//! `CompiledStateGraph::stream` emits one `TaskStart`, one `Updates` and one
//! `TaskEnd` per node that succeeds, a `Values` snapshot after every merge, and a
//! failing `TaskEnd` when a node errors (the stream then ends).

use crate::channels::GraphState;

/// Event emitted during a streamed graph run.
#[derive(Debug, Clone)]
pub enum StreamEvent<S>
where
    S: GraphState,
{
    /// Node is about to run.
    TaskStart { node_id: String },
    /// Partial update returned by a node, before merge.
    Updates { node_id: String, update: S::Update },
    /// Full snapshot after a node's update was merged.
    Values(S),
    /// Node finished; `Err` carries the error text and ends the run.
    TaskEnd {
        node_id: String,
        result: Result<(), String>,
    },
}

impl<S> StreamEvent<S>
where
    S: GraphState,
{
    /// Node id for task and update events; `None` for `Values`.
    pub fn node_id(&self) -> Option<&str> {
        match self {
            Self::TaskStart { node_id }
            | Self::Updates { node_id, .. }
            | Self::TaskEnd { node_id, .. } => Some(node_id),
            Self::Values(_) => None,
        }
    }
}
