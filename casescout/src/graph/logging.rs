//! `tracing` events emitted by `CompiledStateGraph` while it runs.
//!
//! Run boundaries at `info`, per-node progress at `debug`, snapshots at `trace`,
//! and the aborting node error at `error`. Field names are stable: `node_id`,
//! `node_count`, `update`, `state`, `error`.

use std::fmt::Debug;

use crate::error::AgentError;

pub fn log_graph_start(node_count: usize) {
    tracing::info!(node_count, "graph run started");
}

pub fn log_graph_complete() {
    tracing::info!("graph run finished");
}

/// The run stops here; no later node is called.
pub fn log_graph_error(node_id: &str, error: &AgentError) {
    tracing::error!(node_id, %error, "graph run aborted");
}

pub fn log_node_start(node_id: &str) {
    tracing::debug!(node_id, "node started");
}

/// Full snapshot the node reads. Can be large.
pub fn log_node_state<S: Debug>(node_id: &str, state: &S) {
    tracing::trace!(node_id, state = ?state, "node input");
}

pub fn log_node_complete<U: Debug>(node_id: &str, update: &U) {
    tracing::debug!(node_id, update = ?update, "node returned update");
}

pub fn log_state_update(node_id: &str) {
    tracing::debug!(node_id, "update merged");
}
