//! State graph: nodes + linear edges, compile and invoke.
//!
//! StateGraph: add nodes and edges, compile, then invoke or stream with a state.
//! Nodes read an immutable snapshot and return a partial update; the compiled
//! graph merges each update into the next snapshot.

mod compile_error;
mod compiled;
mod logging;
mod logging_middleware;
mod node;
mod node_middleware;
mod state_graph;

pub use compile_error::CompilationError;
pub use compiled::CompiledStateGraph;
pub use logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
    log_state_update,
};
pub use logging_middleware::LoggingNodeMiddleware;
pub use node::Node;
pub use node_middleware::{NodeFuture, NodeMiddleware};
pub use state_graph::{StateGraph, END, START};
