//! Linear state graph builder.
//!
//! Register nodes with `add_node`, wire them with `add_edge(from, to)` using
//! [`START`] and [`END`], then `compile` into a [`CompiledStateGraph`].
//!
//! Only one shape compiles: a single chain `START -> n1 -> ... -> nk -> END`
//! that visits every registered node once. There are no conditional edges.
//!
//! Node updates are merged with `GraphState::merge` unless `with_state_updater`
//! supplies another strategy.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::channels::{BoxedStateUpdater, GraphState, MergeUpdater};
use crate::graph::compile_error::CompilationError;
use crate::graph::compiled::CompiledStateGraph;
use crate::graph::node::Node;
use crate::graph::node_middleware::NodeMiddleware;

/// Entry sentinel, only valid as the `from` side of an edge.
pub const START: &str = "__start__";

/// Exit sentinel, only valid as the `to` side of an edge.
pub const END: &str = "__end__";

/// Builder for a linear graph over state `S`.
pub struct StateGraph<S>
where
    S: GraphState,
{
    nodes: HashMap<String, Arc<dyn Node<S>>>,
    edges: Vec<(String, String)>,
    state_updater: Option<BoxedStateUpdater<S>>,
}

impl<S> Default for StateGraph<S>
where
    S: GraphState,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> StateGraph<S>
where
    S: GraphState,
{
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: Vec::new(),
            state_updater: None,
        }
    }

    /// Replaces the default merge (`GraphState::merge`).
    pub fn with_state_updater(mut self, updater: BoxedStateUpdater<S>) -> Self {
        self.state_updater = Some(updater);
        self
    }

    /// Registers `node` under `id`; a later call with the same id replaces it.
    pub fn add_node(&mut self, id: impl Into<String>, node: Arc<dyn Node<S>>) -> &mut Self {
        self.nodes.insert(id.into(), node);
        self
    }

    /// Adds the edge `from_id -> to_id`. Ids are checked at compile time.
    pub fn add_edge(&mut self, from_id: impl Into<String>, to_id: impl Into<String>) -> &mut Self {
        self.edges.push((from_id.into(), to_id.into()));
        self
    }

    /// Validates the edges and returns the runnable graph.
    pub fn compile(self) -> Result<CompiledStateGraph<S>, CompilationError> {
        self.compile_internal(None)
    }

    /// Like `compile`, with `middleware` around every node run.
    pub fn compile_with_middleware(
        self,
        middleware: Arc<dyn NodeMiddleware<S>>,
    ) -> Result<CompiledStateGraph<S>, CompilationError> {
        self.compile_internal(Some(middleware))
    }

    fn compile_internal(
        self,
        middleware: Option<Arc<dyn NodeMiddleware<S>>>,
    ) -> Result<CompiledStateGraph<S>, CompilationError> {
        self.check_ids()?;
        let entry = self.entry()?;
        self.check_single_exit()?;
        let edge_order = self.chain_from(entry)?;

        if let Some(orphan) = self.nodes.keys().find(|id| !edge_order.contains(*id)) {
            return Err(CompilationError::InvalidChain(format!(
                "node not on chain: {}",
                orphan
            )));
        }

        Ok(CompiledStateGraph {
            nodes: self.nodes,
            edge_order,
            middleware,
            state_updater: self.state_updater.unwrap_or_else(|| Arc::new(MergeUpdater)),
        })
    }

    /// Every edge endpoint is a registered node or the matching sentinel.
    fn check_ids(&self) -> Result<(), CompilationError> {
        let known = |id: &str, sentinel: &str| id == sentinel || self.nodes.contains_key(id);
        for (from, to) in &self.edges {
            if !known(from, START) {
                return Err(CompilationError::NodeNotFound(from.clone()));
            }
            if !known(to, END) {
                return Err(CompilationError::NodeNotFound(to.clone()));
            }
        }
        Ok(())
    }

    /// The one node START points at.
    fn entry(&self) -> Result<&str, CompilationError> {
        let mut targets = self
            .edges
            .iter()
            .filter(|(from, _)| from == START)
            .map(|(_, to)| to.as_str());
        match (targets.next(), targets.next()) {
            (None, _) => Err(CompilationError::MissingStart),
            (Some(_), Some(_)) => Err(CompilationError::InvalidChain(
                "multiple edges from START (branch)".into(),
            )),
            (Some(to), None) if to == END => Err(CompilationError::InvalidChain(
                "START connects directly to END".into(),
            )),
            (Some(to), None) => Ok(to),
        }
    }

    fn check_single_exit(&self) -> Result<(), CompilationError> {
        match self.edges.iter().filter(|(_, to)| to == END).count() {
            0 => Err(CompilationError::MissingEnd),
            1 => Ok(()),
            _ => Err(CompilationError::InvalidChain("multiple edges to END".into())),
        }
    }

    /// Follows edges from `entry` to END and returns the node ids on the way.
    fn chain_from(&self, entry: &str) -> Result<Vec<String>, CompilationError> {
        let mut successor: HashMap<&str, &str> = HashMap::new();
        for (from, to) in self.edges.iter().filter(|(from, _)| from != START) {
            if successor.insert(from, to).is_some() {
                return Err(CompilationError::InvalidChain(format!(
                    "duplicate from (branch): {}",
                    from
                )));
            }
        }

        let mut order = vec![entry.to_string()];
        let mut seen: HashSet<&str> = HashSet::from([entry]);
        let mut current = entry;
        loop {
            let next = *successor.get(current).ok_or_else(|| {
                CompilationError::InvalidChain(format!(
                    "chain stops at {} without reaching END",
                    current
                ))
            })?;
            if next == END {
                return Ok(order);
            }
            if !seen.insert(next) {
                return Err(CompilationError::InvalidChain("cycle detected".into()));
            }
            order.push(next.to_string());
            current = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::error::AgentError;

    #[derive(Clone, Debug, Default)]
    struct DummyState;

    impl GraphState for DummyState {
        type Update = ();
        fn merge(&self, _update: &()) -> Self {
            DummyState
        }
    }

    struct DummyNode(&'static str);

    #[async_trait]
    impl Node<DummyState> for DummyNode {
        fn id(&self) -> &str {
            self.0
        }
        async fn run(&self, _state: &DummyState) -> Result<(), AgentError> {
            Ok(())
        }
    }

    fn two_nodes() -> StateGraph<DummyState> {
        let mut graph = StateGraph::<DummyState>::new();
        graph.add_node("a", Arc::new(DummyNode("a")));
        graph.add_node("b", Arc::new(DummyNode("b")));
        graph
    }

    /// **Scenario**: A valid chain compiles and keeps edge order.
    #[test]
    fn compile_linear_chain_keeps_order() {
        let mut graph = two_nodes();
        graph.add_edge("b", END).add_edge(START, "a").add_edge("a", "b");
        let compiled = graph.compile().expect("valid chain");
        assert_eq!(compiled.node_ids(), ["a".to_string(), "b".to_string()]);
    }

    /// **Scenario**: Compile fails when an edge targets an unregistered node.
    #[test]
    fn compile_fails_on_unknown_node() {
        let mut graph = two_nodes();
        graph.add_edge(START, "a").add_edge("a", "x").add_edge("b", END);
        match graph.compile() {
            Err(CompilationError::NodeNotFound(id)) => assert_eq!(id, "x"),
            Err(e) => panic!("expected NodeNotFound(x), got {:?}", e),
            Ok(_) => panic!("expected compile error"),
        }
    }

    #[test]
    fn compile_fails_without_start_edge() {
        let mut graph = two_nodes();
        graph.add_edge("a", "b").add_edge("b", END);
        assert!(matches!(graph.compile(), Err(CompilationError::MissingStart)));
    }

    #[test]
    fn compile_fails_without_end_edge() {
        let mut graph = two_nodes();
        graph.add_edge(START, "a").add_edge("a", "b");
        assert!(matches!(graph.compile(), Err(CompilationError::MissingEnd)));
    }

    /// **Scenario**: Two outgoing edges from one node is a branch.
    #[test]
    fn compile_fails_on_branch() {
        let mut graph = two_nodes();
        graph
            .add_edge(START, "a")
            .add_edge("a", "b")
            .add_edge("a", END)
            .add_edge("b", END);
        assert!(matches!(
            graph.compile(),
            Err(CompilationError::InvalidChain(_))
        ));
    }

    #[test]
    fn compile_fails_on_cycle() {
        let mut graph = StateGraph::<DummyState>::new();
        graph.add_node("a", Arc::new(DummyNode("a")));
        graph.add_node("b", Arc::new(DummyNode("b")));
        graph.add_node("c", Arc::new(DummyNode("c")));
        graph
            .add_edge(START, "a")
            .add_edge("a", "b")
            .add_edge("b", "a")
            .add_edge("c", END);
        match graph.compile() {
            Err(CompilationError::InvalidChain(reason)) => assert!(reason.contains("cycle")),
            Err(e) => panic!("expected InvalidChain(cycle), got {:?}", e),
            Ok(_) => panic!("expected compile error"),
        }
    }

    /// **Scenario**: A registered node outside the chain is rejected.
    #[test]
    fn compile_fails_on_disconnected_node() {
        let mut graph = two_nodes();
        graph.add_edge(START, "a").add_edge("a", END);
        match graph.compile() {
            Err(CompilationError::InvalidChain(reason)) => assert!(reason.contains("b")),
            Err(e) => panic!("expected InvalidChain, got {:?}", e),
            Ok(_) => panic!("expected compile error"),
        }
    }
}
