//! Errors from `StateGraph::compile`.

use thiserror::Error;

/// Why a set of nodes and edges is not a runnable linear graph.
#[derive(Debug, Error)]
pub enum CompilationError {
    /// An edge names an id that was never passed to `add_node`.
    #[error("edge references unregistered node `{0}`")]
    NodeNotFound(String),

    #[error("no edge leaves START")]
    MissingStart,

    #[error("no edge reaches END")]
    MissingEnd,

    /// Branch, cycle, dead end, or a node left off the chain; the text says which.
    #[error("graph is not a linear START -> END chain: {0}")]
    InvalidChain(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        assert_eq!(
            CompilationError::NodeNotFound("search_case_studies".into()).to_string(),
            "edge references unregistered node `search_case_studies`"
        );
        assert_eq!(CompilationError::MissingStart.to_string(), "no edge leaves START");
        assert_eq!(CompilationError::MissingEnd.to_string(), "no edge reaches END");
        assert!(CompilationError::InvalidChain("cycle detected".into())
            .to_string()
            .ends_with("cycle detected"));
    }
}
