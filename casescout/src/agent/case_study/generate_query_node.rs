//! Query generator node: project description in, one search query out.
//!
//! Sends the filled system prompt plus the fixed instruction to the LLM with the
//! `SearchQuery` schema and writes `state.query`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::AgentError;
use crate::graph::Node;
use crate::llm::{invoke_structured, LlmClient};
use crate::message::Message;
use crate::prompts::{case_study_system_prompt, CASE_STUDY_QUERY_INSTRUCTION};

use super::schema::SearchQuery;
use super::state::{CaseStudyState, CaseStudyUpdate};

/// Node id of the query generator.
pub const GENERATE_QUERY_NODE: &str = "generate_query";

/// Query generator: one LLM call per run, no retry.
///
/// Reads `state.project_details`; returns an update that sets only `query`.
pub struct GenerateQueryNode {
    llm: Arc<dyn LlmClient>,
}

impl GenerateQueryNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// System and user messages sent for `project_details`.
    fn messages(project_details: &str) -> Vec<Message> {
        vec![
            Message::system(case_study_system_prompt(project_details)),
            Message::user(CASE_STUDY_QUERY_INSTRUCTION),
        ]
    }
}

#[async_trait]
impl Node<CaseStudyState> for GenerateQueryNode {
    fn id(&self) -> &str {
        GENERATE_QUERY_NODE
    }

    async fn run(&self, state: &CaseStudyState) -> Result<CaseStudyUpdate, AgentError> {
        if state.project_details.trim().is_empty() {
            return Err(AgentError::InvalidInput(
                "project description is empty".to_string(),
            ));
        }
        let messages = Self::messages(&state.project_details);
        let SearchQuery { query } =
            invoke_structured::<SearchQuery>(self.llm.as_ref(), &messages).await?;
        debug!(query = %query, "case-study query generated");
        Ok(CaseStudyUpdate::query(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlm;

    const DESCRIPTION: &str = "A mobile app for tracking daily water intake";

    #[tokio::test]
    async fn writes_query_from_structured_reply() {
        let llm = Arc::new(MockLlm::new(
            r#"{"query": "water intake tracking app case study"}"#,
        ));
        let node = GenerateQueryNode::new(llm.clone());
        let update = node.run(&CaseStudyState::new(DESCRIPTION)).await.unwrap();
        assert_eq!(
            update,
            CaseStudyUpdate::query("water intake tracking app case study")
        );
        assert_eq!(llm.calls(), 1);
        assert_eq!(llm.schema_names(), vec!["CaseStudySearchQuery".to_string()]);
    }

    #[tokio::test]
    async fn sends_filled_system_prompt_then_fixed_instruction() {
        let llm = Arc::new(MockLlm::new(r#"{"query": "q"}"#));
        let node = GenerateQueryNode::new(llm.clone());
        node.run(&CaseStudyState::new(DESCRIPTION)).await.unwrap();

        let sent = llm.last_messages().unwrap();
        assert_eq!(sent.len(), 2);
        assert!(matches!(&sent[0], Message::System(s) if s.contains(DESCRIPTION)));
        assert_eq!(sent[1], Message::user(CASE_STUDY_QUERY_INSTRUCTION));
    }

    #[tokio::test]
    async fn empty_description_fails_without_calling_llm() {
        let llm = Arc::new(MockLlm::new(r#"{"query": "q"}"#));
        let node = GenerateQueryNode::new(llm.clone());
        let err = node.run(&CaseStudyState::new("   ")).await.unwrap_err();
        assert!(matches!(err, AgentError::InvalidInput(_)));
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn nonconforming_reply_is_structured_output_error() {
        let llm = Arc::new(MockLlm::new("water apps"));
        let node = GenerateQueryNode::new(llm);
        let err = node.run(&CaseStudyState::new(DESCRIPTION)).await.unwrap_err();
        assert!(matches!(err, AgentError::StructuredOutput(_)));
    }

    #[tokio::test]
    async fn llm_failure_propagates_unchanged() {
        let llm = Arc::new(MockLlm::failing("rate limited"));
        let node = GenerateQueryNode::new(llm);
        let err = node.run(&CaseStudyState::new(DESCRIPTION)).await.unwrap_err();
        assert_eq!(err.to_string(), "execution failed: rate limited");
    }
}
