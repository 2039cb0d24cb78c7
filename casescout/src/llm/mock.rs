//! Mock LLM for tests and examples.
//!
//! Returns a fixed reply (or a fixed error), counts calls and records the
//! messages and schema names it was given.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse, ResponseSchema};
use crate::message::Message;

/// Mock LLM: fixed assistant text, or a fixed failure.
///
/// **Interaction**: Implements `LlmClient`; used in place of `ChatOpenAI`.
pub struct MockLlm {
    /// Reply content returned by every call.
    content: String,
    /// When Some, every call fails with `AgentError::ExecutionFailed(error)`.
    error: Option<String>,
    call_count: AtomicUsize,
    /// Messages of each call, in call order.
    seen_messages: Mutex<Vec<Vec<Message>>>,
    /// Schema name of each `invoke_with_schema` call.
    seen_schemas: Mutex<Vec<String>>,
}

impl MockLlm {
    /// Creates a mock that always replies with `content`.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            error: None,
            call_count: AtomicUsize::new(0),
            seen_messages: Mutex::new(Vec::new()),
            seen_schemas: Mutex::new(Vec::new()),
        }
    }

    /// Creates a mock whose every call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::new("")
        }
    }

    /// Number of `invoke` / `invoke_with_schema` calls so far.
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Messages passed to the most recent call.
    pub fn last_messages(&self) -> Option<Vec<Message>> {
        self.seen_messages
            .lock()
            .ok()
            .and_then(|seen| seen.last().cloned())
    }

    /// Schema names passed to `invoke_with_schema`, in call order.
    pub fn schema_names(&self) -> Vec<String> {
        self.seen_schemas
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    fn record(&self, messages: &[Message]) {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut seen) = self.seen_messages.lock() {
            seen.push(messages.to_vec());
        }
    }

    fn reply(&self) -> Result<LlmResponse, AgentError> {
        match &self.error {
            Some(e) => Err(AgentError::ExecutionFailed(e.clone())),
            None => Ok(LlmResponse {
                content: self.content.clone(),
                usage: None,
            }),
        }
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        self.record(messages);
        self.reply()
    }

    async fn invoke_with_schema(
        &self,
        messages: &[Message],
        schema: &ResponseSchema,
    ) -> Result<LlmResponse, AgentError> {
        self.record(messages);
        if let Ok(mut names) = self.seen_schemas.lock() {
            names.push(schema.name.clone());
        }
        self.reply()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_returns_fixed_content_and_counts_calls() {
        let llm = MockLlm::new("fixed");
        let out = llm.invoke(&[Message::user("a")]).await.unwrap();
        assert_eq!(out.content, "fixed");
        let out = llm.invoke(&[Message::user("b")]).await.unwrap();
        assert_eq!(out.content, "fixed");
        assert_eq!(llm.calls(), 2);
        assert_eq!(llm.last_messages(), Some(vec![Message::user("b")]));
    }

    #[tokio::test]
    async fn failing_mock_returns_execution_failed() {
        let llm = MockLlm::failing("rate limited");
        let err = llm.invoke(&[]).await.unwrap_err();
        assert!(matches!(err, AgentError::ExecutionFailed(ref m) if m == "rate limited"));
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test]
    async fn invoke_with_schema_records_schema_name() {
        let llm = MockLlm::new("{}");
        let schema = ResponseSchema {
            name: "Shape".into(),
            description: None,
            schema: serde_json::json!({}),
            strict: false,
        };
        llm.invoke_with_schema(&[], &schema).await.unwrap();
        assert_eq!(llm.schema_names(), vec!["Shape".to_string()]);
    }
}
