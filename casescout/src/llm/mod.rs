//! LLM client abstraction for the query generator.
//!
//! `LlmClient` takes role-tagged messages and returns assistant text. When a
//! `ResponseSchema` is given, implementations that support it constrain the reply
//! to that JSON schema; [`invoke_structured`] then parses the reply into a typed
//! value and fails with `AgentError::StructuredOutput` if it does not conform.

mod mock;
mod openai;
mod structured;

pub use mock::MockLlm;
pub use openai::ChatOpenAI;
pub use structured::{invoke_structured, parse_structured, StructuredOutput};

use async_trait::async_trait;

use crate::error::AgentError;
use crate::message::Message;

/// Token counts reported by the provider for one call.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LlmUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// One assistant reply.
#[derive(Clone, Debug, Default)]
pub struct LlmResponse {
    /// Reply text; JSON when a schema was requested.
    pub content: String,
    pub usage: Option<LlmUsage>,
}

/// JSON schema the model reply must conform to.
///
/// Sent to OpenAI as `response_format: {"type": "json_schema", ...}`.
#[derive(Clone, Debug, PartialEq)]
pub struct ResponseSchema {
    /// Schema name (letters, digits, `_` and `-`).
    pub name: String,
    /// What the schema is for; helps the model.
    pub description: Option<String>,
    /// JSON Schema object.
    pub schema: serde_json::Value,
    /// Ask the provider for strict schema adherence.
    pub strict: bool,
}

/// Chat model: messages in, one assistant reply out.
///
/// `GenerateQueryNode` calls it through [`invoke_structured`].
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError>;

    /// Invoke one turn with the reply constrained to `schema`.
    ///
    /// Default implementation ignores the schema and calls `invoke()`; the caller
    /// still validates the reply, so unconstrained clients fail at parse time.
    async fn invoke_with_schema(
        &self,
        messages: &[Message],
        _schema: &ResponseSchema,
    ) -> Result<LlmResponse, AgentError> {
        self.invoke(messages).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubLlm {
        content: String,
    }

    #[async_trait]
    impl LlmClient for StubLlm {
        async fn invoke(&self, _messages: &[Message]) -> Result<LlmResponse, AgentError> {
            Ok(LlmResponse {
                content: self.content.clone(),
                usage: None,
            })
        }
    }

    #[tokio::test]
    async fn default_invoke_with_schema_delegates_to_invoke() {
        let llm = StubLlm {
            content: "hello".to_string(),
        };
        let schema = ResponseSchema {
            name: "x".into(),
            description: None,
            schema: serde_json::json!({"type": "object"}),
            strict: true,
        };
        let resp = llm.invoke_with_schema(&[], &schema).await.unwrap();
        assert_eq!(resp.content, "hello");
        assert!(resp.usage.is_none());
    }
}
