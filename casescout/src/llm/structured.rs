//! Schema-constrained model output as a plain validation step.
//!
//! A type declares its JSON schema via [`StructuredOutput`]; the reply is parsed
//! with serde and any mismatch becomes `AgentError::StructuredOutput`.

use serde::de::DeserializeOwned;

use crate::error::AgentError;
use crate::message::Message;

use super::{LlmClient, ResponseSchema};

/// A value the model must produce as JSON matching [`StructuredOutput::response_schema`].
pub trait StructuredOutput: DeserializeOwned + Send {
    /// Schema sent to the model and used to describe the expected shape.
    fn response_schema() -> ResponseSchema;
}

/// Strips a surrounding Markdown code fence (```json ... ```), if any.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. "json") on the opening line.
    match body.split_once('\n') {
        Some((_, inner)) => inner.trim(),
        None => body.trim(),
    }
}

/// Parses a raw model reply into `T`.
///
/// Accepts the JSON object alone or wrapped in a Markdown code fence.
pub fn parse_structured<T: StructuredOutput>(raw: &str) -> Result<T, AgentError> {
    let body = strip_code_fence(raw);
    serde_json::from_str::<T>(body).map_err(|e| {
        AgentError::StructuredOutput(format!(
            "reply does not match schema {}: {}",
            T::response_schema().name,
            e
        ))
    })
}

/// Calls `llm` with `T`'s schema and parses the reply into `T`.
///
/// Invocation errors are returned unchanged; only a non-conforming reply is
/// reported as `AgentError::StructuredOutput`.
pub async fn invoke_structured<T: StructuredOutput>(
    llm: &dyn LlmClient,
    messages: &[Message],
) -> Result<T, AgentError> {
    let schema = T::response_schema();
    let response = llm.invoke_with_schema(messages, &schema).await?;
    tracing::debug!(
        schema = %schema.name,
        reply_len = response.content.len(),
        usage = ?response.usage,
        "structured reply received"
    );
    parse_structured::<T>(&response.content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Pick {
        choice: String,
    }

    impl StructuredOutput for Pick {
        fn response_schema() -> ResponseSchema {
            ResponseSchema {
                name: "Pick".into(),
                description: None,
                schema: serde_json::json!({
                    "type": "object",
                    "properties": { "choice": { "type": "string" } },
                    "required": ["choice"],
                    "additionalProperties": false
                }),
                strict: true,
            }
        }
    }

    #[test]
    fn parse_plain_json() {
        let p: Pick = parse_structured(r#"{"choice": "a"}"#).unwrap();
        assert_eq!(p.choice, "a");
    }

    #[test]
    fn parse_fenced_json() {
        let raw = "```json\n{\"choice\": \"b\"}\n```";
        let p: Pick = parse_structured(raw).unwrap();
        assert_eq!(p.choice, "b");
    }

    #[test]
    fn parse_rejects_missing_field() {
        let err = parse_structured::<Pick>(r#"{"other": 1}"#).unwrap_err();
        match err {
            AgentError::StructuredOutput(msg) => assert!(msg.contains("Pick"), "{}", msg),
            other => panic!("expected StructuredOutput, got {:?}", other),
        }
    }

    #[test]
    fn parse_rejects_free_text() {
        assert!(matches!(
            parse_structured::<Pick>("sure, here is a query"),
            Err(AgentError::StructuredOutput(_))
        ));
    }

    #[test]
    fn strip_code_fence_leaves_plain_text() {
        assert_eq!(strip_code_fence("  {\"a\":1} "), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
    }
}
