//! Structured output of the query generator.

use serde::{Deserialize, Serialize};

use crate::llm::{ResponseSchema, StructuredOutput};

/// The model's reply: one search query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchQuery {
    /// The query to search for case studies.
    pub query: String,
}

impl StructuredOutput for SearchQuery {
    fn response_schema() -> ResponseSchema {
        ResponseSchema {
            name: "CaseStudySearchQuery".to_string(),
            description: Some("A web search query for case studies relevant to a project".to_string()),
            schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The query to search for case studies"
                    }
                },
                "required": ["query"],
                "additionalProperties": false
            }),
            strict: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AgentError;
    use crate::llm::parse_structured;

    #[test]
    fn schema_requires_single_query_string() {
        let schema = SearchQuery::response_schema();
        assert_eq!(schema.schema["required"], serde_json::json!(["query"]));
        assert_eq!(schema.schema["properties"]["query"]["type"], "string");
        assert_eq!(
            schema.schema["properties"]
                .as_object()
                .map(|p| p.len()),
            Some(1)
        );
    }

    #[test]
    fn parses_conforming_reply() {
        let q: SearchQuery =
            parse_structured(r#"{"query": "water tracking app case studies"}"#).unwrap();
        assert_eq!(q.query, "water tracking app case studies");
    }

    #[test]
    fn rejects_extra_fields_and_wrong_types() {
        assert!(matches!(
            parse_structured::<SearchQuery>(r#"{"query": "q", "why": "x"}"#),
            Err(AgentError::StructuredOutput(_))
        ));
        assert!(matches!(
            parse_structured::<SearchQuery>(r#"{"query": 3}"#),
            Err(AgentError::StructuredOutput(_))
        ));
    }
}
