//! OpenAI Chat Completions client (`ChatOpenAI`).
//!
//! API key and base URL come from the `OpenAIConfig` given to
//! [`ChatOpenAI::with_config`], or from `OPENAI_API_KEY` with [`ChatOpenAI::new`].
//! `invoke_with_schema` sends a strict `json_schema` response format.

use async_openai::{
    config::{Config, OpenAIConfig},
    types::chat::{
        ChatCompletionRequestAssistantMessage, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessage, ChatCompletionRequestUserMessage,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
        CreateChatCompletionResponse, ResponseFormat, ResponseFormatJsonSchema,
    },
    Client,
};
use async_trait::async_trait;
use tracing::{debug, trace};

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse, LlmUsage, ResponseSchema};
use crate::message::Message;

pub struct ChatOpenAI {
    client: Client<OpenAIConfig>,
    /// Chat completions endpoint, for logs.
    url: String,
    model: String,
    temperature: Option<f32>,
}

impl ChatOpenAI {
    /// Default config: key from `OPENAI_API_KEY`, OpenAI's public endpoint.
    pub fn new(model: impl Into<String>) -> Self {
        Self::with_config(OpenAIConfig::default(), model)
    }

    pub fn with_config(config: OpenAIConfig, model: impl Into<String>) -> Self {
        Self {
            url: config.url("/chat/completions"),
            client: Client::with_config(config),
            model: model.into(),
            temperature: None,
        }
    }

    /// Sampling temperature (0 to 2); unset leaves the provider default.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_message(message: &Message) -> ChatCompletionRequestMessage {
        match message {
            Message::System(s) => ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessage::from(s.as_str()),
            ),
            Message::User(s) => {
                ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage::from(s.as_str()))
            }
            Message::Assistant(s) => ChatCompletionRequestMessage::Assistant(
                ChatCompletionRequestAssistantMessage::from(s.as_str()),
            ),
        }
    }

    fn build_request(
        &self,
        messages: &[Message],
        schema: Option<&ResponseSchema>,
    ) -> Result<CreateChatCompletionRequest, AgentError> {
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model.clone())
            .messages(messages.iter().map(Self::request_message).collect::<Vec<_>>());
        if let Some(t) = self.temperature {
            args.temperature(t);
        }
        if let Some(schema) = schema {
            args.response_format(ResponseFormat::JsonSchema {
                json_schema: ResponseFormatJsonSchema {
                    name: schema.name.clone(),
                    description: schema.description.clone(),
                    schema: Some(schema.schema.clone()),
                    strict: Some(schema.strict),
                },
            });
        }
        args.build()
            .map_err(AgentError::Llm)
    }

    /// First choice's text and usage; a refusal or an empty choice list is an error.
    fn into_response(response: CreateChatCompletionResponse) -> Result<LlmResponse, AgentError> {
        let usage = response.usage.as_ref().map(|u| LlmUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });
        let message = response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message)
            .ok_or_else(|| AgentError::ExecutionFailed("OpenAI returned no choices".into()))?;
        if let Some(refusal) = message.refusal {
            return Err(AgentError::ExecutionFailed(format!("OpenAI refused: {}", refusal)));
        }
        Ok(LlmResponse {
            content: message.content.unwrap_or_default(),
            usage,
        })
    }

    async fn create(
        &self,
        messages: &[Message],
        schema: Option<&ResponseSchema>,
    ) -> Result<LlmResponse, AgentError> {
        let request = self.build_request(messages, schema)?;
        let trace_id = uuid::Uuid::new_v4().to_string();
        debug!(
            trace_id = %trace_id,
            url = %self.url,
            model = %self.model,
            message_count = messages.len(),
            temperature = ?self.temperature,
            schema = ?schema.map(|s| s.name.as_str()),
            "OpenAI chat create"
        );
        if let Ok(js) = serde_json::to_string(&request) {
            trace!(trace_id = %trace_id, request = %js, "OpenAI request body");
        }

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(AgentError::Llm)?;
        if let Ok(js) = serde_json::to_string(&response) {
            trace!(trace_id = %trace_id, response = %js, "OpenAI response body");
        }
        Self::into_response(response)
    }
}

#[async_trait]
impl LlmClient for ChatOpenAI {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        self.create(messages, None).await
    }

    async fn invoke_with_schema(
        &self,
        messages: &[Message],
        schema: &ResponseSchema,
    ) -> Result<LlmResponse, AgentError> {
        self.create(messages, Some(schema)).await
    }
}
