//! Run input: where the project description comes from.
//!
//! A flat string is the description itself; a message history contributes the
//! content of its last message. Both feed the same graph.

use crate::error::AgentError;
use crate::message::Message;

/// Given raw run input, produce the project-description text.
pub trait ProjectInput: Send + Sync {
    fn project_description(&self) -> Result<String, AgentError>;
}

impl ProjectInput for str {
    fn project_description(&self) -> Result<String, AgentError> {
        Ok(self.to_string())
    }
}

impl ProjectInput for String {
    fn project_description(&self) -> Result<String, AgentError> {
        self.as_str().project_description()
    }
}

impl ProjectInput for [Message] {
    fn project_description(&self) -> Result<String, AgentError> {
        self.last()
            .map(|m| m.content().to_string())
            .ok_or_else(|| AgentError::InvalidInput("message history is empty".to_string()))
    }
}

impl ProjectInput for Vec<Message> {
    fn project_description(&self) -> Result<String, AgentError> {
        self.as_slice().project_description()
    }
}
