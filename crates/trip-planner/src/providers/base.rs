use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::errors::ProviderError;
use crate::message::Message;
use crate::model::ModelConfig;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: Option<i32>,
    pub output_tokens: Option<i32>,
    pub total_tokens: Option<i32>,
}

impl Usage {
    pub fn new(
        input_tokens: Option<i32>,
        output_tokens: Option<i32>,
        total_tokens: Option<i32>,
    ) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderCompleteResponse {
    /// Text of the first completion choice, `None` when the provider sent no
    /// choices or no textual content
    pub content: Option<String>,
    pub model: String,
    pub usage: Usage,
}

impl ProviderCompleteResponse {
    pub fn new(content: Option<String>, model: String, usage: Usage) -> Self {
        Self {
            content,
            model,
            usage,
        }
    }
}

/// Base trait for chat-completion providers
#[async_trait]
pub trait Provider: Send + Sync {
    /// Get the model configuration
    fn get_model_config(&self) -> &ModelConfig;

    /// Generate a single completion for the conversation
    ///
    /// # Arguments
    /// * `system` - The system prompt sent ahead of the transcript
    /// * `messages` - The conversation history, in order
    ///
    /// # Errors
    /// ProviderError
    ///   - `MissingCredential` is returned before any network I/O
    async fn complete(
        &self,
        system: &str,
        messages: &[Message],
    ) -> Result<ProviderCompleteResponse, ProviderError>;
}
