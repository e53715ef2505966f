use std::sync::Arc;

use tracing::info;

use super::envelope::ResponseEnvelope;
use super::prompt::TRIP_PLANNER_PROMPT;
use crate::message::Message;
use crate::providers::{Provider, ProviderError};

/// Forwards a caller transcript to the provider behind the trip planner
/// prompt and normalizes the reply.
///
/// Stateless: every call is one independent provider request, with no
/// caching or deduplication.
#[derive(Clone)]
pub struct ConversationRelay {
    provider: Arc<dyn Provider>,
    system_prompt: String,
}

impl ConversationRelay {
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self {
            provider,
            system_prompt: TRIP_PLANNER_PROMPT.to_string(),
        }
    }

    pub async fn reply(&self, transcript: &[Message]) -> Result<ResponseEnvelope, ProviderError> {
        let completion = self
            .provider
            .complete(&self.system_prompt, transcript)
            .await?;

        let raw = completion.content.unwrap_or_default();
        info!(model = %completion.model, "RAW MODEL OUTPUT: {raw}");

        Ok(ResponseEnvelope::from_model_output(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::mock::MockProvider;

    #[tokio::test]
    async fn test_reply_sends_prompt_then_transcript() {
        let mock = MockProvider::new([r#"{"resp": "Where to?", "ui": "Final"}"#]);
        let relay = ConversationRelay::new(Arc::new(mock.clone()));
        let transcript = vec![
            Message::user("Hi"),
            Message::assistant("Where from?"),
            Message::user("Oslo"),
        ];

        let envelope = relay.reply(&transcript).await.unwrap();

        assert_eq!(envelope, ResponseEnvelope::new("Where to?", "Final"));
        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, TRIP_PLANNER_PROMPT);
        assert_eq!(calls[0].1, transcript);
    }

    #[tokio::test]
    async fn test_empty_completion() {
        let mock = MockProvider::with_results([Ok(None), Ok(Some(String::new()))]);
        let relay = ConversationRelay::new(Arc::new(mock));

        for _ in 0..2 {
            let envelope = relay.reply(&[]).await.unwrap();
            assert_eq!(envelope, ResponseEnvelope::empty_completion());
        }
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let mock = MockProvider::with_results([Err(ProviderError::MissingCredential(
            "OPEN_ROUTER_API_KEY".to_string(),
        ))]);
        let relay = ConversationRelay::new(Arc::new(mock));

        let err = relay.reply(&[Message::user("Hi")]).await.unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[tokio::test]
    async fn test_same_transcript_is_not_deduplicated() {
        let mock = MockProvider::new([
            r#"{"resp": "Where from?", "ui": "Final"}"#,
            r#"{"resp": "Where are you starting?", "ui": "Final"}"#,
        ]);
        let relay = ConversationRelay::new(Arc::new(mock.clone()));
        let transcript = [Message::user("Plan my trip")];

        let first = relay.reply(&transcript).await.unwrap();
        let second = relay.reply(&transcript).await.unwrap();

        assert_eq!(mock.calls().len(), 2);
        assert_ne!(first, second);
    }
}
