use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::base::{Provider, ProviderCompleteResponse, Usage};
use super::errors::ProviderError;
use crate::message::Message;
use crate::model::ModelConfig;

/// A mock provider that returns pre-configured responses for testing
#[derive(Clone)]
pub struct MockProvider {
    responses: Arc<Mutex<VecDeque<Result<Option<String>, ProviderError>>>>,
    calls: Arc<Mutex<Vec<(String, Vec<Message>)>>>,
    model_config: ModelConfig,
}

impl MockProvider {
    /// Create a new mock provider with a sequence of text replies
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_results(responses.into_iter().map(|r| Ok(Some(r.into()))))
    }

    /// Create a new mock provider with explicit results, including failures
    /// and empty completions
    pub fn with_results<I>(results: I) -> Self
    where
        I: IntoIterator<Item = Result<Option<String>, ProviderError>>,
    {
        Self {
            responses: Arc::new(Mutex::new(results.into_iter().collect())),
            calls: Arc::new(Mutex::new(Vec::new())),
            model_config: ModelConfig::new("mock"),
        }
    }

    /// System prompt and transcript of every call made so far
    pub fn calls(&self) -> Vec<(String, Vec<Message>)> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn get_model_config(&self) -> &ModelConfig {
        &self.model_config
    }

    async fn complete(
        &self,
        system: &str,
        messages: &[Message],
    ) -> Result<ProviderCompleteResponse, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((system.to_string(), messages.to_vec()));
        }

        // Empty completion once the queue is exhausted
        let next = self
            .responses
            .lock()
            .ok()
            .and_then(|mut responses| responses.pop_front())
            .unwrap_or(Ok(None));

        let content = next?;
        Ok(ProviderCompleteResponse::new(
            content,
            "mock".to_string(),
            Usage::new(Some(1), Some(1), Some(2)),
        ))
    }
}
