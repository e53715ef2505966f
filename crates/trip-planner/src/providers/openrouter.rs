use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use super::base::{Provider, ProviderCompleteResponse};
use super::errors::ProviderError;
use super::formats::openai::{create_request, get_usage, response_to_text};
use super::utils::{emit_debug_trace, get_model, handle_response};
use crate::message::Message;
use crate::model::ModelConfig;

pub const OPENROUTER_API_KEY_ENV: &str = "OPEN_ROUTER_API_KEY";
pub const OPENROUTER_DEFAULT_HOST: &str = "https://openrouter.ai";
pub const OPENROUTER_DEFAULT_TIMEOUT_SECS: u64 = 600;
const COMPLETIONS_PATH: &str = "api/v1/chat/completions";

#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    pub host: String,
    /// `None` or empty means the credential is not configured; every
    /// completion then fails with `ProviderError::MissingCredential`.
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl OpenRouterConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            host: OPENROUTER_DEFAULT_HOST.to_string(),
            api_key,
            timeout: Duration::from_secs(OPENROUTER_DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_env() -> Self {
        Self::new(std::env::var(OPENROUTER_API_KEY_ENV).ok())
    }
}

#[derive(serde::Serialize)]
pub struct OpenRouterProvider {
    #[serde(skip)]
    client: Client,
    host: String,
    #[serde(skip)]
    api_key: Option<String>,
    model: ModelConfig,
}

impl OpenRouterProvider {
    pub fn from_config(
        config: OpenRouterConfig,
        model: ModelConfig,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            host: config.host,
            api_key: config.api_key,
            model,
        })
    }

    fn api_key(&self) -> Result<&str, ProviderError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ProviderError::MissingCredential(OPENROUTER_API_KEY_ENV.to_string()))
    }

    fn endpoint(&self) -> Result<Url, ProviderError> {
        let base = Url::parse(&format!("{}/", self.host.trim_end_matches('/')))?;
        Ok(base.join(COMPLETIONS_PATH)?)
    }

    async fn post(&self, api_key: &str, payload: &Value) -> Result<Value, ProviderError> {
        let response = self
            .client
            .post(self.endpoint()?)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {api_key}"))
            .header("HTTP-Referer", "https://github.com/trip-planner/trip-planner")
            .header("X-Title", "Trip Planner")
            .json(payload)
            .send()
            .await?;

        handle_response(payload, response).await
    }
}

#[async_trait]
impl Provider for OpenRouterProvider {
    fn get_model_config(&self) -> &ModelConfig {
        &self.model
    }

    #[tracing::instrument(
        skip(self, system, messages),
        fields(model = %self.model.model_name, messages = messages.len())
    )]
    async fn complete(
        &self,
        system: &str,
        messages: &[Message],
    ) -> Result<ProviderCompleteResponse, ProviderError> {
        let api_key = self.api_key()?;
        let payload = create_request(&self.model, system, messages)?;

        let response = self.post(api_key, &payload).await?;

        // OpenRouter can report upstream failures inside a 200 response
        if let Some(error) = response.get("error") {
            return Err(ProviderError::RequestFailed {
                message: format!(
                    "OpenRouter API error: {}",
                    error
                        .get("message")
                        .and_then(Value::as_str)
                        .unwrap_or("unknown error")
                ),
                payload: Some(error.clone()),
            });
        }

        let content = response_to_text(&response);
        let usage = get_usage(&response);
        let model = get_model(&response);
        emit_debug_trace(self, &payload, &response, &usage);
        Ok(ProviderCompleteResponse::new(content, model, usage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(host: &str, api_key: Option<&str>) -> OpenRouterProvider {
        let config = OpenRouterConfig::new(api_key.map(str::to_string)).with_host(host);
        OpenRouterProvider::from_config(config, ModelConfig::default()).unwrap()
    }

    #[test]
    fn test_endpoint_joins_host() {
        let expected = "https://openrouter.ai/api/v1/chat/completions";
        assert_eq!(
            provider("https://openrouter.ai", Some("k")).endpoint().unwrap().as_str(),
            expected
        );
        assert_eq!(
            provider("https://openrouter.ai/", Some("k")).endpoint().unwrap().as_str(),
            expected
        );
    }

    #[test]
    fn test_invalid_host_is_request_failure() {
        let err = provider("not a url", Some("k")).endpoint().unwrap_err();
        assert!(matches!(err, ProviderError::RequestFailed { .. }));
    }

    #[tokio::test]
    async fn test_missing_credential_fails_before_request() {
        // Unroutable host: the call must fail on the credential check, not the network
        for key in [None, Some(""), Some("   ")] {
            let err = provider("http://127.0.0.1:9", key)
                .complete("PROMPT", &[Message::user("hi")])
                .await
                .unwrap_err();
            assert!(err.is_configuration_error());
            assert_eq!(err.to_string(), "Missing OPEN_ROUTER_API_KEY");
        }
    }
}
