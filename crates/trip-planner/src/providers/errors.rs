use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Missing {0}")]
    MissingCredential(String),

    #[error("Authentication error: {message}")]
    Authentication {
        message: String,
        payload: Option<Value>,
    },

    #[error("Rate limit exceeded: {message}")]
    RateLimitExceeded {
        message: String,
        payload: Option<Value>,
    },

    #[error("Server error: {message}")]
    ServerError {
        message: String,
        payload: Option<Value>,
    },

    #[error("Request failed: {message}")]
    RequestFailed {
        message: String,
        payload: Option<Value>,
    },

    #[error("Response parse error: {0}")]
    ResponseParseError(String),
}

impl ProviderError {
    pub fn request_failed(message: impl Into<String>) -> Self {
        Self::RequestFailed {
            message: message.into(),
            payload: None,
        }
    }

    /// Error body returned by the provider, if the failure came with one
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Self::Authentication { payload, .. }
            | Self::RateLimitExceeded { payload, .. }
            | Self::ServerError { payload, .. }
            | Self::RequestFailed { payload, .. } => payload.as_ref(),
            Self::MissingCredential(_) | Self::ResponseParseError(_) => None,
        }
    }

    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::MissingCredential(_))
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            return Self::ResponseParseError(error.to_string());
        }
        Self::request_failed(error.to_string())
    }
}

impl From<url::ParseError> for ProviderError {
    fn from(error: url::ParseError) -> Self {
        Self::request_failed(format!("Invalid provider URL: {error}"))
    }
}
