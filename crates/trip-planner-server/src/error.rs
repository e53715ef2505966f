use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use trip_planner::providers::ProviderError;
use trip_planner::ResponseEnvelope;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("Invalid request body: {0}")]
    InvalidRequest(#[from] serde_json::Error),
    #[error("Failed to read request body: {0}")]
    UnreadableBody(#[from] BytesRejection),
}

impl Error {
    fn provider_payload(&self) -> Option<serde_json::Value> {
        match self {
            Self::Provider(err) => err.payload().cloned(),
            Self::InvalidRequest(_) | Self::UnreadableBody(_) => None,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let provider_error = self.provider_payload();
        tracing::error!(
            error = %self,
            provider_error = ?provider_error,
            "request failed"
        );

        let envelope = ResponseEnvelope::server_error(self.to_string(), provider_error);
        (StatusCode::INTERNAL_SERVER_ERROR, Json(envelope)).into_response()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {env_var}: {reason}")]
    InvalidValue { env_var: String, reason: String },
    #[error("Invalid server address {host}:{port}")]
    InvalidAddress { host: String, port: u16 },
    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::{json, Value};

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_provider_error_response() {
        let err = Error::from(ProviderError::ServerError {
            message: "Server error occurred. Status: 503 Service Unavailable".to_string(),
            payload: Some(json!({"error": "upstream down"})),
        });

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({
                "resp": "Server error",
                "ui": "Final",
                "error": "Server error: Server error occurred. Status: 503 Service Unavailable",
                "providerError": {"error": "upstream down"}
            })
        );
    }

    #[tokio::test]
    async fn test_invalid_request_response() {
        let parse_error = serde_json::from_str::<Value>("{not json").unwrap_err();
        let response = Error::from(parse_error).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["ui"], "Final");
        assert!(body["error"]
            .as_str()
            .is_some_and(|e| e.starts_with("Invalid request body")));
        assert!(body.get("providerError").is_none());
    }
}
