use reqwest::{Response, StatusCode};
use serde_json::Value;
use tracing::debug;

use super::base::Usage;
use super::errors::ProviderError;

/// Read a response body as JSON, keeping it as a plain string when it is not
/// JSON. Empty bodies yield `None`.
async fn read_error_body(response: Response) -> Option<Value> {
    let text = response.text().await.unwrap_or_default();
    if text.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(&text).unwrap_or(Value::String(text)))
}

// Maps a non-ok response status to a ProviderError
pub async fn non_ok_response_to_provider_error(
    payload: &Value,
    response: Response,
) -> ProviderError {
    let status = response.status();
    let body = read_error_body(response).await;
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::Authentication {
            message: format!(
                "Authentication failed. Please ensure your API key is valid. Status: {status}"
            ),
            payload: body,
        },
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimitExceeded {
            message: format!("Rate limit exceeded. Please retry after some time. Status: {status}"),
            payload: body,
        },
        StatusCode::INTERNAL_SERVER_ERROR | StatusCode::SERVICE_UNAVAILABLE => {
            ProviderError::ServerError {
                message: format!("Server error occurred. Status: {status}"),
                payload: body,
            }
        }
        _ => {
            debug!(
                "Provider request failed with status: {}. Body: {:?}. Payload: {}",
                status, body, payload
            );
            ProviderError::RequestFailed {
                message: format!("Request failed with status: {status}."),
                payload: body,
            }
        }
    }
}

pub async fn handle_response(payload: &Value, response: Response) -> Result<Value, ProviderError> {
    if response.status().is_success() {
        Ok(response.json().await?)
    } else {
        Err(non_ok_response_to_provider_error(payload, response).await)
    }
}

/// Extract the model name from a JSON object. Common with most providers to have
/// this top level attribute.
pub fn get_model(data: &Value) -> String {
    data.get("model")
        .and_then(Value::as_str)
        .unwrap_or("Unknown")
        .to_string()
}

pub fn emit_debug_trace<T: serde::Serialize>(
    model_config: &T,
    payload: &Value,
    response: &Value,
    usage: &Usage,
) {
    debug!(
        model_config = %serde_json::to_string_pretty(model_config).unwrap_or_default(),
        input = %serde_json::to_string_pretty(payload).unwrap_or_default(),
        output = %serde_json::to_string_pretty(response).unwrap_or_default(),
        input_tokens = ?usage.input_tokens.unwrap_or_default(),
        output_tokens = ?usage.output_tokens.unwrap_or_default(),
        total_tokens = ?usage.total_tokens.unwrap_or_default(),
    );
}
