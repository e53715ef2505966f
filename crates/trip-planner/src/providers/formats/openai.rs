//! OpenAI chat-completions wire format, shared by every OpenAI-compatible host.
use serde_json::{json, Value};

use crate::message::{Message, Role};
use crate::model::ModelConfig;
use crate::providers::base::Usage;
use crate::providers::errors::ProviderError;

/// Convert the system prompt and transcript into the OpenAI `messages` array.
/// The system prompt is always first; transcript order is preserved.
pub fn format_messages(system: &str, messages: &[Message]) -> Vec<Value> {
    let mut formatted = Vec::with_capacity(messages.len() + 1);
    formatted.push(json!({ "role": "system", "content": system }));
    formatted.extend(messages.iter().map(|message| {
        let role = match message.role {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        };
        json!({ "role": role, "content": message.content })
    }));
    formatted
}

pub fn create_request(
    model_config: &ModelConfig,
    system: &str,
    messages: &[Message],
) -> Result<Value, ProviderError> {
    let mut payload = json!({
        "model": model_config.model_name,
        "messages": format_messages(system, messages),
    });

    let object = payload.as_object_mut().ok_or_else(|| {
        ProviderError::request_failed("Request payload is not a JSON object")
    })?;
    if let Some(temperature) = model_config.temperature {
        object.insert("temperature".to_string(), json!(temperature));
    }
    if let Some(max_tokens) = model_config.max_tokens {
        object.insert("max_tokens".to_string(), json!(max_tokens));
    }

    Ok(payload)
}

/// Text content of the first choice. Empty strings count as no content.
pub fn response_to_text(response: &Value) -> Option<String> {
    response
        .get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
        .filter(|content| !content.is_empty())
        .map(str::to_string)
}

pub fn get_usage(data: &Value) -> Usage {
    let Some(usage) = data.get("usage") else {
        return Usage::default();
    };

    let token = |key: &str| {
        usage
            .get(key)
            .and_then(Value::as_i64)
            .and_then(|v| i32::try_from(v).ok())
    };

    let input_tokens = token("prompt_tokens");
    let output_tokens = token("completion_tokens");
    let total_tokens = token("total_tokens").or_else(|| match (input_tokens, output_tokens) {
        (Some(input), Some(output)) => Some(input + output),
        _ => None,
    });

    Usage::new(input_tokens, output_tokens, total_tokens)
}
