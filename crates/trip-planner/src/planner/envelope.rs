use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const EMPTY_COMPLETION_TEXT: &str = "Sorry, I couldn't generate a response.";
pub const SERVER_ERROR_TEXT: &str = "Server error";

/// Hint telling the caller which input control to show next.
///
/// The model chooses the tag, so this is an open set: values outside the
/// known constants are passed through unchanged. Note that `TripDuration` is
/// PascalCase while its siblings are lowerCamel; callers match on the exact
/// strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UiTag(String);

impl UiTag {
    pub const BUDGET: &'static str = "budget";
    pub const GROUP_SIZE: &'static str = "groupSize";
    pub const TRIP_DURATION: &'static str = "TripDuration";
    pub const FINAL: &'static str = "Final";

    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn final_tag() -> Self {
        Self::new(Self::FINAL)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_known(&self) -> bool {
        matches!(
            self.0.as_str(),
            Self::BUDGET | Self::GROUP_SIZE | Self::TRIP_DURATION | Self::FINAL
        )
    }
}

impl fmt::Display for UiTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UiTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// The JSON object returned to the caller for every request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub resp: String,
    pub ui: UiTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(
        default,
        rename = "providerError",
        skip_serializing_if = "Option::is_none"
    )]
    pub provider_error: Option<Value>,
}

/// Shape the model is asked to produce. Extra fields are ignored.
#[derive(Deserialize)]
struct ModelReply {
    resp: String,
    ui: UiTag,
}

impl ResponseEnvelope {
    pub fn new(resp: impl Into<String>, ui: impl Into<UiTag>) -> Self {
        Self {
            resp: resp.into(),
            ui: ui.into(),
            error: None,
            provider_error: None,
        }
    }

    /// Returned when the provider produced no usable text
    pub fn empty_completion() -> Self {
        Self::new(EMPTY_COMPLETION_TEXT, UiTag::final_tag())
    }

    /// Model text that did not match the schema, shown as-is
    pub fn fallback(text: impl Into<String>) -> Self {
        Self::new(text, UiTag::final_tag())
    }

    pub fn server_error(error: impl Into<String>, provider_error: Option<Value>) -> Self {
        Self {
            error: Some(error.into()),
            provider_error,
            ..Self::new(SERVER_ERROR_TEXT, UiTag::final_tag())
        }
    }

    /// Normalize raw model output: strip code fences and parse the schema,
    /// degrading to a textual fallback instead of failing.
    pub fn from_model_output(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::empty_completion();
        }

        let cleaned = strip_code_fences(raw);
        match serde_json::from_str::<ModelReply>(&cleaned) {
            Ok(reply) => {
                let envelope = Self::new(reply.resp, reply.ui);
                if !envelope.ui.is_known() {
                    tracing::warn!(ui = %envelope.ui, "model returned an unknown ui tag");
                }
                envelope
            }
            Err(e) => {
                tracing::debug!("model output is not schema JSON ({e}), using text fallback");
                Self::fallback(cleaned)
            }
        }
    }
}

/// Remove markdown code fences the model may wrap around its JSON, then trim.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}
