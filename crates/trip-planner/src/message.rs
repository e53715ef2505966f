//! Chat transcript types shared by the relay and the providers.
use serde::{Deserialize, Serialize};

/// Roles to describe the origin of a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single conversational turn.
///
/// The transcript is supplied by the caller and forwarded to the model in
/// order; the relay never reorders or rewrites entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_serializes_lowercase() {
        let message = Message::assistant("Where are you starting from?");
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value,
            json!({"role": "assistant", "content": "Where are you starting from?"})
        );
    }

    #[test]
    fn test_transcript_deserializes_in_order() {
        let transcript: Vec<Message> = serde_json::from_value(json!([
            {"role": "user", "content": "Plan a trip"},
            {"role": "assistant", "content": "Where from?"},
            {"role": "user", "content": "Lisbon"}
        ]))
        .unwrap();

        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[0], Message::user("Plan a trip"));
        assert_eq!(transcript[1].role, Role::Assistant);
        assert_eq!(transcript[2].content, "Lisbon");
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let result: Result<Message, _> =
            serde_json::from_value(json!({"role": "tool", "content": "x"}));
        assert!(result.is_err());
    }
}
