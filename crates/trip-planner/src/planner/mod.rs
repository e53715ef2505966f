//! The trip planner conversation: fixed prompt, relay and reply normalization.

pub mod envelope;
pub mod prompt;
pub mod relay;

pub use envelope::{strip_code_fences, ResponseEnvelope, UiTag};
pub use prompt::TRIP_PLANNER_PROMPT;
pub use relay::ConversationRelay;
