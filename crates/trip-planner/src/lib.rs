pub mod message;
pub mod model;
pub mod planner;
pub mod providers;

pub use message::{Message, Role};
pub use model::ModelConfig;
pub use planner::{ConversationRelay, ResponseEnvelope, UiTag};
