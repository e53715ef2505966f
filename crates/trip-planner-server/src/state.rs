use std::sync::Arc;
use trip_planner::ConversationRelay;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<ConversationRelay>,
}

impl AppState {
    pub fn new(relay: ConversationRelay) -> Self {
        Self {
            relay: Arc::new(relay),
        }
    }
}
