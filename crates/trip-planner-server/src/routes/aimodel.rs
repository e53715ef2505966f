use crate::error::Error;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use trip_planner::{Message, ResponseEnvelope};

#[derive(Debug, Default, Deserialize)]
struct ChatRequest {
    /// Missing or `null` means no prior history
    #[serde(default)]
    messages: Option<Vec<Message>>,
}

impl ChatRequest {
    /// Parse the raw body. A `null` body is treated like `{}`; anything that
    /// is not JSON of the expected shape is an error.
    fn from_body(body: &[u8]) -> Result<Self, Error> {
        let request: Option<ChatRequest> = serde_json::from_slice(body)?;
        Ok(request.unwrap_or_default())
    }
}

async fn reply(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ResponseEnvelope>, Error> {
    let body = body?;
    let transcript = ChatRequest::from_body(&body)?
        .messages
        .unwrap_or_default();

    let envelope = state.relay.reply(&transcript).await?;
    Ok(Json(envelope))
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/aimodel", post(reply))
        // Transcripts grow with the conversation; no cap on the body size
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}
