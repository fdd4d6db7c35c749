use axum::{Json, extract::State};
use tracing::info;

use crate::{
    message::{ChatRequest, ChatResponse, HealthReport, WELCOME_MESSAGE, WelcomeResponse},
    state::SharedState,
};

pub async fn root_handler() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: WELCOME_MESSAGE.to_string(),
    })
}

// Model runtime failures are reported in `reply`, never as an error status.
pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Json<ChatResponse> {
    info!(turns = payload.message.len(), "received chat request");
    let reply = state.relay.handle_chat(&payload.message).await;
    Json(ChatResponse { reply })
}

pub async fn health_handler(State(state): State<SharedState>) -> Json<HealthReport> {
    Json(state.relay.health_check().await)
}
