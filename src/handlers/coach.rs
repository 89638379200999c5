// src/handlers/coach.rs

use crate::error::Result;
use crate::handlers::ValidatedJson;
use crate::models::{CoachReply, CoachRequest};
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use std::sync::Arc;
use tracing::info;

/// `POST /api/coach` — free-form Arabic coaching chat.
pub async fn coach_handler(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CoachRequest>,
) -> Result<Json<CoachReply>> {
    info!(
        history_len = request.conversation_history.len(),
        "Coach question received"
    );

    let reply = state
        .advisor
        .coach_reply(&request.question, &request.conversation_history)
        .await;
    Ok(Json(reply))
}
