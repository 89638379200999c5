// src/handlers/counter.rs

use crate::error::Result;
use crate::handlers::ValidatedJson;
use crate::models::{CounterRequest, CounterSuggestion};
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use std::sync::Arc;
use tracing::info;

/// `POST /api/counter` — AI counter-pick suggestion.
///
/// Schema violations are the only client-visible errors here; every AI
/// pipeline failure is absorbed into the deterministic fallback pick.
pub async fn counter_handler(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CounterRequest>,
) -> Result<Json<CounterSuggestion>> {
    info!(
        enemy_count = request.enemy_heroes.len(),
        lane = %request.preferred_lane,
        "Counter suggestion requested"
    );

    let suggestion = state
        .advisor
        .counter_suggestion(&state.catalog, &request.enemy_heroes, &request.preferred_lane)
        .await;
    Ok(Json(suggestion))
}
