// src/handlers/meta.rs

use crate::models::MetaHeroList;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use std::sync::Arc;

/// `GET /api/meta-heroes` — cached AI tier list.
///
/// The cache intercepts the request before any upstream work; only an
/// expired (or cold) slot triggers generation, and even then the advisor
/// guarantees a usable list.
pub async fn meta_heroes_handler(State(state): State<Arc<AppState>>) -> Json<MetaHeroList> {
    let ttl = state.meta_ttl();
    let shared = state.clone();
    let list = state
        .meta_cache
        .get_or_compute(ttl, move || async move {
            shared.advisor.meta_heroes(&shared.catalog).await
        })
        .await;
    Json(list)
}
