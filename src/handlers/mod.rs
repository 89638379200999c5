// src/handlers/mod.rs

pub mod coach;
pub mod counter;
pub mod meta;

use crate::error::AppError;
use crate::state::AppState;
use axum::async_trait;
use axum::extract::{FromRequest, Request, State};
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;
use validator::Validate;

pub use coach::coach_handler;
pub use counter::counter_handler;
pub use meta::meta_heroes_handler;

/// JSON extractor that reports every body problem as a 400.
///
/// Axum's stock `Json` rejection answers 422 for a deserializable-but-wrong
/// body; clients of this API get one uniform validation error for malformed
/// JSON, missing fields, and failed field rules alike.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: serde::de::DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation {
                message: e.body_text(),
            })?;
        value.validate().map_err(|e| AppError::Validation {
            message: e.to_string(),
        })?;
        Ok(Self(value))
    }
}

/// Liveness probe.
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `GET /api/heroes` — serves the static catalog loaded at startup.
pub async fn heroes_handler(State(state): State<Arc<AppState>>) -> Json<crate::models::ChampionsData> {
    Json(state.catalog.clone())
}
