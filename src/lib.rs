// src/lib.rs

pub mod advisor;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod fallback;
pub mod gemini;
pub mod handlers;
pub mod key_pool;
pub mod meta_cache;
pub mod models;
pub mod prompts;
pub mod state;

use crate::handlers::{
    coach_handler, counter_handler, health_check, heroes_handler, meta_heroes_handler,
};
use axum::{
    body::Body,
    http::{HeaderValue, Request as AxumRequest},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use std::{path::PathBuf, sync::Arc, time::Instant};
use tower_http::cors::CorsLayer;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

pub use config::AppConfig;
pub use error::{AppError, Result};
pub use state::AppState;

/// Creates the main Axum router for the application.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/heroes", get(heroes_handler))
        .route("/api/meta-heroes", get(meta_heroes_handler))
        .route("/api/counter", post(counter_handler))
        .route("/api/coach", post(coach_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Middleware attaching a request ID and a tracing span to every request.
async fn trace_requests(
    mut req: AxumRequest<Body>,
    next: axum::middleware::Next,
) -> impl IntoResponse {
    let request_id = Uuid::new_v4();
    let start_time = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let span = info_span!(
        "request",
        request_id = %request_id,
        http.method = %method,
        url.path = %path,
    );

    req.extensions_mut().insert(request_id);

    async move {
        let mut response = next.run(req).await;
        let elapsed = start_time.elapsed();

        if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
            response.headers_mut().insert("X-Request-ID", value);
        }

        info!(
            http.response.duration = ?elapsed,
            http.status_code = response.status().as_u16(),
            "Finished processing request"
        );

        response
    }
    .instrument(span)
    .await
}

/// Main application setup: loads configuration, builds the shared state, and
/// returns the router ready to serve.
pub fn run(config_path_override: Option<PathBuf>) -> Result<(Router, AppConfig)> {
    info!("Starting MLBB coach server...");

    let (app_config, _config_path) = setup_configuration(config_path_override)?;

    let app_state = Arc::new(AppState::new(app_config.clone()).map_err(|e| {
        error!(error = ?e, "Failed to initialize application state. Exiting.");
        e
    })?);
    info!("Application state initialized successfully.");

    let app = create_router(app_state).layer(axum::middleware::from_fn(trace_requests));

    Ok((app, app_config))
}

/// Loads, validates and logs the application configuration.
fn setup_configuration(config_path_override: Option<PathBuf>) -> Result<(AppConfig, PathBuf)> {
    let config_path = config_path_override.unwrap_or_else(|| {
        std::env::var("CONFIG_PATH").map_or_else(|_| PathBuf::from("config.yaml"), PathBuf::from)
    });

    let config_path_display = config_path.display().to_string();
    if config_path.exists() {
        info!(config.path = %config_path_display, "Using configuration file");
    } else {
        info!(config.path = %config_path_display, "Optional configuration file not found. Using defaults and environment variables.");
    }

    let app_config = config::load_config(&config_path).map_err(|e| {
        error!(
            config.path = %config_path_display,
            error = ?e,
            "Failed to load or validate configuration. Exiting."
        );
        e
    })?;

    info!(
        config.key_count = app_config.gemini.api_keys.len(),
        config.model = %app_config.gemini.model,
        config.meta_ttl_hours = app_config.meta.ttl_hours,
        server.port = app_config.server.port,
        "Configuration loaded and validated successfully."
    );

    Ok((app_config, config_path))
}
