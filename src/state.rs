// src/state.rs

use crate::advisor::Advisor;
use crate::catalog::load_catalog;
use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::executor::RetryExecutor;
use crate::key_pool::KeyPool;
use crate::meta_cache::MetaCache;
use crate::models::ChampionsData;
use reqwest::Client;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Shared application state accessible by all Axum handlers.
pub struct AppState {
    pub config: AppConfig,
    pub catalog: ChampionsData,
    pub key_pool: Arc<KeyPool>,
    pub advisor: Advisor,
    pub meta_cache: MetaCache,
}

impl AppState {
    /// Creates a new `AppState`: loads the catalog, builds the key pool and
    /// the HTTP client, and wires the retry executor into the advisor.
    pub fn new(config: AppConfig) -> Result<Self> {
        info!("Creating shared AppState: loading catalog and initializing key pool...");

        let catalog = load_catalog(Path::new(&config.catalog_path))?;

        let key_pool = Arc::new(KeyPool::from_plain(
            &config.gemini.api_keys,
            Duration::from_secs(config.gemini.cooldown_secs),
        ));
        if key_pool.is_empty() {
            warn!("Key pool is empty: AI endpoints run in degraded mode (fallbacks only).");
        } else {
            info!(key_count = key_pool.len(), "Key pool initialized");
        }

        let http = Client::builder()
            .connect_timeout(Duration::from_secs(config.server.connect_timeout_secs))
            .timeout(Duration::from_secs(config.server.request_timeout_secs))
            .build()
            .map_err(|e| AppError::internal(format!("failed to build HTTP client: {e}")))?;

        let executor = RetryExecutor::new(
            key_pool.clone(),
            http,
            &config.gemini.base_url,
            &config.gemini.model,
            config.gemini.max_attempts,
        );
        let advisor = Advisor::new(executor, config.meta.season.clone());

        Ok(Self {
            config,
            catalog,
            key_pool,
            advisor,
            meta_cache: MetaCache::new(),
        })
    }

    pub fn meta_ttl(&self) -> Duration {
        Duration::from_secs(self.config.meta.ttl_hours * 3600)
    }
}
