// src/meta_cache.rs

use crate::models::MetaHeroList;
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info};

struct CachedMeta {
    payload: MetaHeroList,
    produced_at: Instant,
}

/// Single-slot, time-windowed cache for the meta tier list.
///
/// The tier list is the one expensive, shared, non-personalized query, so a
/// single process-wide slot is all that is needed. The async mutex is held
/// across the compute, which de-duplicates concurrent recomputes after
/// expiry: racing requests queue behind the first and see its fresh value.
pub struct MetaCache {
    slot: Mutex<Option<CachedMeta>>,
}

impl MetaCache {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Returns the cached payload when younger than `ttl`, otherwise awaits
    /// `compute`, stores its result, and returns it. Age is measured once
    /// per call against a monotonic clock.
    pub async fn get_or_compute<F, Fut>(&self, ttl: Duration, compute: F) -> MetaHeroList
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = MetaHeroList>,
    {
        let mut slot = self.slot.lock().await;
        if let Some(cached) = slot.as_ref() {
            if cached.produced_at.elapsed() < ttl {
                debug!("Serving meta heroes from cache");
                return cached.payload.clone();
            }
            debug!("Cached meta heroes expired, recomputing");
        }

        let payload = compute().await;
        info!(ttl_secs = ttl.as_secs(), "Meta heroes recomputed and cached");
        *slot = Some(CachedMeta {
            payload: payload.clone(),
            produced_at: Instant::now(),
        });
        payload
    }
}

impl Default for MetaCache {
    fn default() -> Self {
        Self::new()
    }
}
