// src/key_pool.rs

use crate::error::{AppError, Result};
use parking_lot::Mutex;
use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Rotating pool of Gemini API keys with per-key failure cooldowns.
///
/// Constructed once at startup and shared across request handlers via
/// `Arc`. All bookkeeping is advisory: a race between two requests marking
/// or clearing the same key costs at most a suboptimal key choice, never an
/// incorrect result, so a plain mutex over the whole state is enough.
pub struct KeyPool {
    inner: Mutex<PoolInner>,
    cooldown: Duration,
}

struct PoolInner {
    keys: Vec<SecretString>,
    cursor: usize,
    /// Index of a failed key -> moment the failure was recorded.
    failures: HashMap<usize, Instant>,
}

impl KeyPool {
    pub fn new(keys: Vec<SecretString>, cooldown: Duration) -> Self {
        Self {
            inner: Mutex::new(PoolInner {
                keys,
                cursor: 0,
                failures: HashMap::new(),
            }),
            cooldown,
        }
    }

    /// Builds a pool from plaintext key strings, wrapping each in a secret.
    pub fn from_plain(keys: &[String], cooldown: Duration) -> Self {
        Self::new(
            keys.iter()
                .map(|k| SecretString::new(k.clone()))
                .collect(),
            cooldown,
        )
    }

    pub fn len(&self) -> usize {
        self.inner.lock().keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the key currently selected for use, skipping keys that are
    /// inside their cooldown window.
    ///
    /// Walks forward from the cursor, wrapping at most once. If every key is
    /// cooling down, all cooldowns are cleared and the cursor resets to the
    /// first key: a still-bad key retried early beats a pool that can never
    /// recover.
    pub fn current_key(&self) -> Result<SecretString> {
        let mut inner = self.inner.lock();
        if inner.keys.is_empty() {
            return Err(AppError::NoKeysConfigured);
        }

        let now = Instant::now();
        let start = inner.cursor;
        loop {
            let idx = inner.cursor;
            let cooling = inner
                .failures
                .get(&idx)
                .is_some_and(|failed_at| now.duration_since(*failed_at) <= self.cooldown);
            if !cooling {
                return Ok(inner.keys[idx].clone());
            }

            inner.cursor = (inner.cursor + 1) % inner.keys.len();
            if inner.cursor == start {
                break;
            }
        }

        warn!("All API keys are in cooldown. Clearing cooldowns and restarting rotation.");
        inner.failures.clear();
        inner.cursor = 0;
        Ok(inner.keys[0].clone())
    }

    /// Moves the cursor to the next key. No-op for pools with one key or less.
    pub fn advance(&self) {
        let mut inner = self.inner.lock();
        if inner.keys.len() > 1 {
            inner.cursor = (inner.cursor + 1) % inner.keys.len();
        }
    }

    /// Records a failure timestamp against `key` and rotates to the next one.
    pub fn mark_failed(&self, key: &SecretString) {
        let mut inner = self.inner.lock();
        if let Some(idx) = position_of(&inner.keys, key) {
            inner.failures.insert(idx, Instant::now());
            warn!(
                key.preview = %Self::preview(key),
                cooldown_secs = self.cooldown.as_secs(),
                "API key marked as failed, will retry after cooldown"
            );
        }
        if inner.keys.len() > 1 {
            inner.cursor = (inner.cursor + 1) % inner.keys.len();
        }
    }

    /// Removes any cooldown record for `key` (called after a confirmed success).
    pub fn clear_failure(&self, key: &SecretString) {
        let mut inner = self.inner.lock();
        if let Some(idx) = position_of(&inner.keys, key) {
            if inner.failures.remove(&idx).is_some() {
                debug!(key.preview = %Self::preview(key), "Cleared failure record for key");
            }
        }
    }

    /// Masked representation safe for logs. Counts characters, not bytes, so
    /// multibyte key material cannot split a boundary.
    pub fn preview(key: &SecretString) -> String {
        let exposed = key.expose_secret();
        let count = exposed.chars().count();
        if count > 8 {
            let head: String = exposed.chars().take(4).collect();
            let tail: String = exposed.chars().skip(count - 4).collect();
            format!("{head}...{tail}")
        } else {
            "*".repeat(count)
        }
    }
}

impl std::fmt::Debug for KeyPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPool")
            .field("len", &self.len())
            .field("cooldown", &self.cooldown)
            .finish()
    }
}

fn position_of(keys: &[SecretString], key: &SecretString) -> Option<usize> {
    keys.iter()
        .position(|k| k.expose_secret() == key.expose_secret())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn pool_of(n: usize) -> KeyPool {
        let keys: Vec<String> = (0..n).map(|i| format!("test-key-{i}")).collect();
        KeyPool::from_plain(&keys, Duration::from_secs(60))
    }

    fn exposed(key: &SecretString) -> &str {
        key.expose_secret()
    }

    #[test]
    fn empty_pool_signals_no_keys_configured() {
        let pool = pool_of(0);
        assert!(matches!(
            pool.current_key(),
            Err(AppError::NoKeysConfigured)
        ));
    }

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(5)]
    fn healthy_pool_cycles_through_all_keys(#[case] n: usize) {
        let pool = pool_of(n);
        for round in 0..2 {
            for i in 0..n {
                let key = pool.current_key().unwrap();
                assert_eq!(
                    exposed(&key),
                    format!("test-key-{i}"),
                    "round {round}: unexpected key at position {i}"
                );
                pool.advance();
            }
        }
    }

    #[test]
    fn advance_is_noop_for_single_key_pool() {
        let pool = pool_of(1);
        pool.advance();
        assert_eq!(exposed(&pool.current_key().unwrap()), "test-key-0");
    }

    #[test]
    fn mark_failed_skips_key_and_rotates() {
        let pool = pool_of(3);
        let first = pool.current_key().unwrap();
        pool.mark_failed(&first);

        let next = pool.current_key().unwrap();
        assert_eq!(exposed(&next), "test-key-1");
    }

    #[test]
    fn all_failed_clears_cooldowns_and_returns_first_key() {
        let pool = pool_of(3);
        for _ in 0..3 {
            let key = pool.current_key().unwrap();
            pool.mark_failed(&key);
        }

        // Liveness: never blocks or errors when the pool is non-empty.
        let key = pool.current_key().unwrap();
        assert_eq!(exposed(&key), "test-key-0");

        // Cooldowns were cleared entirely, so rotation works again.
        pool.advance();
        assert_eq!(exposed(&pool.current_key().unwrap()), "test-key-1");
    }

    #[test]
    fn clear_failure_restores_key_to_rotation() {
        let pool = pool_of(2);
        let first = pool.current_key().unwrap();
        pool.mark_failed(&first);
        pool.clear_failure(&first);

        // Cursor moved to key 1 on failure, but key 0 is selectable again.
        assert_eq!(exposed(&pool.current_key().unwrap()), "test-key-1");
        pool.advance();
        assert_eq!(exposed(&pool.current_key().unwrap()), "test-key-0");
    }

    #[test]
    fn expired_cooldown_makes_key_selectable_again() {
        let keys = vec!["a".to_string(), "b".to_string()];
        let pool = KeyPool::from_plain(&keys, Duration::from_millis(10));
        let first = pool.current_key().unwrap();
        pool.mark_failed(&first);

        std::thread::sleep(Duration::from_millis(20));
        pool.advance(); // cursor back to "a"
        assert_eq!(exposed(&pool.current_key().unwrap()), "a");
    }

    #[test]
    fn preview_masks_key_material() {
        let key = SecretString::new("sk-1234567890abcdef".to_string());
        let preview = KeyPool::preview(&key);
        assert!(preview.len() < "sk-1234567890abcdef".len());
        assert!(!preview.contains("1234567890"));
    }

    #[test]
    fn preview_handles_multibyte_keys() {
        let key = SecretString::new("مفتاح-سري-١٢٣٤٥٦".to_string());
        let preview = KeyPool::preview(&key);
        assert!(preview.contains("..."));
        assert!(!preview.contains("سري"));

        let short = SecretString::new("béta".to_string());
        assert_eq!(KeyPool::preview(&short), "****");
    }
}
