// src/executor.rs

use crate::error::{AppError, Result};
use crate::gemini::GeminiClient;
use crate::key_pool::KeyPool;
use reqwest::Client;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

/// Runs a unit of work against the key currently selected by the pool,
/// rotating keys and retrying on failure up to a bounded attempt count.
///
/// Rotating on failure spreads rate-limit pressure across upstream quotas
/// and hides transient throttling from the end user unless every attempt is
/// exhausted.
pub struct RetryExecutor {
    pool: Arc<KeyPool>,
    http: Client,
    base_url: String,
    model: String,
    max_attempts: u32,
}

impl RetryExecutor {
    pub fn new(
        pool: Arc<KeyPool>,
        http: Client,
        base_url: &str,
        model: &str,
        max_attempts: u32,
    ) -> Self {
        Self {
            pool,
            http,
            base_url: base_url.to_string(),
            model: model.to_string(),
            max_attempts,
        }
    }

    pub fn key_pool(&self) -> &Arc<KeyPool> {
        &self.pool
    }

    /// Executes `operation` with up to `max_attempts` key rotations.
    ///
    /// An empty pool fails immediately with `NoKeysConfigured`, consuming no
    /// attempts. The first success clears the key's failure record and
    /// returns; each failure marks the key and rotates. After the budget is
    /// spent the last recorded error is returned. The attempt counter is
    /// fresh per call.
    pub async fn run_with_retry<T, F, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn(GeminiClient) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut last_error: Option<AppError> = None;

        for attempt in 1..=self.max_attempts {
            let key = self.pool.current_key()?;
            debug!(
                key.preview = %KeyPool::preview(&key),
                attempt,
                max_attempts = self.max_attempts,
                "Attempting Gemini call"
            );

            let client = GeminiClient::new(
                self.http.clone(),
                &self.base_url,
                &self.model,
                key.clone(),
            );
            match operation(client).await {
                Ok(result) => {
                    self.pool.clear_failure(&key);
                    return Ok(result);
                }
                Err(e) => {
                    self.pool.mark_failed(&key);
                    warn!(
                        error = %e,
                        key.preview = %KeyPool::preview(&key),
                        attempt,
                        max_attempts = self.max_attempts,
                        "Gemini call failed"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| AppError::upstream("retry budget exhausted without an attempt")))
    }

    /// Convenience wrapper: one prompt in, raw candidate text out.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        self.run_with_retry(|client| async move { client.generate_json(prompt).await })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    fn executor_with_keys(keys: &[&str], max_attempts: u32) -> RetryExecutor {
        let keys: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        let pool = Arc::new(KeyPool::from_plain(&keys, Duration::from_secs(60)));
        RetryExecutor::new(
            pool,
            Client::new(),
            "http://localhost:0",
            "gemini-2.5-flash",
            max_attempts,
        )
    }

    #[tokio::test]
    async fn empty_pool_makes_zero_attempts() {
        let executor = executor_with_keys(&[], 3);
        let calls = AtomicU32::new(0);

        let result: Result<()> = executor
            .run_with_retry(|_client| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(()) }
            })
            .await;

        assert!(matches!(result, Err(AppError::NoKeysConfigured)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn always_failing_operation_runs_exactly_max_attempts() {
        let executor = executor_with_keys(&["k1", "k2"], 3);
        let calls = AtomicU32::new(0);

        let result: Result<()> = executor
            .run_with_retry(|_client| {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move { Err(AppError::upstream(format!("boom {n}"))) }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // The last recorded error is the one re-raised.
        match result {
            Err(AppError::Upstream { message }) => assert_eq!(message, "boom 2"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn fail_once_then_succeed_takes_two_attempts() {
        let executor = executor_with_keys(&["k1", "k2"], 3);
        let calls = AtomicU32::new(0);

        let result = executor
            .run_with_retry(|_client| {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 0 {
                        Err(AppError::upstream("transient"))
                    } else {
                        Ok("answer".to_string())
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), "answer");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failure_rotates_to_next_key() {
        let keys = vec!["k1".to_string(), "k2".to_string()];
        let pool = Arc::new(KeyPool::from_plain(&keys, Duration::from_secs(60)));
        let executor = RetryExecutor::new(
            pool.clone(),
            Client::new(),
            "http://localhost:0",
            "gemini-2.5-flash",
            1,
        );

        let result: Result<()> = executor
            .run_with_retry(|_client| async { Err(AppError::upstream("boom")) })
            .await;
        assert!(result.is_err());

        // k1 failed and is cooling down; the pool now selects k2.
        use secrecy::ExposeSecret;
        assert_eq!(pool.current_key().unwrap().expose_secret(), "k2");
    }

    #[tokio::test]
    async fn transport_errors_never_render_key_material() {
        let keys = vec!["secret-key-123456".to_string()];
        let pool = Arc::new(KeyPool::from_plain(&keys, Duration::from_secs(60)));
        // Port 9 (discard) is unroutable; the request fails at transport level.
        let executor = RetryExecutor::new(
            pool,
            Client::new(),
            "http://127.0.0.1:9",
            "gemini-2.5-flash",
            1,
        );

        let err = executor.generate("prompt").await.unwrap_err();
        let rendered = format!("{err}");
        assert!(rendered.contains("Gemini"));
        assert!(!rendered.contains("secret-key-123456"));
    }

    #[tokio::test]
    async fn success_clears_failure_record() {
        let keys = vec!["k1".to_string()];
        let pool = Arc::new(KeyPool::from_plain(&keys, Duration::from_secs(60)));
        let executor = RetryExecutor::new(
            pool.clone(),
            Client::new(),
            "http://localhost:0",
            "gemini-2.5-flash",
            3,
        );

        let calls = AtomicU32::new(0);
        let result = executor
            .run_with_retry(|_client| {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 0 {
                        Err(AppError::upstream("transient"))
                    } else {
                        Ok(())
                    }
                }
            })
            .await;
        assert!(result.is_ok());

        // The single key succeeded on the second attempt, so its cooldown is
        // gone and selection does not need the liveness reset.
        assert!(pool.current_key().is_ok());
    }
}
