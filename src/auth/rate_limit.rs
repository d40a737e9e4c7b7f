use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::Mutex;

use crate::error::AppError;
use crate::AppState;

const MAX_REQUESTS: u32 = 5; // Max requests per window
const WINDOW_SECS: u64 = 60;

/// Fixed-window limiter keyed by client IP and path. Single-instance only.
#[derive(Clone)]
pub struct RateLimitState {
    entries: Arc<Mutex<HashMap<String, RateLimitEntry>>>,
    max_requests: u32,
    window: Duration,
}

struct RateLimitEntry {
    count: u32,
    window_start: Instant,
}

impl Default for RateLimitState {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimitState {
    pub fn new() -> Self {
        Self::with_limits(MAX_REQUESTS, Duration::from_secs(WINDOW_SECS))
    }

    pub fn with_limits(max_requests: u32, window: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            max_requests,
            window,
        }
    }

    /// Ok(remaining) while under the limit, Err(retry_after) once exhausted.
    pub async fn check(&self, key: &str) -> Result<u32, Duration> {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();

        let entry = entries.entry(key.to_string()).or_insert(RateLimitEntry {
            count: 0,
            window_start: now,
        });

        if now.duration_since(entry.window_start) > self.window {
            entry.count = 0;
            entry.window_start = now;
        }

        if entry.count >= self.max_requests {
            let retry_after = self
                .window
                .saturating_sub(now.duration_since(entry.window_start));
            return Err(retry_after);
        }

        entry.count += 1;
        Ok(self.max_requests - entry.count)
    }

    /// Drop entries whose window ended long ago.
    pub async fn cleanup(&self) {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        let keep_for = self.window * 2;

        entries.retain(|_, entry| now.duration_since(entry.window_start) < keep_for);
    }

    pub async fn tracked_keys(&self) -> usize {
        self.entries.lock().await.len()
    }
}

/// Periodically prune the limiter from a background task.
pub fn spawn_cleanup_worker(limiter: RateLimitState) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(WINDOW_SECS * 5));
        loop {
            interval.tick().await;
            limiter.cleanup().await;
            let keys = limiter.tracked_keys().await;
            tracing::debug!(keys, "Rate limiter pruned");
        }
    });
}

/// Rate limiting middleware for auth endpoints
pub async fn rate_limit_auth(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = addr.ip().to_string();
    let path = req.uri().path().to_string();

    // /login and /register are limited separately
    let key = format!("{}:{}", ip, path);

    match state.rate_limiter.check(&key).await {
        Ok(remaining) => {
            tracing::debug!(ip = %ip, path = %path, remaining = remaining, "Rate limit check passed");
            Ok(next.run(req).await)
        }
        Err(retry_after) => {
            tracing::warn!(
                ip = %ip,
                path = %path,
                retry_after_secs = retry_after.as_secs(),
                "Rate limit exceeded"
            );
            Err(AppError::RateLimited)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rate_limit_allows_under_limit() {
        let limiter = RateLimitState::new();

        for i in 0..MAX_REQUESTS {
            let result = limiter.check("test_key").await;
            assert!(result.is_ok(), "Request {} should be allowed", i + 1);
        }
    }

    #[tokio::test]
    async fn test_rate_limit_blocks_over_limit() {
        let limiter = RateLimitState::new();

        for _ in 0..MAX_REQUESTS {
            let _ = limiter.check("test_key").await;
        }

        let result = limiter.check("test_key").await;
        assert!(result.is_err(), "Request over limit should be blocked");
    }

    #[tokio::test]
    async fn test_different_keys_have_separate_limits() {
        let limiter = RateLimitState::new();

        for _ in 0..MAX_REQUESTS {
            let _ = limiter.check("key1").await;
        }

        let result = limiter.check("key2").await;
        assert!(result.is_ok(), "Different key should have separate limit");
    }

    #[tokio::test]
    async fn test_window_resets_after_expiry() {
        let limiter = RateLimitState::with_limits(1, Duration::from_millis(20));
        assert!(limiter.check("k").await.is_ok());
        assert!(limiter.check("k").await.is_err());

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(limiter.check("k").await.is_ok());
    }

    #[tokio::test]
    async fn test_cleanup_drops_stale_entries() {
        let limiter = RateLimitState::with_limits(3, Duration::from_millis(10));
        limiter.check("stale").await.unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        limiter.check("fresh").await.unwrap();

        limiter.cleanup().await;
        assert_eq!(limiter.tracked_keys().await, 1);
    }

    #[tokio::test]
    async fn test_cleanup_worker_prunes_in_background() {
        let limiter = RateLimitState::with_limits(3, Duration::from_millis(10));
        limiter.check("stale").await.unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;

        // First interval tick fires immediately
        spawn_cleanup_worker(limiter.clone());
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(limiter.tracked_keys().await, 0);
    }
}
