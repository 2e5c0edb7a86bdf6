//! Fixed-window per-client rate limiting.
//!
//! Requests are keyed by the client IP taken from connection info. Health
//! probes and CORS preflights are never counted. When the shared window map
//! is unavailable the limiter fails open.

use crate::api::error::ApiError;
use crate::config::RateLimitSettings;
use axum::extract::{ConnectInfo, Request, State};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
struct WindowSlot {
    started: Instant,
    count: u32,
}

/// Shared fixed-window counter.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    window: Duration,
    max: u32,
    windows: Arc<Mutex<HashMap<String, WindowSlot>>>,
}

impl RateLimiter {
    /// Creates a limiter from configured settings.
    #[must_use]
    pub fn new(settings: RateLimitSettings) -> Self {
        Self {
            window: settings.window,
            max: settings.max,
            windows: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Records one request for `key` and reports whether it is admitted.
    ///
    /// A window restarts, with its counter reset, once its duration has fully
    /// elapsed since the first admitted request. Elapsed windows are dropped
    /// from the map on every pass, so clients that never return do not pin a
    /// slot forever.
    #[must_use]
    pub fn admit(&self, key: &str) -> bool {
        let Ok(mut windows) = self.windows.lock() else {
            return true;
        };
        let now = Instant::now();
        windows.retain(|_, slot| now.duration_since(slot.started) < self.window);
        let slot = windows.entry(key.to_owned()).or_insert(WindowSlot {
            started: now,
            count: 0,
        });
        if slot.count >= self.max {
            return false;
        }
        slot.count += 1;
        true
    }
}

/// Middleware entry point; answers 429 once a client exhausts its window.
pub async fn rate_limit(
    State(limiter): State<RateLimiter>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() == Method::OPTIONS || request.uri().path() == "/health" {
        return next.run(request).await;
    }
    let key = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map_or_else(|| "unknown".to_owned(), |info| info.0.ip().to_string());
    if limiter.admit(&key) {
        next.run(request).await
    } else {
        tracing::warn!(client = %key, "rate limit exceeded");
        ApiError::too_many_requests().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max: u32, window: Duration) -> RateLimiter {
        RateLimiter::new(RateLimitSettings { window, max })
    }

    #[test]
    fn admits_up_to_the_window_maximum() {
        let limiter = limiter(3, Duration::from_secs(60));
        assert!(limiter.admit("10.0.0.1"));
        assert!(limiter.admit("10.0.0.1"));
        assert!(limiter.admit("10.0.0.1"));
        assert!(!limiter.admit("10.0.0.1"));
    }

    #[test]
    fn windows_are_tracked_per_client() {
        let limiter = limiter(1, Duration::from_secs(60));
        assert!(limiter.admit("10.0.0.1"));
        assert!(!limiter.admit("10.0.0.1"));
        assert!(limiter.admit("10.0.0.2"));
    }

    #[test]
    fn counter_resets_after_the_window_elapses() {
        let limiter = limiter(1, Duration::ZERO);
        assert!(limiter.admit("10.0.0.1"));
        // A zero-length window has always elapsed, so every request opens a
        // fresh one.
        assert!(limiter.admit("10.0.0.1"));
    }

    #[test]
    fn elapsed_windows_are_evicted_from_the_map() {
        let limiter = limiter(1, Duration::ZERO);
        for client in 0..1000 {
            assert!(limiter.admit(&format!("10.0.{}.{}", client / 256, client % 256)));
        }
        assert!(limiter.admit("10.1.0.1"));

        let windows = limiter.windows.lock().expect("window lock");
        assert_eq!(windows.len(), 1);
    }
}
