//! Per-client rate limiting for the API mount point.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::config::schema::RateLimitConfig;

/// A simple token bucket refilled continuously from elapsed time.
struct TokenBucket {
    tokens: f64,
    last_update: Instant,
}

impl TokenBucket {
    fn new(capacity: f64) -> Self {
        Self {
            tokens: capacity,
            last_update: Instant::now(),
        }
    }

    fn try_acquire(&mut self, capacity: f64, refill_rate: f64) -> bool {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update).as_secs_f64();

        // Refill tokens
        self.tokens = (self.tokens + elapsed * refill_rate).min(capacity);
        self.last_update = now;

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }
}

/// Bucket map plus the time of the last stale-entry sweep.
struct Buckets {
    map: HashMap<String, TokenBucket>,
    last_purge: Instant,
}

/// Shared state for the per-client rate limiter.
///
/// The window in config is expressed as "N requests per W seconds"; the
/// bucket holds N tokens and refills at N/W per second. Clients idle
/// for a full window are swept from the map, at most once per window,
/// so the map tracks active clients rather than every address ever seen.
pub struct RateLimiterState {
    buckets: Mutex<Buckets>,
    capacity: f64,
    refill_per_sec: f64,
    window: Duration,
}

impl RateLimiterState {
    pub fn new(config: &RateLimitConfig) -> Self {
        let capacity = config.max_requests as f64;
        let window_secs = config.window_secs.max(1);
        Self {
            buckets: Mutex::new(Buckets {
                map: HashMap::new(),
                last_purge: Instant::now(),
            }),
            capacity,
            refill_per_sec: capacity / window_secs as f64,
            window: Duration::from_secs(window_secs),
        }
    }

    /// Take one token for `key`, refilling from elapsed time first.
    pub fn check(&self, key: &str) -> bool {
        let mut buckets = self.buckets.lock().expect("rate limiter mutex poisoned");

        let now = Instant::now();
        if now.duration_since(buckets.last_purge) >= self.window {
            let window = self.window;
            buckets
                .map
                .retain(|_, bucket| now.duration_since(bucket.last_update) < window);
            buckets.last_purge = now;
        }

        let bucket = buckets
            .map
            .entry(key.to_string())
            .or_insert_with(|| TokenBucket::new(self.capacity));

        bucket.try_acquire(self.capacity, self.refill_per_sec)
    }

    #[cfg(test)]
    fn tracked_clients(&self) -> usize {
        self.buckets.lock().unwrap().map.len()
    }
}

/// Middleware function applying the rate limit to a request.
pub async fn rate_limit_middleware(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(state): State<Arc<RateLimiterState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let key = addr.ip().to_string();

    if state.check(&key) {
        next.run(request).await
    } else {
        tracing::warn!(client = %key, "Rate limit exceeded");
        let mut response = Response::new(Body::from(
            "Too many requests from this IP, please try again later.",
        ));
        *response.status_mut() = StatusCode::TOO_MANY_REQUESTS;
        response
    }
}
