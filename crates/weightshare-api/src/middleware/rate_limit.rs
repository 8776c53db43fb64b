//! Token bucket rate limiter middleware.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use tokio::sync::Mutex;

use weightshare_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Buckets kept before idle, fully refilled ones are dropped.
const MAX_TRACKED_CLIENTS: usize = 10_000;

/// Simple in-memory token bucket rate limiter.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    /// Client key → bucket state.
    buckets: Arc<Mutex<HashMap<String, TokenBucket>>>,
    /// Maximum tokens per bucket.
    max_tokens: u32,
    /// Token refill rate per second.
    refill_rate: f64,
}

#[derive(Debug, Clone)]
struct TokenBucket {
    tokens: f64,
    last_refill: Instant,
}

impl TokenBucket {
    fn refill(&mut self, now: Instant, rate: f64, max: f64) {
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        self.tokens = (self.tokens + elapsed * rate).min(max);
        self.last_refill = now;
    }
}

impl RateLimiter {
    /// Creates a new rate limiter.
    pub fn new(max_tokens: u32, refill_rate: f64) -> Self {
        Self {
            buckets: Arc::new(Mutex::new(HashMap::new())),
            max_tokens,
            refill_rate,
        }
    }

    /// Attempts to consume a token for the given key.
    pub async fn check(&self, key: &str) -> bool {
        let mut buckets = self.buckets.lock().await;
        let now = Instant::now();
        let max = f64::from(self.max_tokens);

        if buckets.len() >= MAX_TRACKED_CLIENTS && !buckets.contains_key(key) {
            let rate = self.refill_rate;
            buckets.retain(|_, bucket| {
                bucket.refill(now, rate, max);
                bucket.tokens < max
            });
        }

        let bucket = buckets.entry(key.to_string()).or_insert(TokenBucket {
            tokens: max,
            last_refill: now,
        });
        bucket.refill(now, self.refill_rate, max);

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }
}

/// Rejects requests from clients that have exhausted their bucket.
pub async fn rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let key = client_key(
        request.headers(),
        peer,
        state.config.share.trust_forwarded_for,
    );

    if !state.rate_limiter.check(&key).await {
        tracing::warn!(client = %key, path = %request.uri().path(), "Rate limit exceeded");
        return Err(AppError::rate_limited("Too many share requests, try again later").into());
    }

    Ok(next.run(request).await)
}

/// Socket peer address, or `unknown` when there is none.
///
/// With `trust_forwarded_for`, the first `X-Forwarded-For` hop takes
/// precedence over the peer.
pub fn client_key(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    trust_forwarded_for: bool,
) -> String {
    let forwarded = if trust_forwarded_for {
        headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    } else {
        None
    };

    forwarded
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}
