//! # Request Admission
//!
//! A single token bucket shared by every route. Requests over the budget are
//! answered with 429 and a `RATE_LIMITED` entry in the usual error envelope,
//! so clients parse one shape for every failure.
//!
//! The bucket is built from `[http] rate_limit` / `ROSTER_RATE_LIMIT` by
//! [`HttpConfig::rate_limiter`](crate::config::HttpConfig::rate_limiter);
//! a rate of 0 means no bucket and no middleware.

use super::types::{FieldResponse, RATE_LIMITED};
use axum::{
    Json,
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{DefaultDirectRateLimiter, Quota};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Shared admission budget, in requests per second.
#[derive(Clone)]
pub struct RequestLimiter {
    bucket: Arc<DefaultDirectRateLimiter>,
}

impl RequestLimiter {
    /// Allow `per_second` requests each second, with an equal burst.
    #[must_use]
    pub fn per_second(per_second: NonZeroU32) -> Self {
        Self {
            bucket: Arc::new(DefaultDirectRateLimiter::direct(Quota::per_second(
                per_second,
            ))),
        }
    }

    /// Take one request from the budget.
    pub fn admit(&self) -> bool {
        self.bucket.check().is_ok()
    }
}

/// Admit the request or answer with 429.
pub async fn rate_limit_middleware(
    State(limiter): State<RequestLimiter>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if limiter.admit() {
        return next.run(request).await;
    }

    tracing::warn!(
        event = "rate_limited",
        method = %request.method(),
        path = %request.uri().path(),
        "Request over rate limit"
    );
    let body = FieldResponse::rejected(RATE_LIMITED, "Too many requests, retry shortly");
    (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_equals_rate() {
        let limiter = RequestLimiter::per_second(NonZeroU32::MIN.saturating_add(2));
        assert!((0..3).all(|_| limiter.admit()));
        assert!(!limiter.admit());
    }

    #[test]
    fn clones_share_one_budget() {
        let limiter = RequestLimiter::per_second(NonZeroU32::MIN);
        let other = limiter.clone();
        assert!(limiter.admit());
        assert!(!other.admit());
    }
}
