//! Client-side request throttle
//!
//! Uses the governor crate for token bucket rate limiting. Independent of
//! the server-reported quota in [`RateLimit`](super::RateLimit).

use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Token bucket limiting outgoing requests
#[derive(Clone)]
pub struct Throttle {
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>>,
    per_second: NonZeroU32,
}

impl Throttle {
    /// Allow `per_second` requests per second, bursting up to the same.
    /// Returns `None` for zero.
    pub fn per_second(per_second: u32) -> Option<Self> {
        let per_second = NonZeroU32::new(per_second)?;
        let quota = Quota::per_second(per_second).allow_burst(per_second);
        Some(Self {
            limiter: Arc::new(RateLimiter::direct(quota)),
            per_second,
        })
    }

    /// Configured rate
    pub fn rate(&self) -> u32 {
        self.per_second.get()
    }

    /// Wait until a request can be made
    pub async fn wait(&self) {
        self.limiter.until_ready().await;
    }

    /// Try to acquire a permit, returning immediately
    pub fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

impl std::fmt::Debug for Throttle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Throttle")
            .field("per_second", &self.per_second)
            .finish()
    }
}
