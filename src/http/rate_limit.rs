//! Rate limit tracking
//!
//! Quota state is read from the `X-RateLimit-*` headers of a single
//! response. It is never polled or cached on its own.

use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use serde::Serialize;

/// Header carrying the request quota
pub const LIMIT_HEADER: &str = "x-ratelimit-limit";

/// Header carrying the remaining requests
pub const REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Header carrying the reset time (Unix seconds)
pub const RESET_HEADER: &str = "x-ratelimit-reset";

/// Quota state from one exchange. Missing headers are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RateLimit {
    /// Requests allowed per window
    pub limit: Option<u32>,
    /// Requests left in the window
    pub remaining: Option<u32>,
    /// When the window resets
    pub resets_at: Option<DateTime<Utc>>,
}

impl RateLimit {
    /// Snapshot for "no response yet": everything unknown
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Read quota headers
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let number = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse::<i64>().ok())
        };

        Self {
            limit: number(LIMIT_HEADER).and_then(|n| u32::try_from(n).ok()),
            remaining: number(REMAINING_HEADER).map(|n| u32::try_from(n.max(0)).unwrap_or(u32::MAX)),
            resets_at: number(RESET_HEADER).and_then(|secs| DateTime::from_timestamp(secs, 0)),
        }
    }

    /// Whether any quota header was present
    pub fn is_known(&self) -> bool {
        self.limit.is_some() || self.remaining.is_some() || self.resets_at.is_some()
    }

    /// False only when `remaining` is known to be zero
    pub fn has_headroom(&self) -> bool {
        self.remaining.map_or(true, |r| r > 0)
    }

    /// Seconds until the window resets, relative to now
    pub fn resets_in(&self) -> Option<u64> {
        self.resets_in_from(Utc::now())
    }

    /// Seconds until the window resets, relative to `now`. Zero once past.
    pub fn resets_in_from(&self, now: DateTime<Utc>) -> Option<u64> {
        self.resets_at
            .map(|at| u64::try_from((at - now).num_seconds().max(0)).unwrap_or(0))
    }
}
