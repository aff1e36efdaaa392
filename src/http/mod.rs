//! HTTP client module
//!
//! Provides the request pipeline and everything it reads or produces.
//!
//! # Features
//!
//! - **Request Pipeline**: auth merging, convenience headers, idempotent path escaping
//! - **Last Response**: every exchange is recorded, failed ones included
//! - **Rate Limit Tracking**: quota snapshot from `X-RateLimit-*` headers
//! - **Middleware**: ordered request/response hooks
//! - **Throttling**: optional token bucket using governor

mod client;
mod middleware;
mod rate_limit;
mod request;
mod response;
mod throttle;

pub use client::Client;
pub use middleware::{Middleware, MiddlewareChain};
pub use rate_limit::{RateLimit, LIMIT_HEADER, REMAINING_HEADER, RESET_HEADER};
pub use request::{escape_path, RequestOptions, RequestSpec, CONVENIENCE_HEADERS};
pub use response::Response;
pub use throttle::Throttle;
