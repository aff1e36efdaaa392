// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # ohanakapa
//!
//! A hypermedia-aware HTTP client for the Ohana API.
//!
//! ## Features
//!
//! - **Request Pipeline**: API token auth, media type negotiation, path escaping
//! - **Hypermedia**: `Link` header and `*_url` relations, followed without URL building
//! - **Auto Pagination**: follows `next` until exhausted or out of quota
//! - **Rate Limits**: quota snapshot from every response
//! - **Typed Errors**: HTTP statuses classified into an error taxonomy
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ohanakapa::{Client, ClientOptions, RequestOptions, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Client::new(ClientOptions::new().auto_paginate(true))?;
//!
//!     // Discover the API
//!     let root = client.root().await?;
//!
//!     // Fetch every page of a search
//!     let results = client
//!         .paginate("search", RequestOptions::new().field("keyword", "food"))
//!         .await?;
//!
//!     println!("{} results, {:?}", results.as_array().map_or(0, Vec::len), client.rate_limit());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            Client                               │
//! │  get/post/put/patch/delete/head   root()   paginate()   follow()│
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬─────────────┐
//! │  Config  │   Auth    │   Pipeline    │ Hypermedia│   Status    │
//! ├──────────┼───────────┼───────────────┼───────────┼─────────────┤
//! │ Env      │ Query     │ Middleware    │ Link hdr  │ Probes      │
//! │ YAML     │ Header    │ Throttle      │ *_url     │ /status     │
//! │ Options  │ Masking   │ Classify      │ Relations │             │
//! └──────────┴───────────┴───────────────┴───────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types and status classification
pub mod error;

/// Common types and type aliases
pub mod types;

/// Environment defaults and client options
pub mod config;

/// API token authentication
pub mod auth;

/// Links and relations
pub mod hypermedia;

/// Request pipeline, last response and rate limits
pub mod http;

/// Auto pagination over `next` links
pub mod pagination;

/// Health probes
pub mod status;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{ApiError, Error, ErrorKind, Result};
pub use types::*;

// Re-export commonly used types
pub use auth::ApiToken;
pub use config::{ClientConfig, ClientOptions, Defaults};
pub use http::{Client, Middleware, MiddlewareChain, RateLimit, RequestOptions, Response};
pub use hypermedia::{Link, Relations, Resource};
pub use status::{StatusChecker, StatusReport};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
