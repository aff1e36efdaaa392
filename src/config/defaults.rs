//! Process-wide defaults
//!
//! Read once from the environment into an explicit [`Defaults`] value that
//! callers pass into client constructors. Nothing here is global or
//! mutable after construction.

use crate::auth::ApiToken;
use tracing::warn;

/// Default API endpoint
pub const API_ENDPOINT: &str = "http://ohana-api-demo.herokuapp.com/api";

/// Default media type
pub const MEDIA_TYPE: &str = "application/vnd.ohanapi-v1+json";

/// Default User-Agent header string
pub const USER_AGENT: &str = concat!("ohanakapa-rs/", env!("CARGO_PKG_VERSION"));

/// Environment variable names
pub mod env_keys {
    pub const API_ENDPOINT: &str = "OHANA_API_ENDPOINT";
    pub const USER_AGENT: &str = "OHANAKAPA_USER_AGENT";
    pub const API_TOKEN: &str = "OHANAKAPA_API_TOKEN";
    pub const DEFAULT_MEDIA_TYPE: &str = "OHANAKAPA_DEFAULT_MEDIA_TYPE";
    pub const AUTO_PAGINATE: &str = "OHANAKAPA_AUTO_PAGINATE";
    pub const PER_PAGE: &str = "OHANAKAPA_PER_PAGE";
    pub const PROXY: &str = "OHANAKAPA_PROXY";
}

/// Default configuration values, sourced from the environment with
/// hardcoded fallbacks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    pub api_endpoint: String,
    pub user_agent: String,
    pub default_media_type: String,
    pub api_token: Option<ApiToken>,
    pub auto_paginate: bool,
    pub per_page: Option<u32>,
    pub proxy: Option<String>,
}

impl Default for Defaults {
    /// Hardcoded fallbacks only, ignoring the environment
    fn default() -> Self {
        Self {
            api_endpoint: API_ENDPOINT.to_string(),
            user_agent: USER_AGENT.to_string(),
            default_media_type: MEDIA_TYPE.to_string(),
            api_token: None,
            auto_paginate: false,
            per_page: None,
            proxy: None,
        }
    }
}

impl Defaults {
    /// Read defaults from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read defaults through an arbitrary lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let fallback = Self::default();

        let per_page = get(env_keys::PER_PAGE).and_then(|raw| match raw.trim().parse::<u32>() {
            Ok(n) if n > 0 => Some(n),
            _ => {
                warn!("Ignoring invalid {}={raw:?}", env_keys::PER_PAGE);
                None
            }
        });

        Self {
            api_endpoint: get(env_keys::API_ENDPOINT).unwrap_or(fallback.api_endpoint),
            user_agent: get(env_keys::USER_AGENT).unwrap_or(fallback.user_agent),
            default_media_type: get(env_keys::DEFAULT_MEDIA_TYPE)
                .unwrap_or(fallback.default_media_type),
            api_token: get(env_keys::API_TOKEN).map(ApiToken::from),
            auto_paginate: get(env_keys::AUTO_PAGINATE).is_some_and(|v| parse_flag(&v)),
            per_page,
            proxy: get(env_keys::PROXY),
        }
    }
}

/// Parse a boolean-ish flag value
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on" | "y" | "t"
    )
}
