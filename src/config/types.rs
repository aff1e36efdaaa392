//! Client configuration types
//!
//! [`ClientOptions`] holds caller overrides (every field optional);
//! [`ClientConfig`] is the immutable result of resolving them over
//! [`Defaults`].

use super::defaults::Defaults;
use crate::auth::{ApiToken, AuthPrecedence, TokenPlacement};
use crate::error::{Error, Result, ResultExt};
use crate::http::MiddlewareChain;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Connection Options
// ============================================================================

/// Transport-level settings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionOptions {
    /// Whole-request timeout in seconds
    pub timeout_secs: Option<u64>,
    /// Connect timeout in seconds
    pub connect_timeout_secs: Option<u64>,
    /// Extra headers sent with every request
    pub headers: BTreeMap<String, String>,
    /// Client-side throttle, in requests per second
    pub requests_per_second: Option<u32>,
}

impl ConnectionOptions {
    /// Whole-request timeout
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Connect timeout
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }
}

// ============================================================================
// Client Options (overrides)
// ============================================================================

/// Caller-supplied overrides; `None` falls back to [`Defaults`]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientOptions {
    pub api_endpoint: Option<String>,
    pub user_agent: Option<String>,
    pub default_media_type: Option<String>,
    pub api_token: Option<ApiToken>,
    pub auto_paginate: Option<bool>,
    pub per_page: Option<u32>,
    pub proxy: Option<String>,
    pub connection_options: Option<ConnectionOptions>,
    pub token_placement: Option<TokenPlacement>,
    pub auth_precedence: Option<AuthPrecedence>,
    #[serde(skip)]
    pub middleware: Option<MiddlewareChain>,
}

impl ClientOptions {
    /// Empty overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse overrides from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load overrides from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml_str(&content)
    }

    #[must_use]
    pub fn api_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api_endpoint = Some(endpoint.into());
        self
    }

    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    #[must_use]
    pub fn default_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.default_media_type = Some(media_type.into());
        self
    }

    #[must_use]
    pub fn api_token(mut self, token: impl Into<ApiToken>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn auto_paginate(mut self, enabled: bool) -> Self {
        self.auto_paginate = Some(enabled);
        self
    }

    #[must_use]
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    #[must_use]
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    #[must_use]
    pub fn connection_options(mut self, options: ConnectionOptions) -> Self {
        self.connection_options = Some(options);
        self
    }

    #[must_use]
    pub fn token_placement(mut self, placement: TokenPlacement) -> Self {
        self.token_placement = Some(placement);
        self
    }

    #[must_use]
    pub fn auth_precedence(mut self, precedence: AuthPrecedence) -> Self {
        self.auth_precedence = Some(precedence);
        self
    }

    #[must_use]
    pub fn middleware(mut self, chain: MiddlewareChain) -> Self {
        self.middleware = Some(chain);
        self
    }

    /// Layer `other` on top of `self`; fields set in `other` win
    #[must_use]
    pub fn merge(self, other: ClientOptions) -> Self {
        Self {
            api_endpoint: other.api_endpoint.or(self.api_endpoint),
            user_agent: other.user_agent.or(self.user_agent),
            default_media_type: other.default_media_type.or(self.default_media_type),
            api_token: other.api_token.or(self.api_token),
            auto_paginate: other.auto_paginate.or(self.auto_paginate),
            per_page: other.per_page.or(self.per_page),
            proxy: other.proxy.or(self.proxy),
            connection_options: other.connection_options.or(self.connection_options),
            token_placement: other.token_placement.or(self.token_placement),
            auth_precedence: other.auth_precedence.or(self.auth_precedence),
            middleware: other.middleware.or(self.middleware),
        }
    }
}

// ============================================================================
// Resolved Client Config
// ============================================================================

/// Fully resolved, immutable client configuration.
///
/// `PartialEq` is field-wise; middleware chains compare by layer names.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_endpoint: String,
    pub user_agent: String,
    pub default_media_type: String,
    pub api_token: Option<ApiToken>,
    pub auto_paginate: bool,
    pub per_page: Option<u32>,
    pub proxy: Option<String>,
    pub connection_options: ConnectionOptions,
    pub middleware: MiddlewareChain,
    pub token_placement: TokenPlacement,
    pub auth_precedence: AuthPrecedence,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::resolve(ClientOptions::default(), &Defaults::default())
    }
}

impl ClientConfig {
    /// Resolve overrides over defaults
    pub fn resolve(options: ClientOptions, defaults: &Defaults) -> Self {
        Self {
            api_endpoint: options
                .api_endpoint
                .unwrap_or_else(|| defaults.api_endpoint.clone()),
            user_agent: options
                .user_agent
                .unwrap_or_else(|| defaults.user_agent.clone()),
            default_media_type: options
                .default_media_type
                .unwrap_or_else(|| defaults.default_media_type.clone()),
            api_token: options.api_token.or_else(|| defaults.api_token.clone()),
            auto_paginate: options.auto_paginate.unwrap_or(defaults.auto_paginate),
            per_page: options.per_page.or(defaults.per_page),
            proxy: options.proxy.or_else(|| defaults.proxy.clone()),
            connection_options: options.connection_options.unwrap_or_default(),
            middleware: options.middleware.unwrap_or_default(),
            token_placement: options.token_placement.unwrap_or_default(),
            auth_precedence: options.auth_precedence.unwrap_or_default(),
        }
    }

    /// Resolve overrides over the process environment
    pub fn from_env(options: ClientOptions) -> Self {
        Self::resolve(options, &Defaults::from_env())
    }

    /// Check values the transport will need to parse
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api_endpoint)
            .map_err(|e| Error::invalid_value("api_endpoint", e.to_string()))?;

        if let Some(proxy) = &self.proxy {
            url::Url::parse(proxy).map_err(|e| Error::invalid_value("proxy", e.to_string()))?;
        }

        if self.per_page == Some(0) {
            return Err(Error::invalid_value("per_page", "must be greater than zero"));
        }

        if self.connection_options.requests_per_second == Some(0) {
            return Err(Error::invalid_value(
                "connection_options.requests_per_second",
                "must be greater than zero",
            ));
        }

        Ok(())
    }

    /// Compare with another configuration field by field
    pub fn same_options(&self, other: &ClientConfig) -> bool {
        self == other
    }
}
