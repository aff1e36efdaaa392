//! Authenticator implementation
//!
//! Decides whether a client is application authenticated and produces the
//! payload attached to each request. Pure function of configuration.

use super::types::{ApiToken, AuthPrecedence, TokenPlacement};
use crate::config::ClientConfig;
use crate::types::QueryMap;
use url::Url;

/// Authenticator decides how the API token is attached to requests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Authenticator {
    token: Option<ApiToken>,
    placement: TokenPlacement,
    precedence: AuthPrecedence,
}

impl Authenticator {
    /// Create a new authenticator
    pub fn new(
        token: Option<ApiToken>,
        placement: TokenPlacement,
        precedence: AuthPrecedence,
    ) -> Self {
        Self {
            token,
            placement,
            precedence,
        }
    }

    /// Build from a resolved client configuration
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            config.api_token.clone(),
            config.token_placement.clone(),
            config.auth_precedence,
        )
    }

    /// True iff an API token is configured and non-empty
    pub fn is_application_authenticated(&self) -> bool {
        self.token.as_ref().is_some_and(|t| !t.is_empty())
    }

    /// Query payload carrying the token.
    ///
    /// Empty unless authenticated with query placement.
    pub fn application_authentication(&self) -> QueryMap {
        let mut payload = QueryMap::new();
        if let (Some(token), TokenPlacement::Query { param }) = (self.active_token(), &self.placement)
        {
            payload.insert(param.clone(), token.expose().to_string());
        }
        payload
    }

    /// Merge the auth payload into outgoing query parameters
    pub fn merge_query(&self, query: &mut QueryMap) {
        for (key, value) in self.application_authentication() {
            match self.precedence {
                AuthPrecedence::AuthWins => {
                    query.insert(key, value);
                }
                AuthPrecedence::CallerWins => {
                    query.entry(key).or_insert(value);
                }
            }
        }
    }

    /// Header carrying the token, for header placement
    pub fn header(&self) -> Option<(&str, &str)> {
        match (self.active_token(), &self.placement) {
            (Some(token), TokenPlacement::Header { name }) => Some((name.as_str(), token.expose())),
            _ => None,
        }
    }

    /// Name of the query parameter used for the token, if any
    pub fn query_param(&self) -> Option<&str> {
        match &self.placement {
            TokenPlacement::Query { param } => Some(param.as_str()),
            TokenPlacement::Header { .. } => None,
        }
    }

    /// Copy of `url` with the token's query value masked, for display
    pub fn redact_url(&self, url: &Url) -> Url {
        let (Some(token), Some(param)) = (self.active_token(), self.query_param()) else {
            return url.clone();
        };
        if !url.query_pairs().any(|(k, _)| k == param) {
            return url.clone();
        }

        let masked = token.masked();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| {
                let v = if k == param { masked.clone() } else { v.into_owned() };
                (k.into_owned(), v)
            })
            .collect();

        let mut redacted = url.clone();
        redacted.query_pairs_mut().clear().extend_pairs(pairs);
        redacted
    }

    fn active_token(&self) -> Option<&ApiToken> {
        self.token.as_ref().filter(|t| !t.is_empty())
    }
}
