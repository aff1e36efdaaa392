//! Auth configuration types

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Number of mask characters shown in place of the token's head
const MASK_WIDTH: usize = 32;

/// Number of trailing token characters left visible
const VISIBLE_SUFFIX: usize = 4;

/// Default query parameter carrying the API token
pub const DEFAULT_TOKEN_PARAM: &str = "api_token";

/// Header used by [`TokenPlacement::Header`] when none is configured
pub const DEFAULT_TOKEN_HEADER: &str = "X-Api-Token";

/// An API token that never renders in clear text.
///
/// `Debug` and `Display` both print 32 `*` followed by the last four
/// characters, so any struct holding one can derive `Debug` safely.
#[derive(Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct ApiToken(String);

impl ApiToken {
    /// Wrap a raw token
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for placing on the wire
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the token is empty (and so does not authenticate)
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Masked rendering of the token
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        let suffix: String = if chars.len() > VISIBLE_SUFFIX {
            chars[chars.len() - VISIBLE_SUFFIX..].iter().collect()
        } else {
            String::new()
        };
        format!("{}{suffix}", "*".repeat(MASK_WIDTH))
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiToken({})", self.masked())
    }
}

impl fmt::Display for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl From<String> for ApiToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl FromStr for ApiToken {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<&str> for ApiToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

/// Where the API token travels on outgoing requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "in")]
pub enum TokenPlacement {
    /// Query parameter (the default authentication mode)
    Query {
        /// Parameter name
        #[serde(default = "default_token_param")]
        param: String,
    },
    /// Request header
    Header {
        /// Header name
        #[serde(default = "default_token_header")]
        name: String,
    },
}

impl Default for TokenPlacement {
    fn default() -> Self {
        Self::Query {
            param: DEFAULT_TOKEN_PARAM.to_string(),
        }
    }
}

fn default_token_param() -> String {
    DEFAULT_TOKEN_PARAM.to_string()
}

fn default_token_header() -> String {
    DEFAULT_TOKEN_HEADER.to_string()
}

/// Which side wins when a caller's query key collides with the auth key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthPrecedence {
    /// Auth payload is merged last and overwrites the caller's value
    #[default]
    AuthWins,
    /// Auth payload only fills in a missing key
    CallerWins,
}
