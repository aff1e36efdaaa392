//! Authentication module
//!
//! A client is "application authenticated" when it holds a non-empty API
//! token. By default the token travels as the `api_token` query parameter;
//! [`TokenPlacement::Header`] swaps in header placement instead.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{
    ApiToken, AuthPrecedence, TokenPlacement, DEFAULT_TOKEN_HEADER, DEFAULT_TOKEN_PARAM,
};

#[cfg(test)]
mod tests;
