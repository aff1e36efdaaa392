//! Configuration store
//!
//! Defaults come from the environment (with hardcoded fallbacks) and are
//! captured once in a [`Defaults`] value. Each client resolves its own
//! [`ClientConfig`] from caller [`ClientOptions`] over those defaults.

mod defaults;
mod types;

pub use defaults::{env_keys, parse_flag, Defaults, API_ENDPOINT, MEDIA_TYPE, USER_AGENT};
pub use types::{ClientConfig, ClientOptions, ConnectionOptions};
