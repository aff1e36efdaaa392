//! Hypermedia model
//!
//! Relations come from two places: the `Link` response header (used by the
//! pagination engine to find `next`) and `*_url` fields inside resource
//! bodies. Either kind of [`Link`] can be fetched with
//! [`Client::follow`](crate::http::Client::follow).

mod link;
mod resource;

pub use link::{parse_link_header, Link, Relations};
pub use resource::Resource;
