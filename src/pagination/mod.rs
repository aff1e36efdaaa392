//! Pagination module
//!
//! Follows `next` relations from the `Link` header until the collection is
//! exhausted or the server-reported quota runs out.
//!
//! # Overview
//!
//! [`Client::paginate`](crate::Client::paginate) fetches the first page and,
//! when auto-paginate is enabled, keeps following `next`. Pages are combined
//! by appending JSON arrays, or by a caller-supplied combiner through
//! [`Client::paginate_with`](crate::Client::paginate_with).

mod engine;
mod types;

pub use engine::append_page;
pub use types::{PaginationState, StopReason, DEFAULT_PER_PAGE, PER_PAGE_PARAM};

#[cfg(test)]
mod tests;
