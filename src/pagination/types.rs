//! Pagination types
//!
//! Tracks progress through a paginated collection.

use std::fmt;

/// Page size sent when auto-paginate is on and no size is configured
pub const DEFAULT_PER_PAGE: u32 = 50;

/// Query parameter carrying the page size
pub const PER_PAGE_PARAM: &str = "per_page";

/// Why pagination stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Auto-paginate is off; only the first page was fetched
    Disabled,
    /// The last page carried no `next` relation
    NoNextLink,
    /// The last page reported zero remaining requests
    QuotaExhausted,
}

impl StopReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::NoNextLink => "no next link",
            Self::QuotaExhausted => "rate limit exhausted",
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracks pagination state during iteration
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Pages fetched so far, the first page included
    pub pages: u32,
    /// Items seen across array pages
    pub total_fetched: u64,
    /// Set once pagination is complete
    pub stop: Option<StopReason>,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fetched page holding `items` array items
    pub fn add_page(&mut self, items: usize) {
        self.pages += 1;
        self.total_fetched += items as u64;
    }

    /// Mark pagination as complete
    pub fn finish(&mut self, reason: StopReason) {
        self.stop = Some(reason);
    }

    /// Is pagination complete?
    pub fn is_done(&self) -> bool {
        self.stop.is_some()
    }
}
