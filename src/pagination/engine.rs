//! Pagination loop
//!
//! Drives the request pipeline across `next` relations.

use super::types::{PaginationState, StopReason, DEFAULT_PER_PAGE, PER_PAGE_PARAM};
use crate::error::Result;
use crate::http::{Client, RequestOptions, Response};
use crate::types::Method;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

impl Client {
    /// GET a collection, following `next` relations when auto-paginate is on.
    ///
    /// Array pages are appended in order; other bodies are left as the
    /// first page returned them.
    pub async fn paginate(&self, path: &str, options: RequestOptions) -> Result<Value> {
        self.paginate_with(path, options, append_page).await
    }

    /// Like [`paginate`](Self::paginate), with a custom combiner called as
    /// `combiner(&mut data, &latest)` after each followed page
    pub async fn paginate_with<F>(
        &self,
        path: &str,
        options: RequestOptions,
        mut combiner: F,
    ) -> Result<Value>
    where
        F: FnMut(&mut Value, &Response) + Send,
    {
        self.run_pagination(path, options, &mut combiner).await
    }

    async fn run_pagination(
        &self,
        path: &str,
        mut options: RequestOptions,
        combiner: &mut (dyn FnMut(&mut Value, &Response) + Send),
    ) -> Result<Value> {
        let config = self.config();
        let per_page = if config.auto_paginate {
            Some(config.per_page.unwrap_or(DEFAULT_PER_PAGE))
        } else {
            config.per_page
        };
        if let Some(per_page) = per_page {
            if !options.has_query_key(PER_PAGE_PARAM) {
                options.query.insert(PER_PAGE_PARAM.to_string(), per_page.into());
            }
        }

        let mut state = PaginationState::new();
        let mut latest: Arc<Response> = self.send(Method::GET, path, options).await?;
        let mut data = latest.data.clone();
        state.add_page(item_count(&latest.data));

        if !config.auto_paginate {
            state.finish(StopReason::Disabled);
        }

        while !state.is_done() {
            let Some(next) = latest.rels.get("next").cloned() else {
                state.finish(StopReason::NoNextLink);
                break;
            };

            let quota = latest.rate_limit();
            if !quota.has_headroom() {
                warn!(
                    "Stopping pagination of {path}: rate limit exhausted after {} pages",
                    state.pages
                );
                state.finish(StopReason::QuotaExhausted);
                break;
            }

            latest = self.follow(&next).await?;
            state.add_page(item_count(&latest.data));
            combiner(&mut data, &latest);
        }

        debug!(
            "Paginated {path}: {} pages, {} items ({})",
            state.pages,
            state.total_fetched,
            state.stop.map_or("", |r| r.as_str())
        );

        Ok(data)
    }
}

/// Default combiner: append the page's items when both sides are arrays
pub fn append_page(data: &mut Value, page: &Response) {
    if let (Value::Array(items), Value::Array(more)) = (data, &page.data) {
        items.extend(more.iter().cloned());
    }
}

fn item_count(data: &Value) -> usize {
    data.as_array().map_or(0, Vec::len)
}
