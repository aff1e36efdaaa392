//! Request/response middleware
//!
//! Layers run in order: `on_request` before dispatch, `on_response` after
//! the exchange is recorded as the last response and before status
//! classification.

use super::request::RequestSpec;
use super::response::Response;
use crate::error::Result;
use std::fmt;
use std::sync::Arc;

/// A hook around each exchange
pub trait Middleware: Send + Sync {
    /// Stable name, used for configuration equality and debugging
    fn name(&self) -> &str;

    /// Adjust the request before it is sent
    fn on_request(&self, _request: &mut RequestSpec) {}

    /// Inspect the response; an error aborts the call
    fn on_response(&self, _response: &Response) -> Result<()> {
        Ok(())
    }
}

/// Ordered middleware layers
#[derive(Clone, Default)]
pub struct MiddlewareChain {
    layers: Vec<Arc<dyn Middleware>>,
}

impl MiddlewareChain {
    /// Empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer
    #[must_use]
    pub fn with(mut self, layer: impl Middleware + 'static) -> Self {
        self.layers.push(Arc::new(layer));
        self
    }

    /// Append a shared layer
    pub fn push(&mut self, layer: Arc<dyn Middleware>) {
        self.layers.push(layer);
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Layer names in order
    pub fn names(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.name()).collect()
    }

    pub(crate) fn before(&self, request: &mut RequestSpec) {
        for layer in &self.layers {
            layer.on_request(request);
        }
    }

    pub(crate) fn after(&self, response: &Response) -> Result<()> {
        for layer in &self.layers {
            layer.on_response(response)?;
        }
        Ok(())
    }
}

impl PartialEq for MiddlewareChain {
    fn eq(&self, other: &Self) -> bool {
        self.names() == other.names()
    }
}

impl fmt::Debug for MiddlewareChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
