//! Completed HTTP exchanges

use super::rate_limit::RateLimit;
use crate::error::Result;
use crate::hypermedia::{Relations, Resource};
use crate::types::Method;
use reqwest::header::{HeaderMap, LINK};
use serde_json::Value;
use url::Url;

/// A completed exchange as seen by the client
#[derive(Debug, Clone)]
pub struct Response {
    /// Request method
    pub method: Method,
    /// Final request URL, with the API token masked
    pub url: String,
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed body: JSON, `Null` when empty, or the raw text as a string
    pub data: Value,
    /// Raw body text
    pub body: String,
    /// Relations from the `Link` header
    pub rels: Relations,
}

impl Response {
    /// Assemble a response from its parts, parsing body and relations
    pub fn from_parts(
        method: Method,
        url: impl Into<String>,
        status: u16,
        headers: HeaderMap,
        body: String,
    ) -> Self {
        let url = url.into();
        let base = Url::parse(&url).ok();
        let rels = headers
            .get_all(LINK)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .fold(Relations::new(), |mut acc, header| {
                for link in Relations::from_link_header(header, base.as_ref()).iter() {
                    acc.insert(link.clone());
                }
                acc
            });

        Self {
            method,
            url,
            status,
            headers,
            data: parse_body(&body),
            body,
            rels,
        }
    }

    /// Read a reqwest response to completion, recording it under `url`
    pub(crate) async fn read(
        method: Method,
        url: String,
        response: reqwest::Response,
    ) -> Result<Self> {
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.text().await?;
        Ok(Self::from_parts(method, url, status, headers, body))
    }

    /// Header value as text
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// True for 2xx statuses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Quota state carried by this response
    pub fn rate_limit(&self) -> RateLimit {
        RateLimit::from_headers(&self.headers)
    }

    /// The body as a hypermedia resource, when it is an object
    pub fn resource(&self) -> Option<Resource> {
        Resource::from_value(&self.data, Url::parse(&self.url).ok().as_ref())
    }
}

fn parse_body(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}
