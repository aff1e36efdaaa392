//! Request pipeline
//!
//! [`Client`] is the single entry point to the API. It:
//! - Merges authentication, headers, query and body for each call
//! - Dispatches through the middleware chain and a lazily built transport
//! - Records every exchange as the "last response"
//! - Classifies failed statuses into typed errors

use super::rate_limit::RateLimit;
use super::request::{RequestOptions, RequestSpec};
use super::response::Response;
use super::throttle::Throttle;
use crate::auth::Authenticator;
use crate::config::{ClientConfig, ClientOptions, Defaults};
use crate::error::{classify, Error, Result};
use crate::hypermedia::Link;
use crate::types::{Method, QueryMap};
use once_cell::sync::OnceCell;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, USER_AGENT};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;
use url::Url;

/// Hypermedia API client
pub struct Client {
    config: ClientConfig,
    authenticator: Authenticator,
    transport: OnceCell<reqwest::Client>,
    throttle: Option<Throttle>,
    last_response: RwLock<Option<Arc<Response>>>,
}

impl Client {
    /// Create a client, resolving overrides over the process environment
    pub fn new(options: ClientOptions) -> Result<Self> {
        Self::with_defaults(options, &Defaults::from_env())
    }

    /// Create a client, resolving overrides over explicit defaults
    pub fn with_defaults(options: ClientOptions, defaults: &Defaults) -> Result<Self> {
        Self::from_config(ClientConfig::resolve(options, defaults))
    }

    /// Create a client from a resolved configuration
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let authenticator = Authenticator::from_config(&config);
        let throttle = config
            .connection_options
            .requests_per_second
            .and_then(Throttle::per_second);

        Ok(Self {
            config,
            authenticator,
            transport: OnceCell::new(),
            throttle,
            last_response: RwLock::new(None),
        })
    }

    /// Resolved configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Compare this client's configuration with another, field by field
    pub fn same_options(&self, other: &ClientConfig) -> bool {
        self.config.same_options(other)
    }

    /// Whether requests carry the API token
    pub fn is_application_authenticated(&self) -> bool {
        self.authenticator.is_application_authenticated()
    }

    /// The underlying transport, built on first use
    pub fn agent(&self) -> Result<&reqwest::Client> {
        self.transport.get_or_try_init(|| build_transport(&self.config))
    }

    // ========================================================================
    // Generic request surface
    // ========================================================================

    /// Make a HTTP GET request
    pub async fn get(&self, path: &str, options: RequestOptions) -> Result<Value> {
        self.request(Method::GET, path, options).await
    }

    /// Make a HTTP POST request
    pub async fn post(&self, path: &str, options: RequestOptions) -> Result<Value> {
        self.request(Method::POST, path, options).await
    }

    /// Make a HTTP PUT request
    pub async fn put(&self, path: &str, options: RequestOptions) -> Result<Value> {
        self.request(Method::PUT, path, options).await
    }

    /// Make a HTTP PATCH request
    pub async fn patch(&self, path: &str, options: RequestOptions) -> Result<Value> {
        self.request(Method::PATCH, path, options).await
    }

    /// Make a HTTP DELETE request
    pub async fn delete(&self, path: &str, options: RequestOptions) -> Result<Value> {
        self.request(Method::DELETE, path, options).await
    }

    /// Make a HTTP HEAD request
    pub async fn head(&self, path: &str, options: RequestOptions) -> Result<Value> {
        self.request(Method::HEAD, path, options).await
    }

    /// Make a request and return the parsed body
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<Value> {
        let response = self.send(method, path, options).await?;
        Ok(response.data.clone())
    }

    /// Make a request and return the whole exchange
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<Arc<Response>> {
        let spec = RequestSpec::build(method, path, options, &self.authenticator);
        self.dispatch(spec).await
    }

    /// GET a link's target. The href is used as given; the token is added
    /// only when the link does not already carry it.
    pub async fn follow(&self, link: &Link) -> Result<Arc<Response>> {
        let target = Url::parse(&link.href)?;
        let present: HashSet<String> = target
            .query_pairs()
            .map(|(k, _)| k.into_owned())
            .collect();

        let mut query = QueryMap::new();
        self.authenticator.merge_query(&mut query);
        query.retain(|k, _| !present.contains(k));

        let spec = RequestSpec {
            method: Method::GET,
            path: link.href.clone(),
            query,
            headers: Default::default(),
            body: None,
        };
        self.dispatch(spec).await
    }

    /// Fetch the root resource of the API
    pub async fn root(&self) -> Result<Value> {
        self.get("", RequestOptions::default()).await
    }

    /// Run a request for its outcome only.
    ///
    /// `Ok(true)` on 204, `Ok(false)` on any other success or on a
    /// NotFound classification. Every other error is returned.
    pub async fn boolean_from_response(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<bool> {
        match self.send(method, path, options).await {
            Ok(response) => Ok(response.status == 204),
            Err(err) if err.is_not_found() => Ok(false),
            Err(err) => Err(err),
        }
    }

    // ========================================================================
    // Last exchange introspection
    // ========================================================================

    /// Response for the last HTTP request.
    ///
    /// Overwritten by every call, failed ones included. `None` before the
    /// first call and after a transport failure.
    pub fn last_response(&self) -> Option<Arc<Response>> {
        self.last_response
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Quota state from the last response
    pub fn rate_limit(&self) -> RateLimit {
        self.last_response()
            .map_or_else(RateLimit::unknown, |r| r.rate_limit())
    }

    /// Make a cheap request to get a fresh quota snapshot
    pub async fn refresh_rate_limit(&self) -> Result<RateLimit> {
        let response = self.send(Method::GET, "", RequestOptions::default()).await?;
        Ok(response.rate_limit())
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    async fn dispatch(&self, mut spec: RequestSpec) -> Result<Arc<Response>> {
        self.config.middleware.before(&mut spec);

        let url = self.build_url(&spec.path)?;
        let headers = self.build_headers(&spec)?;
        let agent = self.agent()?;

        if let Some(throttle) = &self.throttle {
            throttle.wait().await;
        }

        let mut req = agent
            .request(spec.method.into(), url.clone())
            .headers(headers);
        if !spec.query.is_empty() {
            req = req.query(&spec.query);
        }
        if let Some(body) = &spec.body {
            req = req.json(body);
        }

        debug!("{} {}", spec.method, url);

        let raw = match req.send().await {
            Ok(raw) => raw,
            Err(e) => {
                self.store(None);
                return Err(Error::Transport(self.redact_transport(e)));
            }
        };

        let display_url = self.authenticator.redact_url(raw.url()).to_string();
        let response = match Response::read(spec.method, display_url, raw).await {
            Ok(response) => Arc::new(response),
            Err(Error::Transport(e)) => {
                self.store(None);
                return Err(Error::Transport(self.redact_transport(e)));
            }
            Err(e) => {
                self.store(None);
                return Err(e);
            }
        };
        self.store(Some(Arc::clone(&response)));

        debug!(
            "{} {} -> {}",
            response.method, response.url, response.status
        );

        self.config.middleware.after(&response)?;

        if let Some(err) = classify(
            response.status,
            &response.data,
            response.method.as_str(),
            &response.url,
        ) {
            return Err(err.into());
        }

        Ok(response)
    }

    /// Mask the token in the URL a transport error reports
    fn redact_transport(&self, err: reqwest::Error) -> reqwest::Error {
        let redacted = err.url().map(|url| self.authenticator.redact_url(url));
        match redacted {
            Some(url) => err.with_url(url),
            None => err,
        }
    }

    fn store(&self, response: Option<Arc<Response>>) {
        *self
            .last_response
            .write()
            .unwrap_or_else(PoisonError::into_inner) = response;
    }

    /// Build the full URL for a path
    fn build_url(&self, path: &str) -> Result<Url> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Ok(Url::parse(path)?);
        }

        let base = self.config.api_endpoint.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            Ok(Url::parse(base)?)
        } else {
            Ok(Url::parse(&format!("{base}/{path}"))?)
        }
    }

    /// Default headers, then connection headers, auth, and per-call overrides
    fn build_headers(&self, spec: &RequestSpec) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, header_value("accept", &self.config.default_media_type)?);
        headers.insert(USER_AGENT, header_value("user-agent", &self.config.user_agent)?);

        for (name, value) in &self.config.connection_options.headers {
            headers.insert(header_name(name)?, header_value(name, value)?);
        }

        if let Some((name, token)) = self.authenticator.header() {
            headers.insert(header_name(name)?, header_value(name, token)?);
        }

        for (name, value) in &spec.headers {
            headers.insert(header_name(name)?, header_value(name, value)?);
        }

        Ok(headers)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("has_transport", &self.transport.get().is_some())
            .field("has_throttle", &self.throttle.is_some())
            .field(
                "last_status",
                &self.last_response().map(|r| r.status),
            )
            .finish_non_exhaustive()
    }
}

fn build_transport(config: &ClientConfig) -> Result<reqwest::Client> {
    let options = &config.connection_options;
    let mut builder = reqwest::Client::builder().user_agent(&config.user_agent);

    if let Some(timeout) = options.timeout() {
        builder = builder.timeout(timeout);
    }
    if let Some(timeout) = options.connect_timeout() {
        builder = builder.connect_timeout(timeout);
    }
    if let Some(proxy) = &config.proxy {
        builder = builder.proxy(reqwest::Proxy::all(proxy)?);
    }

    Ok(builder.build()?)
}

fn header_name(name: &str) -> Result<HeaderName> {
    HeaderName::from_bytes(name.as_bytes()).map_err(|e| Error::invalid_header(name, e.to_string()))
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| Error::invalid_header(name, e.to_string()))
}
