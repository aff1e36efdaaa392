//! Per-call request options and the resolved request spec

use crate::auth::Authenticator;
use crate::error::{Error, Result};
use crate::types::{JsonObject, Method, QueryMap, StringMap};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde_json::Value;

/// Header keys accepted at the top level of the options
pub const CONVENIENCE_HEADERS: &[&str] = &["accept"];

/// Bytes escaped in request paths. `%` is escaped only when it does not
/// already start a valid escape (see [`escape_path`]).
const PATH_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'%');

/// Options for a single call: body/query fields plus the optional
/// `query`, `headers` and `accept` slots
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    /// Remaining fields. Query parameters for GET/HEAD, JSON body otherwise.
    pub fields: JsonObject,
    /// Explicit query parameters
    pub query: JsonObject,
    /// Header overrides
    pub headers: StringMap,
    /// Convenience `Accept` override
    pub accept: Option<String>,
}

impl RequestOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Split a JSON options mapping into its slots.
    ///
    /// `query` and `headers` must be objects; `accept` must be a string.
    /// Every other key becomes a field.
    pub fn from_value(value: Value) -> Result<Self> {
        let mut map = match value {
            Value::Null => return Ok(Self::default()),
            Value::Object(map) => map,
            other => {
                return Err(Error::invalid_value(
                    "options",
                    format!("expected an object, got {other}"),
                ))
            }
        };

        let query = match map.remove("query") {
            None | Some(Value::Null) => JsonObject::new(),
            Some(Value::Object(q)) => q,
            Some(_) => return Err(Error::invalid_value("query", "expected an object")),
        };

        let headers = match map.remove("headers") {
            None | Some(Value::Null) => StringMap::new(),
            Some(Value::Object(h)) => h
                .into_iter()
                .map(|(k, v)| (k, scalar_to_string(&v)))
                .collect(),
            Some(_) => return Err(Error::invalid_value("headers", "expected an object")),
        };

        let mut options = Self {
            fields: JsonObject::new(),
            query,
            headers,
            accept: None,
        };

        for key in CONVENIENCE_HEADERS {
            match map.remove(*key) {
                None | Some(Value::Null) => {}
                Some(Value::String(v)) => options.accept = Some(v),
                Some(_) => return Err(Error::invalid_value(*key, "expected a string")),
            }
        }

        options.fields = map;
        Ok(options)
    }

    /// Add a field
    #[must_use]
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add an explicit query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Override the `Accept` header for this call
    #[must_use]
    pub fn accept(mut self, media_type: impl Into<String>) -> Self {
        self.accept = Some(media_type.into());
        self
    }

    /// Whether a key is set as a field or as an explicit query parameter
    pub fn has_query_key(&self, key: &str) -> bool {
        self.fields.contains_key(key) || self.query.contains_key(key)
    }
}

/// A fully resolved request, ready for dispatch
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub method: Method,
    /// Escaped path relative to the endpoint, or an absolute URL
    pub path: String,
    pub query: QueryMap,
    pub headers: StringMap,
    pub body: Option<Value>,
}

impl RequestSpec {
    /// Resolve options into a spec.
    ///
    /// Fields join the query for GET/HEAD (explicit `query` keys win) and
    /// form the JSON body otherwise. Auth is merged into the query, and
    /// `accept` moves into the headers.
    pub fn build(method: Method, path: &str, options: RequestOptions, auth: &Authenticator) -> Self {
        let RequestOptions {
            fields,
            query: explicit_query,
            mut headers,
            accept,
        } = options;

        let mut query = QueryMap::new();
        let mut body = None;

        if method.sends_fields_as_query() {
            for (key, value) in &fields {
                query.insert(key.clone(), scalar_to_string(value));
            }
        } else if !fields.is_empty() {
            body = Some(Value::Object(fields));
        }

        for (key, value) in &explicit_query {
            query.insert(key.clone(), scalar_to_string(value));
        }

        auth.merge_query(&mut query);

        if let Some(accept) = accept {
            headers.retain(|k, _| !k.eq_ignore_ascii_case("accept"));
            headers.insert("accept".to_string(), accept);
        }

        Self {
            method,
            path: escape_path(path),
            query,
            headers,
            body,
        }
    }
}

/// Percent-escape a path once.
///
/// Existing `%XX` escapes are kept as they are, so escaping an already
/// escaped path is a no-op.
pub fn escape_path(path: &str) -> String {
    let bytes = path.as_bytes();
    let mut out = String::with_capacity(path.len());
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let is_escape = bytes[i] == b'%'
            && i + 2 < bytes.len()
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit();

        if is_escape {
            out.extend(utf8_percent_encode(&path[start..i], PATH_ESCAPE));
            out.push_str(&path[i..i + 3]);
            i += 3;
            start = i;
        } else {
            i += 1;
        }
    }

    out.extend(utf8_percent_encode(&path[start..], PATH_ESCAPE));
    out
}

/// Render a JSON value as a query/header string
fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items
            .iter()
            .map(scalar_to_string)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}
