//! Error types for ohanakapa
//!
//! This module defines the error hierarchy for the whole client.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! HTTP failures are classified by status code into an [`ErrorKind`] and
//! carried as an [`ApiError`]. Transport failures (DNS, refused connections,
//! malformed responses) surface as [`Error::Transport`] and are never derived
//! from a status code.

use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// The main error type for ohanakapa
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // API Errors
    // ============================================================================
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Invalid header '{name}': {message}")]
    InvalidHeader { name: String, message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an invalid header error
    pub fn invalid_header(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            name: name.into(),
            message: message.into(),
        }
    }

    /// The classified kind, if this error came from an HTTP status
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Error::Api(api) => Some(api.kind),
            _ => None,
        }
    }

    /// The HTTP status, if this error came from an HTTP status
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(api) => Some(api.status),
            _ => None,
        }
    }

    /// Check if this error is a 404 classification
    pub fn is_not_found(&self) -> bool {
        self.kind() == Some(ErrorKind::NotFound)
    }

    /// Check if this error happened below the HTTP layer
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

/// Result type alias for ohanakapa
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

// ============================================================================
// Status classification
// ============================================================================

/// Kind of a failed HTTP exchange, derived from its status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 400
    BadRequest,
    /// 401
    Unauthorized,
    /// 403
    Forbidden,
    /// 404
    NotFound,
    /// 406
    NotAcceptable,
    /// 422
    UnprocessableEntity,
    /// 500
    InternalServerError,
    /// 501
    NotImplemented,
    /// 502
    BadGateway,
    /// 503
    ServiceUnavailable,
    /// Any other 4xx
    ClientError,
    /// Any other 5xx and above
    ServerError,
}

impl ErrorKind {
    /// Map a status code to its kind. Returns `None` below 400.
    pub fn from_status(status: u16) -> Option<Self> {
        let kind = match status {
            0..=399 => return None,
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            406 => Self::NotAcceptable,
            422 => Self::UnprocessableEntity,
            500 => Self::InternalServerError,
            501 => Self::NotImplemented,
            502 => Self::BadGateway,
            503 => Self::ServiceUnavailable,
            400..=499 => Self::ClientError,
            _ => Self::ServerError,
        };
        Some(kind)
    }

    /// True for the 4xx family, including the generic bucket
    pub fn is_client_error(&self) -> bool {
        !self.is_server_error()
    }

    /// True for the 5xx family, including the generic bucket
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::InternalServerError
                | Self::NotImplemented
                | Self::BadGateway
                | Self::ServiceUnavailable
                | Self::ServerError
        )
    }

    /// Human-readable name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "Bad Request",
            Self::Unauthorized => "Unauthorized",
            Self::Forbidden => "Forbidden",
            Self::NotFound => "Not Found",
            Self::NotAcceptable => "Not Acceptable",
            Self::UnprocessableEntity => "Unprocessable Entity",
            Self::InternalServerError => "Internal Server Error",
            Self::NotImplemented => "Not Implemented",
            Self::BadGateway => "Bad Gateway",
            Self::ServiceUnavailable => "Service Unavailable",
            Self::ClientError => "Client Error",
            Self::ServerError => "Server Error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified HTTP failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{method} {url}: {status} {kind}{}", .message.as_deref().map(|m| format!(" - {m}")).unwrap_or_default())]
pub struct ApiError {
    /// Classified kind
    pub kind: ErrorKind,
    /// HTTP status code
    pub status: u16,
    /// Request method
    pub method: String,
    /// Request URL
    pub url: String,
    /// Message extracted from the response body, if any
    pub message: Option<String>,
}

/// Classify a completed exchange. Returns `None` for statuses below 400.
///
/// Pure function of the status; the body is only read for a message.
pub fn classify(status: u16, body: &Value, method: &str, url: &str) -> Option<ApiError> {
    let kind = ErrorKind::from_status(status)?;
    Some(ApiError {
        kind,
        status,
        method: method.to_string(),
        url: url.to_string(),
        message: extract_message(body),
    })
}

/// Best-effort message from `message`, `error` or an `errors` array
fn extract_message(body: &Value) -> Option<String> {
    let Value::Object(map) = body else {
        return match body {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        };
    };

    for key in ["message", "error"] {
        match map.get(key) {
            Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
            Some(Value::Object(inner)) => {
                if let Some(Value::String(s)) = inner.get("message") {
                    return Some(s.clone());
                }
            }
            _ => {}
        }
    }

    if let Some(Value::Array(errors)) = map.get("errors") {
        let parts: Vec<String> = errors
            .iter()
            .filter_map(|e| match e {
                Value::String(s) => Some(s.clone()),
                Value::Object(o) => o
                    .get("message")
                    .or_else(|| o.get("code"))
                    .and_then(Value::as_str)
                    .map(str::to_string),
                _ => None,
            })
            .collect();
        if !parts.is_empty() {
            return Some(parts.join("; "));
        }
    }

    None
}
