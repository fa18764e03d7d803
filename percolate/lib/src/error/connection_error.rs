use std::fmt;

use strum::{Display, EnumString};

use crate::params::redact_api_key;

/// Category of transport failure, distinct from the HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum TransportErrorCode {
    /// The request exceeded the configured timeout.
    Timeout,
    /// DNS resolution or TCP/TLS connection failed.
    Connect,
    /// The server answered with a non-2xx status.
    HttpStatus,
    /// The response body could not be read.
    Body,
    /// Any other failure inside the HTTP client.
    Request,
}

/// A request that did not produce a successful response.
///
/// Raised for every transport failure category: timeouts, DNS and connection
/// failures, non-2xx statuses and HTTP client internals. Inspect [`code`] to
/// tell them apart.
///
/// [`code`]: ConnectionError::code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionError {
    message: String,
    status: Option<u16>,
    url: String,
    code: TransportErrorCode,
}

impl ConnectionError {
    /// Creates a connection error from its parts.
    pub fn new(
        message: impl Into<String>,
        status: Option<u16>,
        url: impl Into<String>,
        code: TransportErrorCode,
    ) -> Self {
        Self {
            message: message.into(),
            status,
            url: url.into(),
            code,
        }
    }

    /// Builds an error for a non-2xx response. `body` is kept as opaque
    /// diagnostic text.
    pub fn from_status(status: u16, body: &str, url: impl Into<String>) -> Self {
        let body = body.trim();
        let message = if body.is_empty() {
            format!("HTTP status {status}")
        } else {
            format!("HTTP status {status}: {}", truncate(body, MAX_BODY_CHARS))
        };
        Self::new(message, Some(status), url, TransportErrorCode::HttpStatus)
    }

    /// Classifies a `reqwest` failure.
    pub fn from_reqwest(err: reqwest::Error, url: impl Into<String>) -> Self {
        let code = if err.is_timeout() {
            TransportErrorCode::Timeout
        } else if err.is_connect() {
            TransportErrorCode::Connect
        } else if err.is_body() || err.is_decode() {
            TransportErrorCode::Body
        } else if err.is_status() {
            TransportErrorCode::HttpStatus
        } else {
            TransportErrorCode::Request
        };
        let status = err.status().map(|s| s.as_u16());
        Self::new(describe(err.without_url()), status, url, code)
    }

    /// Human-readable transport message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status returned by the server, if a response arrived.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// The fully composed request URL, including the `api_key` parameter.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The transport error category.
    pub fn code(&self) -> TransportErrorCode {
        self.code
    }

    pub fn is_timeout(&self) -> bool {
        self.code == TransportErrorCode::Timeout
    }
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "connection error ({}", self.code)?;
        if let Some(status) = self.status {
            write!(f, ", status {status}")?;
        }
        write!(f, "): {} at {}", self.message, redact_api_key(&self.url))
    }
}

impl std::error::Error for ConnectionError {}

const MAX_BODY_CHARS: usize = 512;

fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Flattens the reqwest error chain into one line. The URL must already be
/// stripped from `err`, it carries the API key.
fn describe(err: reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
