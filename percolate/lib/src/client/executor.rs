//! Request execution with tracing instrumentation.
//!
//! This module provides the [`RequestExecutor`], which performs one HTTP round
//! trip against the Percolate API: it injects the API key, composes the URL,
//! sends the request with the configured timeout and decodes the JSON body.

use serde_json::Value;
use tracing::{Span, debug, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{ConfigError, ConnectionError, DecodeError, PercolateError};
use crate::method::RestMethod;
use crate::params::{Params, redact_api_key};

/// Executes authenticated requests against the Percolate API.
///
/// The executor holds the immutable [`ClientConfig`] and a pooled
/// `reqwest::Client`; it keeps no per-request state and can be shared
/// between tasks.
///
/// ## Examples
///
/// ```rust,no_run
/// use percolate::{ClientConfig, Params, RequestExecutor, RestMethod};
///
/// # async fn example() -> Result<(), percolate::PercolateError> {
/// let executor = RequestExecutor::new(ClientConfig::new("ABC123")?)?;
/// let user = executor
///     .execute("users/42", &Params::new(), RestMethod::Get)
///     .await?;
/// println!("{user}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    client: reqwest::Client,
    config: ClientConfig,
}

impl RequestExecutor {
    /// Creates an executor for the given configuration.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, PercolateError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .pool_max_idle_per_host(10)
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Composes the full request URL for `resource_path`.
    ///
    /// For `GET` the parameters, with `api_key` appended last, form the query
    /// string. For `POST` the URL carries no query; the parameters travel in
    /// the body.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use percolate::{ClientConfig, Params, RequestExecutor, RestMethod};
    ///
    /// let executor = RequestExecutor::new(ClientConfig::new("ABC123").unwrap()).unwrap();
    /// let url = executor.compose_url("users/42", &Params::new(), RestMethod::Get);
    /// assert_eq!(url, "http://percolate.com/api/v3/users/42?api_key=ABC123");
    /// ```
    pub fn compose_url(&self, resource_path: &str, params: &Params, method: RestMethod) -> String {
        let base = format!(
            "{}{}",
            self.config.base_url(),
            resource_path.trim_start_matches('/')
        );
        if method.has_body() {
            return base;
        }
        let query = params.with_api_key(self.config.api_key()).to_query_string();
        format!("{base}?{query}")
    }

    /// Executes an API call and returns the decoded JSON body.
    ///
    /// ## Errors
    ///
    /// - [`PercolateError::Connection`] on timeout, connection failure or any
    ///   non-2xx status
    /// - [`PercolateError::Decode`] if a 2xx body is empty, `null` or not JSON
    #[instrument(
        name = "percolate_request",
        skip(self, params),
        fields(
            http.method = %method,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn execute(
        &self,
        resource_path: &str,
        params: &Params,
        method: RestMethod,
    ) -> Result<Value, PercolateError> {
        let url = self.compose_url(resource_path, params, method);
        Span::current().record("http.url", redact_api_key(&url).as_str());

        let mut request = self.client.request(method.to_reqwest(), url.as_str());
        if method.has_body() {
            let body = params.with_api_key(self.config.api_key());
            let pairs: Vec<(&str, &str)> = body.iter().collect();
            request = request.form(&pairs);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                let err = ConnectionError::from_reqwest(e, url);
                Span::current().record("otel.status_code", "ERROR");
                warn!(code = %err.code(), error = %err.message(), "Request failed");
                return Err(err.into());
            }
        };

        let status = response.status();
        Span::current().record("http.status_code", status.as_u16());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let otel_status = if status.is_server_error() {
                "ERROR"
            } else {
                "UNSET"
            };
            Span::current().record("otel.status_code", otel_status);
            warn!(status = status.as_u16(), "API returned error status");
            return Err(ConnectionError::from_status(status.as_u16(), &body, url).into());
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                let err = ConnectionError::from_reqwest(e, url);
                Span::current().record("otel.status_code", "ERROR");
                warn!(code = %err.code(), error = %err.message(), "Failed to read response body");
                return Err(err.into());
            }
        };

        Span::current().record("otel.status_code", "OK");
        debug!(bytes = body.len(), "Response received");

        decode_body(&body, url).map_err(PercolateError::from)
    }
}

/// Parses a response body as JSON. Blank bodies and a bare `null` are decode
/// failures, never a successful result.
fn decode_body(body: &[u8], url: String) -> Result<Value, DecodeError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(DecodeError::Empty { url });
    }
    match serde_json::from_slice(body) {
        Ok(Value::Null) => Err(DecodeError::Null { url }),
        Ok(value) => Ok(value),
        Err(source) => Err(DecodeError::Json { url, source }),
    }
}
