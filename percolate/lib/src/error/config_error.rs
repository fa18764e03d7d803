use thiserror::Error;

/// Errors raised while building a [`ClientConfig`](crate::ClientConfig) or
/// parsing client options.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No API key was provided (or it was blank).
    #[error("an API key is required (set PERCOLATE_API_KEY or pass one explicitly)")]
    MissingApiKey,

    /// The base URL could not be parsed or cannot carry a path.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The timeout was zero or not a number.
    #[error("invalid timeout '{0}': expected a positive number of milliseconds")]
    InvalidTimeout(String),

    /// An `order_by` value named an unknown field.
    #[error("unknown order_by field '{0}' (expected points or release_at)")]
    InvalidOrderBy(String),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
}
