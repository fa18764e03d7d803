use thiserror::Error;

use crate::params::redact_api_key;

/// A 2xx response whose body could not be decoded as JSON.
///
/// Messages show the request URL with the `api_key` value redacted.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The server returned an empty body.
    #[error("empty response body from {}", redact_api_key(.url))]
    Empty { url: String },

    /// The body decoded to a bare JSON `null`.
    #[error("response from {} was null", redact_api_key(.url))]
    Null { url: String },

    /// The body was not valid JSON.
    #[error("response from {} was not valid JSON: {source}", redact_api_key(.url))]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The body was JSON but not a `{ data, pagination }` list envelope.
    #[error("response is not a list envelope: {0}")]
    NotAnEnvelope(#[source] serde_json::Error),
}

impl DecodeError {
    /// The URL the undecodable body came from, when one was involved.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Empty { url } | Self::Null { url } | Self::Json { url, .. } => Some(url),
            Self::NotAnEnvelope(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_redacts_api_key() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let errors = [
            DecodeError::Empty {
                url: "http://x/users/1?api_key=SECRETKEY".to_string(),
            },
            DecodeError::Null {
                url: "http://x/users/1?api_key=SECRETKEY".to_string(),
            },
            DecodeError::Json {
                url: "http://x/users/1?limit=5&api_key=SECRETKEY".to_string(),
                source,
            },
        ];

        for err in errors {
            let shown = err.to_string();
            assert!(!shown.contains("SECRETKEY"), "{shown}");
            assert!(shown.contains("api_key=***"), "{shown}");
            // the raw URL stays available to callers
            assert!(err.url().unwrap().contains("SECRETKEY"));
        }
    }
}
