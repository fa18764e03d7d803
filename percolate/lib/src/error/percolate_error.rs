use thiserror::Error;

use super::{ConfigError, ConnectionError, DecodeError};

/// Top-level error returned by every client operation.
#[derive(Error, Debug)]
pub enum PercolateError {
    /// The request never produced a successful response.
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// The response succeeded but its body could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The client was configured with invalid values.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl PercolateError {
    /// Returns the connection error, if this is one.
    pub fn as_connection(&self) -> Option<&ConnectionError> {
        match self {
            Self::Connection(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the HTTP status code associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        self.as_connection().and_then(ConnectionError::status)
    }

    /// Returns the URL implicated in this error, if any.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Connection(e) => Some(e.url()),
            Self::Decode(e) => e.url(),
            Self::Config(_) => None,
        }
    }
}
