//! Layered error types for the Percolate client.
//!
//! The error hierarchy separates "the server said no" from "the server said
//! something unparseable":
//! - [`PercolateError`] - Top-level error type for all client operations
//! - [`ConnectionError`] - Transport failures and non-2xx responses
//! - [`DecodeError`] - Successful responses whose body is not JSON
//! - [`ConfigError`] - Invalid client configuration

mod config_error;
mod connection_error;
mod decode_error;
mod percolate_error;

pub use config_error::ConfigError;
pub use connection_error::{ConnectionError, TransportErrorCode};
pub use decode_error::DecodeError;
pub use percolate_error::PercolateError;
