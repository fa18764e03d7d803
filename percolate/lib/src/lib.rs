//! Client library for the Percolate HTTP API.
//!
//! Requests are authenticated with a static API key passed as the `api_key`
//! query (or form) parameter. Responses are returned as raw JSON values.
//!
//! ## Core Types
//!
//! - [`PercolateClient`] - One method per API resource
//! - [`RequestExecutor`] - Single authenticated request/response round trip
//! - [`ClientConfig`] - API key, base URL and timeout
//!
//! ## Request Building
//!
//! - [`Params`] - Ordered request parameters with form encoding
//! - [`ListOptions`] / [`OrderBy`] - Options for list endpoints
//! - [`RestMethod`] - `GET` or `POST`
//!
//! ## Errors
//!
//! - [`PercolateError`] - Wraps [`ConnectionError`], [`DecodeError`] and
//!   [`ConfigError`]
//!
//! ## Examples
//!
//! ```rust,no_run
//! use percolate::{ListOptions, PercolateClient};
//!
//! # async fn example() -> Result<(), percolate::PercolateError> {
//! let client = PercolateClient::from_env()?;
//! let posts = client.group_posts(7, ListOptions::new().limit(20)).await?;
//! println!("{}", posts["pagination"]);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod method;
pub mod options;
pub mod params;
pub mod response;

pub use client::{GROUP_USERS_LIMIT, PercolateClient, RequestExecutor};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{ConfigError, ConnectionError, DecodeError, PercolateError, TransportErrorCode};
pub use method::RestMethod;
pub use options::{ListOptions, OrderBy};
pub use params::Params;
