//! HTTP client for the Percolate API.
//!
//! - [`RequestExecutor`] performs a single authenticated round trip
//! - [`PercolateClient`] exposes one method per API resource

mod executor;
mod resources;

pub use executor::RequestExecutor;
pub use resources::{GROUP_USERS_LIMIT, PercolateClient};
