//! Resource-level facade over the [`RequestExecutor`].
//!
//! Every method maps to one API resource and delegates to the executor with a
//! pre-filled path. Responses are returned exactly as decoded; list endpoints
//! return the full `{ data, pagination }` envelope.

use serde_json::Value;

use super::executor::RequestExecutor;
use crate::config::ClientConfig;
use crate::error::PercolateError;
use crate::method::RestMethod;
use crate::options::ListOptions;
use crate::params::Params;
use crate::response::take_data;

/// Page size requested by [`PercolateClient::group_users`] when the caller
/// sets none. The API default is 10.
pub const GROUP_USERS_LIMIT: u32 = 9999;

/// Client for the Percolate API.
///
/// ## Examples
///
/// ```rust,no_run
/// use percolate::{ListOptions, OrderBy, PercolateClient};
///
/// # async fn example() -> Result<(), percolate::PercolateError> {
/// let client = PercolateClient::new("ABC123")?;
///
/// let user = client.user(42).await?;
/// let posts = client
///     .user_posts(42, ListOptions::new().limit(20).order_by(OrderBy::points().desc()))
///     .await?;
///
/// println!("{} has {} posts", user["name"], posts["data"].as_array().map_or(0, Vec::len));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PercolateClient {
    executor: RequestExecutor,
}

impl PercolateClient {
    /// Creates a client for the default endpoint.
    ///
    /// ## Errors
    ///
    /// Returns an error if the key is blank or the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self, PercolateError> {
        Self::with_config(ClientConfig::new(api_key)?)
    }

    /// Creates a client from an explicit configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self, PercolateError> {
        Ok(Self {
            executor: RequestExecutor::new(config)?,
        })
    }

    /// Creates a client configured from `PERCOLATE_*` environment variables.
    pub fn from_env() -> Result<Self, PercolateError> {
        Self::with_config(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        self.executor.config()
    }

    /// Gets a user by their Percolate user ID.
    pub async fn user(&self, user_id: u64) -> Result<Value, PercolateError> {
        self.get(&format!("users/{user_id}"), Params::new()).await
    }

    /// Gets a single post by ID.
    pub async fn post(&self, post_id: u64) -> Result<Value, PercolateError> {
        self.get(&format!("posts/{post_id}"), Params::new()).await
    }

    /// Lists a user's posts.
    pub async fn user_posts(
        &self,
        user_id: u64,
        options: ListOptions,
    ) -> Result<Value, PercolateError> {
        self.get(&format!("users/{user_id}/posts"), options.into_params())
            .await
    }

    /// Lists the users in a group.
    ///
    /// Requests `limit=9999` unless the caller sets a limit, so the whole
    /// group comes back in one page.
    pub async fn group_users(
        &self,
        group_id: u64,
        options: ListOptions,
    ) -> Result<Value, PercolateError> {
        let mut params = options.into_params();
        params.insert_default("limit", GROUP_USERS_LIMIT);
        self.get(&format!("groups/{group_id}/users"), params).await
    }

    /// Like [`group_users`](Self::group_users), returning only the `data`
    /// array.
    pub async fn group_user_list(
        &self,
        group_id: u64,
        options: ListOptions,
    ) -> Result<Vec<Value>, PercolateError> {
        let envelope = self.group_users(group_id, options).await?;
        Ok(take_data(envelope)?)
    }

    /// Lists posts made by users in a group.
    pub async fn group_posts(
        &self,
        group_id: u64,
        options: ListOptions,
    ) -> Result<Value, PercolateError> {
        self.get(&format!("groups/{group_id}/posts"), options.into_params())
            .await
    }

    /// Lists posts published under a license.
    pub async fn license_posts(
        &self,
        license_id: u64,
        options: ListOptions,
    ) -> Result<Value, PercolateError> {
        self.get(&format!("licenses/{license_id}/posts"), options.into_params())
            .await
    }

    /// Executes an arbitrary API method.
    pub async fn execute(
        &self,
        resource_path: &str,
        params: &Params,
        method: RestMethod,
    ) -> Result<Value, PercolateError> {
        self.executor.execute(resource_path, params, method).await
    }

    async fn get(&self, resource_path: &str, params: Params) -> Result<Value, PercolateError> {
        self.executor
            .execute(resource_path, &params, RestMethod::Get)
            .await
    }
}
