//! Filtering and sorting options for list endpoints.

use std::fmt;

use crate::error::ConfigError;
use crate::params::Params;

/// Sort field accepted by the `order_by` option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderBy {
    /// Sort by post points.
    Points { descending: bool },
    /// Sort by release time.
    ReleaseAt { descending: bool },
}

impl OrderBy {
    pub fn points() -> Self {
        Self::Points { descending: false }
    }

    pub fn release_at() -> Self {
        Self::ReleaseAt { descending: false }
    }

    /// Flips the order to descending.
    #[must_use]
    pub fn desc(self) -> Self {
        match self {
            Self::Points { .. } => Self::Points { descending: true },
            Self::ReleaseAt { .. } => Self::ReleaseAt { descending: true },
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (field, descending) = match self {
            Self::Points { descending } => ("points", *descending),
            Self::ReleaseAt { descending } => ("release_at", *descending),
        };
        if descending {
            f.write_str("-")?;
        }
        f.write_str(field)
    }
}

impl std::str::FromStr for OrderBy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, descending) = match s.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (s, false),
        };
        match field {
            "points" => Ok(Self::Points { descending }),
            "release_at" => Ok(Self::ReleaseAt { descending }),
            other => Err(ConfigError::InvalidOrderBy(other.to_string())),
        }
    }
}

/// Options forwarded to list endpoints as query parameters.
///
/// The API pages results 10 at a time unless `limit` is set.
///
/// ## Examples
///
/// ```rust
/// use percolate::{ListOptions, OrderBy};
///
/// let options = ListOptions::new()
///     .limit(20)
///     .offset(40)
///     .order_by(OrderBy::points().desc())
///     .param("tag", "rust");
///
/// let params = options.into_params();
/// assert_eq!(params.to_query_string(), "limit=20&offset=40&order_by=-points&tag=rust");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    params: Params,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page size.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.params.insert("limit", limit);
        self
    }

    /// Number of records to skip.
    #[must_use]
    pub fn offset(mut self, offset: u32) -> Self {
        self.params.insert("offset", offset);
        self
    }

    #[must_use]
    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.params.insert("order_by", order);
        self
    }

    /// Any other API option, passed through verbatim.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.params.insert(key, value);
        self
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn into_params(self) -> Params {
        self.params
    }
}

impl From<Params> for ListOptions {
    fn from(params: Params) -> Self {
        Self { params }
    }
}

impl From<ListOptions> for Params {
    fn from(options: ListOptions) -> Self {
        options.params
    }
}
