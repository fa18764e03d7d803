//! Ordered request parameters and their query-string encoding.
//!
//! Parameters keep insertion order so the composed URL is deterministic.
//! Inserting an existing key replaces its value in place ("last write wins").
//!
//! ## Examples
//!
//! ```rust
//! use percolate::Params;
//!
//! let mut params = Params::new();
//! params.insert("q", "a b&c");
//! params.insert("limit", 20);
//!
//! assert_eq!(params.to_query_string(), "q=a+b%26c&limit=20");
//! assert_eq!(Params::from_query_string("q=a+b%26c&limit=20"), params);
//! ```

use std::fmt;

use url::form_urlencoded;

/// Name of the authentication parameter injected into every request.
pub const API_KEY_PARAM: &str = "api_key";

/// An ordered, string-keyed mapping of request parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, String)>,
}

impl Params {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a parameter, replacing the value of an existing key.
    ///
    /// Any [`Display`](fmt::Display) value is accepted, so integers, floats
    /// and booleans can be passed directly.
    pub fn insert(&mut self, key: impl Into<String>, value: impl fmt::Display) -> &mut Self {
        let key = key.into();
        let value = value.to_string();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a parameter only when the key is not already present.
    pub fn insert_default(&mut self, key: impl Into<String>, value: impl fmt::Display) -> &mut Self {
        let key = key.into();
        if !self.contains_key(&key) {
            self.entries.push((key, value.to_string()));
        }
        self
    }

    /// Removes a parameter, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns a copy with `api_key` set to `key` as the last parameter.
    ///
    /// A caller-supplied `api_key` is discarded; the configured key always wins.
    pub fn with_api_key(&self, key: &str) -> Self {
        let mut params = self.clone();
        params.remove(API_KEY_PARAM);
        params.entries.push((API_KEY_PARAM.to_string(), key.to_string()));
        params
    }

    /// Encodes the parameters as `application/x-www-form-urlencoded`.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }

    /// Decodes a query string. Repeated keys follow "last write wins".
    pub fn from_query_string(query: &str) -> Self {
        form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
            .fold(Self::new(), |mut params, (k, v)| {
                params.insert(k.into_owned(), v);
                params
            })
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: fmt::Display,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

impl<K, V> Extend<(K, V)> for Params
where
    K: Into<String>,
    V: fmt::Display,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

/// Replaces the value of any `api_key` query parameter in `url` with `***`.
///
/// Used wherever a request URL ends up in logs or error messages.
pub fn redact_api_key(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(form_urlencoded::parse(query.as_bytes()).map(|(k, v)| {
            let v = if k == API_KEY_PARAM { "***".into() } else { v };
            (k, v)
        }))
        .finish();
    format!("{base}?{query}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_insert_last_write_wins_in_place() {
        let mut params = Params::new();
        params.insert("limit", 10).insert("offset", 0).insert("limit", 5);
        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, vec![("limit", "5"), ("offset", "0")]);
    }

    #[test]
    fn test_insert_default_keeps_existing() {
        let mut params = Params::new().with("limit", 5);
        params.insert_default("limit", 9999);
        params.insert_default("offset", 3);
        assert_eq!(params.get("limit"), Some("5"));
        assert_eq!(params.get("offset"), Some("3"));
    }

    #[test]
    fn test_primitive_values() {
        let params = Params::new()
            .with("n", 42)
            .with("f", 1.5)
            .with("b", true)
            .with("s", "text");
        assert_eq!(params.to_query_string(), "n=42&f=1.5&b=true&s=text");
    }

    #[test]
    fn test_api_key_always_last_and_overrides() {
        let params = Params::new().with("api_key", "caller").with("q", "x");
        let authed = params.with_api_key("ABC123");
        assert_eq!(authed.to_query_string(), "q=x&api_key=ABC123");
        // the source mapping is untouched
        assert_eq!(params.get("api_key"), Some("caller"));
    }

    #[test]
    fn test_reserved_characters_are_encoded() {
        let params = Params::new().with("q", "a b&c=d%e");
        assert_eq!(params.to_query_string(), "q=a+b%26c%3Dd%25e");
    }

    #[test]
    fn test_round_trip_reserved_value() {
        let params = Params::new().with("q", "a b&c");
        let decoded = Params::from_query_string(&params.to_query_string());
        assert_eq!(decoded, params);
    }

    #[test]
    fn test_from_query_string_strips_question_mark() {
        let params = Params::from_query_string("?a=1&b=2");
        assert_eq!(params.get("a"), Some("1"));
        assert_eq!(params.get("b"), Some("2"));
    }

    #[test]
    fn test_collect_from_pairs() {
        let params: Params = [("limit", 20), ("offset", 40)].into_iter().collect();
        assert_eq!(params.len(), 2);
        assert!(!params.is_empty());
    }

    #[test]
    fn test_redact_api_key() {
        assert_eq!(
            redact_api_key("http://h/users/1?limit=5&api_key=secret"),
            "http://h/users/1?limit=5&api_key=***"
        );
        assert_eq!(redact_api_key("http://h/users/1"), "http://h/users/1");
        // encoded values elsewhere in the query are preserved
        assert_eq!(
            redact_api_key("http://h/p?q=a+b%26c&api_key=s%26x"),
            "http://h/p?q=a+b%26c&api_key=***"
        );
    }

    proptest! {
        #[test]
        fn prop_query_round_trip(
            entries in proptest::collection::btree_map("[a-z]{1,8}", ".*", 0..6)
        ) {
            let params: Params = entries.iter().map(|(k, v)| (k.clone(), v)).collect();
            let decoded = Params::from_query_string(&params.to_query_string());
            prop_assert_eq!(decoded, params);
        }

        #[test]
        fn prop_api_key_is_last(
            entries in proptest::collection::btree_map("[a-z]{1,8}", ".*", 0..6),
            key in "[A-Za-z0-9]{1,16}"
        ) {
            let params: Params = entries.iter().map(|(k, v)| (k.clone(), v)).collect();
            let query = params.with_api_key(&key).to_query_string();
            let expected_suffix = format!("api_key={}", key);
            prop_assert!(query.ends_with(&expected_suffix));
            prop_assert_eq!(query.matches("api_key=").count(), 1);
        }
    }
}
