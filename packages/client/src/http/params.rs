//! Multi-valued request parameters

use std::collections::BTreeMap;

use crate::error::{self, Result};

/// Ordered, multi-valued parameter set.
///
/// Encodes as `application/x-www-form-urlencoded` with keys sorted and the
/// values of each key kept in insertion order, so the same set always
/// produces the same query string or body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: BTreeMap<String, Vec<String>>,
}

impl Params {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every value of `key` with `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(key.into(), vec![value.into()]);
        self
    }

    /// Append `value` to the values of `key`.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.entry(key.into()).or_default().push(value.into());
        self
    }

    /// First value of `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    #[must_use]
    pub fn get_all(&self, key: &str) -> &[String] {
        self.values.get(key).map_or(&[][..], Vec::as_slice)
    }

    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.values.remove(key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of distinct keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// URL-encode the set.
    ///
    /// # Errors
    ///
    /// Returns a builder error if the pairs cannot be serialized.
    pub fn encode(&self) -> Result<String> {
        let pairs: Vec<(&str, &str)> = self
            .values
            .iter()
            .flat_map(|(key, values)| values.iter().map(move |v| (key.as_str(), v.as_str())))
            .collect();
        serde_urlencoded::to_string(pairs).map_err(error::builder)
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.add(key, value);
        }
        params
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_sorts_keys_and_keeps_value_order() {
        let mut params = Params::new();
        params.add("b", "2").add("a", "z").add("a", "y");
        assert_eq!(params.encode().expect("encodable"), "a=z&a=y&b=2");
    }

    #[test]
    fn encode_escapes_reserved_characters() {
        let params = Params::from([("q", "a b&c=d"), ("k", "TEST_HELLO")]);
        assert_eq!(
            params.encode().expect("encodable"),
            "k=TEST_HELLO&q=a+b%26c%3Dd"
        );
    }

    #[test]
    fn set_replaces_previous_values() {
        let mut params = Params::from([("key", "one"), ("key", "two")]);
        assert_eq!(params.get_all("key").len(), 2);
        params.set("key", "three");
        assert_eq!(params.get_all("key"), ["three".to_string()]);
        assert_eq!(params.get("key"), Some("three"));
    }

    #[test]
    fn empty_set_encodes_to_empty_string() {
        let params = Params::new();
        assert!(params.is_empty());
        assert_eq!(params.encode().expect("encodable"), "");
    }
}
