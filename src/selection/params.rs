//! Case-insensitive request parameters

use std::collections::HashMap;

/// Request parameters keyed case-insensitively
///
/// Keys are upper-cased on insert, so `bbox`, `Bbox` and `BBOX` all
/// address the same entry. A later insert replaces an earlier one.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    values: HashMap<String, String>,
}

impl QueryParams {
    pub fn new() -> Self {
        QueryParams::default()
    }

    /// Insert a parameter, replacing any earlier value for the same key
    pub fn insert(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_uppercase(), value.to_string());
    }

    /// Builder-style insert
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a parameter by any casing of its key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(&key.to_uppercase()).map(String::as_str)
    }

    /// Parse a `KEY=VALUE` pair; the value may itself contain `=`
    pub fn parse_pair(pair: &str) -> Result<(String, String), String> {
        match pair.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.to_string()))
            },
            _ => Err(format!("expected KEY=VALUE, got '{}'", pair)),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (key, value) in iter {
            params.insert(key.as_ref(), value.as_ref());
        }
        params
    }
}
