//! Ordered query-string model.
//!
//! [`SearchParams`] holds the decoded key/value pairs of a URL query string
//! in their original order, mirroring the platform's `URLSearchParams`
//! semantics: `set` replaces the first occurrence of a key and drops any
//! duplicates, `remove` deletes every occurrence.

use smallvec::SmallVec;
use url::form_urlencoded;

/// Decoded, ordered URL query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pairs: SmallVec<[(String, String); 8]>,
}

impl SearchParams {
    /// Create an empty parameter list
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string, with or without the leading `?`.
    pub fn parse(search: &str) -> Self {
        let raw = search.strip_prefix('?').unwrap_or(search);
        let pairs = form_urlencoded::parse(raw.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { pairs }
    }

    /// Get the first value for a key, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set a key to a single value, replacing the first occurrence in place
    /// and removing any later duplicates. Appends when the key is new.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        let mut replaced = false;
        self.pairs.retain(|(k, v)| {
            if k.as_str() != key {
                return true;
            }
            if replaced {
                false
            } else {
                v.clone_from(&value);
                replaced = true;
                true
            }
        });
        if !replaced {
            self.pairs.push((key.to_string(), value));
        }
    }

    /// Remove every occurrence of a key, returning the first removed value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let first = self.get(key).map(str::to_string);
        self.pairs.retain(|(k, _)| k.as_str() != key);
        first
    }

    /// True when a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of stored pairs
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// True when no pairs are stored
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Serialize back to a percent-encoded query string, without the
    /// leading `?`. An empty list serializes to an empty string.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (k, v) in &self.pairs {
            serializer.append_pair(k, v);
        }
        serializer.finish()
    }
}
