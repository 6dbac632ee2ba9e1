//! Attribute catalog and per-source selection rules.
//!
//! The catalog is a read-only list of attribute keys per data source, as
//! supplied by the backend's key-suggestion API. Some attribute names are
//! internal to a signal and must never be offered as selectable options for
//! it: selection filtering is a correctness requirement, not display
//! cosmetics.

use crate::core::{AttributeKey, DataSource};
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

static TRACES_RESERVED: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["isRoot", "isEntryPoint", "body"].into_iter().collect());

static METRICS_RESERVED: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["body"].into_iter().collect());

static LOGS_RESERVED: Lazy<HashSet<&'static str>> = Lazy::new(HashSet::new);

/// Attribute names a data source excludes from selection.
pub fn reserved_attribute_names(data_source: DataSource) -> &'static HashSet<&'static str> {
    match data_source {
        DataSource::Traces => &TRACES_RESERVED,
        DataSource::Metrics => &METRICS_RESERVED,
        DataSource::Logs => &LOGS_RESERVED,
    }
}

/// Read-only attribute key listing per data source.
#[derive(Debug, Clone, Default)]
pub struct AttributeCatalog {
    keys: HashMap<DataSource, Vec<AttributeKey>>,
}

impl AttributeCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the key listing for a data source.
    pub fn register(&mut self, data_source: DataSource, keys: Vec<AttributeKey>) {
        self.keys.insert(data_source, keys);
    }

    /// All known keys for a data source, including reserved ones.
    pub fn keys(&self, data_source: DataSource) -> &[AttributeKey] {
        self.keys.get(&data_source).map_or(&[], Vec::as_slice)
    }

    /// Keys a user may select for a data source, with reserved names
    /// removed and duplicates (same name) collapsed in catalog order.
    pub fn selectable_keys(&self, data_source: DataSource) -> Vec<AttributeKey> {
        let reserved = reserved_attribute_names(data_source);
        let mut seen: HashSet<&str> = HashSet::new();
        self.keys(data_source)
            .iter()
            .filter(|key| !reserved.contains(key.name.as_str()))
            .filter(|key| seen.insert(key.name.as_str()))
            .cloned()
            .collect()
    }

    /// Look up a selectable key by name for a data source.
    pub fn find(&self, data_source: DataSource, name: &str) -> Option<&AttributeKey> {
        if reserved_attribute_names(data_source).contains(name) {
            return None;
        }
        self.keys(data_source).iter().find(|key| key.name == name)
    }
}
