//! Parameter store with merge-and-persist semantics.
//!
//! The URL is the source of truth: every read decodes the live query string
//! and every write re-reads it, merges, and navigates. Writes serialize
//! through one lock so overlapping updates coalesce — the final URL carries
//! the last value per key from every call, not just the last call.

use crate::core::config::ParamsConfig;
use crate::core::{Config, Result, ViewStateError};
use crate::params::bag::ParamBag;
use crate::params::codec;
use crate::params::location::{Locator, Navigator};
use crate::params::search::SearchParams;
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::trace;

/// URL-backed store for a single typed parameter bag.
pub struct ParamStore<T: ParamBag> {
    locator: Arc<dyn Locator>,
    navigator: Arc<dyn Navigator>,
    config: ParamsConfig,
    write_gate: Mutex<()>,
    _bag: PhantomData<fn() -> T>,
}

impl<T: ParamBag> ParamStore<T> {
    /// Create a store over the given location with default configuration.
    pub fn new(locator: Arc<dyn Locator>, navigator: Arc<dyn Navigator>) -> Self {
        Self::with_config(locator, navigator, &Config::default())
    }

    /// Create a store with explicit configuration.
    pub fn with_config(
        locator: Arc<dyn Locator>,
        navigator: Arc<dyn Navigator>,
        config: &Config,
    ) -> Self {
        Self {
            locator,
            navigator,
            config: config.params.clone(),
            write_gate: Mutex::new(()),
            _bag: PhantomData,
        }
    }

    /// Decode the current bag from the live location.
    ///
    /// Absent, malformed, or oversized tokens yield `T::default()`.
    pub fn get(&self) -> T {
        let params = SearchParams::parse(&self.locator.search());
        codec::decode_json_bounded(params.get(T::KEY), self.config.max_token_bytes)
    }

    /// Merge a partial update over the current bag and write it back.
    ///
    /// The merge is shallow per top-level key: each key present in `patch`
    /// replaces the whole value it names, keys absent from `patch` stay
    /// unchanged. `replace` rewrites the current history entry instead of
    /// pushing a new one. Other query keys in the URL are preserved.
    pub fn set(&self, patch: &impl Serialize, replace: bool) -> Result<()> {
        let _gate = self.write_gate.lock();

        let mut params = SearchParams::parse(&self.locator.search());
        let current = codec::decode_json_bounded::<T>(params.get(T::KEY), self.config.max_token_bytes);

        let merged = merge_shallow(&current, patch)?;
        let json = codec::encode_json(&merged)?;
        if json.len() > self.config.max_token_bytes {
            return Err(ViewStateError::validation(format!(
                "encoded parameter token is {} bytes, limit is {}",
                json.len(),
                self.config.max_token_bytes
            )));
        }

        trace!(key = T::KEY, replace, "writing merged parameter token");
        params.set(T::KEY, json);
        self.navigator.navigate(&params.to_query_string(), replace);
        Ok(())
    }

    /// Remove the bag's token from the URL entirely, resetting to defaults.
    pub fn reset(&self, replace: bool) {
        let _gate = self.write_gate.lock();
        let mut params = SearchParams::parse(&self.locator.search());
        params.remove(T::KEY);
        self.navigator.navigate(&params.to_query_string(), replace);
    }
}

/// Shallow per-key merge of a serialized patch over a bag.
///
/// The result is re-validated against `T` so a type-mismatched patch is
/// rejected up front instead of silently corrupting the token.
fn merge_shallow<T: ParamBag>(current: &T, patch: &impl Serialize) -> Result<T> {
    let mut base = match serde_json::to_value(current)? {
        Value::Object(map) => map,
        other => {
            return Err(ViewStateError::validation(format!(
                "parameter bag must serialize to an object, got {}",
                json_kind(&other)
            )))
        },
    };
    let overlay = match serde_json::to_value(patch)? {
        Value::Object(map) => map,
        other => {
            return Err(ViewStateError::validation(format!(
                "parameter patch must serialize to an object, got {}",
                json_kind(&other)
            )))
        },
    };
    for (key, value) in overlay {
        base.insert(key, value);
    }
    Ok(serde_json::from_value(Value::Object(base))?)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// URL-backed store for flat, individually-keyed query parameters such as
/// `search`, `columnKey`, `order`, and `page`.
pub struct FlatParamStore {
    locator: Arc<dyn Locator>,
    navigator: Arc<dyn Navigator>,
    config: ParamsConfig,
    write_gate: Mutex<()>,
}

impl FlatParamStore {
    /// Create a flat store over the given location.
    pub fn new(locator: Arc<dyn Locator>, navigator: Arc<dyn Navigator>) -> Self {
        Self::with_config(locator, navigator, &Config::default())
    }

    /// Create a flat store with explicit configuration.
    pub fn with_config(
        locator: Arc<dyn Locator>,
        navigator: Arc<dyn Navigator>,
        config: &Config,
    ) -> Self {
        Self {
            locator,
            navigator,
            config: config.params.clone(),
            write_gate: Mutex::new(()),
        }
    }

    /// Read a single flat parameter from the live location.
    pub fn get(&self, key: &str) -> Option<String> {
        SearchParams::parse(&self.locator.search())
            .get(key)
            .map(str::to_string)
    }

    /// Set a single flat parameter, preserving all other keys.
    ///
    /// When `drop_empty_params` is configured (the default), writing an
    /// empty value removes the key from the URL instead.
    pub fn set(&self, key: &str, value: &str, replace: bool) {
        self.set_many(&[(key, value)], replace);
    }

    /// Set several flat parameters in one navigation.
    pub fn set_many(&self, pairs: &[(&str, &str)], replace: bool) {
        let _gate = self.write_gate.lock();
        let mut params = SearchParams::parse(&self.locator.search());
        for (key, value) in pairs {
            if value.is_empty() && self.config.drop_empty_params {
                params.remove(key);
            } else {
                params.set(key, *value);
            }
        }
        self.navigator.navigate(&params.to_query_string(), replace);
    }

    /// Remove a flat parameter from the URL.
    pub fn remove(&self, key: &str, replace: bool) {
        let _gate = self.write_gate.lock();
        let mut params = SearchParams::parse(&self.locator.search());
        params.remove(key);
        self.navigator.navigate(&params.to_query_string(), replace);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::bag::{ApiMonitoringParams, ApiMonitoringPatch, MonitoringView};
    use crate::params::location::MemoryHistory;
    use pretty_assertions::assert_eq;

    fn store_over(history: &Arc<MemoryHistory>) -> ParamStore<ApiMonitoringParams> {
        ParamStore::new(history.clone(), history.clone())
    }

    #[test]
    fn test_get_returns_defaults_on_fresh_location() {
        let history = MemoryHistory::new("/api-monitoring");
        let store = store_over(&history);
        assert_eq!(store.get(), ApiMonitoringParams::default());
    }

    #[test]
    fn test_set_then_get_round_trips() {
        let history = MemoryHistory::new("/api-monitoring");
        let store = store_over(&history);

        let patch = ApiMonitoringPatch::new()
            .selected_domain("api.example.com")
            .selected_view(MonitoringView::EndpointDetails);
        store.set(&patch, false).unwrap();

        let bag = store.get();
        assert_eq!(bag.selected_domain, "api.example.com");
        assert_eq!(bag.selected_view, MonitoringView::EndpointDetails);
        // Untouched fields keep their defaults
        assert!(bag.show_ip);
    }

    #[test]
    fn test_sequential_sets_merge_all_keys() {
        let history = MemoryHistory::new("/api-monitoring");
        let store = store_over(&history);

        store
            .set(&ApiMonitoringPatch::new().selected_domain("a.com"), false)
            .unwrap();
        store
            .set(&ApiMonitoringPatch::new().group_by(vec!["status".to_string()]), false)
            .unwrap();

        let bag = store.get();
        assert_eq!(bag.selected_domain, "a.com");
        assert_eq!(bag.group_by, vec!["status".to_string()]);
    }

    #[test]
    fn test_set_is_idempotent() {
        let history = MemoryHistory::new("/api-monitoring");
        let store = store_over(&history);
        let patch = ApiMonitoringPatch::new().selected_domain("a.com");

        store.set(&patch, true).unwrap();
        let first = history.current();
        store.set(&patch, true).unwrap();
        assert_eq!(history.current(), first);
    }

    #[test]
    fn test_set_preserves_unrelated_flat_keys() {
        let history = MemoryHistory::new("/api-monitoring?tab=overview");
        let store = store_over(&history);

        store
            .set(&ApiMonitoringPatch::new().show_ip(false), true)
            .unwrap();

        assert!(history.current().contains("tab=overview"));
        assert!(!store.get().show_ip);
    }

    #[test]
    fn test_replace_does_not_grow_history() {
        let history = MemoryHistory::new("/api-monitoring");
        let store = store_over(&history);

        store
            .set(&ApiMonitoringPatch::new().show_ip(false), true)
            .unwrap();
        store
            .set(&ApiMonitoringPatch::new().show_ip(true), true)
            .unwrap();
        assert_eq!(history.len(), 1);

        store
            .set(&ApiMonitoringPatch::new().show_ip(false), false)
            .unwrap();
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_oversized_merge_is_rejected() {
        let history = MemoryHistory::new("/api-monitoring");
        let config = crate::core::ConfigBuilder::new()
            .max_token_bytes(256)
            .build()
            .unwrap();
        let store: ParamStore<ApiMonitoringParams> =
            ParamStore::with_config(history.clone(), history.clone(), &config);

        let patch = ApiMonitoringPatch::new().selected_domain("x".repeat(1024));
        let err = store.set(&patch, true).unwrap_err();
        assert_eq!(err.category(), "validation");
        // URL untouched on failure
        assert_eq!(history.current(), "/api-monitoring");
    }

    #[test]
    fn test_reset_removes_token() {
        let history = MemoryHistory::new("/api-monitoring");
        let store = store_over(&history);

        store
            .set(&ApiMonitoringPatch::new().selected_domain("a.com"), true)
            .unwrap();
        store.reset(true);
        assert_eq!(history.current(), "/api-monitoring?");
        assert_eq!(store.get(), ApiMonitoringParams::default());
    }

    #[test]
    fn test_flat_store_set_and_drop_empty() {
        let history = MemoryHistory::new("/alerts");
        let flat = FlatParamStore::new(history.clone(), history.clone());

        flat.set("search", "payments", true);
        assert_eq!(flat.get("search"), Some("payments".to_string()));

        flat.set("search", "", true);
        assert_eq!(flat.get("search"), None);
        assert_eq!(history.current(), "/alerts?");
    }

    #[test]
    fn test_flat_store_set_many_is_one_navigation() {
        let history = MemoryHistory::new("/services");
        let flat = FlatParamStore::new(history.clone(), history.clone());

        flat.set_many(&[("columnKey", "p99"), ("order", "descend"), ("page", "1")], false);
        assert_eq!(history.len(), 2);
        assert_eq!(history.current(), "/services?columnKey=p99&order=descend&page=1");
    }
}
