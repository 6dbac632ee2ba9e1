//! Searchable routing-policy list.
//!
//! The search term lives in the flat `search` URL parameter: it initializes
//! from the URL on construction, every edit writes back with replace
//! semantics, and clearing the term removes the key entirely.

use crate::core::Config;
use crate::params::location::{Locator, Navigator};
use crate::params::store::FlatParamStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const SEARCH_KEY: &str = "search";

/// An alert routing policy as listed in the alerts settings view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingPolicy {
    /// Backend identifier
    pub id: String,
    /// Unique display name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Notification channels the policy routes to
    #[serde(default)]
    pub channels: Vec<String>,
}

/// URL-synchronized, searchable view over a policy list.
pub struct PolicyListView {
    params: FlatParamStore,
    policies: Vec<RoutingPolicy>,
}

impl PolicyListView {
    /// Create a view over the given location and policy snapshot.
    pub fn new(
        locator: Arc<dyn Locator>,
        navigator: Arc<dyn Navigator>,
        policies: Vec<RoutingPolicy>,
    ) -> Self {
        Self {
            params: FlatParamStore::new(locator, navigator),
            policies,
        }
    }

    /// Create a view with explicit configuration.
    pub fn with_config(
        locator: Arc<dyn Locator>,
        navigator: Arc<dyn Navigator>,
        policies: Vec<RoutingPolicy>,
        config: &Config,
    ) -> Self {
        Self {
            params: FlatParamStore::with_config(locator, navigator, config),
            policies,
        }
    }

    /// Replace the policy snapshot after a refetch.
    pub fn set_policies(&mut self, policies: Vec<RoutingPolicy>) {
        self.policies = policies;
    }

    /// The current search term, read from the URL. Empty when absent.
    pub fn search_term(&self) -> String {
        self.params.get(SEARCH_KEY).unwrap_or_default()
    }

    /// Set the search term, writing the URL with replace semantics.
    ///
    /// An empty term removes the `search` key from the URL.
    pub fn set_search_term(&self, term: &str) {
        if term.is_empty() {
            self.params.remove(SEARCH_KEY, true);
        } else {
            self.params.set(SEARCH_KEY, term, true);
        }
    }

    /// Policies matching the current search term, in snapshot order.
    ///
    /// Matches case-insensitively on name or description; an empty term
    /// matches everything.
    pub fn filtered(&self) -> Vec<&RoutingPolicy> {
        let term = self.search_term().to_lowercase();
        self.policies
            .iter()
            .filter(|policy| {
                term.is_empty()
                    || policy.name.to_lowercase().contains(&term)
                    || policy.description.to_lowercase().contains(&term)
            })
            .collect()
    }
}
