//! Sortable-table URL state.
//!
//! A table's sort column, direction, and page persist in the flat
//! `columnKey`, `order`, and `page` parameters. Every change writes all
//! three in one navigation with replace semantics, so paging through a
//! table never pollutes history.

use crate::core::Config;
use crate::params::location::{Locator, Navigator};
use crate::params::store::FlatParamStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const COLUMN_KEY: &str = "columnKey";
const ORDER_KEY: &str = "order";
const PAGE_KEY: &str = "page";

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascend,
    Descend,
}

impl SortOrder {
    /// URL value for this direction
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascend => "ascend",
            Self::Descend => "descend",
        }
    }

    /// Parse the URL value, `None` for anything unrecognized.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ascend" => Some(Self::Ascend),
            "descend" => Some(Self::Descend),
            _ => None,
        }
    }
}

/// Current sort selection of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    /// Column the table is sorted by
    pub column_key: String,
    /// Direction, `None` when sorting was cleared
    pub order: Option<SortOrder>,
    /// Current 1-based page
    pub page: u64,
}

/// URL-synchronized sort/page state for one table.
pub struct SortableTable {
    params: FlatParamStore,
    fallback: SortState,
}

impl SortableTable {
    /// Create sortable-table state with an initial sort used when the URL
    /// carries none.
    pub fn new(
        locator: Arc<dyn Locator>,
        navigator: Arc<dyn Navigator>,
        initial_column_key: impl Into<String>,
        initial_order: Option<SortOrder>,
    ) -> Self {
        Self::with_config(locator, navigator, initial_column_key, initial_order, &Config::default())
    }

    /// Create sortable-table state with explicit configuration.
    pub fn with_config(
        locator: Arc<dyn Locator>,
        navigator: Arc<dyn Navigator>,
        initial_column_key: impl Into<String>,
        initial_order: Option<SortOrder>,
        config: &Config,
    ) -> Self {
        Self {
            params: FlatParamStore::with_config(locator, navigator, config),
            fallback: SortState {
                column_key: initial_column_key.into(),
                order: initial_order,
                page: 1,
            },
        }
    }

    /// The live sort state, read from the URL with initial-value fallback.
    pub fn sorted_info(&self) -> SortState {
        let column_key = self
            .params
            .get(COLUMN_KEY)
            .unwrap_or_else(|| self.fallback.column_key.clone());
        let order = self
            .params
            .get(ORDER_KEY)
            .as_deref()
            .and_then(SortOrder::parse)
            .or(self.fallback.order);
        let page = self
            .params
            .get(PAGE_KEY)
            .and_then(|p| p.parse().ok())
            .unwrap_or(self.fallback.page);
        SortState {
            column_key,
            order,
            page,
        }
    }

    /// Record a sort/page change, writing all keys in one replace
    /// navigation.
    pub fn handle_change(&self, column_key: &str, order: Option<SortOrder>, page: u64) {
        let order_value = order.map(|o| o.as_str()).unwrap_or("");
        let page_value = page.max(1).to_string();
        self.params.set_many(
            &[
                (COLUMN_KEY, column_key),
                (ORDER_KEY, order_value),
                (PAGE_KEY, &page_value),
            ],
            true,
        );
    }

    /// Mirror an external search string into the `search` parameter,
    /// replacing the current entry.
    pub fn sync_search(&self, term: &str) {
        self.params.set("search", term, true);
    }
}
