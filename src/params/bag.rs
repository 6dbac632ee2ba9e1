//! Typed parameter bags.
//!
//! A parameter bag is the structured, URL-serializable representation of a
//! view's query/filter/display state. Bags are explicit structs with named
//! optional fields and documented defaults rather than open-ended maps.

use crate::core::TimeRange;
use crate::query::FilterExpression;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A parameter bag that round-trips through a single URL token.
///
/// Implementors pick the flat URL key the encoded token lives under and
/// supply defaults used when the token is absent or malformed.
pub trait ParamBag:
    Serialize + DeserializeOwned + Default + Clone + PartialEq + Send + Sync + 'static
{
    /// URL query key the encoded token is stored under.
    const KEY: &'static str;
}

/// Explorer sub-view selection for the API monitoring page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MonitoringView {
    /// Aggregate table of every endpoint for a domain
    #[default]
    AllEndpoints,
    /// Drill-down into a single endpoint
    EndpointDetails,
}

/// Query/filter/display state of the API monitoring explorer.
///
/// Persisted in the URL under the `apiMonitoringParams` key as a single
/// percent-encoded JSON token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiMonitoringParams {
    /// Whether the endpoint table includes raw client IPs
    #[serde(rename = "showIP")]
    pub show_ip: bool,
    /// Domain the view is scoped to, empty when unscoped
    pub selected_domain: String,
    /// Active sub-view
    pub selected_view: MonitoringView,
    /// Endpoint selected for drill-down, empty when none
    pub selected_end_point_name: String,
    /// Attribute names the endpoint table is grouped by
    pub group_by: Vec<String>,
    /// Local filters applied to the all-endpoints table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_endpoints_filters: Option<FilterExpression>,
    /// Local filters applied to the endpoint drill-down
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_point_details_filters: Option<FilterExpression>,
    /// Time range selected in the drill-down modal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modal_time_range: Option<TimeRange>,
    /// Aggregation interval selected in the drill-down modal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_interval: Option<String>,
}

impl Default for ApiMonitoringParams {
    fn default() -> Self {
        Self {
            show_ip: true,
            selected_domain: String::new(),
            selected_view: MonitoringView::AllEndpoints,
            selected_end_point_name: String::new(),
            group_by: Vec::new(),
            all_endpoints_filters: None,
            end_point_details_filters: None,
            modal_time_range: None,
            selected_interval: None,
        }
    }
}

impl ParamBag for ApiMonitoringParams {
    const KEY: &'static str = "apiMonitoringParams";
}

/// Partial update over [`ApiMonitoringParams`].
///
/// Fields left as `None` are absent from the serialized patch and leave the
/// corresponding bag fields untouched. The merge is shallow: a present field
/// replaces the whole value it names, including nested objects.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMonitoringPatch {
    #[serde(rename = "showIP", skip_serializing_if = "Option::is_none")]
    show_ip: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    selected_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    selected_view: Option<MonitoringView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    selected_end_point_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    group_by: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    all_endpoints_filters: Option<FilterExpression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_point_details_filters: Option<FilterExpression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    modal_time_range: Option<TimeRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    selected_interval: Option<String>,
}

impl ApiMonitoringPatch {
    /// Create an empty patch
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle client IP visibility
    pub fn show_ip(mut self, show: bool) -> Self {
        self.show_ip = Some(show);
        self
    }

    /// Scope the view to a domain
    pub fn selected_domain(mut self, domain: impl Into<String>) -> Self {
        self.selected_domain = Some(domain.into());
        self
    }

    /// Switch the active sub-view
    pub fn selected_view(mut self, view: MonitoringView) -> Self {
        self.selected_view = Some(view);
        self
    }

    /// Select an endpoint for drill-down
    pub fn selected_end_point_name(mut self, name: impl Into<String>) -> Self {
        self.selected_end_point_name = Some(name.into());
        self
    }

    /// Replace the group-by attribute list
    pub fn group_by(mut self, group_by: Vec<String>) -> Self {
        self.group_by = Some(group_by);
        self
    }

    /// Replace the all-endpoints local filters
    pub fn all_endpoints_filters(mut self, filters: FilterExpression) -> Self {
        self.all_endpoints_filters = Some(filters);
        self
    }

    /// Replace the endpoint drill-down local filters
    pub fn end_point_details_filters(mut self, filters: FilterExpression) -> Self {
        self.end_point_details_filters = Some(filters);
        self
    }

    /// Replace the modal time range
    pub fn modal_time_range(mut self, range: TimeRange) -> Self {
        self.modal_time_range = Some(range);
        self
    }

    /// Replace the modal aggregation interval
    pub fn selected_interval(mut self, interval: impl Into<String>) -> Self {
        self.selected_interval = Some(interval.into());
        self
    }
}
