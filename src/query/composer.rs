//! Widget query composition.
//!
//! Builds composite queries for monitoring widgets from primitive
//! selections: a domain scope, the view's local filter tree, and the active
//! group-by attributes. Composition is deterministic — identical inputs
//! always produce byte-identical queries, so widget caches and fixture
//! tests can compare results by equality.

use crate::core::{AttributeKey, DataSource, DataType, Result};
use crate::query::composite::{BuilderQuery, CompositeQuery};
use crate::query::filter::{Condition, FilterExpression};

/// Attribute carrying the remote host a client span talked to.
const DOMAIN_ATTRIBUTE: &str = "net.peer.name";

/// Attribute carrying the endpoint path of a client span.
const ENDPOINT_ATTRIBUTE: &str = "http.url";

fn domain_condition(domain: &str) -> Condition {
    let key = AttributeKey {
        name: DOMAIN_ATTRIBUTE.to_string(),
        field_data_type: DataType::String,
        field_context: "tag".to_string(),
    };
    Condition::eq(key, domain)
}

fn group_by_condition(key: &AttributeKey) -> Condition {
    Condition::exists(key.clone())
}

/// Build the all-endpoints widget query for a domain.
///
/// Starts from the view's local filters, scopes them to `domain`, and adds
/// an existence condition per group-by attribute so grouped rows only cover
/// spans that carry the attribute.
pub fn build_widget_query(
    data_source: DataSource,
    domain: &str,
    base_filters: &FilterExpression,
    group_by: &[AttributeKey],
) -> Result<CompositeQuery> {
    let mut filters = base_filters.clone();
    if !domain.is_empty() {
        filters = filters.add_condition(domain_condition(domain));
    }
    for key in group_by {
        filters = filters.add_condition(group_by_condition(key));
    }

    let query = BuilderQuery::new("A", data_source)
        .with_aggregate("count")
        .with_filters(filters)
        .with_group_by(group_by.to_vec());

    CompositeQuery::builder(vec![query], Vec::new())
}

/// Build the drill-down query for one endpoint of a domain.
///
/// Same shape as [`build_widget_query`] with an additional equality
/// condition pinning the endpoint, and no group-by.
pub fn build_endpoint_query(
    data_source: DataSource,
    domain: &str,
    endpoint: &str,
    base_filters: &FilterExpression,
) -> Result<CompositeQuery> {
    let mut filters = base_filters.clone();
    if !domain.is_empty() {
        filters = filters.add_condition(domain_condition(domain));
    }
    if !endpoint.is_empty() {
        let key = AttributeKey {
            name: ENDPOINT_ATTRIBUTE.to_string(),
            field_data_type: DataType::String,
            field_context: "tag".to_string(),
        };
        filters = filters.add_condition(Condition::eq(key, endpoint));
    }

    let query = BuilderQuery::new("A", data_source)
        .with_aggregate("count")
        .with_filters(filters);

    CompositeQuery::builder(vec![query], Vec::new())
}
