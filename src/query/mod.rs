//! Filter and composite query composition.
//!
//! Models the structured query state behind explorer widgets: persistent
//! filter expression trees, composite queries built from named builder
//! queries and formulas, the attribute catalog with per-source selection
//! rules, and the deterministic widget query composer.

pub mod catalog;
pub mod composer;
pub mod composite;
pub mod filter;

pub use catalog::{reserved_attribute_names, AttributeCatalog};
pub use composer::{build_endpoint_query, build_widget_query};
pub use composite::{
    BuilderQuery, ClickHouseQuery, CompositeQuery, Formula, PromQuery, QueryType,
};
pub use filter::{Condition, ConditionOp, FilterExpression, FilterItem, FilterOperator};
