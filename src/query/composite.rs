//! Composite query model.
//!
//! A composite query is the union of builder queries, derived formulas, and
//! alternate raw-query representations for one logical request. Builder
//! queries and formulas are uniquely named, and formula expressions must
//! resolve against the names present in the same composite — validated at
//! construction, never stored as back-references.

use crate::core::{AttributeKey, DataSource, Result, ViewStateError};
use crate::query::filter::FilterExpression;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Discriminant for the active query representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    Builder,
    Promql,
    ClickhouseSql,
}

/// A single structured (non-freeform) query definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderQuery {
    /// Unique name within the composite, e.g. `A`
    pub query_name: String,
    /// Signal the query reads from
    pub data_source: DataSource,
    /// Aggregation applied to matching rows
    pub aggregate_operator: String,
    /// Filter tree applied before aggregation
    pub filters: FilterExpression,
    /// Attributes the result is grouped by
    pub group_by: Vec<AttributeKey>,
    /// Expression evaluated for this query; equals `query_name` for
    /// plain builder queries
    pub expression: String,
    /// Excluded from execution when set
    pub disabled: bool,
    /// Display legend, empty for the default
    pub legend: String,
}

impl BuilderQuery {
    /// Create a builder query with conventional defaults.
    pub fn new(query_name: impl Into<String>, data_source: DataSource) -> Self {
        let query_name = query_name.into();
        Self {
            expression: query_name.clone(),
            query_name,
            data_source,
            aggregate_operator: "count".to_string(),
            filters: FilterExpression::and(),
            group_by: Vec::new(),
            disabled: false,
            legend: String::new(),
        }
    }

    /// Set the aggregate operator
    pub fn with_aggregate(mut self, op: impl Into<String>) -> Self {
        self.aggregate_operator = op.into();
        self
    }

    /// Set the filter tree
    pub fn with_filters(mut self, filters: FilterExpression) -> Self {
        self.filters = filters;
        self
    }

    /// Set the group-by attributes
    pub fn with_group_by(mut self, group_by: Vec<AttributeKey>) -> Self {
        self.group_by = group_by;
        self
    }
}

/// A derived query computed from other named queries via an expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Formula {
    /// Unique name within the composite, e.g. `F1`
    pub query_name: String,
    /// Arithmetic expression over query names, e.g. `A / B`
    pub expression: String,
    /// Display legend
    pub legend: String,
    /// Excluded from execution when set
    pub disabled: bool,
}

impl Formula {
    /// Create an enabled formula with an empty legend.
    pub fn new(query_name: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            query_name: query_name.into(),
            expression: expression.into(),
            legend: String::new(),
            disabled: false,
        }
    }
}

/// A raw PromQL query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromQuery {
    /// Unique name within the composite
    pub query_name: String,
    /// PromQL text
    pub query: String,
    /// Display legend
    pub legend: String,
    /// Excluded from execution when set
    pub disabled: bool,
}

/// A raw ClickHouse SQL query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickHouseQuery {
    /// Unique name within the composite
    pub query_name: String,
    /// SQL text
    pub query: String,
    /// Display legend
    pub legend: String,
    /// Excluded from execution when set
    pub disabled: bool,
}

/// The union of builder queries, formulas, and raw representations for one
/// logical request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeQuery {
    /// Active representation
    pub query_type: QueryType,
    /// Structured queries, ordered; used when `query_type` is `Builder`
    pub builder_queries: Vec<BuilderQuery>,
    /// Derived formulas, ordered; used when `query_type` is `Builder`
    pub formulas: Vec<Formula>,
    /// Raw PromQL queries; used when `query_type` is `Promql`
    pub promql: Vec<PromQuery>,
    /// Raw SQL queries; used when `query_type` is `ClickhouseSql`
    pub clickhouse_sql: Vec<ClickHouseQuery>,
}

impl CompositeQuery {
    /// Build a validated builder-type composite.
    pub fn builder(queries: Vec<BuilderQuery>, formulas: Vec<Formula>) -> Result<Self> {
        let composite = Self {
            query_type: QueryType::Builder,
            builder_queries: queries,
            formulas,
            promql: Vec::new(),
            clickhouse_sql: Vec::new(),
        };
        composite.validate()?;
        Ok(composite)
    }

    /// Build a PromQL composite.
    pub fn promql(queries: Vec<PromQuery>) -> Result<Self> {
        let composite = Self {
            query_type: QueryType::Promql,
            builder_queries: Vec::new(),
            formulas: Vec::new(),
            promql: queries,
            clickhouse_sql: Vec::new(),
        };
        composite.validate()?;
        Ok(composite)
    }

    /// Build a ClickHouse SQL composite.
    pub fn clickhouse(queries: Vec<ClickHouseQuery>) -> Result<Self> {
        let composite = Self {
            query_type: QueryType::ClickhouseSql,
            builder_queries: Vec::new(),
            formulas: Vec::new(),
            promql: Vec::new(),
            clickhouse_sql: queries,
        };
        composite.validate()?;
        Ok(composite)
    }

    /// Validate name uniqueness and formula references.
    pub fn validate(&self) -> Result<()> {
        let mut names: HashSet<&str> = HashSet::new();
        let all_names = self
            .builder_queries
            .iter()
            .map(|q| q.query_name.as_str())
            .chain(self.formulas.iter().map(|f| f.query_name.as_str()))
            .chain(self.promql.iter().map(|q| q.query_name.as_str()))
            .chain(self.clickhouse_sql.iter().map(|q| q.query_name.as_str()));
        for name in all_names {
            if name.is_empty() {
                return Err(ViewStateError::validation("query name cannot be empty"));
            }
            if !names.insert(name) {
                return Err(ViewStateError::DuplicateQueryName(name.to_string()));
            }
        }

        // Formulas may only reference builder query names that exist in
        // this composite, checked against the snapshot above.
        let query_names: HashSet<&str> = self
            .builder_queries
            .iter()
            .map(|q| q.query_name.as_str())
            .collect();
        for formula in &self.formulas {
            for reference in referenced_query_names(&formula.expression) {
                if !query_names.contains(reference) {
                    return Err(ViewStateError::UnknownQueryReference {
                        formula: formula.query_name.clone(),
                        reference: reference.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Extract query-name identifiers from a formula expression.
///
/// Query names are a single uppercase letter optionally followed by digits
/// (`A`, `B`, `A2`). Anything else in the expression (numbers, function
/// names, operators) is ignored.
pub fn referenced_query_names(expression: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let bytes = expression.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i] as char;
        if c.is_ascii_alphabetic() {
            let start = i;
            while i < bytes.len() && (bytes[i] as char).is_ascii_alphanumeric() {
                i += 1;
            }
            let token = &expression[start..i];
            if is_query_name(token) && !names.contains(&token) {
                names.push(token);
            }
        } else {
            i += 1;
        }
    }
    names
}

fn is_query_name(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => chars.all(|c| c.is_ascii_digit()),
        _ => false,
    }
}
