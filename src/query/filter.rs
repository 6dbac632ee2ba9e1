//! Filter expression trees.
//!
//! A filter expression is a tree of conditions joined by a logical operator,
//! with optional nested sub-expressions. All editing operations are
//! persistent: they return a new expression and never mutate their input,
//! because callers rely on referential-equality change detection.

use crate::core::{AttributeKey, Result, ViewStateError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Logical join operator for a filter expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum FilterOperator {
    #[default]
    And,
    Or,
}

/// Comparison operators for a single condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionOp {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "nin")]
    NotIn,
    #[serde(rename = "contains")]
    Contains,
    #[serde(rename = "ncontains")]
    NotContains,
    #[serde(rename = "like")]
    Like,
    #[serde(rename = "nlike")]
    NotLike,
    #[serde(rename = "exists")]
    Exists,
    #[serde(rename = "nexists")]
    NotExists,
}

/// A single comparison against an attribute key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Stable identifier derived from the key, not random, so identical
    /// inputs compose identical filter trees
    pub id: String,
    /// Attribute the condition applies to
    pub key: AttributeKey,
    /// Comparison operator
    pub op: ConditionOp,
    /// Comparison value; ignored for existence operators
    pub value: Value,
}

impl Condition {
    /// Create a condition with a deterministic id.
    pub fn new(key: AttributeKey, op: ConditionOp, value: Value) -> Self {
        let id = key.slug();
        Self { id, key, op, value }
    }

    /// Equality condition shorthand
    pub fn eq(key: AttributeKey, value: impl Into<Value>) -> Self {
        Self::new(key, ConditionOp::Eq, value.into())
    }

    /// Existence condition shorthand
    pub fn exists(key: AttributeKey) -> Self {
        Self::new(key, ConditionOp::Exists, Value::Null)
    }
}

/// One entry of a filter expression: either a leaf condition or a nested
/// sub-expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterItem {
    Condition(Condition),
    Expression(FilterExpression),
}

/// A tree of conditions joined by [`FilterOperator`].
///
/// Item ordering is preserved for display; it carries no semantic weight
/// for evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FilterExpression {
    /// Join operator applied across `items`
    pub op: FilterOperator,
    /// Ordered conditions and nested sub-expressions
    pub items: Vec<FilterItem>,
}

impl FilterExpression {
    /// Empty AND expression
    pub fn and() -> Self {
        Self {
            op: FilterOperator::And,
            items: Vec::new(),
        }
    }

    /// Empty OR expression
    pub fn or() -> Self {
        Self {
            op: FilterOperator::Or,
            items: Vec::new(),
        }
    }

    /// Return a new expression with `condition` appended. The receiver is
    /// left untouched.
    pub fn add_condition(&self, condition: Condition) -> Self {
        let mut next = self.clone();
        next.items.push(FilterItem::Condition(condition));
        next
    }

    /// Return a new expression with a nested sub-expression appended.
    pub fn add_group(&self, group: FilterExpression) -> Self {
        let mut next = self.clone();
        next.items.push(FilterItem::Expression(group));
        next
    }

    /// Return a new expression with the item at `index` removed.
    ///
    /// Out-of-range indices are a caller bug: development builds assert,
    /// release builds get an error and the receiver stays untouched.
    pub fn remove_by_index(&self, index: usize) -> Result<Self> {
        let len = self.items.len();
        debug_assert!(index < len, "filter item index {} out of range for {}", index, len);
        if index >= len {
            return Err(ViewStateError::IndexOutOfRange { index, len });
        }
        let mut next = self.clone();
        next.items.remove(index);
        Ok(next)
    }

    /// Number of direct items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the expression has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Display for ConditionOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eq => write!(f, "="),
            Self::NotEq => write!(f, "!="),
            Self::In => write!(f, "in"),
            Self::NotIn => write!(f, "nin"),
            Self::Contains => write!(f, "contains"),
            Self::NotContains => write!(f, "ncontains"),
            Self::Like => write!(f, "like"),
            Self::NotLike => write!(f, "nlike"),
            Self::Exists => write!(f, "exists"),
            Self::NotExists => write!(f, "nexists"),
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => write!(f, "AND"),
            Self::Or => write!(f, "OR"),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.op {
            ConditionOp::Exists | ConditionOp::NotExists => {
                write!(f, "{} {}", self.key, self.op)
            },
            _ => write!(f, "{} {} {}", self.key, self.op, self.value),
        }
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for item in &self.items {
            if !first {
                write!(f, " {} ", self.op)?;
            }
            first = false;
            match item {
                FilterItem::Condition(c) => write!(f, "{}", c)?,
                FilterItem::Expression(e) => write!(f, "({})", e)?,
            }
        }
        Ok(())
    }
}
