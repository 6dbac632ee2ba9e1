use crate::core::error::{Result, ViewStateError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Telemetry signal a view reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Traces,
    Logs,
    Metrics,
}

impl DataSource {
    /// Get display string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Traces => "traces",
            Self::Logs => "logs",
            Self::Metrics => "metrics",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Field data types reported by the attribute catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    #[default]
    String,
    Bool,
    Int64,
    Float64,
    #[serde(rename = "")]
    Unknown,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Bool => write!(f, "bool"),
            Self::Int64 => write!(f, "int64"),
            Self::Float64 => write!(f, "float64"),
            Self::Unknown => write!(f, ""),
        }
    }
}

/// A telemetry field key as supplied by the attribute catalog and used for
/// filter conditions, group-by clauses, and table columns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeKey {
    /// Attribute name, e.g. `serviceName` or `http.status_code`
    pub name: String,
    /// Data type reported by the catalog
    #[serde(default)]
    pub field_data_type: DataType,
    /// Context the field belongs to (`resource`, `tag`, or empty)
    #[serde(default)]
    pub field_context: String,
}

impl AttributeKey {
    /// Creates a new attribute key after validation
    pub fn new(name: impl Into<String>, data_type: DataType) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(ViewStateError::validation("attribute name cannot be empty"));
        }
        if name.len() > 255 {
            return Err(ViewStateError::validation(format!(
                "attribute name cannot exceed 255 characters, got {}",
                name.len()
            )));
        }
        Ok(Self {
            name,
            field_data_type: data_type,
            field_context: String::new(),
        })
    }

    /// Sets the field context (`resource` or `tag`)
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.field_context = context.into();
        self
    }

    /// Deterministic identifier for this key, stable across runs.
    ///
    /// Mirrors the `name--type--context` slug the platform uses for tag
    /// identity, so identical inputs always compose identical queries.
    pub fn slug(&self) -> String {
        format!("{}--{}--{}", self.name, self.field_data_type, self.field_context)
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Inclusive epoch-millisecond time range carried in parameter bags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    /// Range start, epoch milliseconds
    pub start_time: u64,
    /// Range end, epoch milliseconds
    pub end_time: u64,
}

impl TimeRange {
    /// Creates a new time range after validation
    pub fn new(start_time: u64, end_time: u64) -> Result<Self> {
        if end_time < start_time {
            return Err(ViewStateError::validation(format!(
                "time range end {} precedes start {}",
                end_time, start_time
            )));
        }
        Ok(Self { start_time, end_time })
    }

    /// Range width in milliseconds
    pub fn duration_ms(&self) -> u64 {
        self.end_time - self.start_time
    }
}
