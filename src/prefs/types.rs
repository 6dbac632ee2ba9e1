//! Preference data model.

use crate::core::{AttributeKey, DataSource, DataType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Presentation mode for log/trace list bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewFormat {
    Raw,
    #[default]
    Table,
    List,
}

/// Font size for list rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    #[default]
    Small,
    Medium,
    Large,
}

/// Row formatting preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormattingOptions {
    /// Maximum body lines rendered per row
    pub max_lines: u32,
    /// Body presentation mode
    pub format: ViewFormat,
    /// Row font size
    pub font_size: FontSize,
    /// Schema version of the persisted payload
    pub version: u32,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            max_lines: 2,
            format: ViewFormat::default(),
            font_size: FontSize::default(),
            version: 1,
        }
    }
}

/// Per-view display preferences: visible columns and row formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    /// Ordered column descriptors
    pub columns: Vec<AttributeKey>,
    /// Row formatting
    pub formatting: FormattingOptions,
}

impl Preferences {
    /// Default preferences for a data source, with its conventional
    /// starting columns.
    pub fn default_for(data_source: DataSource) -> Self {
        let columns = match data_source {
            DataSource::Logs => vec![
                key("timestamp", DataType::Int64),
                key("body", DataType::String),
            ],
            DataSource::Traces => vec![
                key("serviceName", DataType::String),
                key("name", DataType::String),
                key("durationNano", DataType::Int64),
                key("httpMethod", DataType::String),
                key("responseStatusCode", DataType::String),
            ],
            DataSource::Metrics => vec![key("metric_name", DataType::String)],
        };
        Self {
            columns,
            formatting: FormattingOptions::default(),
        }
    }
}

fn key(name: &str, data_type: DataType) -> AttributeKey {
    AttributeKey {
        name: name.to_string(),
        field_data_type: data_type,
        field_context: String::new(),
    }
}

/// Where preferences persist: directly per browser/user, or attached to a
/// saved view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "mode", content = "viewId")]
pub enum PreferenceMode {
    /// Local, per-user persistence
    Direct,
    /// Persistence attached to a saved view id
    SavedView(String),
}

impl fmt::Display for PreferenceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => write!(f, "direct"),
            Self::SavedView(id) => write!(f, "savedView:{}", id),
        }
    }
}

/// Identifies one preference record: a data source in a persistence mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PreferenceScope {
    /// Signal the preferences apply to
    pub data_source: DataSource,
    /// Persistence mode
    pub mode: PreferenceMode,
}

impl PreferenceScope {
    /// Direct (per-user) scope for a data source
    pub fn direct(data_source: DataSource) -> Self {
        Self {
            data_source,
            mode: PreferenceMode::Direct,
        }
    }

    /// Saved-view scope for a data source
    pub fn saved_view(data_source: DataSource, view_id: impl Into<String>) -> Self {
        Self {
            data_source,
            mode: PreferenceMode::SavedView(view_id.into()),
        }
    }

    /// Stable storage key for this scope
    pub fn storage_key(&self) -> String {
        format!("{}:{}", self.data_source, self.mode)
    }
}
