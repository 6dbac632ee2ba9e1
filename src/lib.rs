//! Viewstate - URL-synchronized query-parameter state model.
//!
//! Viewstate implements the state layer behind observability explorer
//! views (traces, logs, metrics): how structured query state is serialized
//! to and from a URL, merged with partial updates, composed into widget
//! queries, and kept consistent with persisted display preferences.
//!
//! # Features
//!
//! - **Param codec**: parameter bags round-trip through a single
//!   percent-encoded JSON token; malformed tokens fail soft to defaults
//! - **Param store**: shallow per-key merge over the live URL, push or
//!   replace navigation, one serialized write path
//! - **Query composer**: persistent filter trees and deterministic
//!   composite queries with validated formula references
//! - **Preference synchronizer**: optimistic column/formatting updates
//!   against an async persistence backend
//!
//! # Architecture
//!
//! - `core`: errors, configuration, and shared domain types
//! - `params`: codec, query-string model, location seams, stores
//! - `query`: filter trees, composite queries, catalog, composer
//! - `prefs`: preference model, backends, synchronizer
//! - `views`: policy list and sortable-table state built on the stores
//!
//! # Example
//!
//! ```
//! use viewstate::params::{ApiMonitoringPatch, MemoryHistory, ParamStore};
//! use viewstate::params::ApiMonitoringParams;
//!
//! let history = MemoryHistory::new("/api-monitoring");
//! let store: ParamStore<ApiMonitoringParams> =
//!     ParamStore::new(history.clone(), history.clone());
//!
//! store
//!     .set(&ApiMonitoringPatch::new().selected_domain("api.example.com"), true)
//!     .unwrap();
//! assert_eq!(store.get().selected_domain, "api.example.com");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod core;
pub mod params;
pub mod prefs;
pub mod query;
pub mod views;

// Re-export core types for convenience
pub use crate::core::{Config, Result, ViewStateError};
