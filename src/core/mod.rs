//! Core domain models shared across the state model.
//!
//! This module contains the fundamental types and configuration that the
//! param, query, preference, and view layers build on.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{Config, ConfigBuilder, LogLevel};
pub use error::{Result, ViewStateError};
pub use types::{AttributeKey, DataSource, DataType, TimeRange};
