//! URL-synchronized parameter state.
//!
//! A view's query/filter/display state lives in the URL as either a single
//! percent-encoded JSON token (one [`ParamBag`] per view) or individual
//! flat keys (`search`, `columnKey`, `order`, `page`). This module provides
//! the codec between bags and tokens, the ordered query-string model, the
//! location seams, and the stores that merge partial updates into the URL.

pub mod bag;
pub mod codec;
pub mod location;
pub mod search;
pub mod store;

// Re-export commonly used types
pub use bag::{ApiMonitoringParams, ApiMonitoringPatch, MonitoringView, ParamBag};
pub use location::{Locator, MemoryHistory, Navigator};
pub use search::SearchParams;
pub use store::{FlatParamStore, ParamStore};
