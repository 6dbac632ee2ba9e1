//! Display-preference state and persistence.
//!
//! Per-view column and formatting preferences, persisted either directly
//! (per user) or against a saved view, with optimistic local updates and a
//! resync counter for dependent views.

pub mod backend;
pub mod sync;
pub mod types;

pub use backend::{InMemoryBackend, PreferenceBackend};
pub use sync::{PreferenceSynchronizer, SyncPhase};
pub use types::{
    FontSize, FormattingOptions, PreferenceMode, PreferenceScope, Preferences, ViewFormat,
};
