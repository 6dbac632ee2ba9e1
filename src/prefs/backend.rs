//! Preference persistence backends.

use crate::core::Result;
use crate::prefs::types::{PreferenceScope, Preferences};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Trait for preference persistence implementations.
///
/// The synchronizer only depends on an async load/save pair; the transport
/// behind it (REST, local storage, a database) is the implementor's
/// concern.
#[async_trait::async_trait]
pub trait PreferenceBackend: Send + Sync {
    /// Load the stored preferences for a scope, `None` when never saved.
    async fn load(&self, scope: &PreferenceScope) -> Result<Option<Preferences>>;

    /// Persist preferences for a scope.
    async fn save(&self, scope: &PreferenceScope, preferences: &Preferences) -> Result<()>;
}

/// In-memory preference backend, the direct-mode default and the test
/// double for remote backends.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    records: RwLock<HashMap<String, Preferences>>,
}

impl InMemoryBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// True when nothing has been saved yet
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait::async_trait]
impl PreferenceBackend for InMemoryBackend {
    async fn load(&self, scope: &PreferenceScope) -> Result<Option<Preferences>> {
        Ok(self.records.read().get(&scope.storage_key()).cloned())
    }

    async fn save(&self, scope: &PreferenceScope, preferences: &Preferences) -> Result<()> {
        self.records
            .write()
            .insert(scope.storage_key(), preferences.clone());
        Ok(())
    }
}
