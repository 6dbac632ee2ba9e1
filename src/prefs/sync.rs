//! Preference synchronizer.
//!
//! Reconciles per-view display preferences against a persistence backend
//! with optimistic local updates: an update is applied locally first, then
//! persisted asynchronously. Persistence failure is surfaced to the caller
//! while the optimistic state stays in place — rolling back is a UI-level
//! decision. Every successful update bumps a resync counter so dependent
//! views know to refetch derived state.

use crate::core::config::PrefsConfig;
use crate::core::{AttributeKey, Config, Result, ViewStateError};
use crate::prefs::backend::PreferenceBackend;
use crate::prefs::types::{FormattingOptions, PreferenceScope, Preferences};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Lifecycle phase of the synchronizer.
///
/// `Idle -> Loading -> {Ready, Error}` on load, then
/// `Ready -> Saving -> {Ready, Error}` on every update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Idle,
    Loading,
    Ready,
    Saving,
    Error,
}

#[derive(Debug)]
struct SyncInner {
    phase: SyncPhase,
    preferences: Preferences,
    last_error: Option<String>,
}

/// URL-independent preference state for one scope, kept in sync with a
/// [`PreferenceBackend`].
pub struct PreferenceSynchronizer {
    backend: Arc<dyn PreferenceBackend>,
    scope: PreferenceScope,
    config: PrefsConfig,
    inner: RwLock<SyncInner>,
    resync: AtomicU64,
}

impl PreferenceSynchronizer {
    /// Create a synchronizer with default configuration.
    pub fn new(backend: Arc<dyn PreferenceBackend>, scope: PreferenceScope) -> Self {
        Self::with_config(backend, scope, &Config::default())
    }

    /// Create a synchronizer with explicit configuration.
    pub fn with_config(
        backend: Arc<dyn PreferenceBackend>,
        scope: PreferenceScope,
        config: &Config,
    ) -> Self {
        let defaults = Preferences::default_for(scope.data_source);
        Self {
            backend,
            scope,
            config: config.prefs.clone(),
            inner: RwLock::new(SyncInner {
                phase: SyncPhase::Idle,
                preferences: defaults,
                last_error: None,
            }),
            resync: AtomicU64::new(0),
        }
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> SyncPhase {
        self.inner.read().phase
    }

    /// Snapshot of the current preferences
    pub fn preferences(&self) -> Preferences {
        self.inner.read().preferences.clone()
    }

    /// The scope this synchronizer persists under
    pub fn scope(&self) -> &PreferenceScope {
        &self.scope
    }

    /// Message of the most recent load/save failure, if any
    pub fn last_error(&self) -> Option<String> {
        self.inner.read().last_error.clone()
    }

    /// Number of successful updates since creation. Dependent views watch
    /// this to know when to refetch derived state.
    pub fn resync_count(&self) -> u64 {
        self.resync.load(Ordering::Acquire)
    }

    /// Load preferences from the backend, replacing local state.
    ///
    /// A scope that was never saved loads the data source's defaults.
    pub async fn load(&self) -> Result<()> {
        self.inner.write().phase = SyncPhase::Loading;

        let loaded = with_timeout(self.config.load_timeout, self.backend.load(&self.scope)).await;
        let mut inner = self.inner.write();
        match loaded {
            Ok(Some(preferences)) => {
                inner.preferences = preferences;
                inner.phase = SyncPhase::Ready;
                inner.last_error = None;
                Ok(())
            },
            Ok(None) => {
                inner.preferences = Preferences::default_for(self.scope.data_source);
                inner.phase = SyncPhase::Ready;
                inner.last_error = None;
                Ok(())
            },
            Err(err) => {
                inner.phase = SyncPhase::Error;
                inner.last_error = Some(err.to_string());
                Err(err)
            },
        }
    }

    /// Replace the column list, optimistically, then persist.
    pub async fn update_columns(&self, columns: Vec<AttributeKey>) -> Result<()> {
        let snapshot = {
            let mut inner = self.inner.write();
            inner.preferences.columns = columns;
            inner.phase = SyncPhase::Saving;
            inner.preferences.clone()
        };
        self.persist(snapshot).await
    }

    /// Replace the formatting options, optimistically, then persist.
    ///
    /// The merge is shallow: the whole formatting object is replaced.
    pub async fn update_formatting(&self, formatting: FormattingOptions) -> Result<()> {
        let snapshot = {
            let mut inner = self.inner.write();
            inner.preferences.formatting = formatting;
            inner.phase = SyncPhase::Saving;
            inner.preferences.clone()
        };
        self.persist(snapshot).await
    }

    /// Detached variant of [`update_columns`](Self::update_columns) for
    /// views being torn down: the optimistic update applies immediately and
    /// the persistence outcome is logged, never surfaced.
    pub fn queue_update_columns(
        self: &Arc<Self>,
        columns: Vec<AttributeKey>,
    ) -> tokio::task::JoinHandle<()> {
        let sync = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(err) = sync.update_columns(columns).await {
                warn!(scope = %sync.scope.storage_key(), error = %err, "detached preference save failed");
            }
        })
    }

    async fn persist(&self, snapshot: Preferences) -> Result<()> {
        let saved =
            with_timeout(self.config.save_timeout, self.backend.save(&self.scope, &snapshot))
                .await;
        let mut inner = self.inner.write();
        match saved {
            Ok(()) => {
                inner.phase = SyncPhase::Ready;
                inner.last_error = None;
                self.resync.fetch_add(1, Ordering::AcqRel);
                Ok(())
            },
            Err(err) => {
                // Optimistic state stays; the caller decides about rollback.
                inner.phase = SyncPhase::Error;
                inner.last_error = Some(err.to_string());
                Err(err)
            },
        }
    }
}

async fn with_timeout<T>(
    limit: Duration,
    fut: impl std::future::Future<Output = Result<T>>,
) -> Result<T> {
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(ViewStateError::persistence(format!(
            "backend call exceeded {}ms",
            limit.as_millis()
        ))),
    }
}
