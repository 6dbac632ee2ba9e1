//! Preference synchronizer integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use viewstate::core::{AttributeKey, ConfigBuilder, DataSource, DataType, Result, ViewStateError};
use viewstate::prefs::{
    FontSize, FormattingOptions, InMemoryBackend, PreferenceBackend, PreferenceScope,
    PreferenceSynchronizer, Preferences, SyncPhase, ViewFormat,
};

fn column(name: &str) -> AttributeKey {
    AttributeKey::new(name, DataType::String).unwrap()
}

/// Backend that fails the first `failures` saves, then succeeds.
struct FlakyBackend {
    inner: InMemoryBackend,
    failures: AtomicUsize,
}

impl FlakyBackend {
    fn new(failures: usize) -> Self {
        Self {
            inner: InMemoryBackend::new(),
            failures: AtomicUsize::new(failures),
        }
    }
}

#[async_trait::async_trait]
impl PreferenceBackend for FlakyBackend {
    async fn load(&self, scope: &PreferenceScope) -> Result<Option<Preferences>> {
        self.inner.load(scope).await
    }

    async fn save(&self, scope: &PreferenceScope, preferences: &Preferences) -> Result<()> {
        if self.failures.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |f| f.checked_sub(1))
            .is_ok()
        {
            return Err(ViewStateError::persistence("transient outage"));
        }
        self.inner.save(scope, preferences).await
    }
}

/// Backend whose saves hang until cancelled.
struct StalledBackend;

#[async_trait::async_trait]
impl PreferenceBackend for StalledBackend {
    async fn load(&self, _scope: &PreferenceScope) -> Result<Option<Preferences>> {
        Ok(None)
    }

    async fn save(&self, _scope: &PreferenceScope, _prefs: &Preferences) -> Result<()> {
        futures::future::pending().await
    }
}

#[tokio::test]
async fn full_lifecycle_direct_mode() {
    let backend = Arc::new(InMemoryBackend::new());
    let scope = PreferenceScope::direct(DataSource::Logs);
    let sync = PreferenceSynchronizer::new(backend.clone(), scope.clone());

    assert_eq!(sync.phase(), SyncPhase::Idle);
    sync.load().await.unwrap();
    assert_eq!(sync.phase(), SyncPhase::Ready);

    sync.update_columns(vec![column("severity"), column("body")])
        .await
        .unwrap();
    sync.update_formatting(FormattingOptions {
        max_lines: 10,
        format: ViewFormat::Raw,
        font_size: FontSize::Large,
        version: 1,
    })
    .await
    .unwrap();

    assert_eq!(sync.resync_count(), 2);

    // A fresh synchronizer over the same backend sees the saved state.
    let fresh = PreferenceSynchronizer::new(backend, scope);
    fresh.load().await.unwrap();
    let prefs = fresh.preferences();
    assert_eq!(prefs.columns.len(), 2);
    assert_eq!(prefs.formatting.max_lines, 10);
    assert_eq!(prefs.formatting.font_size, FontSize::Large);
}

#[tokio::test]
async fn failed_save_surfaces_error_and_keeps_optimistic_state() {
    let backend = Arc::new(FlakyBackend::new(1));
    let sync = PreferenceSynchronizer::new(backend, PreferenceScope::direct(DataSource::Traces));
    sync.load().await.unwrap();

    let err = sync.update_columns(vec![column("spanKind")]).await.unwrap_err();
    assert_eq!(err.category(), "persistence");
    assert_eq!(sync.phase(), SyncPhase::Error);
    assert_eq!(sync.preferences().columns, vec![column("spanKind")]);
    assert_eq!(sync.resync_count(), 0);

    // The next update recovers and persists the retained state.
    sync.update_columns(vec![column("spanKind"), column("statusCode")])
        .await
        .unwrap();
    assert_eq!(sync.phase(), SyncPhase::Ready);
    assert_eq!(sync.resync_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn stalled_save_times_out_as_persistence_error() {
    let config = ConfigBuilder::new()
        .save_timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let sync = PreferenceSynchronizer::with_config(
        Arc::new(StalledBackend),
        PreferenceScope::direct(DataSource::Logs),
        &config,
    );

    let err = sync.update_columns(vec![column("body")]).await.unwrap_err();
    assert_eq!(err.category(), "persistence");
    assert_eq!(sync.phase(), SyncPhase::Error);
    assert_eq!(sync.preferences().columns, vec![column("body")]);
}

#[tokio::test]
async fn detached_update_during_teardown_is_silent() {
    let sync = Arc::new(PreferenceSynchronizer::new(
        Arc::new(FlakyBackend::new(usize::MAX)),
        PreferenceScope::direct(DataSource::Logs),
    ));

    let handle = sync.queue_update_columns(vec![column("level")]);
    // The spawned save fails but never panics or surfaces.
    handle.await.unwrap();
    assert_eq!(sync.preferences().columns, vec![column("level")]);
}

#[tokio::test]
async fn saved_view_and_direct_modes_are_isolated() {
    let backend = Arc::new(InMemoryBackend::new());
    let direct = PreferenceSynchronizer::new(
        backend.clone(),
        PreferenceScope::direct(DataSource::Logs),
    );
    let saved = PreferenceSynchronizer::new(
        backend,
        PreferenceScope::saved_view(DataSource::Logs, "view-1"),
    );

    direct.update_columns(vec![column("direct-col")]).await.unwrap();
    saved.update_columns(vec![column("view-col")]).await.unwrap();

    direct.load().await.unwrap();
    saved.load().await.unwrap();
    assert_eq!(direct.preferences().columns, vec![column("direct-col")]);
    assert_eq!(saved.preferences().columns, vec![column("view-col")]);
}
