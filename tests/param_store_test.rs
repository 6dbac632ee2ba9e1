//! Param store integration tests over an in-memory history.

use pretty_assertions::assert_eq;
use std::sync::Arc;
use viewstate::core::TimeRange;
use viewstate::params::{
    ApiMonitoringParams, ApiMonitoringPatch, FlatParamStore, MemoryHistory, MonitoringView,
    ParamStore,
};

fn store_over(history: &Arc<MemoryHistory>) -> ParamStore<ApiMonitoringParams> {
    ParamStore::new(history.clone(), history.clone())
}

#[test]
fn merge_accumulates_across_calls() {
    let history = MemoryHistory::new("/api-monitoring");
    let store = store_over(&history);

    store
        .set(&ApiMonitoringPatch::new().selected_domain("api.example.com"), false)
        .unwrap();
    store
        .set(&ApiMonitoringPatch::new().group_by(vec!["http.method".to_string()]), false)
        .unwrap();
    store
        .set(&ApiMonitoringPatch::new().show_ip(false), false)
        .unwrap();

    let bag = store.get();
    assert_eq!(bag.selected_domain, "api.example.com");
    assert_eq!(bag.group_by, vec!["http.method".to_string()]);
    assert!(!bag.show_ip);
}

#[test]
fn later_values_win_per_key() {
    let history = MemoryHistory::new("/api-monitoring");
    let store = store_over(&history);

    store
        .set(&ApiMonitoringPatch::new().selected_domain("first.com").show_ip(false), true)
        .unwrap();
    store
        .set(&ApiMonitoringPatch::new().selected_domain("second.com"), true)
        .unwrap();

    let bag = store.get();
    assert_eq!(bag.selected_domain, "second.com");
    // Key absent from the second patch keeps the first patch's value
    assert!(!bag.show_ip);
}

#[test]
fn set_is_idempotent_at_the_url_level() {
    let history = MemoryHistory::new("/api-monitoring");
    let store = store_over(&history);
    let patch = ApiMonitoringPatch::new()
        .selected_view(MonitoringView::EndpointDetails)
        .selected_end_point_name("GET /v1/users");

    store.set(&patch, true).unwrap();
    let after_first = history.current();
    store.set(&patch, true).unwrap();
    let after_second = history.current();

    assert_eq!(after_first, after_second);
    assert_eq!(history.len(), 1);
}

#[test]
fn nested_objects_replace_wholesale() {
    let history = MemoryHistory::new("/api-monitoring");
    let store = store_over(&history);

    store
        .set(
            &ApiMonitoringPatch::new().modal_time_range(TimeRange::new(1_000, 2_000).unwrap()),
            true,
        )
        .unwrap();
    store
        .set(
            &ApiMonitoringPatch::new().modal_time_range(TimeRange::new(5_000, 9_000).unwrap()),
            true,
        )
        .unwrap();

    assert_eq!(store.get().modal_time_range, Some(TimeRange::new(5_000, 9_000).unwrap()));
}

#[test]
fn slow_partial_update_cannot_clobber_newer_fields() {
    let history = MemoryHistory::new("/api-monitoring");
    let store = store_over(&history);

    // User changes the domain...
    store
        .set(&ApiMonitoringPatch::new().selected_domain("fresh.com"), true)
        .unwrap();
    // ...then a stale async completion lands carrying only its own field.
    store
        .set(&ApiMonitoringPatch::new().selected_interval("5m"), true)
        .unwrap();

    let bag = store.get();
    assert_eq!(bag.selected_domain, "fresh.com");
    assert_eq!(bag.selected_interval, Some("5m".to_string()));
}

#[test]
fn malformed_url_token_recovers_to_defaults() {
    let history = MemoryHistory::new("/api-monitoring?apiMonitoringParams=not-json&tab=x");
    let store = store_over(&history);

    assert_eq!(store.get(), ApiMonitoringParams::default());

    // Writing over the malformed token heals the URL and keeps other keys.
    store
        .set(&ApiMonitoringPatch::new().show_ip(false), true)
        .unwrap();
    assert!(!store.get().show_ip);
    assert!(history.current().contains("tab=x"));
}

#[test]
fn push_and_replace_control_history_growth() {
    let history = MemoryHistory::new("/api-monitoring");
    let store = store_over(&history);

    store
        .set(&ApiMonitoringPatch::new().show_ip(false), false)
        .unwrap();
    store
        .set(&ApiMonitoringPatch::new().show_ip(true), false)
        .unwrap();
    assert_eq!(history.len(), 3);

    store
        .set(&ApiMonitoringPatch::new().show_ip(false), true)
        .unwrap();
    assert_eq!(history.len(), 3);
}

#[test]
fn concurrent_writers_lose_no_updates() {
    let history = MemoryHistory::new("/api-monitoring");
    let store = Arc::new(store_over(&history));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                if i % 2 == 0 {
                    store
                        .set(&ApiMonitoringPatch::new().selected_domain(format!("d{}.com", i)), true)
                        .unwrap();
                } else {
                    store
                        .set(&ApiMonitoringPatch::new().selected_interval(format!("{}m", i)), true)
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // One writer per field family wins, but both fields are present.
    let bag = store.get();
    assert!(bag.selected_domain.ends_with(".com"));
    assert!(bag.selected_interval.is_some());
}

#[test]
fn flat_and_token_params_coexist() {
    let history = MemoryHistory::new("/api-monitoring");
    let store = store_over(&history);
    let flat = FlatParamStore::new(history.clone(), history.clone());

    flat.set("tab", "endpoints", true);
    store
        .set(&ApiMonitoringPatch::new().selected_domain("a.com"), true)
        .unwrap();
    flat.set("page", "2", true);

    assert_eq!(flat.get("tab"), Some("endpoints".to_string()));
    assert_eq!(flat.get("page"), Some("2".to_string()));
    assert_eq!(store.get().selected_domain, "a.com");
}
