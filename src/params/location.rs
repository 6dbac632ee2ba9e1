//! Location and navigation seams.
//!
//! The store never reads ambient global location state. It is handed a
//! [`Locator`] for the current URL and a [`Navigator`] for writing it back,
//! which keeps the merge logic deterministic and testable. [`MemoryHistory`]
//! implements both over an in-memory entry list.

use parking_lot::Mutex;
use std::sync::Arc;

/// Read access to the current location.
pub trait Locator: Send + Sync {
    /// Path component of the current location, e.g. `/alerts`
    fn path(&self) -> String;
    /// Query string of the current location, without the leading `?`
    fn search(&self) -> String;
}

/// Write access to the location.
pub trait Navigator: Send + Sync {
    /// Navigate to the current path with a new query string.
    ///
    /// `replace` rewrites the current history entry instead of pushing a
    /// new one.
    fn navigate(&self, search: &str, replace: bool);
}

#[derive(Debug)]
struct HistoryState {
    entries: Vec<String>,
}

/// In-memory history keeping full `path?search` entries, for tests and
/// host environments without a browser history.
#[derive(Debug)]
pub struct MemoryHistory {
    state: Mutex<HistoryState>,
}

impl MemoryHistory {
    /// Create a history with a single initial entry, e.g. `/alerts?tab=1`.
    pub fn new(initial: &str) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(HistoryState {
                entries: vec![initial.to_string()],
            }),
        })
    }

    /// The current (most recent) entry.
    pub fn current(&self) -> String {
        self.state
            .lock()
            .entries
            .last()
            .cloned()
            .unwrap_or_default()
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.state.lock().entries.clone()
    }

    /// Number of history entries.
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    /// True when the history holds no entries.
    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }

    fn split_current(&self) -> (String, String) {
        let current = self.current();
        match current.split_once('?') {
            Some((path, search)) => (path.to_string(), search.to_string()),
            None => (current, String::new()),
        }
    }
}

impl Locator for MemoryHistory {
    fn path(&self) -> String {
        self.split_current().0
    }

    fn search(&self) -> String {
        self.split_current().1
    }
}

impl Navigator for MemoryHistory {
    fn navigate(&self, search: &str, replace: bool) {
        let path = self.path();
        let entry = format!("{}?{}", path, search);
        let mut state = self.state.lock();
        if replace {
            if let Some(last) = state.entries.last_mut() {
                *last = entry;
                return;
            }
        }
        state.entries.push(entry);
    }
}
