//! Shared test doubles for the transport seams.
//!
//! [`FakeFetcher`] and [`FakeListing`] answer from canned responses keyed by
//! path and count how often each path was requested, so tests can assert on
//! memoization and caching without a network.
//!
//! ```ignore
//! let fetcher = Arc::new(FakeFetcher::new().with_json("blog.json", json!({"posts": []})));
//! let posts = load_posts(fetcher.as_ref(), "blog.json");
//! assert_eq!(fetcher.calls("blog.json"), 1);
//! ```

use crate::fetch::{FetchError, Fetcher};
use crate::github::{EntryKind, ListingEntry, ListingError, ListingSource};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// Count of requests per path.
#[derive(Default)]
struct CallLog(Mutex<HashMap<String, usize>>);

impl CallLog {
    fn record(&self, path: &str) {
        *self.0.lock().unwrap().entry(path.to_string()).or_default() += 1;
    }

    fn get(&self, path: &str) -> usize {
        self.0.lock().unwrap().get(path).copied().unwrap_or(0)
    }
}

// =========================================================================
// Fetcher
// =========================================================================

/// In-memory [`Fetcher`]. Unknown paths answer 404.
#[derive(Default)]
pub struct FakeFetcher {
    responses: HashMap<String, Result<Value, FetchError>>,
    calls: CallLog,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(mut self, path: &str, value: Value) -> Self {
        self.responses.insert(path.to_string(), Ok(value));
        self
    }

    pub fn with_error(mut self, path: &str, error: FetchError) -> Self {
        self.responses.insert(path.to_string(), Err(error));
        self
    }

    pub fn calls(&self, path: &str) -> usize {
        self.calls.get(path)
    }
}

impl Fetcher for FakeFetcher {
    fn fetch_json(&self, path: &str) -> Result<Value, FetchError> {
        self.calls.record(path);
        self.responses.get(path).cloned().unwrap_or_else(|| {
            Err(FetchError::Status {
                path: path.to_string(),
                status: 404,
            })
        })
    }
}

// =========================================================================
// Listing source
// =========================================================================

/// In-memory [`ListingSource`] rooted at `photos`. Unknown paths answer 404.
#[derive(Default)]
pub struct FakeListing {
    responses: HashMap<String, Result<Vec<ListingEntry>, ListingError>>,
    calls: CallLog,
}

impl FakeListing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(mut self, path: &str, entries: Vec<ListingEntry>) -> Self {
        self.responses.insert(path.to_string(), Ok(entries));
        self
    }

    pub fn with_error(mut self, path: &str, error: ListingError) -> Self {
        self.responses.insert(path.to_string(), Err(error));
        self
    }

    pub fn calls(&self, path: &str) -> usize {
        self.calls.get(path)
    }
}

impl ListingSource for FakeListing {
    fn root(&self) -> &str {
        "photos"
    }

    fn list(&self, path: &str) -> Result<Vec<ListingEntry>, ListingError> {
        self.calls.record(path);
        self.responses.get(path).cloned().unwrap_or_else(|| {
            Err(FetchError::Status {
                path: path.to_string(),
                status: 404,
            }
            .into())
        })
    }
}

/// A `dir` listing entry under `photos/`.
pub fn dir_entry(name: &str) -> ListingEntry {
    ListingEntry {
        kind: EntryKind::Dir,
        name: name.to_string(),
        path: format!("photos/{name}"),
        download_url: None,
    }
}

/// A `file` listing entry inside `photos/{category}/`.
pub fn file_entry(category: &str, name: &str) -> ListingEntry {
    ListingEntry {
        kind: EntryKind::File,
        name: name.to_string(),
        path: format!("photos/{category}/{name}"),
        download_url: Some(format!("https://raw.example.com/photos/{category}/{name}")),
    }
}
