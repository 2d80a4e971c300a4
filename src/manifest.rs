//! Gallery manifest loading.
//!
//! The manifest (`gallery.json`) is the fallback tier of the content
//! resolver. It is fetched lazily, at most once per [`ManifestLoader`]:
//! the first caller performs the fetch and every later or concurrent caller
//! observes the same outcome, whether that is the parsed manifest or the
//! transport error.
//!
//! Shape problems never fail the load. A body that is not an object, or whose
//! `categories` is missing or not an object, yields an empty manifest; bad
//! entries inside a category are skipped one by one.

use crate::fetch::{FetchError, Fetcher};
use crate::types::{Manifest, ManifestEntry};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

pub struct ManifestLoader {
    fetcher: Arc<dyn Fetcher>,
    path: String,
    slot: OnceLock<Result<Arc<Manifest>, FetchError>>,
}

impl ManifestLoader {
    pub fn new(fetcher: Arc<dyn Fetcher>, path: impl Into<String>) -> Self {
        Self {
            fetcher,
            path: path.into(),
            slot: OnceLock::new(),
        }
    }

    /// Load the manifest, fetching it on first use only.
    pub fn load(&self) -> Result<Arc<Manifest>, FetchError> {
        self.slot
            .get_or_init(|| {
                log::debug!("loading gallery manifest from {}", self.path);
                match self.fetcher.fetch_json(&self.path) {
                    Ok(value) => Ok(Arc::new(parse_manifest(&value))),
                    Err(e) if e.is_decode() => {
                        log::warn!("{e}; using an empty manifest");
                        Ok(Arc::new(Manifest::default()))
                    }
                    Err(e) => Err(e),
                }
            })
            .clone()
    }
}

/// Build a [`Manifest`] from an arbitrary JSON value, tolerating bad shapes.
pub fn parse_manifest(value: &Value) -> Manifest {
    let Some(categories) = value.get("categories").and_then(Value::as_object) else {
        log::warn!("gallery manifest has no `categories` object; treating it as empty");
        return Manifest::default();
    };

    let mut parsed = BTreeMap::new();
    for (name, entries) in categories {
        let entries = match entries.as_array() {
            Some(items) => items
                .iter()
                .filter_map(|item| match serde_json::from_value::<ManifestEntry>(item.clone()) {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        log::warn!("skipping manifest entry in '{name}': {e}");
                        None
                    }
                })
                .collect(),
            None => {
                log::warn!("manifest category '{name}' is not a list");
                Vec::new()
            }
        };
        parsed.insert(name.clone(), entries);
    }
    Manifest { categories: parsed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::FakeFetcher;
    use serde_json::json;

    const PATH: &str = "gallery.json";

    #[test]
    fn parses_categories_in_entry_order() {
        let manifest = parse_manifest(&json!({
            "categories": {
                "Trips": [
                    {"src": "photos/Trips/b.jpg", "title": "B"},
                    {"src": "photos/Trips/a.jpg", "description": "first"}
                ]
            }
        }));
        let trips = &manifest.categories["Trips"];
        assert_eq!(trips.len(), 2);
        assert_eq!(trips[0].title.as_deref(), Some("B"));
        assert_eq!(trips[1].description.as_deref(), Some("first"));
    }

    #[test]
    fn non_object_body_is_empty() {
        assert_eq!(parse_manifest(&json!([1, 2])), Manifest::default());
        assert_eq!(parse_manifest(&json!({"categories": []})), Manifest::default());
        assert_eq!(parse_manifest(&json!({})), Manifest::default());
    }

    #[test]
    fn bad_entries_are_skipped() {
        let manifest = parse_manifest(&json!({
            "categories": {
                "Mixed": [{"src": "ok.jpg"}, {"title": "no src"}, 42],
                "Broken": "nope"
            }
        }));
        assert_eq!(manifest.categories["Mixed"].len(), 1);
        assert!(manifest.categories["Broken"].is_empty());
    }

    #[test]
    fn fetches_only_once() {
        let fetcher = Arc::new(FakeFetcher::new().with_json(PATH, json!({"categories": {"A": []}})));
        let loader = ManifestLoader::new(fetcher.clone(), PATH);

        let first = loader.load().unwrap();
        let second = loader.load().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(fetcher.calls(PATH), 1);
    }

    #[test]
    fn concurrent_callers_share_one_fetch() {
        let fetcher = Arc::new(FakeFetcher::new().with_json(PATH, json!({"categories": {}})));
        let loader = Arc::new(ManifestLoader::new(fetcher.clone(), PATH));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let loader = loader.clone();
                std::thread::spawn(move || loader.load().is_ok())
            })
            .collect();
        for h in handles {
            assert!(h.join().unwrap());
        }
        assert_eq!(fetcher.calls(PATH), 1);
    }

    #[test]
    fn malformed_body_resolves_empty() {
        let fetcher = Arc::new(FakeFetcher::new().with_error(
            PATH,
            FetchError::Decode {
                path: PATH.into(),
                message: "eof".into(),
            },
        ));
        let loader = ManifestLoader::new(fetcher, PATH);
        assert!(loader.load().unwrap().categories.is_empty());
    }

    #[test]
    fn status_failure_is_shared_error() {
        let fetcher = Arc::new(FakeFetcher::new().with_error(
            PATH,
            FetchError::Status {
                path: PATH.into(),
                status: 500,
            },
        ));
        let loader = ManifestLoader::new(fetcher.clone(), PATH);

        assert!(matches!(loader.load(), Err(FetchError::Status { status: 500, .. })));
        assert!(loader.load().is_err());
        assert_eq!(fetcher.calls(PATH), 1);
    }
}
