//! Gallery manifest generation from the photo tree.
//!
//! The manifest is the fallback tier of the gallery, so it has to exist
//! before the site is deployed. `folio gen-manifest` builds it from the
//! photo directory:
//!
//! ```text
//! photos/
//! ├── Trip 2/
//! │   ├── old-town.jpg        → { "src": "photos/Trip 2/old-town.jpg", "title": "Old Town" }
//! │   └── notes.txt           (skipped: not an image)
//! ├── Trip 10/
//! │   └── IMG_0042.JPG
//! ├── empty/                  (skipped: no images)
//! └── cover.jpg               (skipped: not inside a category)
//! ```
//!
//! Only direct sub-directories become categories and only their direct image
//! files become entries, ordered by [`natural_cmp`]. Titles are derived from
//! file names. When a previous manifest exists, titles and descriptions
//! already written for the same `src` are carried over so hand edits survive
//! a rescan.

use crate::manifest::parse_manifest;
use crate::naming::{display_title, is_image_name, natural_cmp};
use crate::types::{Manifest, ManifestEntry};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Direct children of `dir` matching `keep`, sorted naturally by file name.
fn children(dir: &Path, keep: impl Fn(&walkdir::DirEntry) -> bool) -> Result<Vec<walkdir::DirEntry>, ScanError> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if !hidden && keep(&entry) {
            entries.push(entry);
        }
    }
    entries.sort_by(|a, b| {
        natural_cmp(
            &a.file_name().to_string_lossy(),
            &b.file_name().to_string_lossy(),
        )
    });
    Ok(entries)
}

/// Build a manifest from `site_root/photos_dir`.
///
/// A missing photo directory yields an empty manifest.
pub fn scan_photos(site_root: &Path, photos_dir: &str) -> Result<Manifest, ScanError> {
    let photos = site_root.join(photos_dir);
    if !photos.is_dir() {
        log::warn!("photo directory does not exist: {}", photos.display());
        return Ok(Manifest::default());
    }

    let mut categories = BTreeMap::new();
    for category in children(&photos, |e| e.file_type().is_dir())? {
        let name = category.file_name().to_string_lossy().to_string();
        let files = children(category.path(), |e| {
            e.file_type().is_file() && is_image_name(&e.file_name().to_string_lossy())
        })?;

        let entries: Vec<ManifestEntry> = files
            .iter()
            .filter_map(|file| {
                let rel = file.path().strip_prefix(site_root).ok()?;
                let src = rel
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                Some(ManifestEntry {
                    src,
                    title: Some(display_title(&file.file_name().to_string_lossy())),
                    description: Some(String::new()),
                })
            })
            .collect();

        if entries.is_empty() {
            log::debug!("skipping category without images: {name}");
            continue;
        }
        categories.insert(name, entries);
    }
    Ok(Manifest { categories })
}

/// Carry titles and descriptions from `previous` over to matching `src`s.
pub fn merge_previous(mut manifest: Manifest, previous: &Manifest) -> Manifest {
    let known: HashMap<&str, &ManifestEntry> = previous
        .categories
        .values()
        .flatten()
        .map(|e| (e.src.as_str(), e))
        .collect();

    for entry in manifest.categories.values_mut().flatten() {
        if let Some(old) = known.get(entry.src.as_str()) {
            if old.title.as_deref().is_some_and(|t| !t.is_empty()) {
                entry.title = old.title.clone();
            }
            if old.description.as_deref().is_some_and(|d| !d.is_empty()) {
                entry.description = old.description.clone();
            }
        }
    }
    manifest
}

/// Read an existing manifest file, if there is one.
pub fn read_manifest(path: &Path) -> Result<Option<Manifest>, ScanError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    match serde_json::from_str::<serde_json::Value>(&content) {
        Ok(value) => Ok(Some(parse_manifest(&value))),
        Err(e) => {
            log::warn!("ignoring unreadable manifest {}: {e}", path.display());
            Ok(None)
        }
    }
}

/// Write the manifest as pretty JSON.
pub fn write_manifest(path: &Path, manifest: &Manifest) -> Result<(), ScanError> {
    let json = serde_json::to_string_pretty(manifest)?;
    fs::write(path, json)?;
    Ok(())
}

/// Total number of entries across categories.
pub fn photo_count(manifest: &Manifest) -> usize {
    manifest.categories.values().map(Vec::len).sum()
}
