//! Two-tier gallery content resolution.
//!
//! Categories and their images are resolved through the same pipeline:
//!
//! ```text
//! listing source (optional)  ──ok, non-empty──▶  result
//!        │ error or empty
//!        ▼
//! gallery manifest           ──ok──────────────▶  result
//!        │ error
//!        ▼
//! ResolveError  (page shows "could not load…")
//! ```
//!
//! A category's images come from exactly one tier, never a merge of both.
//! Resolved image sets are cached by category name for the lifetime of the
//! resolver; a second request returns the same shared `Arc` without touching
//! either tier. Failures are not cached.
//!
//! Ordering: categories from either tier and images from the listing sort by
//! [`natural_cmp`]; manifest images keep manifest order.

use crate::fetch::{FetchError, Fetcher};
use crate::github::{EntryKind, ListingEntry, ListingError, ListingSource};
use crate::manifest::ManifestLoader;
use crate::naming::{display_title, file_name, is_image_name, natural_cmp, normalize_photo_src};
use crate::types::{
    Category, CategoryList, ContentSource, GalleryImage, ImageSet, ManifestEntry,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error("could not load the gallery manifest: {0}")]
    Manifest(#[from] FetchError),
}

pub struct ContentResolver {
    listing: Option<Box<dyn ListingSource>>,
    manifest: ManifestLoader,
    images: Mutex<HashMap<String, Arc<ImageSet>>>,
}

impl ContentResolver {
    pub fn new(
        listing: Option<Box<dyn ListingSource>>,
        fetcher: Arc<dyn Fetcher>,
        manifest_path: &str,
    ) -> Self {
        Self {
            listing,
            manifest: ManifestLoader::new(fetcher, manifest_path),
            images: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve the category list.
    pub fn categories(&self) -> Result<CategoryList, ResolveError> {
        if let Some(listing) = &self.listing {
            match listing.list(listing.root()) {
                Ok(entries) => {
                    let categories = categories_from_listing(entries);
                    if !categories.is_empty() {
                        return Ok(CategoryList {
                            source: ContentSource::Remote,
                            categories,
                        });
                    }
                    log::info!("listing returned no categories; using the manifest");
                }
                Err(e) => report_listing_failure("categories", &e),
            }
        }

        let manifest = self.manifest.load()?;
        let mut categories: Vec<Category> = manifest
            .categories
            .keys()
            .map(|name| Category {
                name: name.clone(),
                path: None,
            })
            .collect();
        categories.sort_by(|a, b| natural_cmp(&a.name, &b.name));
        Ok(CategoryList {
            source: ContentSource::Manifest,
            categories,
        })
    }

    /// Resolve the images of one category, from the cache when possible.
    pub fn images(&self, category: &Category) -> Result<Arc<ImageSet>, ResolveError> {
        if let Some(hit) = self.lock_cache().get(&category.name) {
            return Ok(hit.clone());
        }

        let resolved = Arc::new(self.resolve_images(category)?);
        let mut cache = self.lock_cache();
        Ok(cache
            .entry(category.name.clone())
            .or_insert(resolved)
            .clone())
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<ImageSet>>> {
        // The map is never left half-written, so a poisoned lock is still usable.
        self.images.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn resolve_images(&self, category: &Category) -> Result<ImageSet, ResolveError> {
        if let Some(listing) = &self.listing {
            let folder = category
                .path
                .clone()
                .unwrap_or_else(|| format!("{}/{}", listing.root().trim_end_matches('/'), category.name));
            match listing.list(&folder) {
                Ok(entries) => {
                    let images = images_from_listing(entries);
                    if !images.is_empty() {
                        return Ok(ImageSet {
                            source: ContentSource::Remote,
                            images,
                        });
                    }
                    log::info!("listing of '{}' has no images; using the manifest", category.name);
                }
                Err(e) => report_listing_failure(&category.name, &e),
            }
        }

        let manifest = self.manifest.load()?;
        let images = manifest
            .categories
            .get(&category.name)
            .map(|entries| entries.iter().map(image_from_manifest).collect())
            .unwrap_or_default();
        Ok(ImageSet {
            source: ContentSource::Manifest,
            images,
        })
    }
}

fn report_listing_failure(what: &str, err: &ListingError) {
    match err {
        ListingError::RateLimited { reset } => log::warn!(
            "listing API rate limit hit while resolving {what} (resets at {}); falling back to the manifest",
            reset.map_or_else(|| "unknown".to_string(), |r| r.to_string())
        ),
        ListingError::Fetch(e) => {
            log::warn!("listing failed for {what}: {e}; falling back to the manifest")
        }
    }
}

fn categories_from_listing(entries: Vec<ListingEntry>) -> Vec<Category> {
    let mut categories: Vec<Category> = entries
        .into_iter()
        .filter(|e| e.kind == EntryKind::Dir)
        .map(|e| Category {
            name: e.name,
            path: Some(e.path),
        })
        .collect();
    categories.sort_by(|a, b| natural_cmp(&a.name, &b.name));
    categories
}

fn images_from_listing(entries: Vec<ListingEntry>) -> Vec<GalleryImage> {
    let mut images: Vec<GalleryImage> = entries
        .into_iter()
        .filter(|e| e.kind == EntryKind::File && is_image_name(&e.name))
        .map(|e| {
            let url = e
                .download_url
                .unwrap_or_else(|| normalize_photo_src(Some(&e.path)));
            GalleryImage {
                name: display_title(&e.name),
                path: e.path,
                url,
                description: String::new(),
            }
        })
        .collect();
    images.sort_by(|a, b| natural_cmp(&a.name, &b.name));
    images
}

fn image_from_manifest(entry: &ManifestEntry) -> GalleryImage {
    let name = match entry.title.as_deref().map(str::trim) {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => display_title(file_name(&entry.src)),
    };
    GalleryImage {
        name,
        path: entry.src.clone(),
        url: normalize_photo_src(Some(&entry.src)),
        description: entry.description.clone().unwrap_or_default(),
    }
}
