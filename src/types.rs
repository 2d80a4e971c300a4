//! Content records shared by the loaders, the resolver and the renderer.
//!
//! Posts and manifest entries are externally supplied JSON, so every field a
//! content author may leave out is optional and defaults on decode.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Decode a list that may be `null` as an empty list.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Keep a value only when it is a string; anything else reads as absent.
fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// A blog (or about) entry. No field is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    pub date: Option<String>,
    pub title: Option<String>,
    pub text: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub highlights: Vec<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub photos: Vec<Photo>,
}

/// A photo attached to a post. A missing or non-string `src` renders as an
/// empty source rather than dropping the post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    #[serde(default, deserialize_with = "string_or_none")]
    pub src: Option<String>,
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub alt: Option<String>,
}

/// A named grouping of gallery images.
///
/// `path` is set when the category came from the remote listing and points at
/// the folder to list for its images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// An image ready for rendering, from either content source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryImage {
    pub name: String,
    pub path: String,
    pub url: String,
    pub description: String,
}

/// One image entry of the gallery manifest (`gallery.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The gallery manifest: category name → entries in display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub categories: BTreeMap<String, Vec<ManifestEntry>>,
}

/// Which tier produced a resolved collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    Remote,
    Manifest,
}

impl std::fmt::Display for ContentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentSource::Remote => f.write_str("remote listing"),
            ContentSource::Manifest => f.write_str("manifest"),
        }
    }
}

/// Resolved category list, sorted by name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryList {
    pub source: ContentSource,
    pub categories: Vec<Category>,
}

/// Resolved images of one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageSet {
    pub source: ContentSource,
    pub images: Vec<GalleryImage>,
}

/// An inline "about" record: a heading, body paragraphs and optional highlights.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AboutContent {
    pub heading: String,
    #[serde(default)]
    pub paragraphs: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<String>,
}
