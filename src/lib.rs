//! # Folio
//!
//! A static generator for a personal portfolio: a blog, an about page and a
//! photo gallery organized by category. Content lives in plain JSON documents
//! next to a photo tree; the gallery can additionally be listed live through
//! the GitHub contents API so new photos show up without touching the
//! manifest.
//!
//! # Architecture: Resolve, Then Render
//!
//! ```text
//! 1. Resolve   blog.json / about.json / listing API / gallery.json  →  SiteContent
//! 2. Generate  SiteContent  →  dist/*.html
//! ```
//!
//! Resolution never fails the build. Missing or malformed posts become an
//! empty list, a failing listing API falls back to the manifest, and a failing
//! manifest turns into a status message on the affected page. Only
//! configuration and output I/O errors are fatal.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`fetch`] | `Fetcher` trait over JSON documents, HTTP and filesystem backends |
//! | [`github`] | Directory listing through the GitHub contents API |
//! | [`manifest`] | Memoized, tolerant loading of the gallery manifest |
//! | [`resolver`] | Listing-then-manifest resolution of categories and images, with the image cache |
//! | [`posts`] | Post loading, date parsing and newest-first ordering |
//! | [`render`] | Maud fragments for posts, gallery tiles, categories, about and links |
//! | [`lightbox`] | Image overlay state machine and its markup |
//! | [`theme`] | Light/dark preference with pluggable persistence |
//! | [`generate`] | Site wiring and page assembly |
//! | [`scan`] | Manifest generation from the photo tree |
//! | [`config`] | `config.toml` loading, validation, merging and color CSS |
//! | [`types`] | Content records shared across modules |
//! | [`naming`] | Photo paths, display titles, slugs and natural ordering |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Tier Per Collection
//!
//! A category list or image set comes entirely from the listing API or
//! entirely from the manifest, never a mix. An empty listing counts as a miss,
//! so a freshly created repository without photos still shows the manifest.
//!
//! ## Shared State Is Owned, Not Global
//!
//! The memoized manifest and the image cache live inside
//! [`resolver::ContentResolver`], which a [`generate::Site`] owns. Both are
//! thread-safe; the manifest slot guarantees a single fetch even when callers
//! race.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Markup is checked
//! at compile time and every interpolation is escaped, which matters here
//! because titles and captions come from remote JSON.

pub mod config;
pub mod fetch;
pub mod generate;
pub mod github;
pub mod lightbox;
pub mod manifest;
pub mod naming;
pub mod output;
pub mod posts;
pub mod render;
pub mod resolver;
pub mod scan;
pub mod theme;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
