//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Every entity (post,
//! category, image) leads with a positional index and its title; where the
//! data came from is shown as indented context lines. The gallery always
//! names the source that served it, since a silent fallback to the manifest
//! is otherwise invisible.
//!
//! ## Check / Build
//!
//! ```text
//! Posts
//! 001 Back from the coast
//!     Date: June 1, 2024
//!     Photos: 2
//!
//! About
//!     Inline: About me
//!
//! Gallery (remote listing)
//! 001 Trip 2 (3 photos)
//!     001 Old Town
//!     002 (IMG_0042.jpg)
//! 002 Trip 10
//!     Error: could not load the gallery manifest: ...
//! ```
//!
//! ## Generate
//!
//! ```text
//! Blog → index.html
//! About → about.html
//! Gallery → gallery.html
//! Trip 2 → gallery-trip-2.html
//!
//! Generated 4 pages
//! ```
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::generate::{AboutSection, PageWritten, SiteContent};
use crate::naming::file_name;
use crate::posts::format_date;
use crate::scan::photo_count;
use crate::theme::Theme;
use crate::types::Manifest;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Positional index + title, with an optional photo count.
///
/// ```text
/// 001 Landscapes (5 photos)
/// 001 Travel
/// ```
fn entity_header(index: usize, title: &str, count: Option<usize>) -> String {
    match count {
        Some(n) => format!("{} {} ({} photos)", format_index(index), title, n),
        None => format!("{} {}", format_index(index), title),
    }
}

/// Titled images show the title, untitled ones the filename in parens.
fn image_line(index: usize, title: Option<&str>, filename: &str) -> String {
    match title {
        Some(t) if !t.is_empty() => format!("{} {}", format_index(index), t),
        _ => format!("{} ({})", format_index(index), filename),
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    }
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

// ============================================================================
// Check / Build: resolved content
// ============================================================================

/// Outline of everything a build renders.
pub fn format_content_output(content: &SiteContent) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Posts".to_string());
    if content.posts.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, post) in content.posts.iter().enumerate() {
        lines.push(format!(
            "{} {}",
            format_index(i + 1),
            post.title.as_deref().filter(|t| !t.is_empty()).unwrap_or("(untitled)")
        ));
        if let Some(date) = post.date.as_deref().filter(|d| !d.is_empty()) {
            lines.push(format!("{}Date: {}", indent(1), format_date(date)));
        }
        if let Some(text) = post.text.as_deref().filter(|t| !t.is_empty()) {
            lines.push(format!("{}Text: {}", indent(1), truncate_desc(text, 40)));
        }
        if !post.photos.is_empty() {
            lines.push(format!("{}Photos: {}", indent(1), post.photos.len()));
        }
    }

    lines.push(String::new());
    lines.push("About".to_string());
    match &content.about {
        AboutSection::Inline(about) => {
            lines.push(format!("{}Inline: {}", indent(1), about.heading));
        }
        AboutSection::Posts(posts) => {
            lines.push(format!("{}{}", indent(1), plural(posts.len(), "post", "posts")));
        }
    }

    lines.push(String::new());
    match &content.gallery {
        Ok(gallery) => {
            lines.push(format!("Gallery ({})", gallery.list.source));
            if gallery.categories.is_empty() {
                lines.push(format!("{}(no categories)", indent(1)));
            }
            for (i, entry) in gallery.categories.iter().enumerate() {
                let name = &entry.category.name;
                match &entry.images {
                    Ok(set) => {
                        lines.push(entity_header(i + 1, name, Some(set.images.len())));
                        if set.source != gallery.list.source {
                            lines.push(format!("{}Source: {}", indent(1), set.source));
                        }
                        for (j, image) in set.images.iter().enumerate() {
                            lines.push(format!(
                                "{}{}",
                                indent(1),
                                image_line(j + 1, Some(&image.name), file_name(&image.path))
                            ));
                        }
                    }
                    Err(e) => {
                        lines.push(entity_header(i + 1, name, None));
                        lines.push(format!("{}Error: {e}", indent(1)));
                    }
                }
            }
        }
        Err(e) => {
            lines.push("Gallery".to_string());
            lines.push(format!("{}Error: {e}", indent(1)));
        }
    }

    lines
}

pub fn print_content_output(content: &SiteContent) {
    for line in format_content_output(content) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate
// ============================================================================

/// Pages written by a build, followed by a summary line.
pub fn format_generate_output(pages: &[PageWritten]) -> Vec<String> {
    let mut lines: Vec<String> = pages
        .iter()
        .map(|p| format!("{} → {}", p.title, p.file))
        .collect();
    lines.push(String::new());
    lines.push(format!("Generated {}", plural(pages.len(), "page", "pages")));
    lines
}

pub fn print_generate_output(pages: &[PageWritten]) {
    for line in format_generate_output(pages) {
        println!("{}", line);
    }
}

// ============================================================================
// Manifest generation
// ============================================================================

/// Categories and entries of a freshly generated manifest.
pub fn format_manifest_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, (name, entries)) in manifest.categories.iter().enumerate() {
        lines.push(entity_header(i + 1, name, Some(entries.len())));
        for (j, entry) in entries.iter().enumerate() {
            lines.push(format!(
                "{}{}",
                indent(1),
                image_line(j + 1, entry.title.as_deref(), file_name(&entry.src))
            ));
            if let Some(desc) = entry.description.as_deref().filter(|d| !d.is_empty()) {
                lines.push(format!("{}Description: {}", indent(2), truncate_desc(desc, 40)));
            }
        }
    }
    lines.push(String::new());
    lines.push(format!(
        "{}, {}",
        plural(manifest.categories.len(), "category", "categories"),
        plural(photo_count(manifest), "photo", "photos")
    ));
    lines
}

pub fn print_manifest_output(manifest: &Manifest) {
    for line in format_manifest_output(manifest) {
        println!("{}", line);
    }
}

// ============================================================================
// Theme
// ============================================================================

/// Current preference, and the theme in effect when a system theme is known.
pub fn format_theme_output(preference: Option<Theme>, system: Option<Theme>) -> Vec<String> {
    let mut lines = vec![match preference {
        Some(theme) => format!("Preference: {theme}"),
        None => "Preference: follow system".to_string(),
    }];
    if let Some(system) = system {
        let active = preference.unwrap_or(system);
        lines.push(format!("Active: {} {}", active.icon(), active));
    }
    lines
}

pub fn print_theme_output(preference: Option<Theme>, system: Option<Theme>) {
    for line in format_theme_output(preference, system) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
