//! Markup fragments for resolved content.
//!
//! Every function here is a pure transformation from content records to
//! [`Markup`]; page assembly lives in [`crate::generate`]. Empty collections
//! render a single placeholder message instead of an empty container.
//!
//! Anything clickable that should open the lightbox carries
//! `data-lightbox-src` and `data-lightbox-caption`; the page script attaches
//! one listener per such element.

use crate::config::LinkButton;
use crate::naming::{normalize_photo_src, slugify};
use crate::posts::{format_date, sort_newest_first};
use crate::types::{AboutContent, Category, GalleryImage, Photo, Post};
use maud::{Markup, html};
use std::collections::HashSet;

pub const NO_CONTENT: &str = "No content found.";
pub const NO_PHOTOS: &str = "No photos in this category yet.";
pub const NO_CATEGORIES: &str = "No categories found.";

/// First non-empty candidate, or `""`.
fn first_non_empty<'a>(candidates: &[Option<&'a str>]) -> &'a str {
    candidates
        .iter()
        .flatten()
        .find(|s| !s.is_empty())
        .copied()
        .unwrap_or("")
}

/// A user-visible status line.
pub fn status_message(text: &str) -> Markup {
    html! {
        p.status-message { (text) }
    }
}

/// File name of the page listing one category's images.
pub fn category_page(name: &str) -> String {
    let slug = slugify(name);
    if slug.is_empty() {
        "gallery-untitled.html".to_string()
    } else {
        format!("gallery-{slug}.html")
    }
}

/// Page file names for `categories`, in order. Names whose slugs collide
/// get a numeric suffix (`gallery-trip-2-2.html`) so no page overwrites
/// another.
pub fn category_pages(categories: &[Category]) -> Vec<String> {
    let mut taken = HashSet::new();
    categories
        .iter()
        .map(|category| {
            let base = category_page(&category.name);
            let mut file = base.clone();
            let stem = base.trim_end_matches(".html");
            let mut n = 2;
            while !taken.insert(file.clone()) {
                file = format!("{stem}-{n}.html");
                n += 1;
            }
            if file != base {
                log::warn!("category '{}' collides with another page; using {file}", category.name);
            }
            file
        })
        .collect()
}

/// Posts, newest first.
pub fn render_posts(posts: &[Post]) -> Markup {
    if posts.is_empty() {
        return status_message(NO_CONTENT);
    }
    let sorted = sort_newest_first(posts);
    html! {
        div.blog-container {
            @for post in &sorted {
                (render_post(post))
            }
        }
    }
}

fn render_post(post: &Post) -> Markup {
    html! {
        article.blog-post {
            @if let Some(date) = post.date.as_deref().filter(|d| !d.is_empty()) {
                div.blog-post-date { (format_date(date)) }
            }
            @if let Some(title) = post.title.as_deref().filter(|t| !t.is_empty()) {
                h2.blog-post-title { (title) }
            }
            @if let Some(text) = post.text.as_deref().filter(|t| !t.is_empty()) {
                div.blog-post-text { (text) }
            }
            @if !post.highlights.is_empty() {
                ul.about-highlights {
                    @for item in &post.highlights {
                        li { (item) }
                    }
                }
            }
            @if !post.photos.is_empty() {
                div.blog-post-photos.single-photo[post.photos.len() == 1] {
                    @for photo in &post.photos {
                        (render_post_photo(post, photo))
                    }
                }
            }
        }
    }
}

fn render_post_photo(post: &Post, photo: &Photo) -> Markup {
    let src = normalize_photo_src(photo.src.as_deref());
    let caption = first_non_empty(&[photo.alt.as_deref(), post.title.as_deref()]);
    html! {
        div.blog-post-photo data-lightbox-src=(src) data-lightbox-caption=(caption) {
            img src=(src) alt=(caption) loading="lazy";
        }
    }
}

/// Image tiles of one category.
pub fn render_gallery(images: &[GalleryImage]) -> Markup {
    if images.is_empty() {
        return status_message(NO_PHOTOS);
    }
    html! {
        div.gallery-grid {
            @for image in images {
                @let caption = first_non_empty(&[Some(image.description.as_str()), Some(image.name.as_str())]);
                button.gallery-tile type="button" data-lightbox-src=(image.url) data-lightbox-caption=(caption) {
                    img src=(image.url) alt=(image.name) loading="lazy";
                    span.gallery-tile-name { (image.name) }
                }
            }
        }
    }
}

/// Links to every category page.
pub fn render_categories(categories: &[Category]) -> Markup {
    if categories.is_empty() {
        return status_message(NO_CATEGORIES);
    }
    html! {
        ul.category-list {
            @for (category, page) in categories.iter().zip(category_pages(categories)) {
                li {
                    a.category-link href=(page) { (category.name) }
                }
            }
        }
    }
}

/// The inline about record.
pub fn render_about(about: &AboutContent) -> Markup {
    html! {
        article.blog-post.about {
            h2.blog-post-title { (about.heading) }
            @for paragraph in &about.paragraphs {
                p.blog-post-text { (paragraph) }
            }
            @if !about.highlights.is_empty() {
                ul.about-highlights {
                    @for item in &about.highlights {
                        li { (item) }
                    }
                }
            }
        }
    }
}

/// Header link buttons. Entries without a label or href are skipped.
pub fn render_link_buttons(links: &[LinkButton]) -> Markup {
    html! {
        @for link in links.iter().filter(|l| !l.label.is_empty() && !l.href.is_empty()) {
            @if link.new_tab {
                a.icon-button.link-button href=(link.href) target="_blank" rel="noreferrer noopener" { (link.label) }
            } @else {
                a.icon-button.link-button href=(link.href) { (link.label) }
            }
        }
    }
}
