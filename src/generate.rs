//! Site resolution and HTML generation.
//!
//! A [`Site`] owns everything a build shares: the content fetcher, the
//! gallery resolver (with its manifest slot and image cache) and the theme
//! preference. Nothing is held in globals; components get what they need
//! from the site.
//!
//! Building happens in two steps. [`Site::resolve`] gathers all content into
//! a [`SiteContent`] without touching the output directory, so `folio check`
//! can print it. [`generate`] then writes the pages:
//!
//! ```text
//! dist/
//! ├── index.html              # blog posts, newest first
//! ├── about.html              # inline [about] record or about.json posts
//! ├── gallery.html            # category list
//! ├── gallery-trip-2.html     # one page per category
//! └── photos/                 # copied from the site root when present
//! ```
//!
//! Every page inlines the stylesheet (colors from config) and the page script
//! that wires the lightbox triggers and the theme toggle. Failures while
//! resolving content never abort the build; the affected section shows a
//! status message instead.

use crate::config::{self, ConfigError, SiteConfig};
use crate::fetch::{FetchError, Fetcher, FsFetcher, HttpFetcher};
use crate::github::{GitHubContents, ListingError, ListingSource};
use crate::lightbox::Lightbox;
use crate::posts::load_posts;
use crate::render;
use crate::resolver::{ContentResolver, ResolveError};
use crate::theme::{FileStore, Theme, ThemeController, ThemeError};
use crate::types::{AboutContent, Category, CategoryList, ImageSet, Post};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Fetch setup error: {0}")]
    Fetch(#[from] FetchError),
    #[error("Listing setup error: {0}")]
    Listing(#[from] ListingError),
    #[error("Theme error: {0}")]
    Theme(#[from] ThemeError),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/site.js");

pub const GALLERY_LOAD_FAILED: &str = "Could not load the gallery.";
pub const CATEGORY_LOAD_FAILED: &str = "Could not load photos for this category.";

/// Content of the about page.
#[derive(Debug, Clone)]
pub enum AboutSection {
    Inline(AboutContent),
    Posts(Vec<Post>),
}

/// One category with its resolved images (or the reason they are missing).
#[derive(Debug, Clone)]
pub struct CategoryContent {
    pub category: Category,
    pub images: Result<Arc<ImageSet>, ResolveError>,
}

/// The gallery: the category list with per-category images.
#[derive(Debug, Clone)]
pub struct GalleryContent {
    pub list: CategoryList,
    pub categories: Vec<CategoryContent>,
}

/// Everything a build renders.
#[derive(Debug, Clone)]
pub struct SiteContent {
    pub posts: Vec<Post>,
    pub about: AboutSection,
    pub gallery: Result<GalleryContent, ResolveError>,
}

/// A build context: configuration plus the shared content sources.
pub struct Site {
    config: SiteConfig,
    fetcher: Arc<dyn Fetcher>,
    resolver: ContentResolver,
    theme: Option<Theme>,
}

impl Site {
    /// Wire up sources from configuration. `root` is the site directory.
    pub fn open(root: &Path, config: SiteConfig) -> Result<Self, GenerateError> {
        let timeout = Duration::from_secs(config.http.timeout_secs);
        let fetcher: Arc<dyn Fetcher> = match &config.http.base_url {
            Some(base) => Arc::new(HttpFetcher::new(base, timeout)?),
            None => Arc::new(FsFetcher::new(root)),
        };
        let listing: Option<Box<dyn ListingSource>> = match &config.github {
            Some(gh) => Some(Box::new(GitHubContents::new(gh.clone(), timeout)?)),
            None => None,
        };
        let theme = ThemeController::init(FileStore::new(&root.join(&config.theme.store)))?
            .preference();
        Ok(Self::with_sources(config, fetcher, listing, theme))
    }

    /// Build a site over explicit sources.
    pub fn with_sources(
        config: SiteConfig,
        fetcher: Arc<dyn Fetcher>,
        listing: Option<Box<dyn ListingSource>>,
        theme: Option<Theme>,
    ) -> Self {
        let resolver = ContentResolver::new(listing, fetcher.clone(), &config.content.manifest);
        Self {
            config,
            fetcher,
            resolver,
            theme,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Gather all page content. Never fails; failures end up in the result.
    pub fn resolve(&self) -> SiteContent {
        let posts = load_posts(self.fetcher.as_ref(), &self.config.content.blog);
        let about = match &self.config.about {
            Some(inline) => AboutSection::Inline(inline.clone()),
            None => AboutSection::Posts(load_posts(self.fetcher.as_ref(), &self.config.content.about)),
        };
        let gallery = self.resolver.categories().map(|list| {
            let categories = list
                .categories
                .iter()
                .map(|category| CategoryContent {
                    category: category.clone(),
                    images: self.resolver.images(category).inspect_err(|e| {
                        log::error!("images of '{}': {e}", category.name);
                    }),
                })
                .collect();
            GalleryContent { list, categories }
        });
        if let Err(e) = &gallery {
            log::error!("gallery: {e}");
        }
        SiteContent {
            posts,
            about,
            gallery,
        }
    }
}

/// Which top-level section a page belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Blog,
    About,
    Gallery,
}

/// A generated page, for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct PageWritten {
    pub title: String,
    pub file: String,
}

/// Write the site for `content` into `output_dir`.
pub fn generate(
    site: &Site,
    content: &SiteContent,
    site_root: &Path,
    output_dir: &Path,
) -> Result<Vec<PageWritten>, GenerateError> {
    let config = site.config();
    let css = format!(
        "{}\n\n{}",
        config::generate_color_css(&config.colors),
        CSS_STATIC
    );
    fs::create_dir_all(output_dir)?;

    let mut written = Vec::new();
    let mut write = |file: String, title: String, markup: Markup| -> std::io::Result<()> {
        fs::write(output_dir.join(&file), markup.into_string())?;
        log::info!("wrote {file}");
        written.push(PageWritten { title, file });
        Ok(())
    };

    let page = |title: &str, section: Section, body: Markup| {
        base_document(title, &css, site.theme, site_header(config, section), body)
    };

    write(
        "index.html".into(),
        "Blog".into(),
        page(&config.title, Section::Blog, render::render_posts(&content.posts)),
    )?;

    let about_body = match &content.about {
        AboutSection::Inline(about) => render::render_about(about),
        AboutSection::Posts(posts) => render::render_posts(posts),
    };
    write(
        "about.html".into(),
        "About".into(),
        page(&format!("About · {}", config.title), Section::About, about_body),
    )?;

    let gallery_title = format!("Gallery · {}", config.title);
    match &content.gallery {
        Ok(gallery) => {
            write(
                "gallery.html".into(),
                "Gallery".into(),
                page(
                    &gallery_title,
                    Section::Gallery,
                    render::render_categories(&gallery.list.categories),
                ),
            )?;
            let pages = render::category_pages(&gallery.list.categories);
            for (entry, file) in gallery.categories.iter().zip(pages) {
                let body = match &entry.images {
                    Ok(set) => render::render_gallery(&set.images),
                    Err(_) => render::status_message(CATEGORY_LOAD_FAILED),
                };
                let name = &entry.category.name;
                let body = html! {
                    nav.breadcrumb {
                        a href="gallery.html" { "Gallery" }
                        " › "
                        (name)
                    }
                    h2.category-title { (name) }
                    (body)
                };
                write(
                    file,
                    name.clone(),
                    page(&format!("{name} · {}", config.title), Section::Gallery, body),
                )?;
            }
        }
        Err(_) => write(
            "gallery.html".into(),
            "Gallery".into(),
            page(
                &gallery_title,
                Section::Gallery,
                render::status_message(GALLERY_LOAD_FAILED),
            ),
        )?,
    }

    let photos = site_root.join(&config.content.photos_dir);
    if photos.is_dir() && !same_dir(site_root, output_dir) && !is_within(output_dir, &photos) {
        let dest = output_dir.join(&config.content.photos_dir);
        fs::create_dir_all(&dest)?;
        copy_dir_recursive(&photos, &dest)?;
    }

    Ok(written)
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// True when `path` is `dir` or lies below it.
fn is_within(path: &Path, dir: &Path) -> bool {
    match (path.canonicalize(), dir.canonicalize()) {
        (Ok(path), Ok(dir)) => path.starts_with(dir),
        _ => false,
    }
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// ============================================================================
// Page components
// ============================================================================

/// The HTML document shell shared by every page.
fn base_document(
    title: &str,
    css: &str,
    theme: Option<Theme>,
    header: Markup,
    body: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" data-theme=[theme.map(Theme::as_str)] {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                (header)
                main.fade-in id="main-content" {
                    (body)
                }
                (Lightbox::new().render())
                script { (PreEscaped(JS)) }
            }
        }
    }
}

/// Site title, section navigation, link buttons and the theme toggle.
fn site_header(config: &SiteConfig, current: Section) -> Markup {
    let sections = [
        (Section::Blog, "index.html", "Blog"),
        (Section::About, "about.html", "About"),
        (Section::Gallery, "gallery.html", "Gallery"),
    ];
    html! {
        header.site-header {
            h1.site-title {
                a href="index.html" { (config.title) }
            }
            nav.site-nav {
                @for (section, href, label) in sections {
                    a.icon-button.active[section == current] href=(href) { (label) }
                }
            }
            div.header-actions {
                (render::render_link_buttons(&config.links))
                button.icon-button id="themeToggle" type="button" aria-label="Toggle theme" { "◐" }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
