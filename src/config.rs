//! Site configuration.
//!
//! A single `config.toml` in the site root overrides the stock defaults.
//! Files are sparse: only the keys being changed need to appear. Unknown keys
//! are rejected to catch typos early.
//!
//! ## Configuration Options
//!
//! ```toml
//! title = "Portfolio"
//!
//! [content]
//! blog = "blog.json"          # { "posts": [...] }
//! about = "about.json"        # used when no [about] section is given
//! manifest = "gallery.json"   # gallery fallback manifest
//! photos_dir = "photos"       # scanned by `folio gen-manifest`
//!
//! [http]
//! base_url = "https://me.github.io/site"  # fetch content remotely (optional)
//! timeout_secs = 30
//!
//! [github]                    # primary gallery tier (optional)
//! owner = "me"
//! repo = "site"
//! branch = "main"
//! root = "photos"
//!
//! [[links]]
//! label = "Instagram"
//! href = "https://www.instagram.com/me"
//!
//! [about]                     # inline about page (optional)
//! heading = "About"
//! paragraphs = ["..."]
//! highlights = ["..."]
//!
//! [theme]
//! store = ".folio-theme"      # persisted light/dark preference
//!
//! [colors.light]
//! background = "#ffffff"
//! # ...
//! ```

use crate::types::AboutContent;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site title shown in the header and the browser tab.
    pub title: String,
    /// Locations of the JSON content documents.
    pub content: ContentPaths,
    /// Remote content fetching.
    pub http: HttpConfig,
    /// GitHub contents API used as the primary gallery source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<GitHubConfig>,
    /// External links shown in the header.
    pub links: Vec<LinkButton>,
    /// Inline about page. When absent the about page is loaded from `content.about`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<AboutContent>,
    /// Light/dark theme preference storage.
    pub theme: ThemeConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            content: ContentPaths::default(),
            http: HttpConfig::default(),
            github: None,
            links: Vec::new(),
            about: None,
            theme: ThemeConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "http.timeout_secs must be greater than zero".into(),
            ));
        }
        if let Some(base) = &self.http.base_url
            && !(base.starts_with("http://") || base.starts_with("https://"))
        {
            return Err(ConfigError::Validation(format!(
                "http.base_url must be an http(s) URL, got '{base}'"
            )));
        }
        if let Some(gh) = &self.github
            && (gh.owner.trim().is_empty() || gh.repo.trim().is_empty())
        {
            return Err(ConfigError::Validation(
                "github.owner and github.repo must not be empty".into(),
            ));
        }
        for (name, path) in [
            ("content.blog", &self.content.blog),
            ("content.about", &self.content.about),
            ("content.manifest", &self.content.manifest),
        ] {
            if path.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }
}

/// Paths of the content documents, relative to the site root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentPaths {
    pub blog: String,
    pub about: String,
    pub manifest: String,
    /// Photo tree scanned into the manifest.
    pub photos_dir: String,
}

impl Default for ContentPaths {
    fn default() -> Self {
        Self {
            blog: "blog.json".to_string(),
            about: "about.json".to_string(),
            manifest: "gallery.json".to_string(),
            photos_dir: "photos".to_string(),
        }
    }
}

/// Remote content settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpConfig {
    /// When set, content documents are fetched from this deployed site
    /// instead of being read from the site root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Per-request timeout for content and listing requests.
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: 30,
        }
    }
}

/// Repository whose photo folder is listed through the contents API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitHubConfig {
    pub owner: String,
    pub repo: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Folder holding one sub-folder per category.
    #[serde(default = "default_photo_root")]
    pub root: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_photo_root() -> String {
    "photos".to_string()
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

/// An external link in the site header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkButton {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub href: String,
    /// Open in a new tab (default true).
    #[serde(default = "default_new_tab")]
    pub new_tab: bool,
}

fn default_new_tab() -> bool {
    true
}

/// Theme preference storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// File (relative to the site root) holding the persisted preference.
    pub store: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            store: ".folio-theme".to_string(),
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Dates, captions, status messages.
    pub text_muted: String,
    pub border: String,
    pub link: String,
    /// Lightbox backdrop.
    pub overlay: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#fdfdfb".to_string(),
            text: "#1a1a1a".to_string(),
            text_muted: "#6b6b6b".to_string(),
            border: "#e4e4e0".to_string(),
            link: "#2a5d8f".to_string(),
            overlay: "rgba(0, 0, 0, 0.85)".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#111214".to_string(),
            text: "#ececec".to_string(),
            text_muted: "#9a9a9a".to_string(),
            border: "#2c2d30".to_string(),
            link: "#8ab4e0".to_string(),
            overlay: "rgba(0, 0, 0, 0.92)".to_string(),
        }
    }

    fn css_vars(&self, indent: &str) -> String {
        format!(
            "{indent}--color-bg: {};\n{indent}--color-text: {};\n{indent}--color-text-muted: {};\n\
             {indent}--color-border: {};\n{indent}--color-link: {};\n{indent}--color-overlay: {};",
            self.background, self.text, self.text_muted, self.border, self.link, self.overlay,
        )
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key by key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read `config.toml` from `root`, or `Ok(None)` when there is none.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    Ok(Some(toml::from_str(&content)?))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the site config: stock defaults overridden by `root/config.toml`.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// A fully commented stock `config.toml`, printed by `folio gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# folio configuration
# ===================
# All settings are optional. Values shown are the defaults.
# Unknown keys cause an error.

# Site title (header and browser tab).
title = "Portfolio"

# ---------------------------------------------------------------------------
# Content documents, relative to the site root
# ---------------------------------------------------------------------------
[content]
# { "posts": [ { "date", "title", "text", "highlights", "photos" } ] }
blog = "blog.json"
# Same shape as blog.json. Ignored when an [about] section is present.
about = "about.json"
# { "categories": { "<name>": [ { "src", "title", "description" } ] } }
manifest = "gallery.json"
# Photo tree turned into the manifest by `folio gen-manifest`.
photos_dir = "photos"

# ---------------------------------------------------------------------------
# Remote content
# ---------------------------------------------------------------------------
[http]
# Fetch content documents from a deployed site instead of the local checkout.
# base_url = "https://example.github.io/site"
timeout_secs = 30

# ---------------------------------------------------------------------------
# Gallery listing through the GitHub contents API (primary source).
# Without this section the gallery is read from the manifest only.
# ---------------------------------------------------------------------------
# [github]
# owner = "example"
# repo = "site"
# branch = "main"
# root = "photos"
# api_base = "https://api.github.com"

# ---------------------------------------------------------------------------
# Header links
# ---------------------------------------------------------------------------
# [[links]]
# label = "Instagram"
# href = "https://www.instagram.com/example"
# new_tab = true

# ---------------------------------------------------------------------------
# Inline about page
# ---------------------------------------------------------------------------
# [about]
# heading = "About"
# paragraphs = ["First paragraph.", "Second paragraph."]
# highlights = ["Something worth listing"]

# ---------------------------------------------------------------------------
# Theme preference (light/dark), written by `folio theme toggle`
# ---------------------------------------------------------------------------
[theme]
store = ".folio-theme"

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors.light]
background = "#fdfdfb"
text = "#1a1a1a"
text_muted = "#6b6b6b"
border = "#e4e4e0"
link = "#2a5d8f"
overlay = "rgba(0, 0, 0, 0.85)"

[colors.dark]
background = "#111214"
text = "#ececec"
text_muted = "#9a9a9a"
border = "#2c2d30"
link = "#8ab4e0"
overlay = "rgba(0, 0, 0, 0.92)"
"##
}

/// Generate CSS custom properties from color config.
///
/// The dark scheme applies when the visitor's system prefers dark and no
/// explicit `data-theme="light"` override is set, or when
/// `data-theme="dark"` is set.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        ":root {{\n{light}\n}}\n\n\
         @media (prefers-color-scheme: dark) {{\n    :root:not([data-theme=\"light\"]) {{\n{dark_media}\n    }}\n}}\n\n\
         :root[data-theme=\"dark\"] {{\n{dark}\n}}",
        light = colors.light.css_vars("    "),
        dark_media = colors.dark.css_vars("        "),
        dark = colors.dark.css_vars("    "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_paths() {
        let config = SiteConfig::default();
        assert_eq!(config.content.blog, "blog.json");
        assert_eq!(config.content.about, "about.json");
        assert_eq!(config.content.manifest, "gallery.json");
        assert!(config.github.is_none());
        assert_eq!(config.http.timeout_secs, 30);
    }

    #[test]
    fn parse_partial_config() {
        let config: SiteConfig = toml::from_str(
            r#"
title = "Ari's photos"

[content]
blog = "posts/blog.json"
"#,
        )
        .unwrap();
        assert_eq!(config.title, "Ari's photos");
        assert_eq!(config.content.blog, "posts/blog.json");
        assert_eq!(config.content.manifest, "gallery.json");
    }

    #[test]
    fn github_section_fills_defaults() {
        let config: SiteConfig = toml::from_str(
            r#"
[github]
owner = "someone"
repo = "site"
"#,
        )
        .unwrap();
        let gh = config.github.unwrap();
        assert_eq!(gh.branch, "main");
        assert_eq!(gh.root, "photos");
        assert_eq!(gh.api_base, "https://api.github.com");
    }

    #[test]
    fn links_default_to_new_tab() {
        let config: SiteConfig = toml::from_str(
            r#"
[[links]]
label = "Instagram"
href = "https://instagram.com/x"

[[links]]
label = "Mail"
href = "mailto:x@example.com"
new_tab = false
"#,
        )
        .unwrap();
        assert!(config.links[0].new_tab);
        assert!(!config.links[1].new_tab);
    }

    #[test]
    fn inline_about_section() {
        let config: SiteConfig = toml::from_str(
            r#"
[about]
heading = "Hi"
paragraphs = ["one", "two"]
"#,
        )
        .unwrap();
        let about = config.about.unwrap();
        assert_eq!(about.heading, "Hi");
        assert_eq!(about.paragraphs.len(), 2);
        assert!(about.highlights.is_empty());
    }

    #[test]
    fn unknown_key_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[content]\nblgo = \"x.json\"\n");
        assert!(result.unwrap_err().to_string().contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[galery]\nx = 1\n");
        assert!(result.is_err());
    }

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_zero_timeout() {
        let mut config = SiteConfig::default();
        config.http.timeout_secs = 0;
        assert!(config.validate().unwrap_err().to_string().contains("timeout"));
    }

    #[test]
    fn validate_base_url_scheme() {
        let mut config = SiteConfig::default();
        config.http.base_url = Some("example.com".into());
        assert!(config.validate().is_err());
        config.http.base_url = Some("https://example.com".into());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_empty_github_owner() {
        let mut config = SiteConfig::default();
        config.github = Some(GitHubConfig {
            owner: " ".into(),
            repo: "site".into(),
            branch: default_branch(),
            root: default_photo_root(),
            api_base: default_api_base(),
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.title, "Portfolio");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r##"
[colors.light]
background = "#123456"
"##,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.colors.light.background, "#123456");
        assert_eq!(config.colors.light.text, "#1a1a1a");
        assert_eq!(config.colors.dark.background, "#111214");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[http]\ntimeout_secs = 0\n").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str("[content]\nblog = \"a\"\nabout = \"b\"\n").unwrap();
        let overlay: toml::Value = toml::from_str("[content]\nblog = \"c\"\n").unwrap();
        let merged = merge_toml(base, overlay);
        let content = merged.get("content").unwrap();
        assert_eq!(content.get("blog").unwrap().as_str(), Some("c"));
        assert_eq!(content.get("about").unwrap().as_str(), Some("b"));
    }

    #[test]
    fn stock_defaults_value_has_sections() {
        let val = stock_defaults_value().unwrap();
        assert!(val.get("content").is_some());
        assert!(val.get("colors").is_some());
        assert!(val.get("github").is_none());
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.title, defaults.title);
        assert_eq!(config.content.manifest, defaults.content.manifest);
        assert_eq!(config.colors.light.background, defaults.colors.light.background);
        assert_eq!(config.colors.dark.overlay, defaults.colors.dark.overlay);
        assert_eq!(config.theme.store, defaults.theme.store);
    }

    #[test]
    fn color_css_honors_theme_override() {
        let css = generate_color_css(&ColorConfig::default());
        assert!(css.contains("@media (prefers-color-scheme: dark)"));
        assert!(css.contains(r#":root:not([data-theme="light"])"#));
        assert!(css.contains(r#":root[data-theme="dark"]"#));
        assert!(css.contains("--color-bg: #111214"));
    }
}
