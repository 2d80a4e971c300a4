//! Content transport.
//!
//! The site's JSON documents (`blog.json`, `about.json`, `gallery.json`) are
//! addressed by relative paths. A [`Fetcher`] turns such a path into decoded
//! JSON, always bypassing caches so a build never renders stale content.
//!
//! Two implementations exist:
//!
//! - [`HttpFetcher`] resolves paths against a deployed site's base URL.
//! - [`FsFetcher`] reads them from a local site checkout, mapping a missing
//!   file to a 404 so callers see the same failure shape a static server
//!   would produce.
//!
//! The error taxonomy keeps the three failure kinds apart because callers
//! treat them differently: the manifest loader degrades a malformed body to
//! an empty manifest but propagates transport and status failures.

use reqwest::header::{CACHE_CONTROL, HeaderValue, PRAGMA};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("failed to reach {path}: {message}")]
    Transport { path: String, message: String },
    #[error("{path} returned status {status}")]
    Status { path: String, status: u16 },
    #[error("{path} is not valid JSON: {message}")]
    Decode { path: String, message: String },
}

impl FetchError {
    /// True for a body that arrived but could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self, FetchError::Decode { .. })
    }
}

/// Source of JSON content documents.
pub trait Fetcher: Send + Sync {
    /// Fetch `path` with revalidate-always semantics and decode it as JSON.
    fn fetch_json(&self, path: &str) -> Result<Value, FetchError>;
}

fn decode(path: &str, body: &str) -> Result<Value, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Decode {
        path: path.to_string(),
        message: e.to_string(),
    })
}

/// Strip `./` and `/` so a content path can be joined onto a base.
fn relative_part(path: &str) -> &str {
    let path = path.strip_prefix("./").unwrap_or(path);
    path.trim_start_matches('/')
}

/// Fetches content from a deployed site over HTTP.
pub struct HttpFetcher {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Transport {
                path: base_url.to_string(),
                message: format!("HTTP client error: {e}"),
            })?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// A GET for `url` that bypasses caches along the way.
    fn request(&self, url: &str) -> reqwest::blocking::RequestBuilder {
        self.client
            .get(url)
            .header(CACHE_CONTROL, HeaderValue::from_static("no-cache"))
            .header(PRAGMA, HeaderValue::from_static("no-cache"))
    }

    /// Absolute URL for a content path. Absolute URLs pass through.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, relative_part(path))
        }
    }
}

impl Fetcher for HttpFetcher {
    fn fetch_json(&self, path: &str) -> Result<Value, FetchError> {
        let url = self.url_for(path);
        log::debug!("GET {url}");
        let resp = self
            .request(&url)
            .send()
            .map_err(|e| FetchError::Transport {
                path: url.clone(),
                message: e.to_string(),
            })?;
        if !resp.status().is_success() {
            return Err(FetchError::Status {
                path: url,
                status: resp.status().as_u16(),
            });
        }
        let body = resp.text().map_err(|e| FetchError::Transport {
            path: url.clone(),
            message: e.to_string(),
        })?;
        decode(&url, &body)
    }
}

/// Reads content from a site directory on disk.
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }
}

impl Fetcher for FsFetcher {
    fn fetch_json(&self, path: &str) -> Result<Value, FetchError> {
        let file = self.root.join(relative_part(path));
        let body = match std::fs::read_to_string(&file) {
            Ok(body) => body,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(FetchError::Status {
                    path: path.to_string(),
                    status: 404,
                });
            }
            Err(e) => {
                return Err(FetchError::Transport {
                    path: path.to_string(),
                    message: e.to_string(),
                });
            }
        };
        decode(path, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn fs_fetcher_reads_json() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("blog.json"), r#"{"posts": []}"#).unwrap();

        let value = FsFetcher::new(tmp.path()).fetch_json("blog.json").unwrap();
        assert!(value["posts"].is_array());
    }

    #[test]
    fn fs_fetcher_accepts_dot_slash_paths() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("about.json"), "{}").unwrap();

        assert!(FsFetcher::new(tmp.path()).fetch_json("./about.json").is_ok());
        assert!(FsFetcher::new(tmp.path()).fetch_json("/about.json").is_ok());
    }

    #[test]
    fn fs_fetcher_missing_file_is_404() {
        let tmp = TempDir::new().unwrap();
        let err = FsFetcher::new(tmp.path()).fetch_json("gone.json").unwrap_err();
        assert_eq!(
            err,
            FetchError::Status {
                path: "gone.json".into(),
                status: 404
            }
        );
    }

    #[test]
    fn fs_fetcher_malformed_body_is_decode_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("gallery.json"), "{not json").unwrap();

        let err = FsFetcher::new(tmp.path())
            .fetch_json("gallery.json")
            .unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn http_fetcher_joins_base_url() {
        let fetcher = HttpFetcher::new("https://example.com/site/", Duration::from_secs(5)).unwrap();
        assert_eq!(
            fetcher.url_for("./blog.json"),
            "https://example.com/site/blog.json"
        );
        assert_eq!(
            fetcher.url_for("/gallery.json"),
            "https://example.com/site/gallery.json"
        );
        assert_eq!(
            fetcher.url_for("https://cdn.example.com/x.json"),
            "https://cdn.example.com/x.json"
        );
    }

    #[test]
    fn http_requests_bypass_caches() {
        let fetcher = HttpFetcher::new("https://example.com/site", Duration::from_secs(5)).unwrap();
        let request = fetcher
            .request(&fetcher.url_for("blog.json"))
            .build()
            .unwrap();
        assert_eq!(request.url().as_str(), "https://example.com/site/blog.json");
        assert_eq!(request.headers()[CACHE_CONTROL], "no-cache");
        assert_eq!(request.headers()[PRAGMA], "no-cache");
    }
}
