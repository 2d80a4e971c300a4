//! Remote directory listing through the GitHub repository-contents API.
//!
//! The primary tier of the content resolver lists the photo root of a
//! repository (one folder per category) and then the files of a single
//! category folder:
//!
//! ```text
//! GET {api_base}/repos/{owner}/{repo}/contents/{root}?ref={branch}
//! GET {api_base}/repos/{owner}/{repo}/contents/{root}/{category}?ref={branch}
//! ```
//!
//! Any non-success status is a failure that makes the resolver fall back to
//! the manifest. Rate-limit responses get their own error variant so they can
//! be reported apart from ordinary failures.

use crate::config::GitHubConfig;
use crate::fetch::FetchError;
use reqwest::Url;
use reqwest::header::{ACCEPT, CACHE_CONTROL, HeaderMap, HeaderValue};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ListingError {
    #[error("listing API rate limit exceeded (resets at {reset:?})")]
    RateLimited { reset: Option<u64> },
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Kind of a listed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    #[serde(other)]
    Other,
}

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListingEntry {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub download_url: Option<String>,
}

/// A source of directory listings for the primary content tier.
pub trait ListingSource: Send + Sync {
    /// Root folder under which category folders live.
    fn root(&self) -> &str;

    /// List the immediate entries of `path`.
    fn list(&self, path: &str) -> Result<Vec<ListingEntry>, ListingError>;
}

pub struct GitHubContents {
    config: GitHubConfig,
    api_base: Url,
    client: reqwest::blocking::Client,
}

impl GitHubContents {
    pub fn new(config: GitHubConfig, timeout: Duration) -> Result<Self, ListingError> {
        let api_base = Url::parse(&config.api_base)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| FetchError::Transport {
                path: config.api_base.clone(),
                message: "invalid API base URL".to_string(),
            })?;
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=60"));
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Transport {
                path: config.api_base.clone(),
                message: format!("HTTP client error: {e}"),
            })?;
        Ok(Self {
            config,
            api_base,
            client,
        })
    }

    /// Contents URL for `path`. Every path segment and the branch are
    /// percent-encoded, so folder names may contain `#`, `?` or spaces.
    pub fn contents_url(&self, path: &str) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["repos", self.config.owner.as_str(), self.config.repo.as_str(), "contents"])
                .extend(path.split('/').filter(|s| !s.is_empty()));
        }
        url.query_pairs_mut().append_pair("ref", &self.config.branch);
        url
    }
}

impl ListingSource for GitHubContents {
    fn root(&self) -> &str {
        &self.config.root
    }

    fn list(&self, path: &str) -> Result<Vec<ListingEntry>, ListingError> {
        let url = self.contents_url(path).to_string();
        log::debug!("GET {url}");
        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| FetchError::Transport {
                path: url.clone(),
                message: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            if let Some(reset) = rate_limit_reset(status.as_u16(), resp.headers()) {
                return Err(ListingError::RateLimited { reset });
            }
            return Err(FetchError::Status {
                path: url,
                status: status.as_u16(),
            }
            .into());
        }

        resp.json::<Vec<ListingEntry>>().map_err(|e| {
            FetchError::Decode {
                path: url,
                message: e.to_string(),
            }
            .into()
        })
    }
}

/// Detect an exhausted rate limit. Returns `Some(reset)` when the response
/// is a 403/429 with `x-ratelimit-remaining: 0`.
fn rate_limit_reset(status: u16, headers: &HeaderMap) -> Option<Option<u64>> {
    if status != 403 && status != 429 {
        return None;
    }
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
    };
    if header("x-ratelimit-remaining") != Some("0") {
        return None;
    }
    Some(header("x-ratelimit-reset").and_then(|v| v.parse().ok()))
}
