//! Blog and about post loading, ordering and date display.
//!
//! A missing or broken blog file must never break a build, so
//! [`load_posts`] swallows every failure into an empty list and logs it.

use crate::fetch::Fetcher;
use crate::types::Post;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Load the `posts` array of the JSON document at `path`.
///
/// Returns an empty list when the fetch fails, the status is not a success,
/// the body is not JSON or has no `posts` array. Individual posts that do not
/// decode are skipped.
pub fn load_posts(fetcher: &dyn Fetcher, path: &str) -> Vec<Post> {
    let body = match fetcher.fetch_json(path) {
        Ok(body) => body,
        Err(e) => {
            log::error!("error loading posts: {e}");
            return Vec::new();
        }
    };

    let Some(items) = body.get("posts").and_then(Value::as_array) else {
        log::warn!("{path} has no `posts` list");
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_json::from_value::<Post>(item.clone()) {
            Ok(post) => Some(post),
            Err(e) => {
                log::warn!("skipping post #{i} in {path}: {e}");
                None
            }
        })
        .collect()
}

/// Parse a post date. Accepts `YYYY-MM-DD`, RFC 3339 timestamps and
/// `YYYY-MM-DDTHH:MM[:SS]` without an offset.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}

/// Long US form, e.g. `January 1, 2024`. Unparseable dates are returned as-is.
pub fn format_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

/// Order posts newest first.
///
/// Undated posts (missing or unparseable date) have no preference and keep
/// their input positions. Dated posts are stably sorted, newest first, into
/// the remaining positions, so any two dated posts always end up in
/// descending order.
pub fn sort_newest_first(posts: &[Post]) -> Vec<Post> {
    let dates: Vec<Option<NaiveDate>> = posts
        .iter()
        .map(|p| p.date.as_deref().and_then(parse_date))
        .collect();

    let mut dated: Vec<(NaiveDate, &Post)> = posts
        .iter()
        .zip(&dates)
        .filter_map(|(post, date)| date.map(|d| (d, post)))
        .collect();
    dated.sort_by(|a, b| b.0.cmp(&a.0));

    let mut dated = dated.into_iter().map(|(_, post)| post);
    posts
        .iter()
        .zip(&dates)
        .filter_map(|(post, date)| match date {
            Some(_) => dated.next(),
            None => Some(post),
        })
        .cloned()
        .collect()
}
