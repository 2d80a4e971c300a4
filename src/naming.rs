//! Name and path conventions shared by every content source.
//!
//! Photos can be referenced from blog posts, from the gallery manifest, or
//! from a remote listing. All three end up in `src`/`href` attributes of pages
//! written to the site root, so they go through the same normalization and
//! the same display-title rules.
//!
//! ## Display Titles
//!
//! File names become display titles by dropping the extension, turning dashes
//! and underscores into spaces and title-casing each word:
//! - `sunset-over_lake.jpg` → "Sunset Over Lake"
//! - `IMG_0042.JPG` → "Img 0042"
//!
//! ## Ordering
//!
//! Category and image names sort with [`natural_cmp`]: case-insensitive, with
//! runs of digits compared by value, so "Trip 2" sorts before "Trip 10".

use std::cmp::Ordering;

/// Image file extensions recognized in remote listings and the photo tree.
pub const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".webp", ".gif"];

/// Canonicalize a photo reference for use in a page at the site root.
///
/// - `None` → `""`
/// - a single leading `./` is stripped
/// - `http://…`, `https://…` and root-relative `/…` are returned as-is
/// - anything else becomes `./…`
///
/// Normalizing an already-normalized value returns it unchanged.
pub fn normalize_photo_src(src: Option<&str>) -> String {
    let Some(src) = src else {
        return String::new();
    };
    let cleaned = src.strip_prefix("./").unwrap_or(src);
    if cleaned.starts_with("http://") || cleaned.starts_with("https://") || cleaned.starts_with('/')
    {
        cleaned.to_string()
    } else {
        format!("./{cleaned}")
    }
}

/// Whether a file name carries one of [`IMAGE_EXTENSIONS`] (case-insensitive).
pub fn is_image_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Last segment of a slash-separated path.
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Turn a file name into a display title.
///
/// The extension is dropped, `-` and `_` become spaces, whitespace runs
/// collapse, and every word is title-cased: a letter is upper-cased when it
/// follows a non-letter and lower-cased otherwise.
pub fn display_title(filename: &str) -> String {
    let stem = match filename.rfind('.') {
        Some(0) | None => filename,
        Some(dot) => &filename[..dot],
    };
    let spaced = stem.replace(['-', '_'], " ");
    let collapsed = spaced.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut title = String::with_capacity(collapsed.len());
    let mut prev_is_letter = false;
    for c in collapsed.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                title.extend(c.to_lowercase());
            } else {
                title.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            title.push(c);
            prev_is_letter = false;
        }
    }
    title
}

/// URL-safe slug for a category page name.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// A run of either digits or non-digits.
enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

fn chunks(s: &str) -> Vec<Chunk<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_digits = None;
    for (i, c) in s.char_indices() {
        let digit = c.is_ascii_digit();
        match in_digits {
            Some(d) if d != digit => {
                out.push(make_chunk(&s[start..i], d));
                start = i;
            }
            _ => {}
        }
        in_digits = Some(digit);
    }
    if let Some(d) = in_digits {
        out.push(make_chunk(&s[start..], d));
    }
    out
}

fn make_chunk(s: &str, digits: bool) -> Chunk<'_> {
    if digits { Chunk::Digits(s) } else { Chunk::Text(s) }
}

fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Numeric-aware, case-insensitive ordering of names.
///
/// Names that compare equal ignoring case fall back to a plain byte
/// comparison so the order is total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let ca = chunks(a);
    let cb = chunks(b);
    for (x, y) in ca.iter().zip(cb.iter()) {
        let ord = match (x, y) {
            (Chunk::Digits(x), Chunk::Digits(y)) => cmp_digits(x, y),
            (Chunk::Text(x), Chunk::Text(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
            (Chunk::Digits(_), Chunk::Text(_)) => Ordering::Less,
            (Chunk::Text(_), Chunk::Digits(_)) => Ordering::Greater,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    ca.len().cmp(&cb.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_absent_is_empty() {
        assert_eq!(normalize_photo_src(None), "");
    }

    #[test]
    fn normalize_strips_dot_slash_and_reprefixes() {
        assert_eq!(normalize_photo_src(Some("./photos/a.jpg")), "./photos/a.jpg");
        assert_eq!(normalize_photo_src(Some("photos/a.jpg")), "./photos/a.jpg");
    }

    #[test]
    fn normalize_leaves_absolute_urls() {
        assert_eq!(
            normalize_photo_src(Some("https://cdn.example.com/a.jpg")),
            "https://cdn.example.com/a.jpg"
        );
        assert_eq!(
            normalize_photo_src(Some("./http://example.com/a.jpg")),
            "http://example.com/a.jpg"
        );
    }

    #[test]
    fn normalize_leaves_root_relative() {
        assert_eq!(normalize_photo_src(Some("/photos/a.jpg")), "/photos/a.jpg");
    }

    #[test]
    fn normalize_is_idempotent() {
        for input in ["a.jpg", "./a.jpg", "/a.jpg", "https://x/a.jpg", "", "././a.jpg"] {
            let once = normalize_photo_src(Some(input));
            let twice = normalize_photo_src(Some(&once));
            assert_eq!(once, twice, "input {input:?}");
        }
    }

    #[test]
    fn normalize_empty_string_becomes_dot_slash() {
        assert_eq!(normalize_photo_src(Some("")), "./");
    }

    #[test]
    fn image_names_case_insensitive() {
        assert!(is_image_name("DSC_001.JPG"));
        assert!(is_image_name("a.webp"));
        assert!(!is_image_name("notes.txt"));
        assert!(!is_image_name("jpg"));
    }

    #[test]
    fn display_title_from_filename() {
        assert_eq!(display_title("sunset-over_lake.jpg"), "Sunset Over Lake");
        assert_eq!(display_title("IMG_0042.JPG"), "Img 0042");
        assert_eq!(display_title("a--b.png"), "A B");
        assert_eq!(display_title("no-extension"), "No Extension");
    }

    #[test]
    fn display_title_capitalizes_after_digits() {
        assert_eq!(display_title("2nd-trip.jpg"), "2Nd Trip");
    }

    #[test]
    fn file_name_takes_last_segment() {
        assert_eq!(file_name("photos/Trips/rome.jpg"), "rome.jpg");
        assert_eq!(file_name("rome.jpg"), "rome.jpg");
    }

    #[test]
    fn slugify_names() {
        assert_eq!(slugify("Trip 2"), "trip-2");
        assert_eq!(slugify("  Street / Night!"), "street-night");
    }

    #[test]
    fn natural_sorts_numbers_by_value() {
        let mut names = vec!["Trip 10", "Trip 2", "trip 1", "Alps"];
        names.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(names, vec!["Alps", "trip 1", "Trip 2", "Trip 10"]);
    }

    #[test]
    fn natural_ignores_leading_zeros() {
        assert_eq!(natural_cmp("Set 02", "Set 10"), Ordering::Less);
        assert_eq!(natural_cmp("Set 2", "Set 10"), Ordering::Less);
    }

    #[test]
    fn natural_prefix_sorts_first() {
        assert_eq!(natural_cmp("Trip", "Trip 2"), Ordering::Less);
    }
}
