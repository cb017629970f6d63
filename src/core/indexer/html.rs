//! HTML to fulltext bucket splitting.
//!
//! Headings (`h1`..`h6`) go to their own buckets so a backend can weight
//! them; everything else lands in `text`. Tags are removed and whitespace
//! collapsed in every bucket.

use crate::core::types::FulltextBuckets;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Bucket receiving all non-heading content
pub const TEXT_BUCKET: &str = "text";

/// Tags that survive the first stripping pass
const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

// Tag body; quoted attribute values may contain `>`
const TAG_BODY: &str = r#"(?:"[^"]*"|'[^']*'|[^>])*"#;

// Comments, regular tags (name captured in group 1) and doctype or
// processing instructions. An unterminated tag runs to the end of input.
static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?s)<!--.*?(?:-->|$)|</?([A-Za-z][A-Za-z0-9]*){TAG_BODY}(?:>|$)|<[!?/][^>]*(?:>|$)"
    ))
    .unwrap()
});

// One alternative per level so the closing tag must match the opening one
static HEADING_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let alternatives: Vec<String> = HEADING_TAGS
        .iter()
        .map(|tag| format!("<{tag}{TAG_BODY}>.*?</{tag}>"))
        .collect();
    Regex::new(&format!("(?i){}", alternatives.join("|"))).unwrap()
});

static WHITESPACE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Split HTML into a `text` bucket and one bucket per heading level.
///
/// Heading buckets receive each complete heading element with a leading
/// space. After splitting, every bucket has its tags stripped and runs of
/// whitespace collapsed to a single space; content is not trimmed.
///
/// # Example
///
/// ```
/// use nodeindex::core::indexer::extract_html_tags;
///
/// let buckets = extract_html_tags("<h1>Title</h1>Body <b>text</b>");
/// assert_eq!(buckets.get("h1"), Some(" Title "));
/// assert_eq!(buckets.get("text"), Some(" Body text "));
/// ```
pub fn extract_html_tags(input: &str) -> FulltextBuckets {
    // Keep words on both sides of a tag apart once the tag is gone
    let spaced = input.replace('<', " <").replace('>', "> ");
    let stripped = strip_tags(&spaced, &HEADING_TAGS);

    let mut buckets = FulltextBuckets::new();
    buckets.push_raw(TEXT_BUCKET, "");

    let mut remaining = stripped.as_str();
    while !remaining.is_empty() {
        match HEADING_PATTERN.find(remaining) {
            Some(heading) => {
                buckets.push_raw(TEXT_BUCKET, &remaining[..heading.start()]);
                let tag = remaining[heading.start() + 1..heading.start() + 3].to_ascii_lowercase();
                buckets.append(&tag, heading.as_str());
                remaining = &remaining[heading.end()..];
            }
            None => {
                buckets.push_raw(TEXT_BUCKET, remaining);
                break;
            }
        }
    }

    for content in buckets.values_mut() {
        let plain = strip_tags(content, &[]);
        *content = WHITESPACE_PATTERN.replace_all(&plain, " ").into_owned();
    }

    buckets
}

/// Remove markup from `input`, keeping tags whose name is in `allowed`.
///
/// Tag names compare case-insensitively. A `<` that does not start a tag
/// (for example `a < b`) is kept as text.
pub fn strip_tags(input: &str, allowed: &[&str]) -> String {
    TAG_PATTERN
        .replace_all(input, |caps: &Captures| match caps.get(1) {
            Some(name) if allowed.iter().any(|a| a.eq_ignore_ascii_case(name.as_str())) => {
                caps[0].to_string()
            }
            _ => String::new(),
        })
        .into_owned()
}
