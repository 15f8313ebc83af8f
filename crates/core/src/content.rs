//! Sermon and event content helpers: slugs, tags and publication status.

use crate::error::CoreError;

/// Sermon publication status values.
pub const STATUS_PUBLISHED: &str = "published";
pub const STATUS_DRAFT: &str = "draft";

pub const VALID_SERMON_STATUSES: &[&str] = &[STATUS_PUBLISHED, STATUS_DRAFT];

/// Maximum slug length.
pub const MAX_SLUG_LENGTH: usize = 200;

/// Validate a URL slug: lowercase ASCII letters, digits and single hyphens,
/// not starting or ending with a hyphen.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    let valid_chars = slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

    if slug.is_empty()
        || slug.len() > MAX_SLUG_LENGTH
        || !valid_chars
        || slug.starts_with('-')
        || slug.ends_with('-')
        || slug.contains("--")
    {
        return Err(CoreError::Validation(format!(
            "Invalid slug '{slug}'. Use lowercase letters, digits and single hyphens"
        )));
    }
    Ok(())
}

/// Derive a slug from a title: `"Finding Peace!"` -> `"finding-peace"`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.truncate(MAX_SLUG_LENGTH);
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Trim tags, drop empties and duplicates, keeping first-seen order.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

pub fn validate_sermon_status(status: &str) -> Result<(), CoreError> {
    if VALID_SERMON_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid status '{status}'. Must be one of: {}",
            VALID_SERMON_STATUSES.join(", ")
        )))
    }
}
