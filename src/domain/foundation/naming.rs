//! Derived names (short keys, slugs, thumbnail initials) and text normalization.

use uuid::Uuid;

use super::ValidationError;

/// Trims `value` and checks it is non-empty and at most `max_len` characters.
pub fn required_text(field: &str, value: &str, max_len: usize) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    if trimmed.chars().count() > max_len {
        return Err(ValidationError::too_long(field, max_len));
    }
    Ok(trimmed.to_string())
}

/// Short public key derived from an id: its first hyphen-separated segment.
pub fn short_key(id: &Uuid) -> String {
    let hyphenated = id.hyphenated().to_string();
    match hyphenated.split_once('-') {
        Some((head, _)) => head.to_string(),
        None => hyphenated,
    }
}

/// URL-safe slug: lowercase alphanumerics separated by single dashes.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_dash = true;
        }
    }

    slug
}

/// First character of every whitespace-separated word, concatenated.
pub fn initials(text: &str) -> String {
    text.split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect()
}
