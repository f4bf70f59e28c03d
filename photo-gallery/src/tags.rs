//! Tag extraction from photo alt text.

/// Splits alt text into tags.
///
/// Comma-separated text is split on commas; anything else is split on spaces. Tags are trimmed
/// and empty tags dropped.
pub fn extract_tags(alt: &str) -> Vec<String> {
    let separator = if alt.contains(',') { ',' } else { ' ' };
    alt.split(separator)
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
