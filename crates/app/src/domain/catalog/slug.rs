//! Slugs derived from display names.

/// Lower-case ASCII letters and digits joined by single hyphens. Other
/// characters separate words; non-ASCII characters are dropped.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }

            slug.push(c.to_ascii_lowercase());
            pending_hyphen = false;
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_hyphen = true;
        }
    }

    slug
}
