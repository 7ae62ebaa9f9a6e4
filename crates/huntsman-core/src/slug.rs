//! Slug and display-name helpers.

/// Lowercase, hyphenated, ASCII identifier for a human readable name.
///
/// Non-ASCII letters are transliterated; everything that is not a letter or
/// digit collapses into single hyphens.
pub fn slugify(text: &str) -> String {
    ::slug::slugify(text)
}

/// Whether `slug` is non-empty and already in [`slugify`] form.
///
/// Such a slug is a single path segment with no separators or dot segments.
pub fn is_url_safe(slug: &str) -> bool {
    !slug.is_empty() && slugify(slug) == slug
}

/// Turn a slug such as `auto-repair` into `Auto Repair`.
pub fn display_name(slug: &str) -> String {
    title_case(&slug.replace('-', " "))
}

/// Capitalize the first letter of every alphabetic run and lowercase the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Collapse all whitespace runs into single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
