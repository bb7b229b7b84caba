//! URL cleaning for `href` and `src` attributes.
//!
//! Entity encoding is left to the markup layer; this only decides whether a
//! URL may be emitted at all.

/// URL schemes allowed through [`esc_url`].
const ALLOWED_SCHEMES: [&str; 4] = ["http", "https", "mailto", "ftp"];

/// Cleans a URL for use in an `href` or `src` attribute.
///
/// Returns an empty string for URLs with a scheme outside the allowed list
/// (`javascript:` and friends). Spaces are percent-encoded; angle brackets
/// and control characters are dropped.
pub fn esc_url(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        return String::new();
    }

    if let Some((scheme, _)) = url.split_once(':') {
        let looks_like_scheme = !scheme.is_empty()
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if looks_like_scheme
            && !ALLOWED_SCHEMES
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(scheme))
        {
            return String::new();
        }
    }

    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        match c {
            ' ' => out.push_str("%20"),
            '<' | '>' => {}
            c if c.is_control() => {}
            _ => out.push(c),
        }
    }
    out
}
