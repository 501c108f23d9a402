/// Title components are capped at this many characters after sanitization.
pub const MAX_TITLE_LEN: usize = 100;

/// Sanitize one path component of the `dataset/<style>/<artist>/<title>.jpg`
/// layout.
///
/// Keeps alphanumerics, spaces, underscores, and hyphens; trims the result
/// and replaces the remaining spaces with underscores. Idempotent.
pub fn sanitize(s: &str) -> String {
    let kept: String = s
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect();
    kept.trim().replace(' ', "_")
}

/// Sanitize a title and cap it at [`MAX_TITLE_LEN`] characters.
pub fn sanitize_title(s: &str) -> String {
    sanitize(s).chars().take(MAX_TITLE_LEN).collect()
}

/// Derive the full-resolution asset URL from an API image URL.
///
/// The API appends a size/crop marker after the last `!` (e.g.,
/// `…/img.jpg!Large.jpg`); dropping it yields the original asset. A URL
/// without a marker passes through unchanged.
pub fn full_resolution_url(url: &str) -> &str {
    match url.rsplit_once('!') {
        Some((head, _)) => head,
        None => url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_allowed_chars() {
        assert_eq!(sanitize("Water Lilies!!"), "Water_Lilies");
        assert_eq!(sanitize("Claude Monet"), "Claude_Monet");
        assert_eq!(sanitize("  trimmed  "), "trimmed");
        assert_eq!(sanitize("self-portrait_1889"), "self-portrait_1889");
        assert_eq!(sanitize("a/b\\c:d"), "abcd");
    }

    #[test]
    fn test_sanitize_preserves_unicode_letters() {
        assert_eq!(sanitize("Théodore Géricault"), "Théodore_Géricault");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for input in [
            "Water Lilies!!",
            "  a  b  ",
            "Théodore Géricault",
            "no.1: duettino?",
            "",
        ] {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once);
        }
    }

    #[test]
    fn test_sanitize_title_caps_length() {
        let long = "x".repeat(250);
        let title = sanitize_title(&long);
        assert_eq!(title.chars().count(), MAX_TITLE_LEN);
    }

    #[test]
    fn test_full_resolution_url_strips_final_marker() {
        assert_eq!(
            full_resolution_url("http://x/img.jpg!Large.jpg"),
            "http://x/img.jpg"
        );
        // Only the final segment goes
        assert_eq!(full_resolution_url("http://x/a!b!Large.jpg"), "http://x/a!b");
    }

    #[test]
    fn test_full_resolution_url_without_marker() {
        assert_eq!(full_resolution_url("http://x/img.jpg"), "http://x/img.jpg");
    }
}
