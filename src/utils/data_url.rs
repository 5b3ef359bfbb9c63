//! Inline image payloads arrive as `data:<mime>;base64,<data>` URLs.
//!
//! Every analysis adapter validates the shape here before building a request,
//! so malformed uploads fail fast without a network round trip.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::AiError;

static DATA_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^data:(image/\w+);base64,(.+)$").expect("valid data-URL pattern"));

/// A parsed inline image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataUrl<'a> {
    /// MIME type, e.g. `image/png`
    pub mime_type: &'a str,
    /// Base64 payload without the prefix
    pub data: &'a str,
}

/// Parse a `data:<mime>;base64,<data>` URL.
pub fn parse(input: &str) -> Result<DataUrl<'_>, AiError> {
    let captures = DATA_URL_RE
        .captures(input)
        .ok_or_else(|| AiError::InvalidInput("Invalid image data format".to_string()))?;

    // Both groups are non-optional in the pattern.
    let mime_type = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
    let data = captures.get(2).map(|m| m.as_str()).unwrap_or_default();

    Ok(DataUrl { mime_type, data })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_png_data_url() {
        let parsed = parse("data:image/png;base64,iVBORw0KGgo=").unwrap();
        assert_eq!(parsed.mime_type, "image/png");
        assert_eq!(parsed.data, "iVBORw0KGgo=");
    }

    #[test]
    fn test_parse_jpeg_data_url() {
        let parsed = parse("data:image/jpeg;base64,/9j/4AAQ").unwrap();
        assert_eq!(parsed.mime_type, "image/jpeg");
    }

    #[test]
    fn test_rejects_missing_prefix() {
        assert!(parse("iVBORw0KGgo=").is_err());
        assert!(parse("https://example.com/a.png").is_err());
    }

    #[test]
    fn test_rejects_non_image_mime() {
        assert!(parse("data:text/plain;base64,aGVsbG8=").is_err());
    }

    #[test]
    fn test_rejects_missing_payload() {
        assert!(parse("data:image/png;base64,").is_err());
    }
}
