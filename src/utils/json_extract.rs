//! Some chat models cannot be forced into JSON output mode and wrap their
//! answer in prose or markdown fences. This module recovers the first
//! balanced `{...}` object from such free text.

/// Extract the first balanced JSON object from free text.
///
/// The scanner is string- and escape-aware, so braces inside string values do
/// not unbalance the count. Returns `None` when no complete object exists.
pub fn first_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let bytes = text.as_bytes();

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &byte) in bytes[start..].iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match byte {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'{' if !in_string => depth += 1,
            b'}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_plain_object() {
        assert_eq!(first_json_object(r#"{"a": 1}"#), Some(r#"{"a": 1}"#));
    }

    #[test]
    fn test_extracts_from_surrounding_prose() {
        let text = "Here is the analysis:\n```json\n{\"type\": \"vase\"}\n```\nHope it helps.";
        assert_eq!(first_json_object(text), Some(r#"{"type": "vase"}"#));
    }

    #[test]
    fn test_handles_nested_objects() {
        let text = r#"{"dimensions": {"height": 45}} trailing"#;
        assert_eq!(
            first_json_object(text),
            Some(r#"{"dimensions": {"height": 45}}"#)
        );
    }

    #[test]
    fn test_braces_inside_strings_do_not_unbalance() {
        let text = r#"{"note": "use {{prompt}} here", "n": 1}"#;
        assert_eq!(first_json_object(text), Some(text));
    }

    #[test]
    fn test_returns_none_without_object() {
        assert_eq!(first_json_object("no json here"), None);
        assert_eq!(first_json_object("{\"unterminated\": 1"), None);
    }
}
