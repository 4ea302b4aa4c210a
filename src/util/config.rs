//! Configuration file parsing utilities.
//!
//! This module provides helpers for parsing `key = value` configuration files
//! with comment skipping and inline comments.

/// What: Check if a line should be skipped (empty or comment).
///
/// Inputs:
/// - `line`: Line to check
///
/// Output:
/// - `true` if the line should be skipped, `false` otherwise
///
/// Details:
/// - Skips empty lines and lines starting with `#`, `//`, or `;`
#[must_use]
pub fn skip_comment_or_empty(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("//")
        || trimmed.starts_with(';')
}

/// What: Parse a key-value pair from a line.
///
/// Inputs:
/// - `line`: Line containing key=value format
///
/// Output:
/// - `Some((key, value))` if parsing succeeds, `None` otherwise
///
/// Details:
/// - Splits on the first `=` character
/// - Normalizes the key to lowercase with `.`, `-` and spaces mapped to `_`
/// - Strips an inline comment from the value
#[must_use]
pub fn parse_key_value(line: &str) -> Option<(String, String)> {
    let (raw_key, raw_val) = line.trim().split_once('=')?;
    let key = raw_key.trim().to_lowercase().replace(['.', '-', ' '], "_");
    if key.is_empty() {
        return None;
    }
    Some((key, strip_inline_comment(raw_val).to_string()))
}

/// What: Remove a trailing ` # comment` from a value.
///
/// Inputs:
/// - `value`: Raw value text
///
/// Output:
/// - Trimmed value without the comment
///
/// Details:
/// - Only a `#` preceded by whitespace starts a comment, so URLs with
///   fragments and `//` stay intact.
#[must_use]
pub fn strip_inline_comment(value: &str) -> &str {
    let bytes = value.as_bytes();
    let cut = (1..bytes.len())
        .find(|&i| bytes[i] == b'#' && bytes[i - 1].is_ascii_whitespace())
        .unwrap_or(bytes.len());
    value[..cut].trim()
}

/// What: Interpret a boolean config value.
///
/// Inputs:
/// - `value`: `true/false`, `yes/no`, `on/off`, `1/0` (case-insensitive)
///
/// Output:
/// - `Some(bool)` when recognised
#[must_use]
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Key/value lines are split, normalized, and stripped of comments.
    ///
    /// Inputs:
    /// - Lines with dotted keys, URLs, and inline comments
    ///
    /// Output:
    /// - Normalized keys; URLs survive; comments removed
    fn parse_key_value_handles_urls_and_comments() {
        assert_eq!(
            parse_key_value("Endpoint.URL = http://host:5000/api/news # local"),
            Some((
                "endpoint_url".to_string(),
                "http://host:5000/api/news".to_string()
            ))
        );
        assert_eq!(
            parse_key_value("link = https://x.test/a#frag"),
            Some(("link".to_string(), "https://x.test/a#frag".to_string()))
        );
        assert_eq!(parse_key_value("no equals here"), None);
        assert_eq!(parse_key_value(" = value"), None);
    }

    #[test]
    fn comment_and_bool_helpers() {
        assert!(skip_comment_or_empty("   "));
        assert!(skip_comment_or_empty("# note"));
        assert!(skip_comment_or_empty("// note"));
        assert!(skip_comment_or_empty("; note"));
        assert!(!skip_comment_or_empty("layout = unified"));
        assert_eq!(parse_bool("Yes"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
