use std::fs;
use std::path::Path;

use super::config::SETTINGS_SKELETON_CONTENT;
use super::paths::{default_settings_path, resolve_settings_config_path};
use super::types::Settings;
use crate::state::types::FeedLayout;
use crate::util::config::{parse_bool, parse_key_value, skip_comment_or_empty};

/// Load user settings from `settings.conf`, writing the skeleton on first run.
/// Falls back to `Settings::default()` when missing or unreadable.
#[must_use]
pub fn settings() -> Settings {
    let path = resolve_settings_config_path().unwrap_or_else(|| {
        let target = default_settings_path();
        if !target.exists() {
            if let Some(dir) = target.parent() {
                let _ = fs::create_dir_all(dir);
            }
            match fs::write(&target, SETTINGS_SKELETON_CONTENT) {
                Ok(()) => tracing::info!(path = %target.display(), "wrote default settings skeleton"),
                Err(e) => tracing::warn!(path = %target.display(), error = %e, "could not write settings skeleton"),
            }
        }
        target
    });
    load_settings_from(&path)
}

/// What: Load settings from a specific file.
///
/// Inputs:
/// - `path`: Settings file to read
///
/// Output:
/// - Parsed settings; defaults when the file cannot be read
#[must_use]
pub fn load_settings_from(path: &Path) -> Settings {
    match fs::read_to_string(path) {
        Ok(content) => {
            tracing::debug!(path = %path.display(), "loaded settings");
            parse_settings(&content)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "settings unreadable; using defaults");
            Settings::default()
        }
    }
}

/// Parse a positive integer, ignoring zero and garbage.
fn positive<T: std::str::FromStr + PartialOrd + Default>(val: &str) -> Option<T> {
    val.parse::<T>().ok().filter(|v| *v > T::default())
}

/// What: Parse `settings.conf` content.
///
/// Inputs:
/// - `content`: File text in `key = value` form
///
/// Output:
/// - `Settings` with recognised keys applied over defaults
///
/// Details:
/// - Keys are case-insensitive; `.`, `-` and spaces are treated as `_`.
/// - Malformed values keep the default; unknown keys are logged and ignored.
#[must_use]
pub fn parse_settings(content: &str) -> Settings {
    let mut out = Settings::default();
    for line in content.lines() {
        if skip_comment_or_empty(line) {
            continue;
        }
        let Some((key, val)) = parse_key_value(line) else {
            continue;
        };
        match key.as_str() {
            "endpoint_url" | "endpoint" | "news_url" => {
                if !val.is_empty() {
                    out.endpoint_url = val;
                }
            }
            "refresh_interval_secs" | "refresh_interval" | "interval" => {
                if let Some(v) = positive::<u64>(&val) {
                    out.refresh_interval_secs = v;
                }
            }
            "request_timeout_secs" | "request_timeout" => {
                if let Some(v) = positive::<u64>(&val) {
                    out.request_timeout_secs = v;
                }
            }
            "layout" | "feed_layout" => {
                if let Some(layout) = FeedLayout::from_config_key(&val) {
                    out.layout = layout;
                }
            }
            "max_news_count" | "max_items" => {
                if let Some(v) = positive::<usize>(&val) {
                    out.max_news_count = Some(v);
                }
            }
            "new_badge_count" => {
                if let Ok(v) = val.parse::<usize>() {
                    out.new_badge_count = v;
                }
            }
            "clock_format" => {
                if !val.is_empty() {
                    out.clock_format = val;
                }
            }
            "stats_time_format" => {
                if !val.is_empty() {
                    out.stats_time_format = val;
                }
            }
            "show_keybinds_footer" => {
                if let Some(b) = parse_bool(&val) {
                    out.show_keybinds_footer = b;
                }
            }
            other => tracing::debug!(key = other, "ignoring unknown settings key"),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Recognised keys override defaults; bad values do not.
    ///
    /// Inputs:
    /// - Settings text with valid, invalid, aliased, and unknown keys
    ///
    /// Output:
    /// - Valid values applied, zero/garbage ignored, unknown keys skipped
    fn parse_settings_applies_known_keys() {
        let content = "\
# comment
endpoint_url = http://news.internal:8080/api/news # prod
Refresh-Interval = 15
request_timeout_secs = 0
layout = partitioned
max_items = 7
new_badge_count = two
clock_format = %Y-%m-%d %H:%M
show_keybinds_footer = off
colour = blue
";
        let s = parse_settings(content);
        assert_eq!(s.endpoint_url, "http://news.internal:8080/api/news");
        assert_eq!(s.refresh_interval_secs, 15);
        assert_eq!(s.request_timeout_secs, 10, "zero keeps the default");
        assert_eq!(s.layout, FeedLayout::Partitioned);
        assert_eq!(s.max_news_count, Some(7));
        assert_eq!(s.effective_cap(), 7);
        assert_eq!(s.new_badge_count, 3, "garbage keeps the default");
        assert_eq!(s.clock_format, "%Y-%m-%d %H:%M");
        assert!(!s.show_keybinds_footer);
    }

    #[test]
    fn effective_cap_follows_layout_default() {
        let mut s = parse_settings("layout = partitioned\n");
        assert_eq!(s.effective_cap(), 5);
        s.layout = FeedLayout::Unified;
        assert_eq!(s.effective_cap(), 50);
    }

    #[test]
    /// What: The skeleton parses back to the defaults.
    ///
    /// Inputs:
    /// - Skeleton written to a temp file and loaded from disk
    ///
    /// Output:
    /// - Loaded settings equal `Settings::default()`
    fn skeleton_round_trips_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.conf");
        fs::write(&path, SETTINGS_SKELETON_CONTENT).expect("write skeleton");
        assert_eq!(load_settings_from(&path), Settings::default());
        assert_eq!(
            load_settings_from(&dir.path().join("missing.conf")),
            Settings::default()
        );
    }
}
