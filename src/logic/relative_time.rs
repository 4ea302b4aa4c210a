//! Relative age labels for news items ("just now", "5 minutes ago", ...).
//!
//! The aggregator ships `published` in more than one encoding. ISO-like text is
//! already server-local wall-clock time and is rebuilt field by field without
//! any timezone conversion; numeric values are absolute instants and are trusted
//! as-is. The two paths are intentionally kept apart.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

/// Publication timestamp of a news item in whichever framing the server used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Published {
    /// Server-local wall-clock fields (no timezone attached).
    WallClock(NaiveDateTime),
    /// Absolute instant (epoch milliseconds or RFC 2822 text).
    Instant(DateTime<Utc>),
    /// Text that could not be interpreted; shown verbatim.
    Unparsed(String),
}

impl Default for Published {
    fn default() -> Self {
        Self::Unparsed(String::new())
    }
}

impl Published {
    /// What: Interpret a raw JSON `published` value.
    ///
    /// Inputs:
    /// - `value`: JSON string, number, or anything else from the wire
    ///
    /// Output:
    /// - `Published` variant matching the encoding
    ///
    /// Details:
    /// - Strings go through [`parse_published`].
    /// - Numbers are epoch milliseconds; out-of-range numbers become `Unparsed`.
    /// - `null` and other JSON types become an empty `Unparsed`.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => parse_published(s),
            Value::Number(n) => {
                #[allow(clippy::cast_possible_truncation)]
                let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f.floor() as i64));
                millis
                    .and_then(DateTime::<Utc>::from_timestamp_millis)
                    .map_or_else(|| Self::Unparsed(n.to_string()), Self::Instant)
            }
            _ => Self::default(),
        }
    }
}

/// What: Parse a textual `published` value.
///
/// Inputs:
/// - `raw`: Timestamp text as delivered by the server
///
/// Output:
/// - `Published::WallClock` for ISO-like `YYYY-MM-DD[ T]HH:MM[:SS[.fff]]` text
/// - `Published::Instant` for RFC 2822 text (raw RSS `pubDate`)
/// - `Published::Unparsed` otherwise
///
/// Details:
/// - The ISO-like form is split into its date and time parts and rebuilt from
///   the numeric fields. A trailing offset or `Z` is ignored, because the server
///   has already shifted the value into the display timezone.
#[must_use]
pub fn parse_published(raw: &str) -> Published {
    let trimmed = raw.trim();
    if let Some(naive) = parse_wall_clock(trimmed) {
        return Published::WallClock(naive);
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Published::Instant(dt.with_timezone(&Utc));
    }
    Published::Unparsed(trimmed.to_string())
}

/// What: Rebuild wall-clock fields from `YYYY-MM-DD HH:MM:SS`-like text.
///
/// Inputs:
/// - `s`: Trimmed timestamp text
///
/// Output:
/// - `Some(NaiveDateTime)` when date and time fields are all valid
fn parse_wall_clock(s: &str) -> Option<NaiveDateTime> {
    let (date_part, time_part) = s.split_once([' ', 'T'])?;
    let mut date_fields = date_part.split('-');
    let year = date_fields.next()?.parse::<i32>().ok()?;
    let month = date_fields.next()?.parse::<u32>().ok()?;
    let day = date_fields.next()?.parse::<u32>().ok()?;
    if date_fields.next().is_some() {
        return None;
    }

    // Drop fractional seconds and any offset suffix.
    let clock_end = time_part
        .find(|c: char| !(c.is_ascii_digit() || c == ':'))
        .unwrap_or(time_part.len());
    let mut time_fields = time_part[..clock_end].split(':');
    let hour = time_fields.next()?.parse::<u32>().ok()?;
    let minute = time_fields.next()?.parse::<u32>().ok()?;
    let second = match time_fields.next() {
        Some(sec) => sec.parse::<u32>().ok()?,
        None => 0,
    };

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)
}

/// What: Milliseconds elapsed between publication and `now`.
///
/// Inputs:
/// - `published`: Publication timestamp
/// - `now`: Reference time; its timezone is the display timezone
///
/// Output:
/// - `Some(ms)` (negative when published in the future), `None` for unparsed input
///
/// Details:
/// - Wall-clock values are placed in `now`'s timezone as local time. For a
///   nonexistent local time (DST gap) the wall clocks are compared directly.
fn elapsed_millis<Tz: TimeZone>(published: &Published, now: &DateTime<Tz>) -> Option<i64> {
    match published {
        Published::WallClock(naive) => {
            let delta = now.timezone().from_local_datetime(naive).earliest().map_or_else(
                || now.naive_local() - *naive,
                |local| now.clone().signed_duration_since(local),
            );
            Some(delta.num_milliseconds())
        }
        Published::Instant(instant) => {
            Some(now.clone().signed_duration_since(*instant).num_milliseconds())
        }
        Published::Unparsed(_) => None,
    }
}

/// What: Human-readable age of a news item.
///
/// Inputs:
/// - `published`: Publication timestamp
/// - `now`: Reference time
///
/// Output:
/// - `"just now"`, `"<N> minutes ago"`, `"<N> hours ago"`, or `"<N> days ago"`
/// - The raw text for unparsed timestamps
///
/// Details:
/// - Elapsed time is floored to whole minutes first; thresholds are exclusive
///   (under 1 minute, under 60 minutes, under 24 hours, else days).
/// - There is no week/month tier; old items show large day counts.
/// - Future timestamps read as "just now".
#[must_use]
pub fn relative_label<Tz: TimeZone>(published: &Published, now: &DateTime<Tz>) -> String {
    let Some(millis) = elapsed_millis(published, now) else {
        return match published {
            Published::Unparsed(raw) => raw.clone(),
            _ => String::new(),
        };
    };
    let minutes = millis.div_euclid(60_000);
    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes} minutes ago");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours} hours ago");
    }
    format!("{} days ago", hours / 24)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset};

    fn seoul() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).expect("valid offset")
    }

    fn now_seoul() -> DateTime<FixedOffset> {
        seoul()
            .with_ymd_and_hms(2025, 3, 10, 12, 0, 0)
            .single()
            .expect("valid now")
    }

    fn label_after(elapsed: Duration) -> String {
        let now = now_seoul();
        let published = Published::WallClock((now - elapsed).naive_local());
        relative_label(&published, &now)
    }

    #[test]
    /// What: Verify the exact threshold boundaries of the label tiers.
    ///
    /// Inputs:
    /// - Elapsed durations straddling the minute, hour, and day thresholds
    ///
    /// Output:
    /// - Labels switch tier exactly at 60s, 60min, and 24h
    fn relative_label_boundaries() {
        assert_eq!(label_after(Duration::seconds(0)), "just now");
        assert_eq!(label_after(Duration::seconds(59)), "just now");
        assert_eq!(label_after(Duration::seconds(60)), "1 minutes ago");
        assert_eq!(label_after(Duration::minutes(59)), "59 minutes ago");
        assert_eq!(label_after(Duration::minutes(60)), "1 hours ago");
        assert_eq!(
            label_after(Duration::hours(23) + Duration::minutes(59)),
            "23 hours ago"
        );
        assert_eq!(label_after(Duration::hours(24)), "1 days ago");
        assert_eq!(label_after(Duration::days(400)), "400 days ago");
    }

    #[test]
    /// What: Ensure labels never shrink as the gap grows.
    ///
    /// Inputs:
    /// - Elapsed time sampled every 7 minutes over three days
    ///
    /// Output:
    /// - Tier rank and count are non-decreasing along the sequence
    fn relative_label_is_monotonic() {
        fn rank(label: &str) -> (u8, i64) {
            if label == "just now" {
                return (0, 0);
            }
            let n = label
                .split_whitespace()
                .next()
                .and_then(|n| n.parse::<i64>().ok())
                .expect("numeric label");
            if label.ends_with("minutes ago") {
                (1, n)
            } else if label.ends_with("hours ago") {
                (2, n)
            } else {
                (3, n)
            }
        }
        let mut previous = (0, 0);
        for step in 0..(3 * 24 * 60 / 7) {
            let current = rank(&label_after(Duration::minutes(step * 7)));
            assert!(current >= previous, "{current:?} < {previous:?}");
            previous = current;
        }
    }

    #[test]
    /// What: Confirm ISO-like strings are rebuilt from wall-clock fields.
    ///
    /// Inputs:
    /// - Space and `T` separated forms, fractional seconds, a trailing offset
    ///
    /// Output:
    /// - Identical `WallClock` values; the offset does not shift the fields
    fn parse_published_keeps_wall_clock_fields() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 10)
            .and_then(|d| d.and_hms_opt(11, 30, 5))
            .expect("valid date");
        for raw in [
            "2025-03-10 11:30:05",
            "2025-03-10T11:30:05",
            "2025-03-10T11:30:05.123456",
            "2025-03-10T11:30:05+00:00",
            "2025-03-10T11:30:05Z",
        ] {
            assert_eq!(parse_published(raw), Published::WallClock(expected), "{raw}");
        }
        assert_eq!(
            parse_published("2025-03-10 11:30"),
            Published::WallClock(
                NaiveDate::from_ymd_opt(2025, 3, 10)
                    .and_then(|d| d.and_hms_opt(11, 30, 0))
                    .expect("valid date")
            )
        );
    }

    #[test]
    /// What: Server-local strings are not double-shifted.
    ///
    /// Inputs:
    /// - A UTC-suffixed string whose fields equal Seoul wall-clock time 30 minutes ago
    ///
    /// Output:
    /// - "30 minutes ago" rather than an answer off by nine hours
    fn wall_clock_ignores_utc_suffix() {
        let now = now_seoul();
        let published = parse_published("2025-03-10T11:30:00Z");
        assert_eq!(relative_label(&published, &now), "30 minutes ago");
    }

    #[test]
    /// What: Native instants are used as-is.
    ///
    /// Inputs:
    /// - Epoch milliseconds two hours before `now`, and an RFC 2822 string
    ///
    /// Output:
    /// - Ages computed on the absolute timeline
    fn instants_are_trusted_as_is() {
        let now = now_seoul();
        let two_hours_ago = now.timestamp_millis() - 2 * 3600 * 1000;
        let published = Published::from_json(&Value::from(two_hours_ago));
        assert_eq!(relative_label(&published, &now), "2 hours ago");

        let rfc = parse_published("Mon, 10 Mar 2025 02:00:00 +0000");
        assert!(matches!(rfc, Published::Instant(_)));
        // 02:00 UTC is 11:00 in Seoul.
        assert_eq!(relative_label(&rfc, &now), "1 hours ago");
    }

    #[test]
    /// What: Edge inputs degrade gracefully.
    ///
    /// Inputs:
    /// - Future timestamp, garbage text, JSON null
    ///
    /// Output:
    /// - "just now", the raw text, and an empty label respectively
    fn relative_label_edge_inputs() {
        assert_eq!(label_after(Duration::minutes(-5)), "just now");
        let garbage = parse_published("yesterday-ish");
        assert_eq!(relative_label(&garbage, &now_seoul()), "yesterday-ish");
        assert_eq!(
            relative_label(&Published::from_json(&Value::Null), &now_seoul()),
            ""
        );
        assert!(matches!(parse_published("2025-13-40 10:00:00"), Published::Unparsed(_)));
    }

    #[test]
    /// What: Labelling is pure.
    ///
    /// Inputs:
    /// - The same published value labelled twice
    ///
    /// Output:
    /// - Identical output and an untouched input
    fn relative_label_is_idempotent() {
        let now = now_seoul();
        let published = parse_published("2025-03-09 08:00:00");
        let snapshot = published.clone();
        assert_eq!(relative_label(&published, &now), relative_label(&published, &now));
        assert_eq!(published, snapshot);
    }
}
