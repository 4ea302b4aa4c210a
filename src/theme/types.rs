use std::time::Duration;

use ratatui::style::Color;

use crate::state::types::FeedLayout;

/// Application theme palette used by rendering code.
///
/// All colors are provided as [`ratatui::style::Color`] and are suitable for
/// direct use with widgets and styles.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    /// Primary background color for the canvas.
    pub base: Color,
    /// Darkest background shade for deep contrast areas.
    pub crust: Color,
    /// Subtle surface color for component backgrounds (level 1).
    pub surface1: Color,
    /// Subtle surface color for component backgrounds (level 2).
    pub surface2: Color,
    /// Muted overlay line/border color (primary).
    pub overlay1: Color,
    /// Muted overlay line/border color (secondary).
    pub overlay2: Color,
    /// Primary foreground text color.
    pub text: Color,
    /// Secondary text for less prominent content.
    pub subtext0: Color,
    /// Accent color commonly used for selection and interactive highlights.
    pub sapphire: Color,
    /// Accent color for emphasized headings or selections.
    pub mauve: Color,
    /// Success/positive state color.
    pub green: Color,
    /// Warning/attention state color.
    pub yellow: Color,
    /// Error/danger state color.
    pub red: Color,
    /// Accent color for subtle emphasis and borders.
    pub lavender: Color,
}

impl Default for Theme {
    /// Catppuccin Mocha.
    fn default() -> Self {
        Self {
            base: Color::Rgb(30, 30, 46),        // #1e1e2e
            crust: Color::Rgb(17, 17, 27),       // #11111b
            surface1: Color::Rgb(69, 71, 90),    // #45475a
            surface2: Color::Rgb(88, 91, 112),   // #585b70
            overlay1: Color::Rgb(127, 132, 156), // #7f849c
            overlay2: Color::Rgb(147, 153, 178), // #9399b2
            text: Color::Rgb(205, 214, 244),     // #cdd6f4
            subtext0: Color::Rgb(166, 173, 200), // #a6adc8
            sapphire: Color::Rgb(116, 199, 236), // #74c7ec
            mauve: Color::Rgb(203, 166, 247),    // #cba6f7
            green: Color::Rgb(166, 227, 161),    // #a6e3a1
            yellow: Color::Rgb(249, 226, 175),   // #f9e2af
            red: Color::Rgb(243, 139, 168),      // #f38ba8
            lavender: Color::Rgb(180, 190, 254), // #b4befe
        }
    }
}

/// User-configurable application settings parsed from `settings.conf`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Full URL of the news endpoint.
    pub endpoint_url: String,
    /// Seconds between scheduled refresh cycles (at least 1).
    pub refresh_interval_secs: u64,
    /// Whole-request timeout in seconds (at least 1).
    pub request_timeout_secs: u64,
    /// Unified or partitioned lists.
    pub layout: FeedLayout,
    /// Per-list cap; `None` uses the layout default.
    pub max_news_count: Option<usize>,
    /// Leading rows per list that get the "new" badge.
    pub new_badge_count: usize,
    /// `chrono` format string for the header clock.
    pub clock_format: String,
    /// `chrono` format string for the last-update time in the stats line.
    pub stats_time_format: String,
    /// Whether the key hint footer is drawn.
    pub show_keybinds_footer: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint_url: "http://127.0.0.1:5000/api/news".to_string(),
            refresh_interval_secs: 30,
            request_timeout_secs: 10,
            layout: FeedLayout::Unified,
            max_news_count: None,
            new_badge_count: 3,
            clock_format: "%A, %B %-d, %Y %H:%M:%S".to_string(),
            stats_time_format: "%H:%M:%S".to_string(),
            show_keybinds_footer: true,
        }
    }
}

impl Settings {
    /// Per-list cap after applying the layout default.
    #[must_use]
    pub fn effective_cap(&self) -> usize {
        self.max_news_count
            .unwrap_or_else(|| self.layout.default_cap())
            .max(1)
    }

    /// Period between scheduled cycles.
    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }

    /// Whole-request timeout for the fetcher.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}
