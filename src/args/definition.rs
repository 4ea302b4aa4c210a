//! Command-line argument definition and processing.

use std::path::PathBuf;

use clap::Parser;
use newsdeck::state::FeedLayout;
use newsdeck::theme::Settings;

/// newsdeck - a terminal dashboard for crypto and market headlines
#[derive(Parser, Debug)]
#[command(name = "newsdeck")]
#[command(version)]
#[command(about = "A terminal dashboard for crypto and market headlines", long_about = None)]
pub struct Args {
    /// News endpoint URL (overrides `endpoint_url` in settings.conf)
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Seconds between refresh cycles
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// List layout: unified or partitioned
    #[arg(long, value_name = "LAYOUT", value_parser = parse_layout)]
    pub layout: Option<FeedLayout>,

    /// Maximum items kept per list
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub max_items: Option<u64>,

    /// Read settings from this file instead of ~/.config/newsdeck/settings.conf
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Run a single cycle, print the result as text, and exit
    #[arg(long, conflicts_with = "health")]
    pub once: bool,

    /// Query the aggregator's health endpoint and exit
    #[arg(long)]
    pub health: bool,
}

/// Parse `--layout` using the same keys as settings.conf.
fn parse_layout(value: &str) -> Result<FeedLayout, String> {
    FeedLayout::from_config_key(value)
        .ok_or_else(|| format!("unknown layout '{value}' (expected unified or partitioned)"))
}

/// What: Apply command-line overrides on top of file settings.
///
/// Inputs:
/// - `args`: Parsed command-line arguments
/// - `settings`: Settings loaded from disk
///
/// Output:
/// - Settings with every given flag applied
///
/// Details:
/// - Precedence is defaults < settings.conf < flags.
pub fn apply_overrides(args: &Args, mut settings: Settings) -> Settings {
    if let Some(endpoint) = &args.endpoint {
        settings.endpoint_url.clone_from(endpoint);
    }
    if let Some(secs) = args.interval {
        settings.refresh_interval_secs = secs;
    }
    if let Some(layout) = args.layout {
        settings.layout = layout;
    }
    if let Some(max) = args.max_items {
        settings.max_news_count = Some(usize::try_from(max).unwrap_or(usize::MAX));
    }
    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Flags override file settings; absent flags leave them alone.
    ///
    /// Inputs:
    /// - Settings with a custom endpoint, flags for layout, interval, and cap
    ///
    /// Output:
    /// - Endpoint kept, other values replaced
    fn overrides_apply_only_given_flags() {
        let args = Args::parse_from([
            "newsdeck",
            "--layout",
            "partitioned",
            "--interval",
            "5",
            "--max-items",
            "8",
        ]);
        let file = Settings {
            endpoint_url: "http://news.internal/api/news".into(),
            ..Settings::default()
        };
        let s = apply_overrides(&args, file);
        assert_eq!(s.endpoint_url, "http://news.internal/api/news");
        assert_eq!(s.layout, FeedLayout::Partitioned);
        assert_eq!(s.refresh_interval_secs, 5);
        assert_eq!(s.effective_cap(), 8);
    }

    #[test]
    fn invalid_flag_values_are_rejected() {
        assert!(Args::try_parse_from(["newsdeck", "--layout", "grid"]).is_err());
        assert!(Args::try_parse_from(["newsdeck", "--interval", "0"]).is_err());
        assert!(Args::try_parse_from(["newsdeck", "--once", "--health"]).is_err());
    }
}
