//! Command-line health probe.

use newsdeck::sources::{NewsFetcher, fetch_health, health_url};
use newsdeck::theme::Settings;

/// What: Query `/api/health` next to the configured news endpoint and print the report.
///
/// Inputs:
/// - `settings`: Effective settings (endpoint and timeout)
///
/// Output:
/// - `0` when the server reports healthy; `1` otherwise
pub async fn run_health(settings: &Settings) -> i32 {
    let fetcher = match NewsFetcher::new(
        &settings.endpoint_url,
        settings.layout,
        settings.request_timeout(),
    ) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("newsdeck: {e}");
            return 1;
        }
    };
    let Some(url) = health_url(fetcher.endpoint()) else {
        eprintln!("newsdeck: invalid endpoint URL '{}'", fetcher.endpoint());
        return 1;
    };
    tracing::info!(url = %url, "health probe requested from CLI");
    match fetch_health(fetcher.client(), &url).await {
        Ok(report) => {
            println!("status:      {}", report.status);
            println!(
                "news_count:  {}",
                report.news_count.map_or_else(|| "-".to_string(), |n| n.to_string())
            );
            println!(
                "last_update: {}",
                report.last_update.as_deref().unwrap_or("-")
            );
            i32::from(!report.is_healthy())
        }
        Err(e) => {
            eprintln!("newsdeck: health check failed: {e}");
            tracing::warn!(kind = e.kind(), error = %e, "health check failed");
            1
        }
    }
}
