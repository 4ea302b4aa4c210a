//! One-shot mode: run a single cycle and print it.

use chrono::Local;
use newsdeck::app::NewsOrchestrator;
use newsdeck::sources::NewsFetcher;
use newsdeck::theme::Settings;

/// What: Fetch once, print the feed as text, and report an exit code.
///
/// Inputs:
/// - `settings`: Effective settings
///
/// Output:
/// - `0` when news was received; `1` when the cycle produced no data or the client failed
///
/// Details:
/// - Goes through the same orchestrator path as the TUI, so output matches what
///   the first frame would show.
pub async fn run_once(settings: Settings) -> i32 {
    tracing::info!(endpoint = %settings.endpoint_url, "one-shot mode requested from CLI");
    let fetcher = match NewsFetcher::new(
        &settings.endpoint_url,
        settings.layout,
        settings.request_timeout(),
    ) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("newsdeck: {e}");
            tracing::error!(error = %e, "failed to build HTTP client");
            return 1;
        }
    };
    let report = NewsOrchestrator::new(settings, fetcher)
        .run_once(Local::now())
        .await;
    print!("{}", report.text);
    report.exit_code
}
