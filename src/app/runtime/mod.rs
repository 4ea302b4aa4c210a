use std::sync::atomic::Ordering;

use chrono::Local;
use ratatui::{Terminal, backend::CrosstermBackend};

use super::terminal::{install_panic_hook, restore_terminal, setup_terminal};
use crate::sources::NewsFetcher;
use crate::theme::Settings;

mod channels;
/// Orchestrator and cycle results.
pub mod cycle;
mod event_loop;
/// Reentrancy guard for cycles.
pub mod guard;
/// Background workers.
pub mod workers;

use channels::Channels;
use cycle::NewsOrchestrator;
use event_loop::run_event_loop;
use workers::clock::spawn_clock_worker;
use workers::input::spawn_event_thread;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What: Run the newsdeck TUI end-to-end.
///
/// Inputs:
/// - `settings`: Effective settings (config file merged with command-line overrides)
///
/// Output:
/// - `Ok(())` when the user quits; `Err` when the terminal or HTTP client cannot be set up
///
/// Details:
/// - Builds the fetcher and orchestrator, then starts the scheduler (first cycle
///   immediately), the clock ticker, and the input thread.
/// - `NEWSDECK_TEST_HEADLESS=1` skips all terminal setup and drawing.
/// - Stops the workers and restores the terminal on exit.
pub async fn run(settings: Settings) -> Result<()> {
    let headless = std::env::var("NEWSDECK_TEST_HEADLESS").ok().as_deref() == Some("1");
    let fetcher = NewsFetcher::new(
        &settings.endpoint_url,
        settings.layout,
        settings.request_timeout(),
    )?;
    tracing::info!(
        endpoint = %settings.endpoint_url,
        layout = ?settings.layout,
        cap = settings.effective_cap(),
        interval_secs = settings.refresh_interval().as_secs(),
        headless,
        "newsdeck runtime starting"
    );

    if !headless {
        install_panic_hook();
        setup_terminal()?;
    }
    let mut terminal = if headless {
        None
    } else {
        Some(Terminal::new(CrosstermBackend::new(std::io::stdout()))?)
    };

    let mut orch = NewsOrchestrator::new(settings, fetcher);
    orch.app.tick_clock(Local::now());

    let mut channels = Channels::new();
    spawn_clock_worker(channels.clock_tx.clone());
    spawn_event_thread(
        headless,
        channels.event_tx.clone(),
        channels.event_thread_cancelled.clone(),
    );
    if let Some(refresh_rx) = channels.refresh_rx.take() {
        orch.start(channels.results_tx.clone(), refresh_rx);
    }

    run_event_loop(&mut terminal, &mut orch, &mut channels).await;

    tracing::debug!("main loop exited");
    channels.event_thread_cancelled.store(true, Ordering::Relaxed);
    orch.stop();

    if !headless {
        restore_terminal()?;
    }
    Ok(())
}
