use std::io::Stdout;

use chrono::Local;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::select;

use super::channels::Channels;
use super::cycle::NewsOrchestrator;
use crate::sources::NewsSource;
use crate::state::AppState;
use crate::ui::{RenderError, ui};

/// Terminal type used by the runtime.
pub type Term = Terminal<CrosstermBackend<Stdout>>;

/// What: Draw one frame.
///
/// Inputs:
/// - `terminal`: Target terminal
/// - `app`: State to render
///
/// Output:
/// - `Err` when the terminal write fails or the surface cannot hold the layout
fn draw_frame(terminal: &mut Term, app: &mut AppState) -> Result<(), RenderError> {
    let mut outcome = Ok(());
    terminal.draw(|f| outcome = ui(f, app))?;
    outcome
}

/// What: Wait for and handle one message from any channel.
///
/// Inputs:
/// - `orch`: Orchestrator owning the state
/// - `channels`: Worker channels
///
/// Output:
/// - `true` when the loop should exit
async fn process_channel_messages<S: NewsSource>(
    orch: &mut NewsOrchestrator<S>,
    channels: &mut Channels,
) -> bool {
    select! {
        Some(ev) = channels.event_rx.recv() => {
            crate::events::handle_event(&ev, &mut orch.app, &channels.refresh_tx)
        }
        Some(result) = channels.results_rx.recv() => {
            let cycle = result.permit.id();
            let update = orch.apply(result);
            tracing::debug!(cycle, ?update, "cycle result applied");
            false
        }
        Some(()) = channels.clock_rx.recv() => {
            orch.app.tick_clock(Local::now());
            false
        }
        else => true
    }
}

/// What: Run the main loop until the user quits.
///
/// Inputs:
/// - `terminal`: Terminal to draw on (`None` when headless)
/// - `orch`: Orchestrator owning the state
/// - `channels`: Worker channels
///
/// Details:
/// - Every iteration draws first, so a delivered cycle is rendered before the
///   next message is handled; the draw result closes the pending cycle.
pub async fn run_event_loop<S: NewsSource>(
    terminal: &mut Option<Term>,
    orch: &mut NewsOrchestrator<S>,
    channels: &mut Channels,
) {
    loop {
        if let Some(t) = terminal.as_mut() {
            let result = draw_frame(t, &mut orch.app);
            orch.finish_render(result);
        } else if orch.app.cycle_pending() {
            orch.finish_render(Ok(()));
        }

        if process_channel_messages(orch, channels).await {
            break;
        }
    }
}
