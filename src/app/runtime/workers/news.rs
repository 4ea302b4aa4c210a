//! Recurring news scheduler task.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::app::runtime::cycle::CycleResult;
use crate::app::runtime::guard::CycleGuard;
use crate::sources::NewsSource;

/// Why a cycle was requested.
#[derive(Clone, Copy, Debug)]
enum Trigger {
    Tick,
    Manual,
}

/// What: Spawn the scheduler that drives fetch cycles.
///
/// Inputs:
/// - `source`: News source shared with the orchestrator
/// - `guard`: Reentrancy guard shared with the orchestrator
/// - `period`: Time between scheduled cycles
/// - `results_tx`: Where fetch results go
/// - `refresh_rx`: Manual refresh requests
///
/// Output:
/// - Handle of the spawned task
///
/// Details:
/// - Fires once immediately, then every `period`; late ticks are skipped, not bunched.
/// - A trigger that finds a cycle outstanding is dropped with a debug log.
/// - Refresh requests that pile up during a fetch collapse into that fetch.
/// - Exits when the results channel closes.
pub fn spawn_scheduler<S: NewsSource>(
    source: Arc<S>,
    guard: CycleGuard,
    period: Duration,
    results_tx: mpsc::UnboundedSender<CycleResult>,
    mut refresh_rx: mpsc::UnboundedReceiver<()>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut manual_open = true;
        loop {
            let trigger = tokio::select! {
                _ = interval.tick() => Trigger::Tick,
                msg = refresh_rx.recv(), if manual_open => {
                    if msg.is_none() {
                        manual_open = false;
                        continue;
                    }
                    Trigger::Manual
                }
            };
            let Some(permit) = guard.try_begin() else {
                tracing::debug!(?trigger, "cycle skipped: previous cycle still outstanding");
                continue;
            };
            tracing::debug!(?trigger, cycle = permit.id(), "cycle started");
            let outcome = source.fetch_news().await;
            let coalesced = drain_refresh(&mut refresh_rx);
            if coalesced > 0 {
                tracing::debug!(coalesced, "refresh requests folded into the running cycle");
            }
            let result = CycleResult {
                outcome,
                permit,
                finished_at: chrono::Local::now(),
            };
            if results_tx.send(result).is_err() {
                tracing::debug!("results channel closed; scheduler exiting");
                break;
            }
        }
    })
}

/// Discard queued refresh requests; returns how many were dropped.
fn drain_refresh(refresh_rx: &mut mpsc::UnboundedReceiver<()>) -> usize {
    let mut dropped = 0;
    while refresh_rx.try_recv().is_ok() {
        dropped += 1;
    }
    dropped
}
