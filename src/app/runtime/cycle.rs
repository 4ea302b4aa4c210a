//! The news orchestrator: one instance owns the state, the source, and the scheduler handle.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::guard::{CycleGuard, CyclePermit};
use super::workers::news::spawn_scheduler;
use crate::logic::build_render_model;
use crate::sources::{FetchOutcome, NewsSource};
use crate::state::{AppState, UpdateOutcome};
use crate::theme::Settings;
use crate::ui::{RenderError, render_text};

/// Fetch result travelling from the scheduler to the event loop.
#[derive(Debug)]
pub struct CycleResult {
    /// What the fetch produced.
    pub outcome: FetchOutcome,
    /// Held until the cycle's render step completes.
    pub permit: CyclePermit,
    /// When the fetch finished.
    pub finished_at: DateTime<Local>,
}

/// Output of a one-shot cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OnceReport {
    /// Plain-text rendering of the feed after the cycle.
    pub text: String,
    /// `0` when news arrived, `1` otherwise.
    pub exit_code: i32,
}

/// What: Owner of one news pipeline instance.
///
/// Details:
/// - Constructed once at startup and passed by reference to the event loop.
/// - Cycles run `Idle -> Fetching -> Rendering -> Idle`; the shared `CycleGuard`
///   refuses a new cycle until the previous one has been rendered.
pub struct NewsOrchestrator<S: NewsSource> {
    /// State read by the renderer.
    pub app: AppState,
    /// Where news comes from.
    source: Arc<S>,
    /// Reentrancy guard shared with the scheduler task.
    guard: CycleGuard,
    /// Time between scheduled cycles.
    period: Duration,
    /// Running scheduler task, if started.
    scheduler: Option<JoinHandle<()>>,
}

impl<S: NewsSource> NewsOrchestrator<S> {
    /// What: Build an orchestrator from settings and a news source.
    ///
    /// Inputs:
    /// - `settings`: Effective settings (interval, layout, cap)
    /// - `source`: News source used by every cycle
    ///
    /// Output:
    /// - Idle orchestrator; call `start` to begin scheduling
    #[must_use]
    pub fn new(settings: Settings, source: S) -> Self {
        let period = settings.refresh_interval();
        Self {
            app: AppState::new(settings),
            source: Arc::new(source),
            guard: CycleGuard::new(),
            period,
            scheduler: None,
        }
    }

    /// Guard shared by every cycle of this instance.
    #[must_use]
    pub const fn guard(&self) -> &CycleGuard {
        &self.guard
    }

    /// Whether the scheduler task is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.scheduler.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// What: Spawn the recurring scheduler.
    ///
    /// Inputs:
    /// - `results_tx`: Where completed fetches are delivered
    /// - `refresh_rx`: Manual refresh requests
    ///
    /// Details:
    /// - The first cycle starts immediately. Calling `start` twice is a no-op.
    pub fn start(
        &mut self,
        results_tx: mpsc::UnboundedSender<CycleResult>,
        refresh_rx: mpsc::UnboundedReceiver<()>,
    ) {
        if self.scheduler.is_some() {
            tracing::debug!("scheduler already running");
            return;
        }
        tracing::info!(period_secs = self.period.as_secs(), "starting news scheduler");
        self.scheduler = Some(spawn_scheduler(
            Arc::clone(&self.source),
            self.guard.clone(),
            self.period,
            results_tx,
            refresh_rx,
        ));
    }

    /// Abort the scheduler task.
    pub fn stop(&mut self) {
        if let Some(handle) = self.scheduler.take() {
            handle.abort();
            tracing::debug!("news scheduler stopped");
        }
    }

    /// What: Merge a delivered fetch into the state.
    ///
    /// Inputs:
    /// - `result`: Fetch result and its cycle permit
    ///
    /// Output:
    /// - Store update outcome
    ///
    /// Details:
    /// - The permit is parked in the state until `finish_render` runs.
    pub fn apply(&mut self, result: CycleResult) -> UpdateOutcome {
        let update = self.app.apply_fetch(result.outcome, result.finished_at);
        self.app.pending_cycle = Some(result.permit);
        update
    }

    /// Close the render step of the pending cycle (if any).
    pub fn finish_render(&mut self, result: Result<(), RenderError>) {
        self.app.finish_render(result.map_err(|e| e.to_string()));
    }

    /// What: Run one cycle inline, without the scheduler.
    ///
    /// Inputs:
    /// - `now`: Completion time recorded for the cycle
    ///
    /// Output:
    /// - `Some(update)` when the cycle ran; `None` when another cycle is outstanding
    ///
    /// Details:
    /// - Leaves the cycle pending; the caller renders and then calls `finish_render`.
    pub async fn run_cycle(&mut self, now: DateTime<Local>) -> Option<UpdateOutcome> {
        let Some(permit) = self.guard.try_begin() else {
            tracing::debug!("cycle skipped: previous cycle still outstanding");
            return None;
        };
        let outcome = self.source.fetch_news().await;
        Some(self.apply(CycleResult {
            outcome,
            permit,
            finished_at: now,
        }))
    }

    /// What: Run one cycle and render it as plain text.
    ///
    /// Inputs:
    /// - `now`: Reference time for the cycle and relative labels
    ///
    /// Output:
    /// - Rendered text and exit code; empty text with code `1` if a cycle was already outstanding
    ///
    /// Details:
    /// - The text render closes the cycle, as a terminal draw would.
    pub async fn run_once(&mut self, now: DateTime<Local>) -> OnceReport {
        if self.run_cycle(now).await.is_none() {
            return OnceReport {
                text: String::new(),
                exit_code: 1,
            };
        }
        let model = build_render_model(&self.app.store, self.app.settings.new_badge_count, &now);
        let text = render_text(&self.app, &model);
        self.finish_render(Ok(()));
        OnceReport {
            text,
            exit_code: i32::from(self.app.stats.last_success.is_none()),
        }
    }
}

impl<S: NewsSource> Drop for NewsOrchestrator<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{FetchError, FetchedNews};
    use crate::state::types::{NewsItem, NewsPayload};
    use crate::state::{FeedView, ListOutcome};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Source that returns `n` items on every call and counts calls.
    struct Fixed {
        items: usize,
        calls: Arc<AtomicUsize>,
    }

    impl NewsSource for Fixed {
        async fn fetch_news(&self) -> FetchOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.items == 0 {
                return FetchOutcome::NoData(FetchError::Empty);
            }
            let items = (0..self.items)
                .map(|n| NewsItem {
                    link: format!("https://news.test/{n}"),
                    title: format!("Item {n}"),
                    ..NewsItem::default()
                })
                .collect();
            FetchOutcome::Data(FetchedNews {
                payload: NewsPayload::Unified(items),
                server_last_update: None,
            })
        }
    }

    fn fixed(items: usize) -> (Fixed, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Fixed {
                items,
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }

    #[tokio::test]
    /// What: A cycle stays outstanding until its render step finishes.
    ///
    /// Inputs:
    /// - Two back-to-back `run_cycle` calls, then `finish_render`, then a third call
    ///
    /// Output:
    /// - Second call skipped without fetching; third call runs
    async fn run_cycle_refuses_overlap_until_rendered() {
        let (source, calls) = fixed(4);
        let mut orch = NewsOrchestrator::new(Settings::default(), source);

        let first = orch.run_cycle(Local::now()).await;
        assert_eq!(first, Some(UpdateOutcome::Unified(ListOutcome::Updated(4))));
        assert!(orch.app.cycle_pending());
        assert!(orch.run_cycle(Local::now()).await.is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        orch.finish_render(Ok(()));
        assert!(!orch.guard().is_busy());
        assert!(orch.run_cycle(Local::now()).await.is_some());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    /// What: A render failure shows the error state and still releases the cycle.
    ///
    /// Inputs:
    /// - One cycle whose render step fails
    ///
    /// Output:
    /// - `FeedView::Error`, guard idle, next cycle returns to the list view
    async fn render_failure_is_isolated_to_its_cycle() {
        let (source, _) = fixed(2);
        let mut orch = NewsOrchestrator::new(Settings::default(), source);
        orch.run_cycle(Local::now()).await;
        orch.finish_render(Err(RenderError::Surface("too small".into())));
        assert!(matches!(orch.app.view, FeedView::Error(_)));
        assert!(!orch.guard().is_busy());

        orch.run_cycle(Local::now()).await;
        assert_eq!(orch.app.view, FeedView::List);
    }

    #[tokio::test(start_paused = true)]
    /// What: The scheduler fires immediately, then once per period.
    ///
    /// Inputs:
    /// - 30 s period; results rendered as they arrive; virtual time advanced 65 s
    ///
    /// Output:
    /// - Three cycles delivered (t = 0, 30, 60)
    async fn scheduler_ticks_immediately_then_periodically() {
        let (source, calls) = fixed(0);
        let mut orch = NewsOrchestrator::new(Settings::default(), source);
        let (results_tx, mut results_rx) = mpsc::unbounded_channel();
        let (_refresh_tx, refresh_rx) = mpsc::unbounded_channel();
        orch.start(results_tx, refresh_rx);
        assert!(orch.is_running());

        let deadline = tokio::time::Instant::now() + Duration::from_secs(65);
        let mut delivered = 0;
        while let Ok(Some(result)) = tokio::time::timeout_at(deadline, results_rx.recv()).await {
            orch.apply(result);
            orch.finish_render(Ok(()));
            delivered += 1;
        }
        assert_eq!(delivered, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(orch.app.view, FeedView::Empty);

        orch.stop();
        assert!(!orch.is_running());
    }

    #[tokio::test(start_paused = true)]
    /// What: Ticks that land while a cycle is unrendered are skipped, not queued.
    ///
    /// Inputs:
    /// - First result held unrendered across two periods, plus a manual refresh
    ///
    /// Output:
    /// - Only one fetch happens while the permit is held
    async fn scheduler_skips_ticks_while_cycle_outstanding() {
        let (source, calls) = fixed(1);
        let mut orch = NewsOrchestrator::new(Settings::default(), source);
        let (results_tx, mut results_rx) = mpsc::unbounded_channel();
        let (refresh_tx, refresh_rx) = mpsc::unbounded_channel();
        orch.start(results_tx, refresh_rx);

        let held = results_rx.recv().await.expect("first cycle");
        refresh_tx.send(()).expect("scheduler alive");
        tokio::time::sleep(Duration::from_secs(61)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(results_rx.try_recv().is_err());

        orch.apply(held);
        orch.finish_render(Ok(()));
        refresh_tx.send(()).expect("scheduler alive");
        let next = results_rx.recv().await.expect("manual refresh cycle");
        assert_eq!(next.permit.id(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    /// Source whose fetch takes five seconds of virtual time.
    struct Slow {
        calls: Arc<AtomicUsize>,
    }

    impl NewsSource for Slow {
        async fn fetch_news(&self) -> FetchOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_secs(5)).await;
            FetchOutcome::NoData(FetchError::Empty)
        }
    }

    #[tokio::test(start_paused = true)]
    /// What: Refresh presses made during a fetch collapse into that fetch.
    ///
    /// Inputs:
    /// - Slow source; three manual refreshes sent mid-fetch; result rendered promptly
    ///
    /// Output:
    /// - No extra cycle starts before the next scheduled tick
    async fn refreshes_during_fetch_are_coalesced() {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = Slow {
            calls: Arc::clone(&calls),
        };
        let mut orch = NewsOrchestrator::new(Settings::default(), source);
        let (results_tx, mut results_rx) = mpsc::unbounded_channel();
        let (refresh_tx, refresh_rx) = mpsc::unbounded_channel();
        orch.start(results_tx, refresh_rx);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        for _ in 0..3 {
            refresh_tx.send(()).expect("scheduler alive");
        }

        let first = results_rx.recv().await.expect("first cycle");
        orch.apply(first);
        orch.finish_render(Ok(()));

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(results_rx.try_recv().is_err());
        assert!(!orch.guard().is_busy());
    }
}
