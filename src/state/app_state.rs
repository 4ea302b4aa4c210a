//! Central `AppState` owned by the event loop.

use chrono::{DateTime, Local};
use ratatui::widgets::ListState;

use crate::app::runtime::guard::CyclePermit;
use crate::sources::FetchOutcome;
use crate::state::store::{NewsStore, UpdateOutcome};
use crate::state::types::{Category, FeedLayout};
use crate::theme::Settings;

/// What the news area currently shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedView {
    /// No cycle has completed yet.
    Loading,
    /// Items (or per-pane empty messages in the partitioned layout).
    List,
    /// Unified layout with nothing collected yet.
    Empty,
    /// The last render step failed.
    Error(String),
}

/// Counters shown in the stats line, recomputed every cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeedStats {
    /// Items currently held by the store.
    pub total: usize,
    /// Time of the last cycle that delivered data.
    pub last_success: Option<DateTime<Local>>,
    /// Server-reported refresh time from the last successful response.
    pub server_last_update: Option<String>,
    /// Completed cycles since startup.
    pub cycles: u64,
    /// Consecutive cycles without new data.
    pub consecutive_no_data: u32,
}

/// Global application state for the newsdeck TUI.
#[derive(Debug)]
pub struct AppState {
    /// Effective settings (config file merged with CLI overrides).
    pub settings: Settings,
    /// Bounded news lists.
    pub store: NewsStore,
    /// What the news area shows.
    pub view: FeedView,
    /// Stats line data.
    pub stats: FeedStats,
    /// Header clock text, refreshed once per second.
    pub clock_label: String,
    /// Selection in the unified list or the crypto pane.
    pub list_state: ListState,
    /// Selection in the general pane.
    pub general_state: ListState,
    /// Focused pane in the partitioned layout.
    pub focus: Category,
    /// Permit of the cycle whose render step is still pending.
    pub pending_cycle: Option<CyclePermit>,
}

impl AppState {
    /// What: Build the initial state from settings.
    ///
    /// Inputs:
    /// - `settings`: Effective settings
    ///
    /// Output:
    /// - State with an empty store in `Loading` view
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        let store = NewsStore::new(settings.layout, settings.effective_cap());
        Self {
            settings,
            store,
            view: FeedView::Loading,
            stats: FeedStats::default(),
            clock_label: String::new(),
            list_state: ListState::default(),
            general_state: ListState::default(),
            focus: Category::Crypto,
            pending_cycle: None,
        }
    }

    /// Layout of the store.
    #[must_use]
    pub const fn layout(&self) -> FeedLayout {
        self.store.layout()
    }

    /// What: Apply one cycle's fetch outcome.
    ///
    /// Inputs:
    /// - `outcome`: Result of the fetch step
    /// - `now`: Completion time of the fetch
    ///
    /// Output:
    /// - `UpdateOutcome` from the store
    ///
    /// Details:
    /// - Data replaces the store lists and stamps `last_success`.
    /// - No-data leaves the store alone; prior items keep showing.
    /// - Stats are recomputed and the view leaves any previous error state.
    pub fn apply_fetch(&mut self, outcome: FetchOutcome, now: DateTime<Local>) -> UpdateOutcome {
        let update = match outcome {
            FetchOutcome::Data(fetched) => {
                let update = self.store.update(Some(fetched.payload));
                self.stats.last_success = Some(now);
                if fetched.server_last_update.is_some() {
                    self.stats.server_last_update = fetched.server_last_update;
                }
                self.stats.consecutive_no_data = 0;
                update
            }
            FetchOutcome::NoData(err) => {
                tracing::debug!(kind = err.kind(), error = %err, "cycle without new data");
                self.stats.consecutive_no_data = self.stats.consecutive_no_data.saturating_add(1);
                self.store.update(None)
            }
        };
        self.stats.total = self.store.total_count();
        self.stats.cycles += 1;
        self.view = match (self.layout(), self.stats.total) {
            (FeedLayout::Unified, 0) => FeedView::Empty,
            _ => FeedView::List,
        };
        self.clamp_selection();
        tracing::debug!(
            ?update,
            total = self.stats.total,
            seen = self.store.seen_count(),
            cycle = self.stats.cycles,
            "cycle applied"
        );
        update
    }

    /// What: Record the result of a render step and close any pending cycle.
    ///
    /// Inputs:
    /// - `result`: `Err(message)` when drawing failed
    ///
    /// Details:
    /// - A failure switches the view to the error state until the next cycle.
    /// - The pending cycle permit is released either way.
    pub fn finish_render(&mut self, result: Result<(), String>) {
        if let Err(message) = result {
            if !matches!(&self.view, FeedView::Error(prev) if *prev == message) {
                tracing::error!(error = %message, "render failed");
            }
            self.view = FeedView::Error(message);
        }
        if let Some(permit) = self.pending_cycle.take() {
            tracing::trace!(cycle = permit.id(), "cycle complete");
        }
    }

    /// Whether a cycle is waiting for its render step.
    #[must_use]
    pub const fn cycle_pending(&self) -> bool {
        self.pending_cycle.is_some()
    }

    /// Number of rows in the focused list.
    fn focused_len(&self) -> usize {
        match self.layout() {
            FeedLayout::Unified => self.store.total_count(),
            FeedLayout::Partitioned => self.store.category(self.focus).len(),
        }
    }

    /// Selection state of the focused list.
    const fn focused_state_mut(&mut self) -> &mut ListState {
        match (self.store.layout(), self.focus) {
            (FeedLayout::Partitioned, Category::General) => &mut self.general_state,
            _ => &mut self.list_state,
        }
    }

    /// What: Move the selection in the focused list.
    ///
    /// Inputs:
    /// - `delta`: Rows to move (negative is up)
    ///
    /// Details:
    /// - Clamps at both ends.
    /// - With nothing selected, moving down counts from just above the first row,
    ///   so one step lands on the first row and a jump to the end lands on the last.
    pub fn move_selection(&mut self, delta: isize) {
        let len = self.focused_len();
        let state = self.focused_state_mut();
        if len == 0 {
            state.select(None);
            return;
        }
        let next = state.selected().map_or_else(
            || {
                if delta > 0 {
                    (delta.unsigned_abs() - 1).min(len - 1)
                } else {
                    0
                }
            },
            |cur| cur.saturating_add_signed(delta).min(len - 1),
        );
        state.select(Some(next));
    }

    /// Switch focus between the category panes (partitioned layout only).
    pub fn toggle_focus(&mut self) {
        if self.layout() == FeedLayout::Partitioned {
            self.focus = match self.focus {
                Category::Crypto => Category::General,
                Category::General => Category::Crypto,
            };
        }
    }

    /// What: Link of the selected row in the focused list.
    ///
    /// Output:
    /// - `Some(link)` when a row is selected
    #[must_use]
    pub fn selected_link(&self) -> Option<&str> {
        match self.layout() {
            FeedLayout::Unified => {
                let idx = self.list_state.selected()?;
                match self.store.lists() {
                    crate::state::store::NewsLists::Unified(items) => {
                        items.get(idx).map(|i| i.link.as_str())
                    }
                    crate::state::store::NewsLists::Partitioned { .. } => None,
                }
            }
            FeedLayout::Partitioned => {
                let state = match self.focus {
                    Category::Crypto => &self.list_state,
                    Category::General => &self.general_state,
                };
                let idx = state.selected()?;
                self.store
                    .category(self.focus)
                    .get(idx)
                    .map(|i| i.link.as_str())
            }
        }
    }

    /// Keep selections inside the (possibly shrunk) lists.
    fn clamp_selection(&mut self) {
        let (main_len, general_len) = match self.layout() {
            FeedLayout::Unified => (self.store.total_count(), 0),
            FeedLayout::Partitioned => (
                self.store.category(Category::Crypto).len(),
                self.store.category(Category::General).len(),
            ),
        };
        for (state, len) in [
            (&mut self.list_state, main_len),
            (&mut self.general_state, general_len),
        ] {
            match state.selected() {
                Some(_) if len == 0 => state.select(None),
                Some(i) if i >= len => state.select(Some(len - 1)),
                _ => {}
            }
        }
    }

    /// Refresh the header clock from `now`.
    pub fn tick_clock(&mut self, now: DateTime<Local>) {
        self.clock_label = format_time(&now, &self.settings.clock_format);
    }
}

/// What: Format a time with a user-supplied `chrono` pattern.
///
/// Inputs:
/// - `time`: Time to format
/// - `pattern`: `chrono` strftime pattern
///
/// Output:
/// - Formatted text, or RFC 3339 when the pattern is invalid
#[must_use]
pub fn format_time(time: &DateTime<Local>, pattern: &str) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    if write!(out, "{}", time.format(pattern)).is_err() {
        return time.to_rfc3339();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::relative_time::Published;
    use crate::sources::{FetchError, FetchedNews};
    use crate::state::types::{NewsItem, NewsPayload};
    use chrono::TimeZone;

    fn item(n: usize) -> NewsItem {
        NewsItem {
            link: format!("https://news.test/{n}"),
            title: format!("Headline {n}"),
            translated_title: None,
            description: None,
            translated_description: None,
            source: "CryptoPanic".into(),
            published: Published::default(),
            category: None,
        }
    }

    fn data(n: usize) -> FetchOutcome {
        FetchOutcome::Data(FetchedNews {
            payload: NewsPayload::Unified((0..n).map(item).collect()),
            server_last_update: Some("2025-03-10 11:31:00".into()),
        })
    }

    fn now() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2025, 3, 10, 12, 0, 0)
            .earliest()
            .expect("valid local time")
    }

    #[test]
    /// What: Data cycles update store, stats, and view.
    ///
    /// Inputs:
    /// - Five items, then a failed cycle
    ///
    /// Output:
    /// - List view with total 5; the failure keeps the list and the last success time
    fn apply_fetch_data_then_failure() {
        let mut app = AppState::new(Settings::default());
        assert_eq!(app.view, FeedView::Loading);

        app.apply_fetch(data(5), now());
        assert_eq!(app.view, FeedView::List);
        assert_eq!(app.stats.total, 5);
        assert_eq!(app.stats.last_success, Some(now()));
        assert_eq!(app.stats.server_last_update.as_deref(), Some("2025-03-10 11:31:00"));

        let later = now() + chrono::Duration::seconds(30);
        app.apply_fetch(FetchOutcome::NoData(FetchError::Empty), later);
        assert_eq!(app.view, FeedView::List);
        assert_eq!(app.stats.total, 5);
        assert_eq!(app.stats.last_success, Some(now()));
        assert_eq!(app.stats.cycles, 2);
        assert_eq!(app.stats.consecutive_no_data, 1);
    }

    #[test]
    fn first_cycle_without_data_shows_empty_state() {
        let mut app = AppState::new(Settings::default());
        app.apply_fetch(FetchOutcome::NoData(FetchError::Empty), now());
        assert_eq!(app.view, FeedView::Empty);
        assert_eq!(app.stats.total, 0);
        assert_eq!(app.stats.last_success, None);
    }

    #[test]
    /// What: Render errors are visible for one cycle only.
    ///
    /// Inputs:
    /// - A failed render followed by a new cycle
    ///
    /// Output:
    /// - Error view after the failure, list view after the next cycle
    fn render_error_is_cleared_by_next_cycle() {
        let mut app = AppState::new(Settings::default());
        app.apply_fetch(data(2), now());
        app.finish_render(Err("terminal too small".into()));
        assert_eq!(app.view, FeedView::Error("terminal too small".into()));
        app.apply_fetch(FetchOutcome::NoData(FetchError::Empty), now());
        assert_eq!(app.view, FeedView::List);
    }

    #[test]
    /// What: Selection moves, clamps, and resolves to links.
    ///
    /// Inputs:
    /// - Three items; moves past both ends; a shrinking update
    ///
    /// Output:
    /// - Selection stays in range and `selected_link` follows it
    fn selection_moves_and_clamps() {
        let mut app = AppState::new(Settings::default());
        app.move_selection(1);
        assert_eq!(app.list_state.selected(), None);

        app.apply_fetch(data(3), now());
        app.move_selection(1);
        assert_eq!(app.selected_link(), Some("https://news.test/0"));
        app.move_selection(10);
        assert_eq!(app.selected_link(), Some("https://news.test/2"));
        app.move_selection(-10);
        assert_eq!(app.list_state.selected(), Some(0));

        app.move_selection(2);
        app.apply_fetch(data(1), now());
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    /// What: Jumps from an unselected list land on the requested end.
    ///
    /// Inputs:
    /// - Three items with no selection; jump to end, reset, jump to start
    ///
    /// Output:
    /// - Last row after the end jump, first row after the start jump
    fn jump_without_selection_reaches_either_end() {
        let mut app = AppState::new(Settings::default());
        app.apply_fetch(data(3), now());
        assert_eq!(app.list_state.selected(), None);
        app.move_selection(isize::MAX);
        assert_eq!(app.selected_link(), Some("https://news.test/2"));

        app.list_state.select(None);
        app.move_selection(isize::MIN);
        assert_eq!(app.list_state.selected(), Some(0));

        app.list_state.select(None);
        app.move_selection(5);
        assert_eq!(app.list_state.selected(), Some(2));
    }

    #[test]
    fn partitioned_focus_switches_panes() {
        let settings = Settings {
            layout: FeedLayout::Partitioned,
            ..Settings::default()
        };
        let mut app = AppState::new(settings);
        let mut general = item(9);
        general.category = Some(Category::General);
        app.apply_fetch(
            FetchOutcome::Data(FetchedNews {
                payload: NewsPayload::Unified(vec![item(1), general]),
                server_last_update: None,
            }),
            now(),
        );
        app.toggle_focus();
        assert_eq!(app.focus, Category::General);
        app.move_selection(1);
        assert_eq!(app.selected_link(), Some("https://news.test/9"));
        app.toggle_focus();
        assert_eq!(app.selected_link(), None);
    }

    #[test]
    fn format_time_uses_pattern() {
        assert_eq!(format_time(&now(), "%H:%M:%S"), "12:00:00");
        assert_eq!(format_time(&now(), "%Y-%m-%d"), "2025-03-10");
    }
}
