//! Keyboard handling for the news view.

use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

use crate::state::AppState;
use crate::util::open_url;

/// Rows moved by PageUp/PageDown.
const PAGE: isize = 5;

/// Dispatch a single terminal event and mutate the [`AppState`].
///
/// Returns `true` to signal the application should exit; otherwise `false`.
/// Non-key events (resize, focus) need no handling: the loop redraws after every event.
pub fn handle_event(ev: &CEvent, app: &mut AppState, refresh_tx: &mpsc::UnboundedSender<()>) -> bool {
    let CEvent::Key(ke) = ev else {
        return false;
    };
    if ke.kind != KeyEventKind::Press {
        return false;
    }
    handle_key(*ke, app, refresh_tx)
}

fn handle_key(ke: KeyEvent, app: &mut AppState, refresh_tx: &mpsc::UnboundedSender<()>) -> bool {
    match ke.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('c') if ke.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Char('j') | KeyCode::Down => app.move_selection(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_selection(-1),
        KeyCode::PageDown => app.move_selection(PAGE),
        KeyCode::PageUp => app.move_selection(-PAGE),
        KeyCode::Char('g') | KeyCode::Home => app.move_selection(isize::MIN),
        KeyCode::Char('G') | KeyCode::End => app.move_selection(isize::MAX),
        KeyCode::Tab | KeyCode::BackTab => app.toggle_focus(),
        KeyCode::Enter => {
            if let Some(link) = app.selected_link() {
                tracing::info!(link, "opening news link");
                open_url(link);
            }
        }
        KeyCode::Char('r') => {
            if refresh_tx.send(()).is_err() {
                tracing::warn!("manual refresh ignored: scheduler not running");
            } else {
                tracing::debug!("manual refresh requested");
            }
        }
        _ => {}
    }
    false
}
