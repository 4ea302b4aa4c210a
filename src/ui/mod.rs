//! Render surface: draws `AppState` with ratatui.

use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Modifier, Style},
    widgets::{Block, Paragraph, Wrap},
};

use crate::state::{AppState, FeedLayout};
use crate::theme::theme;

/// Render failures.
mod error;
/// Header, stats line, and footer.
pub mod header;
/// News list panes.
pub mod news;
/// Plain-text output.
pub mod text;

pub use error::RenderError;
pub use text::render_text;

/// Smallest usable width for the unified layout (partitioned needs twice this).
pub const MIN_WIDTH: u16 = 40;
/// Smallest usable height.
pub const MIN_HEIGHT: u16 = 10;

/// What: Draw one full frame.
///
/// Inputs:
/// - `f`: Frame to draw into
/// - `app`: Application state
///
/// Output:
/// - `Err(RenderError::Surface)` when the area cannot hold the layout; a short
///   notice is still drawn in that case
pub fn ui(f: &mut Frame, app: &mut AppState) -> Result<(), RenderError> {
    let th = theme();
    let area = f.area();
    f.render_widget(Block::default().style(Style::default().bg(th.base)), area);

    let min_width = match app.layout() {
        FeedLayout::Unified => MIN_WIDTH,
        FeedLayout::Partitioned => MIN_WIDTH * 2,
    };
    if area.width < min_width || area.height < MIN_HEIGHT {
        let message = format!(
            "terminal too small: {}x{}, need at least {min_width}x{MIN_HEIGHT}",
            area.width, area.height
        );
        f.render_widget(
            Paragraph::new(message.clone())
                .style(Style::default().fg(th.red).add_modifier(Modifier::BOLD))
                .wrap(Wrap { trim: true }),
            area,
        );
        return Err(RenderError::Surface(message));
    }

    let footer_height = u16::from(app.settings.show_keybinds_footer);
    let [header_area, stats_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(footer_height),
    ])
    .areas(area);

    header::render_header(f, header_area, app, &th);
    header::render_stats(f, stats_area, app, &th);
    news::render_feed(f, body_area, app, &th);
    if footer_height > 0 {
        header::render_footer(f, footer_area, app, &th);
    }
    Ok(())
}
