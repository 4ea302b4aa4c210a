//! Header (title + clock), stats line, and keybind footer.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::state::app_state::format_time;
use crate::state::{AppState, FeedLayout};
use crate::theme::Theme;

/// Draw the title bar with the live clock on the right.
pub fn render_header(f: &mut Frame, area: Rect, app: &AppState, th: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(th.lavender));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            "newsdeck",
            Style::default().fg(th.mauve).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  crypto & market headlines", Style::default().fg(th.subtext0)),
    ]));
    f.render_widget(title, inner);

    let clock = Paragraph::new(Span::styled(
        app.clock_label.clone(),
        Style::default().fg(th.sapphire),
    ))
    .alignment(Alignment::Right);
    f.render_widget(clock, inner);
}

/// What: Build the stats line text.
///
/// Inputs:
/// - `app`: Current state
///
/// Output:
/// - Spans for item count, last successful update, and the server's own refresh time
pub fn stats_line(app: &AppState, th: &Theme) -> Line<'static> {
    let label = Style::default().fg(th.overlay1);
    let value = Style::default().fg(th.text).add_modifier(Modifier::BOLD);
    let last = app.stats.last_success.as_ref().map_or_else(
        || "never".to_string(),
        |t| format_time(t, &app.settings.stats_time_format),
    );
    let mut spans = vec![
        Span::styled("Items: ", label),
        Span::styled(app.stats.total.to_string(), value),
    ];
    if app.layout() == FeedLayout::Partitioned {
        spans.push(Span::styled(
            format!(
                " ({} crypto / {} general)",
                app.store.category(crate::state::Category::Crypto).len(),
                app.store.category(crate::state::Category::General).len()
            ),
            label,
        ));
    }
    spans.push(Span::styled("   Last update: ", label));
    spans.push(Span::styled(last, value));
    if let Some(server) = &app.stats.server_last_update {
        spans.push(Span::styled("   Server: ", label));
        spans.push(Span::styled(server.clone(), Style::default().fg(th.subtext0)));
    }
    if app.stats.consecutive_no_data > 0 {
        spans.push(Span::styled(
            format!("   no new data x{}", app.stats.consecutive_no_data),
            Style::default().fg(th.yellow),
        ));
    }
    Line::from(spans)
}

/// Draw the stats line.
pub fn render_stats(f: &mut Frame, area: Rect, app: &AppState, th: &Theme) {
    f.render_widget(Paragraph::new(stats_line(app, th)), area);
}

/// Draw the keybind hints.
pub fn render_footer(f: &mut Frame, area: Rect, app: &AppState, th: &Theme) {
    let key = Style::default().fg(th.sapphire).add_modifier(Modifier::BOLD);
    let text = Style::default().fg(th.overlay2);
    let mut spans = vec![
        Span::styled("j/k", key),
        Span::styled(" move  ", text),
        Span::styled("Enter", key),
        Span::styled(" open  ", text),
        Span::styled("r", key),
        Span::styled(" refresh  ", text),
    ];
    if app.layout() == FeedLayout::Partitioned {
        spans.push(Span::styled("Tab", key));
        spans.push(Span::styled(" switch pane  ", text));
    }
    spans.push(Span::styled("q", key));
    spans.push(Span::styled(" quit", text));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
