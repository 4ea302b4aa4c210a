//! News area: item rows, category panes, and the loading/empty/error messages.

use chrono::Local;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::logic::{DisplayItem, RenderModel, build_render_model};
use crate::state::{AppState, Category, FeedView};
use crate::theme::Theme;
use crate::util::truncate_to_width;

/// Width of the " NEW " badge plus its trailing space.
const BADGE_WIDTH: usize = 6;
/// Borders plus the highlight symbol.
const ROW_CHROME: u16 = 4;

/// What: Build the rows for one list.
///
/// Inputs:
/// - `items`: Display rows in order
/// - `width`: Usable text width per row
/// - `th`: Palette
///
/// Output:
/// - One multi-line `ListItem` per news item
///
/// Details:
/// - Title line (with the badge when new), optional original title, optional
///   description, then `source · age`.
pub fn news_list_items(items: &[DisplayItem], width: usize, th: &Theme) -> Vec<ListItem<'static>> {
    items.iter().map(|item| news_list_item(item, width, th)).collect()
}

fn news_list_item(item: &DisplayItem, width: usize, th: &Theme) -> ListItem<'static> {
    let mut title_line = Vec::with_capacity(3);
    let mut title_width = width;
    if item.is_new {
        title_line.push(Span::styled(
            " NEW ",
            Style::default()
                .fg(th.crust)
                .bg(th.green)
                .add_modifier(Modifier::BOLD),
        ));
        title_line.push(Span::raw(" "));
        title_width = width.saturating_sub(BADGE_WIDTH);
    }
    title_line.push(Span::styled(
        truncate_to_width(&item.title, title_width),
        Style::default().fg(th.text).add_modifier(Modifier::BOLD),
    ));

    let mut lines = vec![Line::from(title_line)];
    if let Some(original) = &item.original_title {
        lines.push(Line::from(Span::styled(
            truncate_to_width(&format!("  {original}"), width),
            Style::default()
                .fg(th.overlay1)
                .add_modifier(Modifier::ITALIC),
        )));
    }
    if let Some(desc) = &item.description {
        let flat = desc.split_whitespace().collect::<Vec<_>>().join(" ");
        lines.push(Line::from(Span::styled(
            truncate_to_width(&format!("  {flat}"), width),
            Style::default().fg(th.subtext0),
        )));
    }
    lines.push(Line::from(vec![
        Span::styled(format!("  {}", item.source), Style::default().fg(th.sapphire)),
        Span::styled(format!(" · {}", item.age), Style::default().fg(th.overlay2)),
    ]));
    ListItem::new(lines)
}

/// Bordered block shared by every pane.
fn pane_block(title: String, focused: bool, th: &Theme) -> Block<'static> {
    let border = if focused { th.mauve } else { th.surface2 };
    Block::default()
        .title(Span::styled(
            title,
            Style::default().fg(th.lavender).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
}

/// Draw a single message inside a bordered pane.
fn render_message(f: &mut Frame, area: Rect, title: String, text: String, style: Style, th: &Theme) {
    let paragraph = Paragraph::new(Span::styled(text, style))
        .block(pane_block(title, false, th))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

/// What: Draw one list pane, or its empty message.
///
/// Inputs:
/// - `f`, `area`: Target frame and rectangle
/// - `label`: Pane title prefix
/// - `items`: Rows to show
/// - `empty_text`: Message when `items` is empty
/// - `state`: Selection state of this pane
/// - `focused`: Whether the pane has keyboard focus
#[allow(clippy::too_many_arguments)]
fn render_pane(
    f: &mut Frame,
    area: Rect,
    label: &str,
    items: &[DisplayItem],
    empty_text: &str,
    state: &mut ListState,
    focused: bool,
    th: &Theme,
) {
    let title = format!(" {label} ({}) ", items.len());
    if items.is_empty() {
        render_message(
            f,
            area,
            title,
            empty_text.to_string(),
            Style::default().fg(th.subtext0),
            th,
        );
        return;
    }
    let width = usize::from(area.width.saturating_sub(ROW_CHROME));
    let list = List::new(news_list_items(items, width, th))
        .style(Style::default().fg(th.text).bg(th.base))
        .block(pane_block(title, focused, th))
        .highlight_style(Style::default().bg(th.surface1))
        .highlight_symbol("▶ ");
    f.render_stateful_widget(list, area, state);
}

/// What: Draw the news area for the current view.
///
/// Inputs:
/// - `f`, `area`: Target frame and rectangle
/// - `app`: State (selection states are updated by the stateful list widgets)
/// - `th`: Palette
///
/// Details:
/// - Ages are recomputed against the current time on every draw.
/// - In the partitioned layout each pane shows its own empty message.
pub fn render_feed(f: &mut Frame, area: Rect, app: &mut AppState, th: &Theme) {
    match &app.view {
        FeedView::Loading => render_message(
            f,
            area,
            " News ".to_string(),
            "Loading news…".to_string(),
            Style::default().fg(th.overlay1),
            th,
        ),
        FeedView::Error(message) => render_message(
            f,
            area,
            " News ".to_string(),
            format!("Error: {message}"),
            Style::default().fg(th.red).add_modifier(Modifier::BOLD),
            th,
        ),
        FeedView::Empty => render_message(
            f,
            area,
            " News ".to_string(),
            "No news collected yet".to_string(),
            Style::default().fg(th.subtext0),
            th,
        ),
        FeedView::List => {
            let model = build_render_model(&app.store, app.settings.new_badge_count, &Local::now());
            match model {
                RenderModel::Unified(items) => render_pane(
                    f,
                    area,
                    "Latest news",
                    &items,
                    "No news collected yet",
                    &mut app.list_state,
                    true,
                    th,
                ),
                RenderModel::Partitioned { crypto, general } => {
                    let [left, right] =
                        Layout::horizontal([Constraint::Percentage(50); 2]).areas(area);
                    render_pane(
                        f,
                        left,
                        Category::Crypto.label(),
                        &crypto,
                        "No crypto news yet",
                        &mut app.list_state,
                        app.focus == Category::Crypto,
                        th,
                    );
                    render_pane(
                        f,
                        right,
                        Category::General.label(),
                        &general,
                        "No general news yet",
                        &mut app.general_state,
                        app.focus == Category::General,
                        th,
                    );
                }
            }
        }
    }
}
