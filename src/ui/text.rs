//! Plain-text render surface used by one-shot mode.

use std::fmt::Write;

use crate::logic::{DisplayItem, RenderModel};
use crate::state::app_state::format_time;
use crate::state::{AppState, FeedView};

fn push_item(out: &mut String, item: &DisplayItem) {
    let badge = if item.is_new { "[NEW] " } else { "" };
    let _ = writeln!(out, "{badge}{}", item.title);
    if let Some(original) = &item.original_title {
        let _ = writeln!(out, "    original: {original}");
    }
    if let Some(desc) = &item.description {
        let flat = desc.split_whitespace().collect::<Vec<_>>().join(" ");
        let _ = writeln!(out, "    {flat}");
    }
    let _ = writeln!(out, "    {} · {}", item.source, item.age);
    let _ = writeln!(out, "    {}", item.link);
}

fn push_section(out: &mut String, label: &str, items: &[DisplayItem]) {
    let _ = writeln!(out, "== {label} ({}) ==", items.len());
    if items.is_empty() {
        let _ = writeln!(out, "No {} news yet", label.to_lowercase());
    }
    for item in items {
        push_item(out, item);
    }
}

/// What: Render the state as plain text.
///
/// Inputs:
/// - `app`: State after a cycle
/// - `model`: Render model built from the same state
///
/// Output:
/// - Stats line followed by the list(s) or the current status message
#[must_use]
pub fn render_text(app: &AppState, model: &RenderModel) -> String {
    let mut out = String::new();
    let last = app.stats.last_success.as_ref().map_or_else(
        || "never".to_string(),
        |t| format_time(t, &app.settings.stats_time_format),
    );
    let _ = write!(out, "Items: {}   Last update: {last}", app.stats.total);
    if let Some(server) = &app.stats.server_last_update {
        let _ = write!(out, "   Server: {server}");
    }
    out.push_str("\n\n");

    match (&app.view, model) {
        (FeedView::Loading, _) => out.push_str("Loading news…\n"),
        (FeedView::Error(message), _) => {
            let _ = writeln!(out, "Error: {message}");
        }
        (FeedView::Empty, _) => out.push_str("No news collected yet\n"),
        (FeedView::List, RenderModel::Unified(items)) => {
            for item in items {
                push_item(&mut out, item);
            }
        }
        (FeedView::List, RenderModel::Partitioned { crypto, general }) => {
            push_section(&mut out, "Crypto", crypto);
            out.push('\n');
            push_section(&mut out, "General", general);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::build_render_model;
    use crate::sources::{FetchOutcome, FetchedNews};
    use crate::state::{Category, FeedLayout, NewsItem, NewsPayload};
    use crate::theme::Settings;
    use chrono::Local;

    #[test]
    /// What: Partitioned text output lists each section with its own empty message.
    ///
    /// Inputs:
    /// - One crypto item with a translation, no general items
    ///
    /// Output:
    /// - Badge, translated title, original title, link, and "No general news yet"
    fn partitioned_text_lists_sections() {
        let settings = Settings {
            layout: FeedLayout::Partitioned,
            ..Settings::default()
        };
        let mut app = AppState::new(settings);
        let item = NewsItem {
            link: "https://news.test/btc".into(),
            title: "Bitcoin steigt".into(),
            translated_title: Some("Bitcoin rises".into()),
            source: "BTC-Echo".into(),
            category: Some(Category::Crypto),
            ..NewsItem::default()
        };
        let now = Local::now();
        app.apply_fetch(
            FetchOutcome::Data(FetchedNews {
                payload: NewsPayload::Unified(vec![item]),
                server_last_update: None,
            }),
            now,
        );
        let model = build_render_model(&app.store, app.settings.new_badge_count, &now);
        let text = render_text(&app, &model);
        assert!(text.starts_with("Items: 1"));
        assert!(text.contains("== Crypto (1) =="));
        assert!(text.contains("[NEW] Bitcoin rises"));
        assert!(text.contains("original: Bitcoin steigt"));
        assert!(text.contains("https://news.test/btc"));
        assert!(text.contains("No general news yet"));
    }

    #[test]
    fn empty_view_prints_message() {
        let mut app = AppState::new(Settings::default());
        app.apply_fetch(
            FetchOutcome::NoData(crate::sources::FetchError::Empty),
            Local::now(),
        );
        let model = build_render_model(&app.store, 3, &Local::now());
        let text = render_text(&app, &model);
        assert!(text.contains("Last update: never"));
        assert!(text.contains("No news collected yet"));
    }
}
