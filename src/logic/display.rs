//! Display-ready view of the store, rebuilt on every draw.

use chrono::{DateTime, TimeZone};

use crate::logic::relative_time::relative_label;
use crate::state::store::{NewsLists, NewsStore};
use crate::state::types::NewsItem;

/// One row as the render surface shows it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayItem {
    /// Translated title, or the original when no translation exists.
    pub title: String,
    /// Original title, only when a differing translation is displayed.
    pub original_title: Option<String>,
    /// Translated or original description.
    pub description: Option<String>,
    /// Source label.
    pub source: String,
    /// Relative age ("5 minutes ago").
    pub age: String,
    /// Whether the row carries the "new" badge.
    pub is_new: bool,
    /// Activation target.
    pub link: String,
}

/// Everything the render surface needs for one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderModel {
    /// Single ordered list.
    Unified(Vec<DisplayItem>),
    /// Two named lists.
    Partitioned {
        /// Crypto pane rows.
        crypto: Vec<DisplayItem>,
        /// General pane rows.
        general: Vec<DisplayItem>,
    },
}

impl RenderModel {
    /// Number of rows across all lists.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Unified(items) => items.len(),
            Self::Partitioned { crypto, general } => crypto.len() + general.len(),
        }
    }

    /// Whether there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What: Build one display row.
///
/// Inputs:
/// - `item`: Stored news item
/// - `position`: Zero-based index in its list
/// - `new_badge_count`: How many leading rows get the "new" badge
/// - `now`: Reference time for the age label
///
/// Output:
/// - `DisplayItem` with fallbacks applied
#[must_use]
pub fn display_item<Tz: TimeZone>(
    item: &NewsItem,
    position: usize,
    new_badge_count: usize,
    now: &DateTime<Tz>,
) -> DisplayItem {
    DisplayItem {
        title: item.display_title().to_string(),
        original_title: item.original_title_if_different().map(str::to_string),
        description: item.display_description().map(str::to_string),
        source: item.source.clone(),
        age: relative_label(&item.published, now),
        is_new: position < new_badge_count,
        link: item.link.clone(),
    }
}

/// Map a list to display rows.
fn display_list<Tz: TimeZone>(
    items: &[NewsItem],
    new_badge_count: usize,
    now: &DateTime<Tz>,
) -> Vec<DisplayItem> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| display_item(item, i, new_badge_count, now))
        .collect()
}

/// What: Build the render model for the current store contents.
///
/// Inputs:
/// - `store`: News store to read
/// - `new_badge_count`: Leading rows per list that get the "new" badge
/// - `now`: Reference time; ages are recomputed on every call
///
/// Output:
/// - `RenderModel` matching the store layout
#[must_use]
pub fn build_render_model<Tz: TimeZone>(
    store: &NewsStore,
    new_badge_count: usize,
    now: &DateTime<Tz>,
) -> RenderModel {
    match store.lists() {
        NewsLists::Unified(items) => RenderModel::Unified(display_list(items, new_badge_count, now)),
        NewsLists::Partitioned { crypto, general } => RenderModel::Partitioned {
            crypto: display_list(crypto, new_badge_count, now),
            general: display_list(general, new_badge_count, now),
        },
    }
}
