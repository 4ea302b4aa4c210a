//! Bounded in-memory news store with replace-and-cap update policy.

use std::collections::HashSet;

use super::types::{Category, FeedLayout, NewsItem, NewsPayload};

/// Lists currently held by the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NewsLists {
    /// One flat list.
    Unified(Vec<NewsItem>),
    /// Independent per-category lists.
    Partitioned {
        /// Crypto headlines.
        crypto: Vec<NewsItem>,
        /// General headlines.
        general: Vec<NewsItem>,
    },
}

/// Result of applying a payload to one list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListOutcome {
    /// The list was replaced and now holds this many items.
    Updated(usize),
    /// Nothing arrived and the list was already empty.
    UnchangedEmpty,
    /// Nothing arrived; the previous items (this many) are kept.
    UnchangedNonEmpty(usize),
}

impl ListOutcome {
    /// Item count held after the update.
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            Self::Updated(n) | Self::UnchangedNonEmpty(n) => n,
            Self::UnchangedEmpty => 0,
        }
    }

    /// Whether the list now has nothing to show.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.count() == 0
    }
}

/// Result of [`NewsStore::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Outcome for the single list of the unified layout.
    Unified(ListOutcome),
    /// Per-category outcomes of the partitioned layout.
    Partitioned {
        /// Crypto list outcome.
        crypto: ListOutcome,
        /// General list outcome.
        general: ListOutcome,
    },
}

impl UpdateOutcome {
    /// Total number of items held after the update.
    #[must_use]
    pub const fn total(self) -> usize {
        match self {
            Self::Unified(o) => o.count(),
            Self::Partitioned { crypto, general } => crypto.count() + general.count(),
        }
    }

    /// Whether any list was replaced.
    #[must_use]
    pub const fn any_updated(self) -> bool {
        match self {
            Self::Unified(o) => matches!(o, ListOutcome::Updated(_)),
            Self::Partitioned { crypto, general } => {
                matches!(crypto, ListOutcome::Updated(_))
                    || matches!(general, ListOutcome::Updated(_))
            }
        }
    }
}

/// What: Holds the capped news lists and the set of links seen so far.
///
/// Details:
/// - Created empty; replaced wholesale on every successful cycle; never persisted.
/// - Each list holds at most `max_news_count` items in delivery order.
/// - The seen-link set only grows. It is recorded but not consulted when
///   replacing lists.
#[derive(Clone, Debug)]
pub struct NewsStore {
    /// Current lists.
    lists: NewsLists,
    /// Every link ever received.
    seen_links: HashSet<String>,
    /// Per-list cap.
    max_news_count: usize,
}

impl NewsStore {
    /// What: Create an empty store.
    ///
    /// Inputs:
    /// - `layout`: Unified or partitioned lists
    /// - `max_news_count`: Per-list cap (values below 1 are raised to 1)
    ///
    /// Output:
    /// - Empty `NewsStore`
    #[must_use]
    pub fn new(layout: FeedLayout, max_news_count: usize) -> Self {
        let lists = match layout {
            FeedLayout::Unified => NewsLists::Unified(Vec::new()),
            FeedLayout::Partitioned => NewsLists::Partitioned {
                crypto: Vec::new(),
                general: Vec::new(),
            },
        };
        Self {
            lists,
            seen_links: HashSet::new(),
            max_news_count: max_news_count.max(1),
        }
    }

    /// Layout of the stored lists.
    #[must_use]
    pub const fn layout(&self) -> FeedLayout {
        match self.lists {
            NewsLists::Unified(_) => FeedLayout::Unified,
            NewsLists::Partitioned { .. } => FeedLayout::Partitioned,
        }
    }

    /// Per-list cap.
    #[must_use]
    pub const fn max_news_count(&self) -> usize {
        self.max_news_count
    }

    /// Current lists.
    #[must_use]
    pub const fn lists(&self) -> &NewsLists {
        &self.lists
    }

    /// What: Items of one category pane.
    ///
    /// Inputs:
    /// - `category`: Pane to read
    ///
    /// Output:
    /// - The category list in the partitioned layout; empty in the unified layout
    #[must_use]
    pub fn category(&self, category: Category) -> &[NewsItem] {
        match (&self.lists, category) {
            (NewsLists::Partitioned { crypto, .. }, Category::Crypto) => crypto.as_slice(),
            (NewsLists::Partitioned { general, .. }, Category::General) => general.as_slice(),
            (NewsLists::Unified(_), _) => &[],
        }
    }

    /// Total number of stored items.
    #[must_use]
    pub fn total_count(&self) -> usize {
        match &self.lists {
            NewsLists::Unified(items) => items.len(),
            NewsLists::Partitioned { crypto, general } => crypto.len() + general.len(),
        }
    }

    /// Whether `link` has ever been received.
    #[must_use]
    pub fn has_seen(&self, link: &str) -> bool {
        self.seen_links.contains(link)
    }

    /// Number of distinct links ever received.
    #[must_use]
    pub fn seen_count(&self) -> usize {
        self.seen_links.len()
    }

    /// What: Apply a fetch result.
    ///
    /// Inputs:
    /// - `payload`: `Some(payload)` from a successful fetch, `None` for a no-data cycle
    ///
    /// Output:
    /// - `UpdateOutcome` describing each list after the update
    ///
    /// Details:
    /// - A non-empty incoming list replaces the stored list (no incremental merge),
    ///   after dropping repeated links and truncating to the cap from the tail.
    /// - An empty or missing list leaves the stored list untouched.
    /// - In the partitioned layout each category follows this rule on its own.
    /// - All incoming links are recorded in the seen set.
    /// - Each list is swapped in a single assignment.
    pub fn update(&mut self, payload: Option<NewsPayload>) -> UpdateOutcome {
        let layout = self.layout();
        let payload = payload.map(|p| p.into_layout(layout));
        let cap = self.max_news_count;
        match (&mut self.lists, payload) {
            (NewsLists::Unified(current), Some(NewsPayload::Unified(incoming))) => {
                UpdateOutcome::Unified(replace_list(current, incoming, cap, &mut self.seen_links))
            }
            (NewsLists::Unified(current), _) => UpdateOutcome::Unified(unchanged(current)),
            (
                NewsLists::Partitioned { crypto, general },
                Some(NewsPayload::Partitioned {
                    crypto: in_crypto,
                    general: in_general,
                }),
            ) => UpdateOutcome::Partitioned {
                crypto: replace_list(crypto, in_crypto, cap, &mut self.seen_links),
                general: replace_list(general, in_general, cap, &mut self.seen_links),
            },
            (NewsLists::Partitioned { crypto, general }, _) => UpdateOutcome::Partitioned {
                crypto: unchanged(crypto),
                general: unchanged(general),
            },
        }
    }
}

/// Outcome for a list that received nothing.
fn unchanged(current: &[NewsItem]) -> ListOutcome {
    if current.is_empty() {
        ListOutcome::UnchangedEmpty
    } else {
        ListOutcome::UnchangedNonEmpty(current.len())
    }
}

/// What: Replace one stored list with an incoming batch.
///
/// Inputs:
/// - `current`: Stored list to replace
/// - `incoming`: Items in delivery order
/// - `cap`: Maximum items to keep
/// - `seen`: Seen-link set to extend
///
/// Output:
/// - `ListOutcome::Updated` with the new length, or an unchanged outcome for an empty batch
fn replace_list(
    current: &mut Vec<NewsItem>,
    incoming: Vec<NewsItem>,
    cap: usize,
    seen: &mut HashSet<String>,
) -> ListOutcome {
    if incoming.is_empty() {
        return unchanged(current);
    }
    let mut batch_links: HashSet<&str> = HashSet::with_capacity(incoming.len());
    let mut keep = vec![false; incoming.len()];
    for (idx, item) in incoming.iter().enumerate() {
        keep[idx] = batch_links.insert(item.link.as_str());
    }
    seen.extend(batch_links.into_iter().map(str::to_string));

    let mut fresh: Vec<NewsItem> = incoming
        .into_iter()
        .zip(keep)
        .filter_map(|(item, keep)| keep.then_some(item))
        .collect();
    fresh.truncate(cap);
    *current = fresh;
    ListOutcome::Updated(current.len())
}
