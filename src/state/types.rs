//! Core value types used by newsdeck state.

use crate::logic::relative_time::Published;

/// News category used by the partitioned layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// Cryptocurrency headlines.
    Crypto,
    /// Everything else.
    General,
}

impl Category {
    /// What: Parse a category from its wire/config name.
    ///
    /// Inputs:
    /// - `key`: Category name (case-insensitive)
    ///
    /// Output:
    /// - `Some(Category)` for `crypto`/`general`, `None` otherwise
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "crypto" => Some(Self::Crypto),
            "general" => Some(Self::General),
            _ => None,
        }
    }

    /// Pane heading for this category.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Crypto => "Crypto",
            Self::General => "General",
        }
    }
}

/// One headline as received from the aggregator. Immutable once built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewsItem {
    /// Article URL; unique identifier, dedup key, and activation target.
    pub link: String,
    /// Headline in its original language.
    pub title: String,
    /// Translated headline, when the server produced one.
    pub translated_title: Option<String>,
    /// Original description.
    pub description: Option<String>,
    /// Translated description.
    pub translated_description: Option<String>,
    /// Origin label (e.g. "CryptoPanic").
    pub source: String,
    /// Publication time in the server's framing.
    pub published: Published,
    /// Category, when the server tagged one.
    pub category: Option<Category>,
}

impl NewsItem {
    /// Headline to display: translated when present, original otherwise.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.translated_title.as_deref().unwrap_or(&self.title)
    }

    /// What: Original headline, shown as a subtitle when a translation replaced it.
    ///
    /// Output:
    /// - `Some(title)` only when a translated title exists and differs from the original
    #[must_use]
    pub fn original_title_if_different(&self) -> Option<&str> {
        self.translated_title
            .as_deref()
            .filter(|t| *t != self.title)
            .map(|_| self.title.as_str())
    }

    /// Description to display: translated when present, original otherwise.
    #[must_use]
    pub fn display_description(&self) -> Option<&str> {
        self.translated_description
            .as_deref()
            .or(self.description.as_deref())
    }

    /// Category with the aggregator's default applied (`crypto`).
    #[must_use]
    pub fn category_or_default(&self) -> Category {
        self.category.unwrap_or(Category::Crypto)
    }
}

/// How the feed is organised on screen and in the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedLayout {
    /// One flat list.
    Unified,
    /// Separate `crypto` and `general` lists.
    Partitioned,
}

impl FeedLayout {
    /// What: Parse a layout from a config/CLI key.
    ///
    /// Inputs:
    /// - `key`: `unified`/`flat` or `partitioned`/`categories` (case-insensitive)
    ///
    /// Output:
    /// - `Some(FeedLayout)` when recognised
    #[must_use]
    pub fn from_config_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "unified" | "flat" => Some(Self::Unified),
            "partitioned" | "categories" | "category" => Some(Self::Partitioned),
            _ => None,
        }
    }

    /// Default item cap per list for this layout.
    #[must_use]
    pub const fn default_cap(self) -> usize {
        match self {
            Self::Unified => 50,
            Self::Partitioned => 5,
        }
    }
}

/// Normalized fetch result handed to the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NewsPayload {
    /// One list in delivery order.
    Unified(Vec<NewsItem>),
    /// Per-category lists in delivery order.
    Partitioned {
        /// Items for the crypto pane.
        crypto: Vec<NewsItem>,
        /// Items for the general pane.
        general: Vec<NewsItem>,
    },
}

impl NewsPayload {
    /// Total number of items across all lists.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Unified(items) => items.len(),
            Self::Partitioned { crypto, general } => crypto.len() + general.len(),
        }
    }

    /// Whether every list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// What: Reshape the payload for the given layout.
    ///
    /// Inputs:
    /// - `layout`: Layout expected by the store
    ///
    /// Output:
    /// - Payload of the requested shape; unchanged if it already matches
    ///
    /// Details:
    /// - Partitioned to unified concatenates crypto then general.
    /// - Unified to partitioned splits by item category, untagged items going to crypto.
    #[must_use]
    pub fn into_layout(self, layout: FeedLayout) -> Self {
        match (self, layout) {
            (Self::Partitioned { mut crypto, general }, FeedLayout::Unified) => {
                crypto.extend(general);
                Self::Unified(crypto)
            }
            (Self::Unified(items), FeedLayout::Partitioned) => {
                let (crypto, general) = items
                    .into_iter()
                    .partition(|item| item.category_or_default() == Category::Crypto);
                Self::Partitioned { crypto, general }
            }
            (payload, _) => payload,
        }
    }
}
