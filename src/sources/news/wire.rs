//! Wire shapes of the `/api/news` response.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::logic::relative_time::Published;
use crate::state::types::{Category, NewsItem};

/// What: Read any JSON value as an optional string.
///
/// Output:
/// - `Some` for strings; every other JSON type is `None`
///
/// Details:
/// - A wrong-typed field must not reject the whole response.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Non-negative integer or nothing.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Array of raw items, or nothing when the field is not an array.
fn lenient_list<'de, D>(deserializer: D) -> Result<Option<Vec<Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(items),
        _ => None,
    })
}

/// Response envelope. Every field is optional so malformed bodies can be
/// classified instead of rejected outright.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct NewsEnvelope {
    /// Server-side success flag; absent counts as failure.
    pub success: Option<bool>,
    /// Flat list shape. Items stay raw so one bad entry only drops itself.
    #[serde(deserialize_with = "lenient_list")]
    pub news: Option<Vec<Value>>,
    /// Partitioned shape, crypto half.
    #[serde(deserialize_with = "lenient_list")]
    pub crypto_news: Option<Vec<Value>>,
    /// Partitioned shape, general half.
    #[serde(deserialize_with = "lenient_list")]
    pub general_news: Option<Vec<Value>>,
    /// Item count reported by the server.
    #[serde(deserialize_with = "lenient_count")]
    pub count: Option<u64>,
    /// Server-side refresh time, free-form text.
    #[serde(deserialize_with = "lenient_string")]
    pub last_update: Option<String>,
    /// Error text on failure responses.
    #[serde(deserialize_with = "lenient_string")]
    pub error: Option<String>,
}

/// One news entry as sent by the server.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct WireNewsItem {
    #[serde(deserialize_with = "lenient_string")]
    pub link: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub translated_title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub translated_description: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub source: Option<String>,
    pub published: Value,
    #[serde(deserialize_with = "lenient_string")]
    pub category: Option<String>,
}

/// Trim and drop empty strings.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl WireNewsItem {
    /// What: Decode one raw list entry.
    ///
    /// Output:
    /// - `None` when the entry is not a JSON object
    pub fn from_value(value: Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value).ok()
    }

    /// What: Convert into a [`NewsItem`].
    ///
    /// Inputs:
    /// - `list_category`: Category implied by the list the item came from, if any
    ///
    /// Output:
    /// - `Some(NewsItem)`; `None` when the link or title is missing
    ///
    /// Details:
    /// - An explicit `category` on the item wins over the list's category.
    /// - Empty translated fields fall back to the originals.
    pub fn into_item(self, list_category: Option<Category>) -> Option<NewsItem> {
        let link = non_empty(self.link)?;
        let title = non_empty(self.title)?;
        let category = self
            .category
            .as_deref()
            .and_then(Category::from_key)
            .or(list_category);
        Some(NewsItem {
            link,
            title,
            translated_title: non_empty(self.translated_title),
            description: non_empty(self.description),
            translated_description: non_empty(self.translated_description),
            source: non_empty(self.source).unwrap_or_default(),
            published: Published::from_json(&self.published),
            category,
        })
    }
}
