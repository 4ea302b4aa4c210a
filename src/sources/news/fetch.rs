//! News endpoint client: one request per cycle, envelope validation, and shape normalization.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::error::FetchError;
use super::wire::{NewsEnvelope, WireNewsItem};
use crate::state::types::{Category, FeedLayout, NewsItem, NewsPayload};

/// Data from a successful fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchedNews {
    /// Items reshaped for the configured layout.
    pub payload: NewsPayload,
    /// Refresh time reported by the server, if any.
    pub server_last_update: Option<String>,
}

/// What one fetch produced. Never an error that escapes the fetch boundary.
#[derive(Debug)]
pub enum FetchOutcome {
    /// Usable news arrived.
    Data(FetchedNews),
    /// Nothing to merge; the error says why (for logs only).
    NoData(FetchError),
}

impl FetchOutcome {
    /// What: Collapse a fallible fetch into an outcome.
    ///
    /// Inputs:
    /// - `result`: Result of a fetch attempt
    ///
    /// Output:
    /// - `Data` on success, `NoData` carrying the error otherwise
    #[must_use]
    pub fn from_result(result: Result<FetchedNews, FetchError>) -> Self {
        match result {
            Ok(data) => Self::Data(data),
            Err(err) => Self::NoData(err),
        }
    }
}

/// Anything that can produce one batch of news per cycle.
pub trait NewsSource: Send + Sync + 'static {
    /// Perform one fetch. Must not panic and must not return an error past this boundary.
    fn fetch_news(&self) -> impl Future<Output = FetchOutcome> + Send;
}

/// HTTP client for the `/api/news` endpoint.
#[derive(Clone, Debug)]
pub struct NewsFetcher {
    /// Shared reqwest client (connection pooling).
    client: reqwest::Client,
    /// Full URL of the news endpoint.
    endpoint: String,
    /// Shape the store expects.
    layout: FeedLayout,
}

impl NewsFetcher {
    /// What: Build a fetcher for `endpoint`.
    ///
    /// Inputs:
    /// - `endpoint`: Full URL of the news endpoint
    /// - `layout`: Shape the store expects
    /// - `timeout`: Whole-request timeout
    ///
    /// Output:
    /// - `Ok(NewsFetcher)`; `Err(FetchError::Transport)` if the client cannot be built
    ///
    /// # Errors
    /// - Returns `Err` when the TLS backend or client configuration fails to initialise
    pub fn new(endpoint: &str, layout: FeedLayout, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .timeout(timeout)
            .user_agent(format!("newsdeck/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            layout,
        })
    }

    /// Endpoint this fetcher polls.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Underlying HTTP client, shared with the health probe.
    #[must_use]
    pub const fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// What: Fetch and normalize one batch.
    ///
    /// Output:
    /// - `Ok(FetchedNews)` with a non-empty payload
    ///
    /// # Errors
    /// - `Transport` on connection failure or timeout
    /// - `Status` on a non-2xx response
    /// - `Decode` when the body is not the expected JSON
    /// - `Envelope` when `success` is false or missing, or no list field is present
    /// - `Empty` when the lists are present but empty
    pub async fn try_fetch(&self) -> Result<FetchedNews, FetchError> {
        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: self.endpoint.clone(),
            });
        }
        let body = response.bytes().await?;
        let envelope: NewsEnvelope = serde_json::from_slice(&body)?;
        normalize_envelope(envelope, self.layout)
    }
}

impl NewsSource for NewsFetcher {
    async fn fetch_news(&self) -> FetchOutcome {
        let result = self.try_fetch().await;
        match &result {
            Ok(fetched) => info!(
                endpoint = %self.endpoint,
                count = fetched.payload.len(),
                "news fetched"
            ),
            Err(err) if err.is_empty() => debug!(endpoint = %self.endpoint, "no news in response"),
            Err(err) => warn!(
                endpoint = %self.endpoint,
                kind = err.kind(),
                error = %err,
                "news fetch produced no data"
            ),
        }
        FetchOutcome::from_result(result)
    }
}

/// What: Convert a list of wire items, dropping unusable entries.
///
/// Inputs:
/// - `items`: Raw list entries in delivery order
/// - `list_category`: Category implied by the list, if any
///
/// Output:
/// - Items in the same order, minus non-object entries and entries without link or title
fn convert_list(items: Vec<serde_json::Value>, list_category: Option<Category>) -> Vec<NewsItem> {
    let total = items.len();
    let converted: Vec<NewsItem> = items
        .into_iter()
        .filter_map(WireNewsItem::from_value)
        .filter_map(|w| w.into_item(list_category))
        .collect();
    if converted.len() != total {
        debug!(
            dropped = total - converted.len(),
            "skipped malformed news entries"
        );
    }
    converted
}

/// What: Validate the envelope and reshape it for `layout`.
///
/// Inputs:
/// - `envelope`: Decoded response body
/// - `layout`: Shape the store expects
///
/// Output:
/// - `Ok(FetchedNews)` when `success` is true and at least one item arrived
///
/// # Errors
/// - `Envelope` when `success` is not `true` or neither list shape is present
/// - `Empty` when the lists carry no usable items
///
/// Details:
/// - A `news` field takes precedence over `crypto_news`/`general_news`.
/// - Items in `crypto_news`/`general_news` inherit that category unless tagged.
pub(crate) fn normalize_envelope(
    envelope: NewsEnvelope,
    layout: FeedLayout,
) -> Result<FetchedNews, FetchError> {
    if envelope.success != Some(true) {
        let reason = envelope.error.unwrap_or_else(|| match envelope.success {
            Some(false) => "server reported success=false".to_string(),
            _ => "success flag missing".to_string(),
        });
        return Err(FetchError::Envelope(reason));
    }

    let payload = if let Some(news) = envelope.news {
        NewsPayload::Unified(convert_list(news, None))
    } else if envelope.crypto_news.is_some() || envelope.general_news.is_some() {
        NewsPayload::Partitioned {
            crypto: convert_list(
                envelope.crypto_news.unwrap_or_default(),
                Some(Category::Crypto),
            ),
            general: convert_list(
                envelope.general_news.unwrap_or_default(),
                Some(Category::General),
            ),
        }
    } else {
        return Err(FetchError::Envelope(
            "response has neither `news` nor `crypto_news`/`general_news`".to_string(),
        ));
    };

    if let Some(count) = envelope.count
        && usize::try_from(count).ok() != Some(payload.len())
    {
        debug!(
            reported = count,
            received = payload.len(),
            "server count differs from items received"
        );
    }

    if payload.is_empty() {
        return Err(FetchError::Empty);
    }

    Ok(FetchedNews {
        payload: payload.into_layout(layout),
        server_last_update: envelope.last_update.filter(|s| !s.trim().is_empty()),
    })
}
