//! Aggregator health probe (`/api/health`).

use serde::Deserialize;

use super::news::FetchError;

/// Body of `/api/health`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HealthReport {
    /// Free-form status, `healthy` when all is well.
    pub status: String,
    /// Number of items the server currently serves.
    pub news_count: Option<u64>,
    /// Server-side refresh time.
    pub last_update: Option<String>,
}

impl HealthReport {
    /// Whether the server declared itself healthy.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

/// What: Derive the health URL that sits next to the news endpoint.
///
/// Inputs:
/// - `news_endpoint`: e.g. `http://host:5000/api/news`
///
/// Output:
/// - `Some("http://host:5000/api/health")`; `None` if the endpoint is not a valid URL
#[must_use]
pub fn health_url(news_endpoint: &str) -> Option<String> {
    let base = reqwest::Url::parse(news_endpoint).ok()?;
    base.join("health").ok().map(String::from)
}

/// What: Query the health endpoint once.
///
/// Inputs:
/// - `client`: HTTP client to use
/// - `url`: Health endpoint URL
///
/// Output:
/// - `Ok(HealthReport)` on a 2xx JSON response
///
/// # Errors
/// - `Transport`/`Status` on network or HTTP failure, `Decode` on a malformed body
pub async fn fetch_health(client: &reqwest::Client, url: &str) -> Result<HealthReport, FetchError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}
