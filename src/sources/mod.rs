//! Network data retrieval: the news endpoint and its health probe.

pub mod health;
pub mod news;

pub use health::{HealthReport, fetch_health, health_url};
pub use news::{FetchError, FetchOutcome, FetchedNews, NewsFetcher, NewsSource};
