//! News endpoint client.

mod error;
mod fetch;
mod wire;

pub use error::FetchError;
pub use fetch::{FetchOutcome, FetchedNews, NewsFetcher, NewsSource};
