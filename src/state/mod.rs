//! Application state: news types, the bounded store, and the UI-facing `AppState`.

pub mod app_state;
pub mod store;
pub mod types;

pub use app_state::{AppState, FeedStats, FeedView};
pub use store::{ListOutcome, NewsLists, NewsStore, UpdateOutcome};
pub use types::{Category, FeedLayout, NewsItem, NewsPayload};
