//! Failure taxonomy of a news fetch.

use thiserror::Error;

/// Why a fetch produced no data.
///
/// `Transport`/`Status` are transport failures, `Envelope`/`Decode` are
/// malformed or unsuccessful responses, and `Empty` is a valid response with
/// nothing in it. All of them collapse to "no new data" for the cycle.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, timeout, or body read failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx HTTP status.
    #[error("unexpected HTTP status {status} from {url}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// URL that returned it.
        url: String,
    },

    /// Body parsed but the envelope was unsuccessful or incomplete.
    #[error("unsuccessful response: {0}")]
    Envelope(String),

    /// Body was not the expected JSON.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Valid response without any items.
    #[error("response contained no news")]
    Empty,
}

impl FetchError {
    /// Short classification used in log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) | Self::Status { .. } => "transport",
            Self::Envelope(_) | Self::Decode(_) => "envelope",
            Self::Empty => "no-data",
        }
    }

    /// Whether this is the benign "nothing new" case.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}
