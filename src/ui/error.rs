use thiserror::Error;

/// Failure while producing a frame.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Writing to the terminal failed.
    #[error("terminal write failed: {0}")]
    Terminal(#[from] std::io::Error),
    /// The drawing area cannot hold the layout.
    #[error("{0}")]
    Surface(String),
}
