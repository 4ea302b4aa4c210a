use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use crossterm::event::Event as CEvent;
use tokio::sync::mpsc;

use super::cycle::CycleResult;

/// What: Channels between the event loop and its workers.
///
/// Details:
/// - `refresh_rx` is handed to the scheduler on start, hence the `Option`.
pub struct Channels {
    pub event_tx: mpsc::UnboundedSender<CEvent>,
    pub event_rx: mpsc::UnboundedReceiver<CEvent>,
    pub event_thread_cancelled: Arc<AtomicBool>,
    pub results_tx: mpsc::UnboundedSender<CycleResult>,
    pub results_rx: mpsc::UnboundedReceiver<CycleResult>,
    pub refresh_tx: mpsc::UnboundedSender<()>,
    pub refresh_rx: Option<mpsc::UnboundedReceiver<()>>,
    pub clock_tx: mpsc::UnboundedSender<()>,
    pub clock_rx: mpsc::UnboundedReceiver<()>,
}

impl Channels {
    /// Create every channel pair.
    pub fn new() -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        let (refresh_tx, refresh_rx) = mpsc::unbounded_channel();
        let (clock_tx, clock_rx) = mpsc::unbounded_channel();
        Self {
            event_tx,
            event_rx,
            event_thread_cancelled: Arc::new(AtomicBool::new(false)),
            results_tx,
            results_rx,
            refresh_tx,
            refresh_rx: Some(refresh_rx),
            clock_tx,
            clock_rx,
        }
    }
}
