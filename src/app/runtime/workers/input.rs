use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossterm::event::Event as CEvent;
use tokio::sync::mpsc;

/// What: Spawn the blocking terminal input reader.
///
/// Inputs:
/// - `headless`: Skip spawning when no terminal is attached
/// - `event_tx`: Destination for crossterm events
/// - `cancelled`: Set on shutdown to stop the thread
///
/// Details:
/// - Polls with a short timeout so cancellation is noticed promptly.
/// - Read errors are ignored; the thread exits when the channel closes.
pub fn spawn_event_thread(
    headless: bool,
    event_tx: mpsc::UnboundedSender<CEvent>,
    cancelled: Arc<AtomicBool>,
) {
    if headless {
        return;
    }
    std::thread::spawn(move || {
        while !cancelled.load(Ordering::Relaxed) {
            match crossterm::event::poll(Duration::from_millis(50)) {
                Ok(true) => {
                    let Ok(ev) = crossterm::event::read() else {
                        continue;
                    };
                    if cancelled.load(Ordering::Relaxed) || event_tx.send(ev).is_err() {
                        break;
                    }
                }
                Ok(false) | Err(_) => {}
            }
        }
    });
}
