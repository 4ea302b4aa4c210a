use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// What: Spawn the one-second clock ticker.
///
/// Inputs:
/// - `clock_tx`: Receives `()` once per second
///
/// Details:
/// - Independent of the news cycle; stops when the receiver is gone.
pub fn spawn_clock_worker(clock_tx: mpsc::UnboundedSender<()>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            if clock_tx.send(()).is_err() {
                break;
            }
        }
    });
}
