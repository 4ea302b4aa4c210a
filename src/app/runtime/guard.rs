//! Reentrancy guard that keeps refresh cycles from overlapping.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Shared flag marking a cycle as outstanding.
///
/// Clones share the same flag; the scheduler holds one and the orchestrator another.
#[derive(Clone, Debug, Default)]
pub struct CycleGuard {
    /// Set while a permit is alive.
    busy: Arc<AtomicBool>,
    /// Monotonic cycle counter for log correlation.
    next_id: Arc<AtomicU64>,
}

impl CycleGuard {
    /// Create an idle guard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// What: Try to start a cycle.
    ///
    /// Output:
    /// - `Some(permit)` when no cycle is outstanding; `None` otherwise
    ///
    /// Details:
    /// - The flag stays set until the returned permit is dropped.
    #[must_use]
    pub fn try_begin(&self) -> Option<CyclePermit> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        Some(CyclePermit {
            busy: Arc::clone(&self.busy),
            id,
        })
    }

    /// Whether a cycle is outstanding.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Proof that the holder owns the current cycle. Dropping it ends the cycle.
#[derive(Debug)]
pub struct CyclePermit {
    busy: Arc<AtomicBool>,
    id: u64,
}

impl CyclePermit {
    /// Sequence number of this cycle (starts at 1).
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for CyclePermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
