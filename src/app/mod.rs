//! Newsdeck application module: terminal handling, the runtime, and its workers.

/// Runtime event loop, orchestrator, and background workers.
pub mod runtime;
/// Terminal setup and restoration utilities.
mod terminal;

pub use runtime::cycle::{CycleResult, NewsOrchestrator, OnceReport};
pub use runtime::guard::{CycleGuard, CyclePermit};
pub use runtime::run;
