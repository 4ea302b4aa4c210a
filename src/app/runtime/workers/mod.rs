//! Background workers feeding the event loop.

/// One-second clock ticker.
pub mod clock;
/// Terminal input thread.
pub mod input;
/// Recurring news scheduler.
pub mod news;
