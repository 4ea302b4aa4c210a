//! Palette, settings, and config/log directory resolution for newsdeck.

/// Settings skeleton written on first run.
mod config;
/// Path resolution for config directories.
mod paths;
/// Settings loading and parsing.
mod settings;
/// Theme and settings type definitions.
mod types;

pub use paths::{config_dir, logs_dir};
pub use settings::{load_settings_from, parse_settings, settings};
pub use types::{Settings, Theme};

/// Active colour palette.
#[must_use]
pub fn theme() -> Theme {
    Theme::default()
}
