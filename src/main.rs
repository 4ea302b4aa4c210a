//! newsdeck binary entrypoint kept minimal. The full runtime lives in `app`.

mod args;

use std::fmt;
use std::sync::OnceLock;

use clap::Parser;
use newsdeck::{app, theme};

struct NewsdeckTimer;

impl tracing_subscriber::fmt::time::FormatTime for NewsdeckTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        // "YYYY-MM-DD-T HH:MM:SS"
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d-T %H:%M:%S"))
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Initialise tracing to `<config_dir>/logs/newsdeck.log`, falling back to stderr.
///
/// Inputs:
/// - `level`: Default filter when `RUST_LOG` is unset
fn init_logging(level: &str) {
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
    };
    let log_path = theme::logs_dir().join("newsdeck.log");
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(NewsdeckTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(NewsdeckTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() {
    let args = args::Args::parse();
    init_logging(&args::determine_log_level(&args));

    let file_settings = args
        .config
        .as_deref()
        .map_or_else(theme::settings, theme::load_settings_from);
    let settings = args::apply_overrides(&args, file_settings);

    if args.health {
        std::process::exit(args::health::run_health(&settings).await);
    }
    if args.once {
        std::process::exit(args::once::run_once(settings).await);
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "newsdeck starting");
    if let Err(err) = app::run(settings).await {
        tracing::error!(error = ?err, "application error");
        eprintln!("newsdeck: {err}");
    }
    tracing::info!("newsdeck exited");
}

#[cfg(test)]
mod tests {
    /// What: FormatTime impl writes the expected timestamp shape
    ///
    /// - Input: Tracing writer buffer
    /// - Output: `YYYY-MM-DD-T HH:MM:SS` (21 chars)
    #[test]
    fn newsdeck_timer_formats_time() {
        use tracing_subscriber::fmt::time::FormatTime;
        let mut buf = String::new();
        let mut writer = tracing_subscriber::fmt::format::Writer::new(&mut buf);
        super::NewsdeckTimer
            .format_time(&mut writer)
            .expect("format time");
        assert_eq!(buf.len(), 21);
        assert_eq!(&buf[10..13], "-T ");
    }
}
