//! Shared utilities for argument processing.

/// What: Determine the log level based on command-line arguments.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides the `--log-level` argument.
/// - `RUST_LOG`, when set, is applied by the subscriber and wins over both.
pub fn determine_log_level(args: &crate::args::Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else {
        args.log_level.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn verbose_wins_over_log_level() {
        let args = crate::args::Args::parse_from(["newsdeck", "--log-level", "warn", "-v"]);
        assert_eq!(determine_log_level(&args), "debug");
        let args = crate::args::Args::parse_from(["newsdeck", "--log-level", "warn"]);
        assert_eq!(determine_log_level(&args), "warn");
    }
}
