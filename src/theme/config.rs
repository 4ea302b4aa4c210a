/// Skeleton settings file written on first run.
pub(crate) const SETTINGS_SKELETON_CONTENT: &str = "# newsdeck settings\n\
#\n\
# Format: key = value\n\
# Lines starting with # are comments. A ` # ` after a value starts an inline comment.\n\
# Command-line flags override these values.\n\
#\n\
# News endpoint polled every cycle\n\
endpoint_url = http://127.0.0.1:5000/api/news\n\
#\n\
# Seconds between refresh cycles, and the per-request timeout\n\
refresh_interval_secs = 30\n\
request_timeout_secs = 10\n\
#\n\
# unified    = one flat list (default cap 50)\n\
# partitioned = separate crypto/general panes (default cap 5 each)\n\
layout = unified\n\
#\n\
# Per-list cap; leave commented to use the layout default\n\
# max_news_count = 50\n\
#\n\
# Leading rows flagged as new\n\
new_badge_count = 3\n\
#\n\
# chrono format strings\n\
clock_format = %A, %B %-d, %Y %H:%M:%S\n\
stats_time_format = %H:%M:%S\n\
#\n\
show_keybinds_footer = true\n";
