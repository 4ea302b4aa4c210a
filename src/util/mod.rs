//! Small helpers shared across the crate.

pub mod config;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// What: Truncate text to a display width, appending an ellipsis when cut.
///
/// Inputs:
/// - `text`: Text to fit (may contain wide CJK characters)
/// - `max_width`: Maximum terminal columns
///
/// Output:
/// - `text` unchanged if it fits, otherwise a prefix ending in `…`
#[must_use]
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

/// What: Open a URL in the default browser.
///
/// Inputs:
/// - `url`: URL string to open.
///
/// Output:
/// - No return value; spawns a background process to open the URL.
///
/// Details:
/// - On Windows, uses `cmd /c start`.
/// - On Unix-like systems, uses `xdg-open`, falling back to `open` (macOS).
/// - Spawns the command in a background thread and logs failures.
/// - During tests, this is a no-op to avoid opening real browser windows.
#[cfg_attr(test, allow(unused_variables))]
#[allow(clippy::missing_const_for_fn)]
pub fn open_url(url: &str) {
    #[cfg(not(test))]
    {
        use std::process::{Command, Stdio};

        let url = url.to_string();
        std::thread::spawn(move || {
            #[cfg(target_os = "windows")]
            let result = Command::new("cmd")
                .args(["/c", "start", "", &url])
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn();
            #[cfg(not(target_os = "windows"))]
            let result = Command::new("xdg-open")
                .arg(&url)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
                .or_else(|_| {
                    Command::new("open")
                        .arg(&url)
                        .stdin(Stdio::null())
                        .stdout(Stdio::null())
                        .stderr(Stdio::null())
                        .spawn()
                });
            if let Err(e) = result {
                tracing::warn!(url = %url, error = %e, "failed to open link");
            }
        });
    }
}
