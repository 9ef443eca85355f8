//! Consistent styling utilities for GVM CLI output
//!
//! All user-facing output should use these helpers for consistent UX.
//! Respects the [NO_COLOR standard](https://no-color.org/) and `GVM_COLORS`.

use std::env;

use owo_colors::OwoColorize;
use supports_color::Stream;

/// Detect if colors should be enabled on stdout
#[must_use]
pub fn colors_enabled() -> bool {
    colors_enabled_on(Stream::Stdout)
}

/// Detect if colors should be enabled on stderr (log output)
#[must_use]
pub fn stderr_colors_enabled() -> bool {
    colors_enabled_on(Stream::Stderr)
}

fn colors_enabled_on(stream: Stream) -> bool {
    // 1. Check NO_COLOR standard (https://no-color.org/)
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }

    // 2. Check if GVM_COLORS is explicitly set
    if let Ok(val) = env::var("GVM_COLORS") {
        if val == "never" || val == "0" || val == "false" {
            return false;
        }
        if val == "always" || val == "1" || val == "true" {
            return true;
        }
    }

    // 3. Check terminal capabilities via supports-color crate
    supports_color::on(stream).is_some_and(|level| level.has_basic)
}

/// Check if unicode icons should be used
#[must_use]
pub fn use_unicode() -> bool {
    if let Ok(val) = env::var("GVM_UNICODE") {
        return val != "0" && val != "false";
    }
    colors_enabled()
}

/// Apply color only if colors are enabled
#[inline]
#[must_use]
pub fn maybe_color(text: &str, f: impl Fn(&str) -> String) -> String {
    if colors_enabled() {
        f(text)
    } else {
        text.to_string()
    }
}

/// Get an icon (unicode or ASCII fallback)
#[inline]
#[must_use]
pub fn icon(unicode: &str, ascii: &str) -> String {
    if use_unicode() {
        unicode.to_string()
    } else {
        ascii.to_string()
    }
}

/// Section header (e.g., "Available Gradle versions:")
#[must_use]
pub fn header(msg: &str) -> String {
    maybe_color(msg, |m| m.bold().to_string())
}

/// Success message with checkmark
#[must_use]
pub fn success(msg: &str) -> String {
    let mark = icon("✓", "OK");
    if colors_enabled() {
        format!("{} {msg}", mark.green().bold())
    } else {
        format!("{mark} {msg}")
    }
}

/// Step message with arrow prefix
#[must_use]
pub fn arrow(msg: &str) -> String {
    let mark = icon("→", "->");
    if colors_enabled() {
        format!("{} {msg}", mark.blue())
    } else {
        format!("{mark} {msg}")
    }
}

/// Dry-run message with its tag
#[must_use]
pub fn dry_run(msg: &str) -> String {
    if colors_enabled() {
        format!("{} {msg}", "[DRY-RUN]".yellow().bold())
    } else {
        format!("[DRY-RUN] {msg}")
    }
}

/// Version number
#[must_use]
pub fn version(ver: &str) -> String {
    maybe_color(ver, |v| v.yellow().to_string())
}

/// Filesystem path
#[must_use]
pub fn path(p: &str) -> String {
    maybe_color(p, |p| p.dimmed().to_string())
}
