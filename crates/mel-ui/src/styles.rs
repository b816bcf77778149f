//! Ayu color theme and styling functions for mel CLI output.
//!
//! Uses the Ayu Dark color palette. Color source:
//! <https://github.com/ayu-theme/ayu-colors>
//!
//! Only outcomes get color (passed, failed, warnings); everything else is
//! plain or muted text. Small Unicode symbols for icons, not emoji.

use owo_colors::OwoColorize;

use crate::terminal::supports_color;

// ---------------------------------------------------------------------------
// Ayu Dark color palette (RGB values)
// ---------------------------------------------------------------------------

const PASS: (u8, u8, u8) = (0xc2, 0xd9, 0x4c); // #c2d94c - bright green
const WARN: (u8, u8, u8) = (0xff, 0xb4, 0x54); // #ffb454 - bright yellow
const FAIL: (u8, u8, u8) = (0xf0, 0x71, 0x78); // #f07178 - bright red
const MUTED: (u8, u8, u8) = (0x6c, 0x76, 0x80); // #6c7680 - muted gray
const ACCENT: (u8, u8, u8) = (0x59, 0xc2, 0xff); // #59c2ff - bright blue

// ---------------------------------------------------------------------------
// Icons
// ---------------------------------------------------------------------------

pub const ICON_PASS: &str = "\u{2713}"; // check mark
pub const ICON_WARN: &str = "\u{26A0}"; // warning sign
pub const ICON_FAIL: &str = "\u{2716}"; // heavy x
pub const ICON_INFO: &str = "\u{2139}"; // info
/// Prefix for a command about to run.
pub const ICON_STEP: &str = "\u{25B8}"; // small right triangle

// ---------------------------------------------------------------------------
// Helper: apply truecolor only when color is supported
// ---------------------------------------------------------------------------

/// Applies truecolor foreground to a string, falling back to plain text
/// when color is not supported.
fn color_str(s: &str, rgb: (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(rgb.0, rgb.1, rgb.2).to_string()
    } else {
        s.to_string()
    }
}

// ---------------------------------------------------------------------------
// Core semantic render helpers
// ---------------------------------------------------------------------------

/// Renders text with pass (green) styling.
pub fn render_pass(s: &str) -> String {
    color_str(s, PASS)
}

/// Renders text with warning (yellow) styling.
pub fn render_warn(s: &str) -> String {
    color_str(s, WARN)
}

/// Renders text with fail (red) styling.
pub fn render_fail(s: &str) -> String {
    color_str(s, FAIL)
}

/// Renders text with muted (gray) styling.
pub fn render_muted(s: &str) -> String {
    color_str(s, MUTED)
}

/// Renders text in bold.
pub fn render_bold(s: &str) -> String {
    if supports_color() {
        s.bold().to_string()
    } else {
        s.to_string()
    }
}


// ---------------------------------------------------------------------------
// Status lines
// ---------------------------------------------------------------------------

/// `✓ message` in pass color.
pub fn render_success_line(message: &str) -> String {
    format!("{} {message}", color_str(ICON_PASS, PASS))
}

/// `⚠ message` in warning color.
pub fn render_warn_line(message: &str) -> String {
    format!("{} {}", color_str(ICON_WARN, WARN), render_warn(message))
}

/// `✖ message` in fail color.
pub fn render_fail_line(message: &str) -> String {
    format!("{} {}", color_str(ICON_FAIL, FAIL), render_fail(message))
}

/// `ℹ message` with an accent icon.
pub fn render_info_line(message: &str) -> String {
    format!("{} {message}", color_str(ICON_INFO, ACCENT))
}

/// `▸ command` announcing a shell command.
pub fn render_step(command: &str) -> String {
    format!("{} {}", color_str(ICON_STEP, ACCENT), render_bold(command))
}

/// Exit status of a finished command: green for zero, red otherwise.
pub fn render_exit_code(code: i32) -> String {
    let label = format!("exit {code}");
    if code == 0 {
        render_pass(&label)
    } else {
        render_fail(&label)
    }
}
