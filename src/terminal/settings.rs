//! Centralized, hardcoded UI settings for the terminal pane.
//!
//! This is the single place to tweak prompt strings, glyphs, banner text and
//! the tone-to-color mapping.

use crate::terminal::display::Tone;
use crossterm::style::Color;

// ---------------------------------------------------------------------------
// Session limits
// ---------------------------------------------------------------------------

/// Default bound on remembered commands per session.
pub const MAX_HISTORY: usize = 100;

/// Number of function keys (F1..) bound to quick commands.
pub const QUICK_COMMAND_SLOTS: usize = 4;

pub const REPL_EVENT_POLL_MS: u64 = 80;

// ---------------------------------------------------------------------------
// Prompt strings
// ---------------------------------------------------------------------------

pub const PROMPT_SYMBOL: &str = "$";
pub const PROMPT_HOME: &str = "~";
pub const PROMPT_PROJECT_SEPARATOR: &str = ":";
pub const PROMPT_SPACER: &str = " ";

pub const NEWLINE: &str = "\r\n";
/// Erase one column to the left of the cursor.
pub const ERASE_ONE: &str = "\u{8} \u{8}";
pub const INTERRUPT_ECHO: &str = "^C";

// ---------------------------------------------------------------------------
// Result rendering
// ---------------------------------------------------------------------------

pub const GLYPH_SUCCESS: &str = "✓";
pub const GLYPH_FAILURE: &str = "✗";
pub const ERROR_PREFIX: &str = "Error: ";
pub const COMPLETION_SEPARATOR: &str = "  ";

// ---------------------------------------------------------------------------
// Banner
// ---------------------------------------------------------------------------

pub const BANNER_BOX: [&str; 4] = [
    "╔══════════════════════════════════════╗",
    "║           ShellIDE Terminal          ║",
    "║      AI-Powered Development          ║",
    "╚══════════════════════════════════════╝",
];
pub const BANNER_WELCOME: &str = "Welcome to the integrated terminal!";
pub const BANNER_HINT: &str = "Type \"help\" for available commands.";

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

pub const COLOR_ERROR: Color = Color::Red;
pub const COLOR_SUCCESS: Color = Color::Green;
pub const COLOR_MUTED: Color = Color::DarkGrey;
pub const COLOR_ACCENT: Color = Color::Cyan;
pub const COLOR_HEADING: Color = Color::White;

/// Terminal color for a semantic tone, `None` for the default foreground.
pub fn tone_color(tone: Tone) -> Option<Color> {
    match tone {
        Tone::Plain => None,
        Tone::Error => Some(COLOR_ERROR),
        Tone::Success => Some(COLOR_SUCCESS),
        Tone::Muted => Some(COLOR_MUTED),
        Tone::Accent => Some(COLOR_ACCENT),
        Tone::Heading => Some(COLOR_HEADING),
    }
}
