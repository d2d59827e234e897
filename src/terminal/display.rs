//! Display-surface contract plus an in-memory implementation.
//!
//! The session never talks to a terminal directly: every byte it shows goes
//! through a [`DisplaySurface`], which decides how a semantic [`Tone`] is
//! rendered (ANSI colors, plain text, or recorded for inspection).

use crate::terminal::settings;
use std::io;

/// Semantic styling for a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    /// Default foreground.
    Plain,
    /// stderr lines, failures, transport errors.
    Error,
    /// Successful status lines and the prompt's directory.
    Success,
    /// Secondary hints.
    Muted,
    /// Banner chrome and project labels.
    Accent,
    /// Section titles in help output.
    Heading,
}

/// Monospace output target owned by one terminal session.
pub trait DisplaySurface {
    /// Write text with a tone; no newline handling beyond what the surface does.
    fn write_styled(&mut self, text: &str, tone: Tone) -> io::Result<()>;

    /// Wipe the visible area and scrollback.
    fn clear(&mut self) -> io::Result<()>;

    /// Raw passthrough in the default tone.
    fn write(&mut self, text: &str) -> io::Result<()> {
        self.write_styled(text, Tone::Plain)
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.write_line_styled(text, Tone::Plain)
    }

    fn write_line_styled(&mut self, text: &str, tone: Tone) -> io::Result<()> {
        if !text.is_empty() {
            self.write_styled(text, tone)?;
        }
        self.write(settings::NEWLINE)
    }

    /// Re-measure the surface after its container changed size.
    fn fit(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Push queued output to the underlying device.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// One committed line of a [`MemorySurface`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenLine {
    /// Visible text with trailing blanks removed.
    pub text: String,
    /// Non-plain tones used anywhere on the line, in first-use order.
    pub tones: Vec<Tone>,
}

impl ScreenLine {
    pub fn has_tone(&self, tone: Tone) -> bool {
        self.tones.contains(&tone)
    }
}

/// Headless display surface that models a single-cursor line terminal.
///
/// `\r` returns to column zero, `\n` commits the current line, and backspace
/// moves the cursor left without deleting (the caller overwrites with a blank,
/// as a real terminal requires).
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    lines: Vec<ScreenLine>,
    current: Vec<char>,
    current_tones: Vec<Tone>,
    column: usize,
    transcript: String,
    clears: usize,
    fits: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines committed with a newline since the last clear.
    pub fn lines(&self) -> &[ScreenLine] {
        &self.lines
    }

    /// Committed line texts, for compact assertions.
    pub fn line_texts(&self) -> Vec<String> {
        self.lines.iter().map(|line| line.text.clone()).collect()
    }

    /// The line the cursor is on, trailing blanks removed.
    pub fn current_line(&self) -> String {
        let text: String = self.current.iter().collect();
        text.trim_end().to_string()
    }

    /// Cursor column on the current line, in chars.
    pub fn cursor_column(&self) -> usize {
        self.column
    }

    /// Every string written since creation, control characters included.
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn clear_count(&self) -> usize {
        self.clears
    }

    pub fn fit_count(&self) -> usize {
        self.fits
    }

    fn commit_line(&mut self) {
        let text: String = self.current.iter().collect();
        self.lines.push(ScreenLine {
            text: text.trim_end().to_string(),
            tones: std::mem::take(&mut self.current_tones),
        });
        self.current.clear();
        self.column = 0;
    }

    fn put_char(&mut self, ch: char) {
        if self.column < self.current.len() {
            self.current[self.column] = ch;
        } else {
            self.current.push(ch);
        }
        self.column += 1;
    }
}

impl DisplaySurface for MemorySurface {
    fn write_styled(&mut self, text: &str, tone: Tone) -> io::Result<()> {
        self.transcript.push_str(text);
        let visible = text.chars().any(|ch| !ch.is_control() && !ch.is_whitespace());
        if tone != Tone::Plain && visible && !self.current_tones.contains(&tone) {
            self.current_tones.push(tone);
        }
        for ch in text.chars() {
            match ch {
                '\r' => self.column = 0,
                '\n' => self.commit_line(),
                '\u{8}' => self.column = self.column.saturating_sub(1),
                _ => self.put_char(ch),
            }
        }
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.lines.clear();
        self.current.clear();
        self.current_tones.clear();
        self.column = 0;
        self.clears += 1;
        Ok(())
    }

    fn fit(&mut self) -> io::Result<()> {
        self.fits += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_surface_commits_lines_with_tones() {
        let mut surface = MemorySurface::new();
        surface.write_line("plain").unwrap();
        surface.write_line_styled("boom", Tone::Error).unwrap();
        surface.write("tail").unwrap();

        assert_eq!(surface.line_texts(), vec!["plain", "boom"]);
        assert!(surface.lines()[0].tones.is_empty());
        assert!(surface.lines()[1].has_tone(Tone::Error));
        assert_eq!(surface.current_line(), "tail");
        assert_eq!(surface.cursor_column(), 4);
    }

    #[test]
    fn memory_surface_erase_sequence_removes_last_column() {
        let mut surface = MemorySurface::new();
        surface.write("$ abc").unwrap();
        surface.write(settings::ERASE_ONE).unwrap();
        assert_eq!(surface.current_line(), "$ ab");
        assert_eq!(surface.cursor_column(), 4);

        surface.write("Z").unwrap();
        assert_eq!(surface.current_line(), "$ abZ");
    }

    #[test]
    fn memory_surface_clear_resets_screen_but_not_transcript() {
        let mut surface = MemorySurface::new();
        surface.write_line("one").unwrap();
        surface.clear().unwrap();
        assert!(surface.lines().is_empty());
        assert_eq!(surface.current_line(), "");
        assert_eq!(surface.clear_count(), 1);
        assert!(surface.transcript().contains("one"));
    }

    #[test]
    fn blank_styled_text_does_not_tag_line() {
        let mut surface = MemorySurface::new();
        surface.write_styled(" ", Tone::Error).unwrap();
        surface.write_line("x").unwrap();
        assert!(surface.lines()[0].tones.is_empty());
    }
}
