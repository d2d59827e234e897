//! crossterm-backed display surface for a real terminal.

use crate::terminal::display::{DisplaySurface, Tone};
use crate::terminal::settings;
use crossterm::cursor::MoveTo;
use crossterm::style::{Print, PrintStyledContent, Stylize};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use std::borrow::Cow;
use std::io::{self, Write};

const FALLBACK_SIZE: (u16, u16) = (100, 30);

/// Writes session output to a terminal, queueing crossterm commands until
/// [`DisplaySurface::flush`].
pub struct ConsoleSurface<W: Write> {
    out: W,
    color: bool,
    size: (u16, u16),
}

impl ConsoleSurface<io::Stdout> {
    /// Surface over the process stdout, sized from the live terminal.
    pub fn stdout(color: bool) -> Self {
        let size = terminal::size().unwrap_or(FALLBACK_SIZE);
        Self::new(io::stdout(), color, size)
    }
}

impl<W: Write> ConsoleSurface<W> {
    pub fn new(out: W, color: bool, size: (u16, u16)) -> Self {
        Self { out, color, size }
    }

    /// Last measured `(columns, rows)`.
    pub fn size(&self) -> (u16, u16) {
        self.size
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplaySurface for ConsoleSurface<W> {
    fn write_styled(&mut self, text: &str, tone: Tone) -> io::Result<()> {
        // Raw mode disables output post-processing, so bare LF must carry CR.
        let text = normalize_newlines(text);
        match settings::tone_color(tone).filter(|_| self.color) {
            Some(color) if tone == Tone::Heading => {
                self.out
                    .queue(PrintStyledContent(text.as_ref().with(color).bold()))?;
            }
            Some(color) => {
                self.out
                    .queue(PrintStyledContent(text.as_ref().with(color)))?;
            }
            None => {
                self.out.queue(Print(text.as_ref()))?;
            }
        }
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.out.queue(Clear(ClearType::All))?;
        self.out.queue(Clear(ClearType::Purge))?;
        self.out.queue(MoveTo(0, 0))?;
        Ok(())
    }

    fn fit(&mut self) -> io::Result<()> {
        let size = terminal::size()?;
        if size != self.size {
            tracing::trace!(columns = size.0, rows = size.1, "terminal resized");
        }
        self.size = size;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Convert lone `\n` into `\r\n`, leaving existing CRLF pairs alone.
fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if !text.contains('\n') {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    let mut previous = '\0';
    for ch in text.chars() {
        if ch == '\n' && previous != '\r' {
            out.push('\r');
        }
        out.push(ch);
        previous = ch;
    }
    Cow::Owned(out)
}
