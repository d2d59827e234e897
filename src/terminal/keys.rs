//! Named key events understood by the session, decoded from crossterm.

use crate::terminal::settings::QUICK_COMMAND_SLOTS;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// One input the session's interpreter reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalKey {
    Char(char),
    Backspace,
    Enter,
    /// Ctrl+C.
    Interrupt,
    /// Ctrl+L.
    ClearScreen,
    HistoryUp,
    HistoryDown,
    /// Tab.
    Complete,
    /// A pasted block, delivered as one unit.
    Paste(String),
    /// Ctrl+D.
    EndOfInput,
}

/// Host-level classification of a raw terminal event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(TerminalKey),
    /// Zero-based quick-command slot (F1 is slot 0).
    QuickCommand(usize),
    Resize,
    Ignored,
}

/// Map a crossterm event onto the session's key vocabulary.
pub fn translate_event(event: &Event) -> InputEvent {
    match event {
        Event::Key(key) => translate_key(key),
        Event::Paste(text) => InputEvent::Key(TerminalKey::Paste(text.clone())),
        Event::Resize(_, _) => InputEvent::Resize,
        _ => InputEvent::Ignored,
    }
}

fn translate_key(key: &KeyEvent) -> InputEvent {
    if key.kind != KeyEventKind::Press && key.kind != KeyEventKind::Repeat {
        return InputEvent::Ignored;
    }
    let control = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    let mapped = match key.code {
        KeyCode::Enter => TerminalKey::Enter,
        KeyCode::Backspace => TerminalKey::Backspace,
        KeyCode::Up => TerminalKey::HistoryUp,
        KeyCode::Down => TerminalKey::HistoryDown,
        KeyCode::Tab => TerminalKey::Complete,
        KeyCode::Char('c') if control => TerminalKey::Interrupt,
        KeyCode::Char('l') if control => TerminalKey::ClearScreen,
        KeyCode::Char('d') if control => TerminalKey::EndOfInput,
        KeyCode::Char(_) if control || alt => return InputEvent::Ignored,
        KeyCode::Char(ch) => TerminalKey::Char(ch),
        KeyCode::F(n) if (1..=QUICK_COMMAND_SLOTS).contains(&usize::from(n)) => {
            return InputEvent::QuickCommand(usize::from(n) - 1);
        }
        // The line has no mid-line cursor; Left/Right/Home/End are swallowed.
        _ => return InputEvent::Ignored,
    };
    InputEvent::Key(mapped)
}
