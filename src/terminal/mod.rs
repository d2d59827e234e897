//! Line-editing terminal pane.
//!
//! Key translation, the line buffer and its history, Tab completion and
//! result rendering live here. The session is display-agnostic: the console
//! surface drives a real tty, the memory surface backs tests and embedders.

pub mod builtins;
pub mod completion;
pub mod console;
pub mod display;
pub mod history;
pub mod keys;
mod render;
pub mod session;
pub mod settings;

pub use console::ConsoleSurface;
pub use display::{DisplaySurface, MemorySurface, ScreenLine, Tone};
pub use history::CommandHistory;
pub use keys::{translate_event, InputEvent, TerminalKey};
pub use render::{prompt_text, status_line};
pub use session::{
    Completion, Dispatch, PendingExecution, SessionOptions, SessionState, TerminalSession,
};
