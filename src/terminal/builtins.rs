//! Commands answered by the terminal itself instead of the executor.

/// Closed set of local commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Help,
    Clear,
    History,
    Pwd,
}

/// Static builtin metadata used by lookup and the help screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinSpec {
    pub name: &'static str,
    pub builtin: Builtin,
    pub description: &'static str,
}

pub const BUILTINS: [BuiltinSpec; 4] = [
    BuiltinSpec {
        name: "help",
        builtin: Builtin::Help,
        description: "Show this help message",
    },
    BuiltinSpec {
        name: "clear",
        builtin: Builtin::Clear,
        description: "Clear the terminal",
    },
    BuiltinSpec {
        name: "history",
        builtin: Builtin::History,
        description: "Show command history",
    },
    BuiltinSpec {
        name: "pwd",
        builtin: Builtin::Pwd,
        description: "Show current directory",
    },
];

/// Keyboard shortcuts listed by `help`.
pub const SHORTCUTS: [(&str, &str); 6] = [
    ("Ctrl+C", "Cancel the current line or running command"),
    ("Ctrl+L", "Clear the terminal"),
    ("Ctrl+D", "Close the terminal (empty line)"),
    ("Up/Down", "Navigate command history"),
    ("Tab", "Auto-complete commands"),
    ("F1-F4", "Run quick commands"),
];

/// Resolve the builtin named by the first word of `command`, if any.
pub fn lookup(command: &str) -> Option<Builtin> {
    let name = command.split_whitespace().next()?;
    BUILTINS
        .iter()
        .find(|spec| spec.name == name)
        .map(|spec| spec.builtin)
}
