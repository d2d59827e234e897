//! Line-editing terminal session.
//!
//! A session owns one pane's line buffer, history and cwd cache, and writes
//! everything it shows through its [`DisplaySurface`]. It never awaits the
//! executor itself: submitting a command returns a [`PendingExecution`] that
//! the host runs, and the host hands the [`Completion`] back via
//! [`TerminalSession::finish`]. Input arriving in between is dropped.

use crate::error::ExecuteError;
use crate::executor::{CommandExecutor, ExecuteRequest, ExecuteResult};
use crate::project::ProjectContext;
use crate::terminal::builtins::{self, Builtin};
use crate::terminal::completion::{self, Completion as TabCompletion};
use crate::terminal::display::DisplaySurface;
use crate::terminal::history::CommandHistory;
use crate::terminal::keys::TerminalKey;
use crate::terminal::render;
use crate::terminal::settings;
use std::fmt;
use std::io;
use std::sync::Arc;

/// Construction-time knobs for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub prompt_symbol: String,
    pub history_limit: usize,
    /// Draw the welcome banner on start and after every clear.
    pub banner: bool,
    /// Tab-completion candidates.
    pub completions: Vec<String>,
    /// Starting cwd; falls back to the project directory.
    pub initial_cwd: Option<String>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            prompt_symbol: settings::PROMPT_SYMBOL.to_string(),
            history_limit: settings::MAX_HISTORY,
            banner: true,
            completions: completion::default_completions(),
            initial_cwd: None,
        }
    }
}

/// Whether the session is accepting input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    /// An execution with this ticket is in flight.
    Executing { ticket: u64 },
}

/// What the host must do after feeding the session an input.
#[derive(Debug)]
pub enum Dispatch {
    Nothing,
    /// Run this execution and deliver its completion with `finish`.
    Execute(PendingExecution),
    /// Abort the in-flight execution with this ticket.
    Cancel { ticket: u64 },
    /// The user closed the pane.
    Exit,
}

/// A command handed off for execution, tagged with the session's ticket.
pub struct PendingExecution {
    ticket: u64,
    request: ExecuteRequest,
    executor: Arc<dyn CommandExecutor>,
}

impl PendingExecution {
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    pub fn request(&self) -> &ExecuteRequest {
        &self.request
    }

    /// Call the executor and package the outcome for [`TerminalSession::finish`].
    pub async fn run(self) -> Completion {
        let outcome = self.executor.execute(&self.request).await;
        Completion {
            ticket: self.ticket,
            outcome,
        }
    }
}

impl fmt::Debug for PendingExecution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingExecution")
            .field("ticket", &self.ticket)
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}

/// Outcome of one execution, matched to its dispatch by ticket.
#[derive(Debug)]
pub struct Completion {
    pub ticket: u64,
    pub outcome: Result<ExecuteResult, ExecuteError>,
}

/// One terminal pane's interactive state.
pub struct TerminalSession<D: DisplaySurface> {
    display: D,
    executor: Arc<dyn CommandExecutor>,
    project: Arc<dyn ProjectContext>,
    options: SessionOptions,
    current_command: String,
    history: CommandHistory,
    current_directory: String,
    state: SessionState,
    next_ticket: u64,
}

impl<D: DisplaySurface> TerminalSession<D> {
    pub fn new(
        display: D,
        executor: Arc<dyn CommandExecutor>,
        project: Arc<dyn ProjectContext>,
        options: SessionOptions,
    ) -> Self {
        let current_directory = options
            .initial_cwd
            .clone()
            .or_else(|| project.current_project().and_then(|p| p.directory))
            .unwrap_or_default();
        Self {
            display,
            executor,
            project,
            history: CommandHistory::with_limit(options.history_limit),
            options,
            current_command: String::new(),
            current_directory,
            state: SessionState::Idle,
            next_ticket: 1,
        }
    }

    /// Draw the banner, the project header and the first prompt.
    pub fn start(&mut self) -> io::Result<()> {
        if self.options.banner {
            render::write_banner(&mut self.display)?;
        }
        self.announce_project()?;
        self.write_prompt()?;
        self.display.flush()
    }

    /// Re-read the project after the host switched it: reset the cwd cache to
    /// the new project root and redraw the pane.
    pub fn project_changed(&mut self) -> io::Result<()> {
        self.current_directory = self
            .project
            .current_project()
            .and_then(|p| p.directory)
            .unwrap_or_default();
        self.display.clear()?;
        self.announce_project()?;
        if self.state == SessionState::Idle {
            self.write_prompt()?;
            self.display.write(&self.current_command)?;
        }
        self.display.flush()
    }

    /// Interpret one key.
    pub fn handle_key(&mut self, key: TerminalKey) -> io::Result<Dispatch> {
        let dispatch = match self.state {
            SessionState::Executing { ticket } => self.handle_key_while_executing(key, ticket)?,
            SessionState::Idle => self.handle_key_idle(key)?,
        };
        self.display.flush()?;
        Ok(dispatch)
    }

    /// Run `line` as if typed and followed by Enter. Dropped while executing.
    pub fn submit(&mut self, line: &str) -> io::Result<Dispatch> {
        if let SessionState::Executing { ticket } = self.state {
            tracing::debug!(ticket, "dropping submitted command while executing");
            return Ok(Dispatch::Nothing);
        }
        self.history.reset_recall();
        self.replace_buffer(&single_line(line))?;
        let dispatch = self.enter()?;
        self.display.flush()?;
        Ok(dispatch)
    }

    /// Deliver an execution outcome. Completions for anything other than the
    /// in-flight ticket (e.g. after a cancel) are discarded.
    pub fn finish(&mut self, completion: Completion) -> io::Result<()> {
        match self.state {
            SessionState::Executing { ticket } if ticket == completion.ticket => {}
            _ => {
                tracing::debug!(ticket = completion.ticket, "discarding stale completion");
                return Ok(());
            }
        }

        match &completion.outcome {
            Ok(result) => tracing::info!(
                ticket = completion.ticket,
                exit_code = ?result.exit_code,
                duration_ms = result.duration_ms,
                "command finished"
            ),
            Err(err) => tracing::warn!(
                ticket = completion.ticket,
                status = ?err.status_code(),
                error = %err,
                "command failed"
            ),
        }

        render::render_outcome(&mut self.display, &completion.outcome)?;
        if let Ok(result) = &completion.outcome {
            if let Some(cwd) = result.new_cwd.as_deref().filter(|cwd| !cwd.is_empty()) {
                if cwd != self.current_directory {
                    tracing::debug!(from = %self.current_directory, to = %cwd, "cwd changed");
                    self.current_directory = cwd.to_string();
                }
            }
        }

        self.state = SessionState::Idle;
        self.display.write_line("")?;
        self.write_prompt()?;
        self.display.flush()
    }

    /// Wipe the display and replay the banner and prompt.
    pub fn clear(&mut self) -> io::Result<()> {
        self.display.clear()?;
        if self.options.banner {
            render::write_banner(&mut self.display)?;
        }
        if self.state == SessionState::Idle {
            self.write_prompt()?;
            self.display.write(&self.current_command)?;
        }
        self.display.flush()
    }

    /// Raw passthrough to the display.
    pub fn write(&mut self, text: &str) -> io::Result<()> {
        self.display.write(text)?;
        self.display.flush()
    }

    pub fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.display.write_line(text)?;
        self.display.flush()
    }

    /// Re-fit the display to its container; session state is untouched.
    pub fn resize(&mut self) -> io::Result<()> {
        self.display.fit()
    }

    pub fn current_directory(&self) -> &str {
        &self.current_directory
    }

    pub fn current_command(&self) -> &str {
        &self.current_command
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_executing(&self) -> bool {
        matches!(self.state, SessionState::Executing { .. })
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    fn handle_key_while_executing(&mut self, key: TerminalKey, ticket: u64) -> io::Result<Dispatch> {
        if key != TerminalKey::Interrupt {
            tracing::trace!(ticket, ?key, "dropping input while executing");
            return Ok(Dispatch::Nothing);
        }
        tracing::info!(ticket, "cancelling in-flight command");
        self.display.write_line(settings::INTERRUPT_ECHO)?;
        self.state = SessionState::Idle;
        self.current_command.clear();
        self.history.reset_recall();
        self.write_prompt()?;
        Ok(Dispatch::Cancel { ticket })
    }

    fn handle_key_idle(&mut self, key: TerminalKey) -> io::Result<Dispatch> {
        match key {
            TerminalKey::Char(ch) => {
                if !ch.is_control() {
                    self.append(&ch.to_string())?;
                }
            }
            TerminalKey::Paste(text) => self.append(&single_line(&text))?,
            TerminalKey::Backspace => {
                if self.current_command.pop().is_some() {
                    self.history.reset_recall();
                    self.display.write(settings::ERASE_ONE)?;
                }
            }
            TerminalKey::Enter => return self.enter(),
            TerminalKey::Interrupt => {
                self.display.write_line(settings::INTERRUPT_ECHO)?;
                self.current_command.clear();
                self.history.reset_recall();
                self.write_prompt()?;
            }
            TerminalKey::ClearScreen => self.clear()?,
            TerminalKey::HistoryUp => self.recall(true)?,
            TerminalKey::HistoryDown => self.recall(false)?,
            TerminalKey::Complete => self.complete()?,
            TerminalKey::EndOfInput => {
                if self.current_command.is_empty() {
                    self.display.write_line("")?;
                    return Ok(Dispatch::Exit);
                }
            }
        }
        Ok(Dispatch::Nothing)
    }

    fn append(&mut self, text: &str) -> io::Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        self.current_command.push_str(text);
        self.history.reset_recall();
        self.display.write(text)
    }

    fn enter(&mut self) -> io::Result<Dispatch> {
        self.display.write(settings::NEWLINE)?;
        let command = self.current_command.trim().to_string();
        self.current_command.clear();
        self.history.reset_recall();

        if command.is_empty() {
            self.write_prompt()?;
            return Ok(Dispatch::Nothing);
        }
        self.history.push(&command);

        if let Some(builtin) = builtins::lookup(&command) {
            tracing::debug!(?builtin, "running builtin");
            self.run_builtin(builtin)?;
            return Ok(Dispatch::Nothing);
        }
        Ok(self.dispatch_execution(command))
    }

    fn dispatch_execution(&mut self, command: String) -> Dispatch {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.state = SessionState::Executing { ticket };

        let project_id = self
            .project
            .current_project()
            .map(|p| p.id)
            .filter(|id| !id.is_empty());
        let request = ExecuteRequest {
            command,
            cwd: self.current_directory.clone(),
            project_id,
        };
        tracing::info!(ticket, command = %request.command, cwd = %request.cwd, "dispatching command");
        Dispatch::Execute(PendingExecution {
            ticket,
            request,
            executor: Arc::clone(&self.executor),
        })
    }

    fn run_builtin(&mut self, builtin: Builtin) -> io::Result<()> {
        match builtin {
            Builtin::Help => render::write_help(&mut self.display)?,
            Builtin::Clear => return self.clear(),
            Builtin::History => render::write_history(&mut self.display, &self.history)?,
            Builtin::Pwd => {
                let cwd = render::display_cwd(&self.current_directory).to_string();
                self.display.write_line(&cwd)?;
            }
        }
        self.write_prompt()
    }

    fn recall(&mut self, older: bool) -> io::Result<()> {
        let step = if older {
            self.history.recall_older()
        } else {
            self.history.recall_newer()
        };
        let Some(replacement) = step.map(str::to_string) else {
            return Ok(());
        };
        self.replace_buffer(&replacement)
    }

    fn complete(&mut self) -> io::Result<()> {
        match completion::complete(&self.current_command, &self.options.completions) {
            TabCompletion::NoMatch => Ok(()),
            TabCompletion::Unique { suffix } => self.append(&suffix),
            TabCompletion::Ambiguous(matches) => {
                self.display.write(settings::NEWLINE)?;
                self.display
                    .write_line(&matches.join(settings::COMPLETION_SEPARATOR))?;
                self.write_prompt()?;
                self.display.write(&self.current_command)
            }
        }
    }

    /// Erase exactly the visible buffer, then show `text` in its place.
    fn replace_buffer(&mut self, text: &str) -> io::Result<()> {
        let visible = self.current_command.chars().count();
        if visible > 0 {
            self.display.write(&settings::ERASE_ONE.repeat(visible))?;
        }
        self.current_command = text.to_string();
        if text.is_empty() {
            return Ok(());
        }
        self.display.write(text)
    }

    fn announce_project(&mut self) -> io::Result<()> {
        let Some(project) = self.project.current_project() else {
            return Ok(());
        };
        let directory = render::display_cwd(&self.current_directory).to_string();
        render::write_project_announcement(&mut self.display, &project.name, &directory)
    }

    fn write_prompt(&mut self) -> io::Result<()> {
        let project_name = self
            .project
            .current_project()
            .map(|p| p.name)
            .filter(|name| !name.is_empty());
        render::write_prompt(
            &mut self.display,
            project_name.as_deref(),
            &self.current_directory,
            &self.options.prompt_symbol,
        )
    }
}

/// Fold line breaks into spaces so the buffer stays a single line, and drop
/// other control characters the way typed input does.
fn single_line(text: &str) -> String {
    text.replace("\r\n", " ")
        .chars()
        .filter_map(|ch| match ch {
            '\r' | '\n' => Some(' '),
            ch if ch.is_control() => None,
            ch => Some(ch),
        })
        .collect()
}
