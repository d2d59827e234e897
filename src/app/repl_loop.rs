//! Interactive tty driver for one terminal session.
//!
//! A reader thread polls crossterm and forwards events over a channel; the
//! async loop feeds them to the session and runs at most one execution task,
//! aborting it when the session reports a cancel.

use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event};
use crossterm::{execute, terminal};
use shellide::config::Config;
use shellide::executor::{CommandExecutor, HttpExecutor};
use shellide::project::SharedProject;
use shellide::terminal::completion::default_completions;
use shellide::terminal::{
    settings, translate_event, Completion, ConsoleSurface, Dispatch, DisplaySurface, InputEvent,
    SessionOptions, TerminalSession,
};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Run the pane on the controlling terminal until the user closes it.
pub(crate) async fn run_terminal(config: &Config) -> io::Result<()> {
    let executor: Arc<dyn CommandExecutor> = Arc::new(HttpExecutor::new(&config.backend));
    let project = Arc::new(SharedProject::new(config.project_ref()));
    let surface = ConsoleSurface::stdout(config.display.color);
    let mut session = TerminalSession::new(surface, executor, project, session_options(config));

    let _guard = TerminalModeGuard::acquire()?;
    let stop = Arc::new(AtomicBool::new(false));
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let reader = spawn_event_reader(event_tx, Arc::clone(&stop));

    let result = match session.start() {
        Ok(()) => drive_session(&mut session, event_rx, &config.terminal.quick_commands).await,
        Err(e) => Err(e),
    };

    stop.store(true, Ordering::Relaxed);
    let _ = reader.join();
    result
}

pub(crate) fn session_options(config: &Config) -> SessionOptions {
    let completions = if config.terminal.completions.is_empty() {
        default_completions()
    } else {
        config.terminal.completions.clone()
    };
    SessionOptions {
        prompt_symbol: config.terminal.prompt_symbol.clone(),
        history_limit: config.terminal.history_limit,
        banner: config.terminal.banner,
        completions,
        initial_cwd: config.terminal.working_directory.clone(),
    }
}

struct InFlight {
    ticket: u64,
    handle: JoinHandle<()>,
}

/// Feed events to the session until input ends or the session exits.
pub(crate) async fn drive_session<D: DisplaySurface>(
    session: &mut TerminalSession<D>,
    mut events: mpsc::UnboundedReceiver<io::Result<Event>>,
    quick_commands: &[String],
) -> io::Result<()> {
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Completion>();
    let mut in_flight: Option<InFlight> = None;

    let outcome = loop {
        tokio::select! {
            Some(completion) = done_rx.recv() => {
                if in_flight.as_ref().is_some_and(|job| job.ticket == completion.ticket) {
                    in_flight = None;
                }
                if let Err(e) = session.finish(completion) {
                    break Err(e);
                }
            }
            event = events.recv() => {
                let event = match event {
                    Some(Ok(event)) => event,
                    Some(Err(e)) => break Err(e),
                    None => break Ok(()),
                };
                let dispatch = match dispatch_event(session, &event, quick_commands) {
                    Ok(dispatch) => dispatch,
                    Err(e) => break Err(e),
                };
                match dispatch {
                    Dispatch::Nothing => {}
                    Dispatch::Execute(pending) => {
                        let ticket = pending.ticket();
                        let tx = done_tx.clone();
                        let handle = tokio::spawn(async move {
                            let _ = tx.send(pending.run().await);
                        });
                        in_flight = Some(InFlight { ticket, handle });
                    }
                    Dispatch::Cancel { ticket } => {
                        if let Some(job) = in_flight.take() {
                            if job.ticket == ticket {
                                job.handle.abort();
                            } else {
                                in_flight = Some(job);
                            }
                        }
                    }
                    Dispatch::Exit => break Ok(()),
                }
            }
        }
    };

    if let Some(job) = in_flight.take() {
        job.handle.abort();
    }
    outcome
}

fn dispatch_event<D: DisplaySurface>(
    session: &mut TerminalSession<D>,
    event: &Event,
    quick_commands: &[String],
) -> io::Result<Dispatch> {
    match translate_event(event) {
        InputEvent::Key(key) => session.handle_key(key),
        InputEvent::QuickCommand(slot) => {
            let command = quick_commands
                .get(slot)
                .map(|c| c.trim())
                .filter(|c| !c.is_empty());
            match command {
                Some(command) => session.submit(command),
                None => Ok(Dispatch::Nothing),
            }
        }
        InputEvent::Resize => {
            session.resize()?;
            Ok(Dispatch::Nothing)
        }
        InputEvent::Ignored => Ok(Dispatch::Nothing),
    }
}

fn spawn_event_reader(
    tx: mpsc::UnboundedSender<io::Result<Event>>,
    stop: Arc<AtomicBool>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while !stop.load(Ordering::Relaxed) {
            match event::poll(Duration::from_millis(settings::REPL_EVENT_POLL_MS)) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => {
                    let _ = tx.send(Err(e));
                    return;
                }
            }
            let read = event::read();
            let failed = read.is_err();
            if tx.send(read).is_err() || failed {
                return;
            }
        }
    })
}

/// Raw mode plus bracketed paste for the lifetime of the pane.
struct TerminalModeGuard;

impl TerminalModeGuard {
    fn acquire() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), EnableBracketedPaste) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), DisableBracketedPaste);
        let _ = terminal::disable_raw_mode();
    }
}
