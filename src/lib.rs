//! ShellIDE terminal: a line-editing terminal pane that runs commands on a
//! remote backend.
//!
//! The [`terminal`] module holds the session state machine and everything it
//! draws; [`executor`] is the seam to whatever runs the commands.
//!
//! # Quick start
//!
//! ```no_run
//! use shellide::executor::HttpExecutor;
//! use shellide::project::SharedProject;
//! use shellide::terminal::{Dispatch, MemorySurface, SessionOptions, TerminalSession};
//! use std::sync::Arc;
//!
//! # async fn example() -> std::io::Result<()> {
//! let executor = Arc::new(HttpExecutor::with_timeout(
//!     "http://localhost:8000",
//!     "",
//!     std::time::Duration::from_secs(30),
//! ));
//! let mut session = TerminalSession::new(
//!     MemorySurface::new(),
//!     executor,
//!     Arc::new(SharedProject::default()),
//!     SessionOptions::default(),
//! );
//! session.start()?;
//! if let Dispatch::Execute(pending) = session.submit("ls -la")? {
//!     let completion = pending.run().await;
//!     session.finish(completion)?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod build_info;
pub mod config;
pub mod error;
pub mod executor;
pub mod project;
pub mod terminal;
#[cfg(test)]
pub mod testsupport;
