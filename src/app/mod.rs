//! Binary-local application wiring.
//!
//! `main.rs` resolves configuration; this module owns logging setup and the
//! tty loop that drives a terminal session.

pub(crate) mod logging;
pub(crate) mod repl_loop;
