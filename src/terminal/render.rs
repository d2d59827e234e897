//! Rendering of prompts, banners, builtin output and execution results.

use crate::build_info;
use crate::error::ExecuteError;
use crate::executor::ExecuteResult;
use crate::terminal::builtins::{BUILTINS, SHORTCUTS};
use crate::terminal::display::{DisplaySurface, Tone};
use crate::terminal::history::CommandHistory;
use crate::terminal::settings;
use std::io;

/// Plain-text prompt, matching what [`write_prompt`] draws.
pub fn prompt_text(project_name: Option<&str>, cwd: &str, symbol: &str) -> String {
    let mut out = String::new();
    if let Some(name) = project_name {
        out.push_str(name);
        out.push_str(settings::PROMPT_PROJECT_SEPARATOR);
    }
    out.push_str(display_cwd(cwd));
    out.push_str(settings::PROMPT_SPACER);
    out.push_str(symbol);
    out.push_str(settings::PROMPT_SPACER);
    out
}

pub(crate) fn write_prompt<D: DisplaySurface>(
    display: &mut D,
    project_name: Option<&str>,
    cwd: &str,
    symbol: &str,
) -> io::Result<()> {
    if let Some(name) = project_name {
        display.write_styled(name, Tone::Accent)?;
        display.write(settings::PROMPT_PROJECT_SEPARATOR)?;
    }
    display.write_styled(display_cwd(cwd), Tone::Success)?;
    display.write(settings::PROMPT_SPACER)?;
    display.write(symbol)?;
    display.write(settings::PROMPT_SPACER)
}

pub(crate) fn display_cwd(cwd: &str) -> &str {
    if cwd.is_empty() {
        settings::PROMPT_HOME
    } else {
        cwd
    }
}

pub(crate) fn write_banner<D: DisplaySurface>(display: &mut D) -> io::Result<()> {
    for row in settings::BANNER_BOX {
        display.write_line_styled(row, Tone::Accent)?;
    }
    display.write_line_styled(&build_info::startup_metadata_line(), Tone::Muted)?;
    display.write_line("")?;
    display.write_line_styled(settings::BANNER_WELCOME, Tone::Success)?;
    display.write_line_styled(settings::BANNER_HINT, Tone::Muted)?;
    display.write_line("")
}

pub(crate) fn write_project_announcement<D: DisplaySurface>(
    display: &mut D,
    name: &str,
    directory: &str,
) -> io::Result<()> {
    display.write_line_styled(
        &format!("{} Project: {name}", settings::GLYPH_SUCCESS),
        Tone::Success,
    )?;
    display.write_line_styled(&format!("Working directory: {directory}"), Tone::Accent)
}

pub(crate) fn write_help<D: DisplaySurface>(display: &mut D) -> io::Result<()> {
    display.write_line_styled("ShellIDE Terminal Help", Tone::Heading)?;
    display.write_line("")?;
    display.write_line_styled("Built-in Commands:", Tone::Success)?;
    for spec in BUILTINS {
        display.write_line(&format!("  {:<9} - {}", spec.name, spec.description))?;
    }
    display.write_line("")?;
    display.write_line_styled("Keyboard Shortcuts:", Tone::Success)?;
    for (keys, description) in SHORTCUTS {
        display.write_line(&format!("  {keys:<9} - {description}"))?;
    }
    display.write_line("")?;
    display.write_line_styled(
        "Anything else runs on the backend in the project directory.",
        Tone::Muted,
    )
}

pub(crate) fn write_history<D: DisplaySurface>(
    display: &mut D,
    history: &CommandHistory,
) -> io::Result<()> {
    if history.is_empty() {
        return display.write_line("No command history");
    }
    for (idx, entry) in history.iter().enumerate() {
        display.write_line(&format!("{}: {entry}", idx + 1))?;
    }
    Ok(())
}

/// Write captured output line by line, dropping the empty piece after a
/// trailing newline.
pub(crate) fn write_output_lines<D: DisplaySurface>(
    display: &mut D,
    text: &str,
    tone: Tone,
) -> io::Result<()> {
    for line in output_lines(text) {
        display.write_line_styled(line, tone)?;
    }
    Ok(())
}

fn output_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}

/// Summary line for a completed command, when it reported an exit code.
pub fn status_line(result: &ExecuteResult) -> Option<(String, Tone)> {
    let code = result.exit_code?;
    Some(if code == 0 {
        (
            format!(
                "{} Command completed successfully ({}ms)",
                settings::GLYPH_SUCCESS,
                result.duration_ms
            ),
            Tone::Success,
        )
    } else {
        (
            format!(
                "{} Command failed with exit code {code} ({}ms)",
                settings::GLYPH_FAILURE,
                result.duration_ms
            ),
            Tone::Error,
        )
    })
}

/// Render stdout, stderr and the status or transport-error line.
pub(crate) fn render_outcome<D: DisplaySurface>(
    display: &mut D,
    outcome: &Result<ExecuteResult, ExecuteError>,
) -> io::Result<()> {
    match outcome {
        Ok(result) => {
            write_output_lines(display, &result.stdout, Tone::Plain)?;
            write_output_lines(display, &result.stderr, Tone::Error)?;
            if let Some((line, tone)) = status_line(result) {
                display.write_line_styled(&line, tone)?;
            }
            Ok(())
        }
        Err(err) => {
            display.write_line_styled(&format!("{}{err}", settings::ERROR_PREFIX), Tone::Error)
        }
    }
}
