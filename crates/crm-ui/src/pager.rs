//! Pages long listings through `less -RFX` (or `$CRM_PAGER` / `$PAGER`)
//! when they would scroll off the terminal.

use std::env;
use std::io::{self, Write};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::terminal::{is_tty, terminal_height};

/// Returns `true` if `content` is taller than the terminal.
///
/// Never pages when `CRM_NO_PAGER` is set, stdout is not a TTY, or the
/// terminal height is unknown.
pub fn should_page(content: &str) -> bool {
    if env::var_os("CRM_NO_PAGER").is_some() || !is_tty() {
        return false;
    }
    fits(content, terminal_height()).is_some_and(|fits| !fits)
}

/// `None` when the height is unknown. One row is kept for the prompt.
fn fits(content: &str, height: usize) -> Option<bool> {
    if height == 0 {
        return None;
    }
    Some(content.lines().count() <= height.saturating_sub(1))
}

/// Writes `content` to stdout, through a pager when it would not fit.
///
/// Falls back to plain output if the pager cannot be started. Broken pipes
/// (the user quit the pager early) are not errors.
pub fn page(content: &str) -> io::Result<()> {
    if !should_page(content) {
        return print_direct(content);
    }

    let command = pager_command(
        env::var("CRM_PAGER").ok().as_deref(),
        env::var("PAGER").ok().as_deref(),
    );
    let mut parts = command.split_whitespace();
    let Some(program) = parts.next() else {
        return print_direct(content);
    };

    let mut cmd = Command::new(program);
    cmd.args(parts)
        .stdin(Stdio::piped())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    if env::var_os("LESS").is_none() {
        cmd.env("LESS", "-RFX");
    }

    match cmd.spawn() {
        Ok(mut child) => {
            if let Some(mut stdin) = child.stdin.take() {
                let _ = stdin.write_all(content.as_bytes());
            }
            child.wait()?;
            Ok(())
        }
        Err(e) => {
            debug!(error = %e, pager = %command, "pager failed to start");
            print_direct(content)
        }
    }
}

fn print_direct(content: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    match out.write_all(content.as_bytes()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

/// `CRM_PAGER`, then `PAGER`, then `less`. Blank values are skipped.
fn pager_command(crm_pager: Option<&str>, pager: Option<&str>) -> String {
    [crm_pager, pager]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|p| !p.is_empty())
        .unwrap_or("less")
        .to_string()
}
