//! Terminal detection: TTY status, dimensions and colour support.

use std::env;

/// Returns `true` if stdout is connected to a terminal.
pub fn is_tty() -> bool {
    crossterm::tty::IsTty::is_tty(&std::io::stdout())
}

/// Terminal width in columns, 80 when it cannot be detected.
pub fn terminal_width() -> usize {
    crossterm::terminal::size()
        .map(|(cols, _rows)| cols as usize)
        .unwrap_or(80)
}

/// Terminal height in rows, or 0 if detection fails.
pub fn terminal_height() -> usize {
    crossterm::terminal::size()
        .map(|(_cols, rows)| rows as usize)
        .unwrap_or(0)
}

/// Determines if ANSI colour codes should be used.
///
/// - `NO_COLOR` (any value) disables colour (<https://no-color.org/>)
/// - `CLICOLOR=0` disables colour
/// - `TERM=dumb` disables colour
/// - `CLICOLOR_FORCE` (any value) forces colour even when piped
/// - otherwise colour follows TTY detection
pub fn supports_color() -> bool {
    color_decision(
        env::var_os("NO_COLOR").is_some(),
        env::var("CLICOLOR").ok().as_deref(),
        env::var("TERM").ok().as_deref(),
        env::var_os("CLICOLOR_FORCE").is_some(),
    )
    .unwrap_or_else(is_tty)
}

fn color_decision(
    no_color: bool,
    clicolor: Option<&str>,
    term: Option<&str>,
    force: bool,
) -> Option<bool> {
    if no_color || clicolor == Some("0") || term == Some("dumb") {
        return Some(false);
    }
    if force {
        return Some(true);
    }
    None
}
