//! Command handlers, one module per top-level subcommand.

pub mod completion;
pub mod config_cmd;
pub mod dashboard;
pub mod entity;
pub mod serve;

use crm_ui::notify::TerminalNotifier;
use crm_ui::{Notification, Notifier};

/// Routes page notifications for the CLI.
///
/// Successes go to the terminal (unless JSON output or quiet). Errors are
/// held back and turned into the command's error by [`CliNotifier::check`],
/// so they are reported once by `main`.
#[derive(Debug)]
pub struct CliNotifier {
    terminal: Option<TerminalNotifier>,
    error: Option<Notification>,
}

impl CliNotifier {
    pub fn new(json: bool, quiet: bool) -> Self {
        Self {
            terminal: (!json).then(|| TerminalNotifier::new(quiet)),
            error: None,
        }
    }

    /// Fails with the last error notification, if there was one.
    pub fn check(&mut self) -> anyhow::Result<()> {
        match self.error.take() {
            Some(n) => Err(anyhow::anyhow!(n.description)),
            None => Ok(()),
        }
    }
}

impl Notifier for CliNotifier {
    fn notify(&mut self, notification: Notification) {
        if notification.is_error() {
            self.error = Some(notification);
        } else if let Some(terminal) = &mut self.terminal {
            terminal.notify(notification);
        }
    }
}
