//! The record panel: one session at a time, opened in view, edit or create
//! mode, closed by submit, cancel or (view only) close.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelMode {
    View,
    Edit,
    Create,
}

impl PanelMode {
    pub fn as_str(self) -> &'static str {
        match self {
            PanelMode::View => "view",
            PanelMode::Edit => "edit",
            PanelMode::Create => "create",
        }
    }

    /// Edit and create panels carry a form that has to be submitted.
    pub fn is_editable(self) -> bool {
        !matches!(self, PanelMode::View)
    }

    /// Panel title for a record kind, e.g. `Edit Task`.
    pub fn title(self, label: &str) -> String {
        match self {
            PanelMode::View => format!("View {label}"),
            PanelMode::Edit => format!("Edit {label}"),
            PanelMode::Create => format!("Create {label}"),
        }
    }
}

impl fmt::Display for PanelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PanelError {
    #[error("{0} panel closes through submit or cancel")]
    SubmitRequired(PanelMode),

    #[error("no edit or create panel is open")]
    NothingToSubmit,
}

/// Panel state: closed, or open in one mode.
///
/// `record` is the row the panel was opened on; it is `None` for create.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelSession<R> {
    Closed,
    Open { mode: PanelMode, record: Option<R> },
}

impl<R> Default for PanelSession<R> {
    fn default() -> Self {
        PanelSession::Closed
    }
}

impl<R> PanelSession<R> {
    pub fn open_view(&mut self, record: R) {
        *self = PanelSession::Open {
            mode: PanelMode::View,
            record: Some(record),
        };
    }

    pub fn open_edit(&mut self, record: R) {
        *self = PanelSession::Open {
            mode: PanelMode::Edit,
            record: Some(record),
        };
    }

    pub fn open_create(&mut self) {
        *self = PanelSession::Open {
            mode: PanelMode::Create,
            record: None,
        };
    }

    pub fn is_open(&self) -> bool {
        matches!(self, PanelSession::Open { .. })
    }

    pub fn mode(&self) -> Option<PanelMode> {
        match self {
            PanelSession::Open { mode, .. } => Some(*mode),
            PanelSession::Closed => None,
        }
    }

    pub fn record(&self) -> Option<&R> {
        match self {
            PanelSession::Open { record, .. } => record.as_ref(),
            PanelSession::Closed => None,
        }
    }

    /// Closes a view panel. Edit and create panels refuse and stay open.
    pub fn close(&mut self) -> Result<(), PanelError> {
        match self.mode() {
            Some(mode) if mode.is_editable() => Err(PanelError::SubmitRequired(mode)),
            _ => {
                *self = PanelSession::Closed;
                Ok(())
            }
        }
    }

    /// Abandons the session in any mode without touching the API.
    pub fn cancel(&mut self) {
        *self = PanelSession::Closed;
    }

    /// Records the outcome of a submit. Success closes the panel; failure
    /// keeps it open with its record so the user can retry.
    pub fn finish_submit(&mut self, succeeded: bool) -> Result<(), PanelError> {
        match self.mode() {
            Some(mode) if mode.is_editable() => {
                if succeeded {
                    *self = PanelSession::Closed;
                }
                Ok(())
            }
            _ => Err(PanelError::NothingToSubmit),
        }
    }
}
