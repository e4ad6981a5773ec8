//! Transient user notifications ("toasts").

use crm_core::EntityKind;
use serde::Serialize;

use crate::styles::{render_fail, render_fail_icon, render_pass_icon};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Error,
}

/// The page action a notification reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Load,
    Create,
    Update,
    Delete,
}

impl Action {
    fn verb(self) -> &'static str {
        match self {
            Action::Load => "load",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }

    fn past(self) -> &'static str {
        match self {
            Action::Load => "loaded",
            Action::Create => "created",
            Action::Update => "updated",
            Action::Delete => "deleted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: Level,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            title: "Success".to_string(),
            description: description.into(),
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            title: "Error".to_string(),
            description: description.into(),
        }
    }

    /// `Contact created successfully`
    pub fn succeeded(action: Action, kind: EntityKind) -> Self {
        Self::success(format!("{} {} successfully", kind.label(), action.past()))
    }

    /// `Failed to create contact. Please try again.`
    ///
    /// Loads name the plural and ask to retry later.
    pub fn failed(action: Action, kind: EntityKind) -> Self {
        match action {
            Action::Load => Self::error(format!(
                "Failed to load {}. Please try again later.",
                kind.plural().to_lowercase()
            )),
            _ => Self::error(format!(
                "Failed to {} {}. Please try again.",
                action.verb(),
                kind.label().to_lowercase()
            )),
        }
    }

    pub fn dashboard_failed() -> Self {
        Self::error("Failed to load dashboard data. Please try again later.")
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

/// Sink for notifications.
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
    fn notify(&mut self, notification: Notification) {
        (**self).notify(notification);
    }
}

/// Keeps every notification in memory.
#[derive(Debug, Default, Clone)]
pub struct CollectingNotifier {
    notifications: Vec<Notification>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn errors(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter().filter(|n| n.is_error())
    }

    pub fn take(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }
}

/// Prints notifications to stderr. Quiet mode drops successes.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier {
    quiet: bool,
}

impl TerminalNotifier {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

/// One-line terminal form of a notification.
pub fn format_notification(notification: &Notification) -> String {
    match notification.level {
        Level::Success => format!("{} {}", render_pass_icon(), notification.description),
        Level::Error => format!(
            "{} {}",
            render_fail_icon(),
            render_fail(&notification.description)
        ),
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&mut self, notification: Notification) {
        if self.quiet && !notification.is_error() {
            return;
        }
        eprintln!("{}", format_notification(&notification));
    }
}
