//! Ayu colour theme and styling functions for crm terminal output.
//!
//! Uses the Ayu Dark palette (<https://github.com/ayu-theme/ayu-colors>).
//! Only states that call for attention get colour: work in motion, wins and
//! losses, high priority. Everything else stays standard text.

use crm_core::enums::{ContactType, LeadStatus, ProjectStatus, TaskPriority, TaskStatus};
use owo_colors::OwoColorize;

use crate::terminal::supports_color;

// ---------------------------------------------------------------------------
// Ayu Dark colour palette (RGB values)
// ---------------------------------------------------------------------------

const PASS: (u8, u8, u8) = (0xc2, 0xd9, 0x4c); // #c2d94c bright green
const WARN: (u8, u8, u8) = (0xff, 0xb4, 0x54); // #ffb454 bright yellow
const FAIL: (u8, u8, u8) = (0xf0, 0x71, 0x78); // #f07178 bright red
const MUTED: (u8, u8, u8) = (0x6c, 0x76, 0x80); // #6c7680 muted gray
const ACCENT: (u8, u8, u8) = (0x59, 0xc2, 0xff); // #59c2ff bright blue

const ACTIVE: (u8, u8, u8) = (0xff, 0xb4, 0x54); // #ffb454 yellow
const REVIEW: (u8, u8, u8) = (0xd2, 0xa6, 0xff); // #d2a6ff purple
const DONE: (u8, u8, u8) = (0x80, 0x90, 0xa0); // #8090a0 dimmed
const HIGH: (u8, u8, u8) = (0xf0, 0x71, 0x78); // #f07178 bright red
const MEDIUM: (u8, u8, u8) = (0xe6, 0xb4, 0x50); // #e6b450 muted gold
const PARTNER: (u8, u8, u8) = (0x95, 0xe6, 0xcb); // #95e6cb teal

pub const ICON_PASS: &str = "\u{2713}"; // check mark
pub const ICON_FAIL: &str = "\u{2716}"; // heavy x

/// Filled and empty cells of a progress or distribution bar.
pub const BAR_FULL: &str = "\u{2588}";
pub const BAR_EMPTY: &str = "\u{2591}";

pub const SEPARATOR_LIGHT: &str = "\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}";

// ---------------------------------------------------------------------------
// Helper: apply truecolor only when colour is supported
// ---------------------------------------------------------------------------

fn color_str(s: &str, rgb: (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(rgb.0, rgb.1, rgb.2).to_string()
    } else {
        s.to_string()
    }
}

fn color_bold_str(s: &str, rgb: (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(rgb.0, rgb.1, rgb.2).bold().to_string()
    } else {
        s.to_string()
    }
}

// ---------------------------------------------------------------------------
// Core semantic render helpers
// ---------------------------------------------------------------------------

pub fn render_fail(s: &str) -> String {
    color_str(s, FAIL)
}

pub fn render_muted(s: &str) -> String {
    color_str(s, MUTED)
}

pub fn render_bold(s: &str) -> String {
    if supports_color() {
        s.bold().to_string()
    } else {
        s.to_string()
    }
}

/// Renders a section header in uppercase with accent colour and bold.
pub fn render_category(s: &str) -> String {
    color_bold_str(&s.to_uppercase(), ACCENT)
}

pub fn render_separator() -> String {
    render_muted(SEPARATOR_LIGHT)
}

pub fn render_pass_icon() -> String {
    color_str(ICON_PASS, PASS)
}

pub fn render_fail_icon() -> String {
    color_str(ICON_FAIL, FAIL)
}

// ---------------------------------------------------------------------------
// Enumerated field rendering
// ---------------------------------------------------------------------------

/// In Progress is yellow, Review purple, Completed dimmed.
pub fn render_task_status(status: &TaskStatus) -> String {
    let s = status.as_str();
    match status {
        TaskStatus::InProgress => color_str(s, ACTIVE),
        TaskStatus::Review => color_str(s, REVIEW),
        TaskStatus::Completed => color_str(s, DONE),
        _ => s.to_string(),
    }
}

/// High is bold red, Medium muted gold, Low neutral.
pub fn render_priority(priority: &TaskPriority) -> String {
    let s = priority.as_str();
    match priority {
        TaskPriority::High => color_bold_str(s, HIGH),
        TaskPriority::Medium => color_str(s, MEDIUM),
        _ => s.to_string(),
    }
}

pub fn render_lead_status(status: &LeadStatus) -> String {
    let s = status.as_str();
    match status {
        LeadStatus::Won => color_bold_str(s, PASS),
        LeadStatus::Lost => color_str(s, FAIL),
        LeadStatus::Proposal | LeadStatus::Negotiation => color_str(s, ACTIVE),
        _ => s.to_string(),
    }
}

pub fn render_project_status(status: &ProjectStatus) -> String {
    let s = status.as_str();
    match status {
        ProjectStatus::InProgress => color_str(s, ACTIVE),
        ProjectStatus::OnHold => color_str(s, WARN),
        ProjectStatus::Completed => color_str(s, DONE),
        ProjectStatus::Cancelled => color_str(s, FAIL),
        _ => s.to_string(),
    }
}

pub fn render_contact_type(contact_type: &ContactType) -> String {
    let s = contact_type.as_str();
    match contact_type {
        ContactType::Client => color_str(s, ACCENT),
        ContactType::Partner => color_str(s, PARTNER),
        _ => s.to_string(),
    }
}

/// Draws `value` out of `max` as a bar `width` cells wide.
///
/// A zero `max` draws an empty bar.
pub fn bar(value: f64, max: f64, width: usize) -> String {
    let filled = if max > 0.0 {
        ((value / max).clamp(0.0, 1.0) * width as f64).round() as usize
    } else {
        0
    };
    format!(
        "{}{}",
        BAR_FULL.repeat(filled),
        BAR_EMPTY.repeat(width - filled)
    )
}

/// Renders project progress as `bar pct%`, green once complete.
pub fn render_progress(progress: f64) -> String {
    let line = format!("{} {:>3.0}%", bar(progress, 100.0, 10), progress);
    if progress >= 100.0 {
        color_str(&line, PASS)
    } else {
        color_str(&line, ACCENT)
    }
}
