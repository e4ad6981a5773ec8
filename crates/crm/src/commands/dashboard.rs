//! `crm dashboard` -- headline counts and status distributions.

use anyhow::Result;
use crm_ui::terminal::terminal_width;
use crm_ui::{DashboardSummary, load_dashboard};

use crate::commands::CliNotifier;
use crate::context::RuntimeContext;
use crate::output::{output_json, output_panel};

/// Width of the label, count and padding around each bar.
const BAR_CHROME: usize = 20;

/// Execute the `crm dashboard` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let mut notifier = CliNotifier::new(ctx.json, ctx.quiet);
    let Some(lists) = load_dashboard(&ctx.client(), &mut notifier) else {
        return notifier.check();
    };

    let summary = DashboardSummary::from_lists(&lists);
    if ctx.json {
        output_json(&summary);
    } else {
        let width = terminal_width().saturating_sub(BAR_CHROME).clamp(10, 40);
        output_panel(&summary.render(width));
    }
    Ok(())
}
