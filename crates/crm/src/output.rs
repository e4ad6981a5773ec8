//! Output helpers for the `crm` CLI: JSON, tables and panels.

use std::io::{self, Write};

use crm_core::Record;
use crm_ui::TableView;
use crm_ui::pager;
use crm_ui::styles::render_muted;
use serde::Serialize;
use serde_json::Value;

/// Print a value as pretty-printed JSON to stdout.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            // Ignore broken pipe errors (e.g., piped to `head`)
            let _ = writeln!(handle, "{}", json);
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// JSON array of records in their wire form.
pub fn records_json<'a, R: Record + 'a>(records: impl IntoIterator<Item = &'a R>) -> Value {
    Value::Array(records.into_iter().map(Record::to_value).collect())
}

/// Print a table view, through the pager when it is taller than the
/// terminal. Unless `quiet`, a hint for the create command follows.
pub fn output_table(view: &TableView, collection: &str, quiet: bool) -> io::Result<()> {
    let mut content = view.render();
    if let (Some(label), false) = (&view.create_label, quiet) {
        content.push_str("\n\n");
        content.push_str(&render_muted(&format!(
            "{label}: crm {collection} create -f key=value"
        )));
    }
    content.push('\n');
    pager::page(&content)
}

/// Print a rendered panel.
pub fn output_panel(panel: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let _ = writeln!(handle, "{}", panel);
}
