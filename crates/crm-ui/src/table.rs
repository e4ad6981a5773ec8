//! [`RecordTable`] -- the generic, searchable record table.
//!
//! A table is configured once per record type with a list of [`Column`]s
//! and renders any slice of records into a [`TableView`]. It keeps only
//! table-local state: the search query and the open panel. The record list
//! itself belongs to the caller.

use std::fmt;

use crm_core::Record;
use crm_core::fields::lookup;
use serde::Serialize;
use serde_json::Value;

use crate::panel::{PanelMode, PanelSession};

/// Placeholder row text when no record matches.
pub const NO_RESULTS: &str = "No results.";

/// Label of the create action unless the page picks its own.
pub const DEFAULT_CREATE_LABEL: &str = "Create New";

/// Header of the trailing actions column. Its cells carry the record id,
/// which is what the show, update and delete commands act on.
pub const ACTIONS_HEADER: &str = "ID";

/// Custom cell renderer for one column.
pub type CellRenderer<R> = Box<dyn Fn(&R) -> String + Send + Sync>;

/// Renders the panel body for a mode and the record it was opened on.
pub type PanelProducer<R> = Box<dyn Fn(PanelMode, Option<&R>) -> String + Send + Sync>;

/// One displayed column: where the value comes from and how it looks.
pub struct Column<R> {
    accessor: String,
    header: String,
    render: Option<CellRenderer<R>>,
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("accessor", &self.accessor)
            .field("header", &self.header)
            .field("custom_render", &self.render.is_some())
            .finish()
    }
}

impl<R: Record> Column<R> {
    /// A column reading `accessor`, a field key or a dotted path such as
    /// `relatedTo.type`.
    pub fn new(accessor: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            accessor: accessor.into(),
            header: header.into(),
            render: None,
        }
    }

    /// Replaces the default cell text with `render(row)`.
    pub fn render(mut self, render: impl Fn(&R) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Box::new(render));
        self
    }

    pub fn accessor(&self) -> &str {
        &self.accessor
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    fn cell(&self, row: &R, value: &Value) -> String {
        match &self.render {
            Some(render) => render(row),
            None => display_value(lookup(value, &self.accessor)),
        }
    }
}

/// Default cell text for a raw JSON value.
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.is_finite() => format!("{f:.0}"),
            _ => n.to_string(),
        },
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| display_value(Some(v)))
            .collect::<Vec<_>>()
            .join(", "),
        Some(other @ Value::Object(_)) => other.to_string(),
    }
}

/// Receives the row actions a table does not handle itself.
///
/// Both methods default to "not supplied".
pub trait RowHandler<R> {
    /// Custom row click. Returns `true` when handled, in which case the
    /// table does not open its view panel.
    fn row_clicked(&mut self, _row: &R) -> bool {
        false
    }

    fn delete_requested(&mut self, _row: &R) {}
}

/// A handler that supplies nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHandler;

impl<R> RowHandler<R> for NoHandler {}

/// Placeholder row spanning the whole table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placeholder {
    pub text: String,
    pub colspan: usize,
}

/// Rendering-independent table output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<Placeholder>,
    /// Present when the table can open a create panel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_label: Option<String>,
}

impl TableView {
    /// Aligned plain-text rendering: header, dashed separator, rows.
    ///
    /// Columns are separated by two spaces; trailing padding is trimmed.
    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(cell.chars().count());
                }
            }
        }

        let line = |cells: &[String]| -> String {
            let mut out = String::new();
            for (i, cell) in cells.iter().enumerate() {
                if i > 0 {
                    out.push_str("  ");
                }
                let width = widths.get(i).copied().unwrap_or(0);
                out.push_str(cell);
                out.push_str(&" ".repeat(width.saturating_sub(cell.chars().count())));
            }
            out.trim_end().to_string()
        };

        let mut lines = vec![line(&self.headers)];
        lines.push(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("  "),
        );
        match &self.placeholder {
            Some(placeholder) => lines.push(placeholder.text.clone()),
            None => lines.extend(self.rows.iter().map(|row| line(row))),
        }
        lines.join("\n")
    }
}

/// Generic record table for records of type `R`.
pub struct RecordTable<R> {
    columns: Vec<Column<R>>,
    query: String,
    panel: PanelSession<R>,
    panel_producer: Option<PanelProducer<R>>,
    hide_actions: bool,
    create_label: String,
}

impl<R: fmt::Debug> fmt::Debug for RecordTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordTable")
            .field("columns", &self.columns)
            .field("query", &self.query)
            .field("panel", &self.panel)
            .field("hide_actions", &self.hide_actions)
            .field("create_label", &self.create_label)
            .finish_non_exhaustive()
    }
}

impl<R: Record> RecordTable<R> {
    pub fn new(columns: Vec<Column<R>>) -> Self {
        Self {
            columns,
            query: String::new(),
            panel: PanelSession::Closed,
            panel_producer: None,
            hide_actions: false,
            create_label: DEFAULT_CREATE_LABEL.to_string(),
        }
    }

    /// Enables the view/edit/create panel, rendered by `producer`.
    pub fn with_panel(
        mut self,
        producer: impl Fn(PanelMode, Option<&R>) -> String + Send + Sync + 'static,
    ) -> Self {
        self.panel_producer = Some(Box::new(producer));
        self
    }

    pub fn hide_actions(mut self, hide: bool) -> Self {
        self.hide_actions = hide;
        self
    }

    pub fn create_label(mut self, label: impl Into<String>) -> Self {
        self.create_label = label.into();
        self
    }

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Case-insensitive substring match over the string values of the
    /// displayed columns. An empty query matches everything.
    pub fn matches(&self, row: &R) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        let value = row.to_value();
        self.columns.iter().any(|col| {
            matches!(
                lookup(&value, col.accessor()),
                Some(Value::String(s)) if s.to_lowercase().contains(&needle)
            )
        })
    }

    /// The rows matching the current query, in their original order.
    pub fn filter<'a>(&self, rows: &'a [R]) -> Vec<&'a R> {
        rows.iter().filter(|row| self.matches(row)).collect()
    }

    // -- Row actions ----------------------------------------------------------

    /// A custom handler takes the click; otherwise the view panel opens.
    pub fn click_row(&mut self, row: &R, handler: &mut dyn RowHandler<R>) {
        if handler.row_clicked(row) {
            return;
        }
        if self.panel_producer.is_some() {
            self.panel.open_view(row.clone());
        }
    }

    /// Opens an empty create panel. Returns `false` if the table has none.
    pub fn open_create(&mut self) -> bool {
        if self.panel_producer.is_none() {
            return false;
        }
        self.panel.open_create();
        true
    }

    /// Opens the edit panel on `row` without going through the row click.
    pub fn open_edit(&mut self, row: &R) -> bool {
        if self.panel_producer.is_none() {
            return false;
        }
        self.panel.open_edit(row.clone());
        true
    }

    /// Passes `row` straight to the delete handler.
    pub fn delete(&self, row: &R, handler: &mut dyn RowHandler<R>) {
        handler.delete_requested(row);
    }

    pub fn panel(&self) -> &PanelSession<R> {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut PanelSession<R> {
        &mut self.panel
    }

    /// Renders the open panel, if any.
    pub fn render_panel(&self) -> Option<String> {
        let producer = self.panel_producer.as_ref()?;
        let mode = self.panel.mode()?;
        Some(producer(mode, self.panel.record()))
    }

    // -- Rendering ------------------------------------------------------------

    /// Headers and cell text for the rows matching the current query.
    pub fn view(&self, rows: &[R]) -> TableView {
        let mut headers: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();
        if !self.hide_actions {
            headers.push(ACTIONS_HEADER.to_string());
        }

        let visible = self.filter(rows);
        let placeholder = visible.is_empty().then(|| Placeholder {
            text: NO_RESULTS.to_string(),
            colspan: self.columns.len() + usize::from(!self.hide_actions),
        });

        let rows = visible
            .into_iter()
            .map(|row| {
                let value = row.to_value();
                let mut cells: Vec<String> =
                    self.columns.iter().map(|c| c.cell(row, &value)).collect();
                if !self.hide_actions {
                    cells.push(row.id().to_string());
                }
                cells
            })
            .collect();

        TableView {
            headers,
            rows,
            placeholder,
            create_label: self
                .panel_producer
                .as_ref()
                .map(|_| self.create_label.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_core::enums::TaskStatus;
    use crm_core::fields::into_fields;
    use crm_core::{RecordMeta, Task};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn task(id: &str, body: Value) -> Task {
        let mut task = Task::from_fields(into_fields(body).unwrap()).unwrap();
        task.meta = RecordMeta {
            id: id.to_string(),
            ..RecordMeta::default()
        };
        task
    }

    fn rows() -> Vec<Task> {
        vec![
            task("t1", json!({"title": "Call Acme", "assignedTo": "Ann"})),
            task(
                "t2",
                json!({"title": "Send proposal", "status": "In Progress",
                       "relatedTo": {"type": "Lead", "id": "l9"}}),
            ),
            task("t3", json!({"title": "Invoice", "description": "acme billing"})),
        ]
    }

    fn columns() -> Vec<Column<Task>> {
        vec![
            Column::new("title", "Title"),
            Column::new("status", "Status"),
            Column::new("assignedTo", "Assigned To"),
        ]
    }

    #[derive(Default)]
    struct Recorder {
        clicked: Vec<String>,
        deleted: Vec<String>,
        take_clicks: bool,
    }

    impl RowHandler<Task> for Recorder {
        fn row_clicked(&mut self, row: &Task) -> bool {
            self.clicked.push(row.id().to_string());
            self.take_clicks
        }

        fn delete_requested(&mut self, row: &Task) {
            self.deleted.push(row.id().to_string());
        }
    }

    fn panel_text(mode: PanelMode, row: Option<&Task>) -> String {
        format!("{mode}:{}", row.map(|t| t.title.as_str()).unwrap_or("-"))
    }

    #[test]
    fn search_is_case_insensitive_over_displayed_columns() {
        let mut table = RecordTable::new(columns());
        let rows = rows();

        table.set_query("ACME");
        let ids: Vec<_> = table.filter(&rows).iter().map(|t| t.id()).collect();
        // t3 mentions acme only in its description, which is not displayed.
        assert_eq!(ids, vec!["t1"]);

        table.set_query("ann");
        assert_eq!(table.filter(&rows).len(), 1);

        table.set_query("");
        assert_eq!(table.filter(&rows).len(), 3);
    }

    #[test]
    fn search_follows_dotted_accessors() {
        let mut cols = columns();
        cols.push(Column::new("relatedTo.type", "Related"));
        let mut table = RecordTable::new(cols);
        table.set_query("lead");
        let rows = rows();
        let hits = table.filter(&rows);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id(), "t2");
    }

    #[test]
    fn custom_renderer_replaces_default_cell() {
        let table = RecordTable::new(vec![
            Column::new("title", "Title"),
            Column::new("status", "Status").render(|t: &Task| {
                if t.status == TaskStatus::New {
                    "*new*".into()
                } else {
                    t.status.to_string()
                }
            }),
        ])
        .hide_actions(true);
        let view = table.view(&rows());
        assert_eq!(view.rows[0], vec!["Call Acme", "*new*"]);
        assert_eq!(view.rows[1], vec!["Send proposal", "In Progress"]);
    }

    #[test]
    fn no_results_spans_columns_plus_actions() {
        let mut table = RecordTable::new(columns());
        table.set_query("zzz");
        let view = table.view(&rows());
        assert!(view.rows.is_empty());
        assert_eq!(
            view.placeholder,
            Some(Placeholder {
                text: NO_RESULTS.into(),
                colspan: 4
            })
        );

        let table = RecordTable::new(columns()).hide_actions(true);
        let view = table.view(&[]);
        assert_eq!(view.placeholder.unwrap().colspan, 3);
        assert_eq!(view.headers, vec!["Title", "Status", "Assigned To"]);
    }

    #[test]
    fn row_click_opens_view_panel() {
        let mut table = RecordTable::new(columns()).with_panel(panel_text);
        let rows = rows();
        let mut handler = NoHandler;
        table.click_row(&rows[0], &mut handler);
        assert_eq!(table.panel().mode(), Some(PanelMode::View));
        assert_eq!(table.render_panel().unwrap(), "view:Call Acme");
    }

    #[test]
    fn custom_row_click_suppresses_panel() {
        let mut table = RecordTable::new(columns()).with_panel(panel_text);
        let rows = rows();
        let mut handler = Recorder {
            take_clicks: true,
            ..Recorder::default()
        };
        table.click_row(&rows[1], &mut handler);
        assert_eq!(handler.clicked, vec!["t2"]);
        assert!(!table.panel().is_open());
    }

    #[test]
    fn edit_does_not_trigger_row_click() {
        let mut table = RecordTable::new(columns()).with_panel(panel_text);
        let rows = rows();
        assert!(table.open_edit(&rows[2]));
        assert_eq!(table.panel().mode(), Some(PanelMode::Edit));
        assert_eq!(table.panel().record().unwrap().id(), "t3");
        assert_eq!(table.render_panel().unwrap(), "edit:Invoice");
    }

    #[test]
    fn create_opens_empty_panel() {
        let mut table = RecordTable::<Task>::new(columns());
        assert!(!table.open_create());
        assert_eq!(table.view(&[]).create_label, None);

        let mut table = table.with_panel(panel_text).create_label("Add Task");
        assert!(table.open_create());
        assert_eq!(table.panel().record(), None);
        assert_eq!(table.render_panel().unwrap(), "create:-");
        assert_eq!(table.view(&[]).create_label.as_deref(), Some("Add Task"));
    }

    #[test]
    fn default_create_label() {
        let table = RecordTable::<Task>::new(columns()).with_panel(panel_text);
        assert_eq!(table.view(&[]).create_label.as_deref(), Some("Create New"));
    }

    #[test]
    fn delete_goes_to_handler_only() {
        let mut table = RecordTable::new(columns()).with_panel(panel_text);
        let rows = rows();
        table.open_edit(&rows[0]);
        let mut handler = Recorder::default();
        table.delete(&rows[1], &mut handler);
        assert_eq!(handler.deleted, vec!["t2"]);
        assert!(handler.clicked.is_empty());
        assert_eq!(table.panel().record().unwrap().id(), "t1");
    }

    #[test]
    fn display_values() {
        assert_eq!(display_value(Some(&json!(5000))), "5000");
        assert_eq!(display_value(Some(&json!(5000.0))), "5000");
        assert_eq!(display_value(Some(&json!(12.5))), "12.5");
        assert_eq!(display_value(Some(&json!(["a", "b"]))), "a, b");
        assert_eq!(display_value(Some(&Value::Null)), "");
        assert_eq!(display_value(None), "");
    }

    #[test]
    fn rendered_table() {
        let table = RecordTable::new(columns());
        insta::assert_snapshot!(table.view(&rows()).render(), @r"
        Title          Status       Assigned To  ID
        -------------  -----------  -----------  --
        Call Acme      New          Ann          t1
        Send proposal  In Progress               t2
        Invoice        New                       t3
        ");
    }

    #[test]
    fn rendered_placeholder() {
        let mut table = RecordTable::new(columns());
        table.set_query("nothing matches");
        insta::assert_snapshot!(table.view(&rows()).render(), @r"
        Title  Status  Assigned To  ID
        -----  ------  -----------  --
        No results.
        ");
    }
}
