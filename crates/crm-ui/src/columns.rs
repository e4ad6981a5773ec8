//! Column layout of each entity's table.

use chrono::{DateTime, Utc};
use crm_core::datetime::format_date;
use crm_core::{Contact, Lead, Project, Task};

use crate::form::FormSpec;
use crate::store::Listed;
use crate::table::{Column, RecordTable};

/// A record type with a table layout of its own.
pub trait EntityView: Listed {
    fn columns() -> Vec<Column<Self>>;
}

/// The table of `R` with its form as the panel.
pub fn record_table<R: EntityView>() -> RecordTable<R> {
    let form = FormSpec::for_kind(R::KIND);
    RecordTable::new(R::columns()).with_panel(move |mode, record| form.render(mode, record))
}

fn date_cell(date: Option<&DateTime<Utc>>) -> String {
    date.map(format_date).unwrap_or_else(|| "-".to_string())
}

/// `$1,234.5` style amounts, at most two decimals.
pub fn format_money(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    match cents % 100 {
        0 => format!("{sign}${grouped}"),
        rem => {
            let decimals = format!("{rem:02}");
            format!("{sign}${grouped}.{}", decimals.trim_end_matches('0'))
        }
    }
}

impl EntityView for Task {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("title", "Title"),
            Column::new("status", "Status"),
            Column::new("priority", "Priority"),
            Column::new("dueDate", "Due Date").render(|t: &Task| date_cell(t.due_date.as_ref())),
            Column::new("assignedTo", "Assigned To"),
        ]
    }
}

impl EntityView for Lead {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("name", "Name"),
            Column::new("company", "Company"),
            Column::new("email", "Email"),
            Column::new("status", "Status"),
            Column::new("source", "Source"),
            Column::new("value", "Value").render(|l: &Lead| match l.value {
                Some(v) if v != 0.0 => format_money(v),
                _ => "-".to_string(),
            }),
        ]
    }
}

impl EntityView for Project {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("name", "Name"),
            Column::new("status", "Status"),
            Column::new("client", "Client"),
            Column::new("startDate", "Start Date")
                .render(|p: &Project| date_cell(p.start_date.as_ref())),
            Column::new("endDate", "End Date").render(|p: &Project| date_cell(p.end_date.as_ref())),
            Column::new("progress", "Progress").render(|p: &Project| format!("{}%", p.progress)),
        ]
    }
}

impl EntityView for Contact {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("name", "Name"),
            Column::new("company", "Company"),
            Column::new("position", "Position"),
            Column::new("email", "Email"),
            Column::new("phone", "Phone"),
            Column::new("type", "Type"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_core::Record;
    use crm_core::fields::into_fields;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn money() {
        assert_eq!(format_money(5000.0), "$5,000");
        assert_eq!(format_money(1234567.5), "$1,234,567.5");
        assert_eq!(format_money(999.99), "$999.99");
        assert_eq!(format_money(-12.0), "-$12");
        assert_eq!(format_money(0.001), "$0");
    }

    #[test]
    fn lead_table() {
        let leads = vec![
            Lead::from_fields(
                into_fields(json!({"_id": "l1", "name": "Acme", "company": "Acme Inc",
                                   "status": "Won", "value": 5000}))
                .unwrap(),
            )
            .unwrap(),
            Lead::from_fields(into_fields(json!({"_id": "l2", "name": "Globex"})).unwrap())
                .unwrap(),
        ];
        insta::assert_snapshot!(record_table::<Lead>().view(&leads).render(), @r"
        Name    Company   Email  Status  Source  Value   ID
        ------  --------  -----  ------  ------  ------  --
        Acme    Acme Inc         Won             $5,000  l1
        Globex                   New             -       l2
        ");
    }

    #[test]
    fn project_cells() {
        let project = Project::from_fields(
            into_fields(json!({"_id": "p1", "name": "Site", "progress": 42.5,
                               "startDate": "2024-01-15"}))
            .unwrap(),
        )
        .unwrap();
        let view = record_table::<Project>().view(&[project]);
        assert_eq!(
            view.rows[0],
            vec!["Site", "Planned", "", "2024-01-15", "-", "42.5%", "p1"]
        );
        assert_eq!(view.create_label.as_deref(), Some("Create New"));
    }

    #[test]
    fn task_panel_uses_form() {
        let mut table = record_table::<Task>();
        assert!(table.open_create());
        let panel = table.render_panel().unwrap();
        assert!(panel.starts_with(&crate::styles::render_bold("Create Task")));
        assert!(panel.contains("Title*"));
    }
}
