//! Record forms: which fields each entity edits, how typed text becomes a
//! JSON field map, and how a record is shown back in the panel.

use crm_core::datetime::{format_date, format_datetime, parse_datetime};
use crm_core::enums::{
    ContactType, LeadStatus, ProjectStatus, RelatedKind, TaskPriority, TaskStatus,
};
use crm_core::fields::{Fields, lookup};
use crm_core::{EntityKind, Record};
use serde_json::{Number, Value};
use thiserror::Error;

use crate::panel::PanelMode;
use crate::styles::{
    render_bold, render_contact_type, render_lead_status, render_muted, render_priority,
    render_progress, render_project_status, render_separator, render_task_status,
};
use crate::table::display_value;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("unknown {kind} field `{field}`")]
    UnknownField { kind: &'static str, field: String },

    #[error("{field}: `{value}` is not a number")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field}: `{value}` is not a date (expected YYYY-MM-DD)")]
    InvalidDate { field: &'static str, value: String },

    #[error("expected key=value, got `{0}`")]
    MissingValue(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    Textarea,
    Number,
    Date,
    Select(Vec<&'static str>),
    Tags,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    /// JSON key, or a dotted path into a nested object.
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Prefilled value of an empty create form.
    pub default: Option<&'static str>,
}

impl FormField {
    fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            default: None,
        }
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn default_value(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }

    /// Converts submitted text. `None` means "leave the key out".
    fn convert(&self, raw: &str) -> Result<Option<Value>, FormError> {
        match &self.kind {
            FieldKind::Text | FieldKind::Textarea | FieldKind::Select(_) => {
                Ok(Some(Value::String(raw.to_string())))
            }
            FieldKind::Number => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                trimmed
                    .parse::<f64>()
                    .ok()
                    .and_then(Number::from_f64)
                    .map(|n| Some(Value::Number(n)))
                    .ok_or_else(|| FormError::InvalidNumber {
                        field: self.name,
                        value: raw.to_string(),
                    })
            }
            FieldKind::Date => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                parse_datetime(trimmed)
                    .map(|dt| Some(Value::String(format_datetime(&dt))))
                    .ok_or_else(|| FormError::InvalidDate {
                        field: self.name,
                        value: raw.to_string(),
                    })
            }
            FieldKind::Tags => Ok(Some(Value::Array(
                raw.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(|t| Value::String(t.to_string()))
                    .collect(),
            ))),
        }
    }

    /// Text shown in the form for a stored value.
    fn text(&self, value: Option<&Value>) -> String {
        match (&self.kind, value) {
            (FieldKind::Date, Some(Value::String(s))) => parse_datetime(s)
                .map(|dt| format_date(&dt))
                .unwrap_or_else(|| s.clone()),
            _ => display_value(value),
        }
    }

    fn hint(&self) -> String {
        match &self.kind {
            FieldKind::Select(options) => format!("({})", options.join(" | ")),
            FieldKind::Date => "(YYYY-MM-DD)".to_string(),
            FieldKind::Tags => "(comma separated)".to_string(),
            FieldKind::Number => "(number)".to_string(),
            FieldKind::Text | FieldKind::Textarea => String::new(),
        }
    }
}

/// Splits a `key=value` assignment. The value may itself contain `=`.
pub fn parse_assignment(input: &str) -> Result<(String, String), FormError> {
    input
        .split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| FormError::MissingValue(input.to_string()))
}

fn insert_path(fields: &mut Fields, path: &str, value: Value) {
    match path.split_once('.') {
        None => {
            fields.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            let entry = fields
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Fields::new()));
            if !entry.is_object() {
                *entry = Value::Object(Fields::new());
            }
            if let Value::Object(inner) = entry {
                insert_path(inner, rest, value);
            }
        }
    }
}

/// The form of one entity kind.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSpec {
    kind: EntityKind,
    fields: Vec<FormField>,
}

impl FormSpec {
    pub fn for_kind(kind: EntityKind) -> Self {
        let fields = match kind {
            EntityKind::Task => vec![
                FormField::new("title", "Title", FieldKind::Text).required(),
                FormField::new("description", "Description", FieldKind::Textarea),
                FormField::new("status", "Status", FieldKind::Select(TaskStatus::allowed()))
                    .default_value("New"),
                FormField::new("priority", "Priority", FieldKind::Select(TaskPriority::allowed()))
                    .default_value("Medium"),
                FormField::new("dueDate", "Due Date", FieldKind::Date),
                FormField::new("assignedTo", "Assigned To", FieldKind::Text),
                FormField::new(
                    "relatedTo.type",
                    "Related Type",
                    FieldKind::Select(RelatedKind::allowed()),
                ),
                FormField::new("relatedTo.id", "Related ID", FieldKind::Text),
            ],
            EntityKind::Lead => vec![
                FormField::new("name", "Name", FieldKind::Text).required(),
                FormField::new("company", "Company", FieldKind::Text),
                FormField::new("email", "Email", FieldKind::Text),
                FormField::new("phone", "Phone", FieldKind::Text),
                FormField::new("status", "Status", FieldKind::Select(LeadStatus::allowed()))
                    .default_value("New"),
                FormField::new("source", "Source", FieldKind::Text),
                FormField::new("value", "Value", FieldKind::Number),
                FormField::new("lastContacted", "Last Contacted", FieldKind::Date),
                FormField::new("notes", "Notes", FieldKind::Textarea),
            ],
            EntityKind::Project => vec![
                FormField::new("name", "Name", FieldKind::Text).required(),
                FormField::new("description", "Description", FieldKind::Textarea),
                FormField::new("status", "Status", FieldKind::Select(ProjectStatus::allowed()))
                    .default_value("Planned"),
                FormField::new("startDate", "Start Date", FieldKind::Date),
                FormField::new("endDate", "End Date", FieldKind::Date),
                FormField::new("budget", "Budget", FieldKind::Number),
                FormField::new("client", "Client", FieldKind::Text),
                FormField::new("team", "Team", FieldKind::Tags),
                FormField::new("progress", "Progress (%)", FieldKind::Number).default_value("0"),
                FormField::new("notes", "Notes", FieldKind::Textarea),
            ],
            EntityKind::Contact => vec![
                FormField::new("name", "Name", FieldKind::Text).required(),
                FormField::new("company", "Company", FieldKind::Text),
                FormField::new("position", "Position", FieldKind::Text),
                FormField::new("email", "Email", FieldKind::Text),
                FormField::new("phone", "Phone", FieldKind::Text),
                FormField::new("address", "Address", FieldKind::Textarea),
                FormField::new("type", "Type", FieldKind::Select(ContactType::allowed()))
                    .default_value("Client"),
                FormField::new("tags", "Tags", FieldKind::Tags),
                FormField::new("notes", "Notes", FieldKind::Textarea),
            ],
        };
        Self { kind, fields }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Converts submitted `(name, text)` pairs into a JSON field map.
    ///
    /// Only the submitted fields appear in the result, so the map also
    /// serves as an update patch. Select values are passed through for the
    /// server to validate.
    pub fn to_fields<K: AsRef<str>, V: AsRef<str>>(
        &self,
        values: &[(K, V)],
    ) -> Result<Fields, FormError> {
        let mut fields = Fields::new();
        for (name, raw) in values {
            let name = name.as_ref();
            let field = self.field(name).ok_or_else(|| FormError::UnknownField {
                kind: self.kind.label(),
                field: name.to_string(),
            })?;
            if let Some(value) = field.convert(raw.as_ref())? {
                insert_path(&mut fields, field.name, value);
            }
        }
        Ok(fields)
    }

    /// Parses `key=value` assignments and converts them with [`Self::to_fields`].
    pub fn parse_assignments<S: AsRef<str>>(&self, inputs: &[S]) -> Result<Fields, FormError> {
        let pairs = inputs
            .iter()
            .map(|s| parse_assignment(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        self.to_fields(&pairs)
    }

    /// Form text for every field: the record's values, or the defaults of
    /// an empty create form.
    pub fn prefill<R: Record>(&self, record: Option<&R>) -> Vec<(&'static str, String)> {
        let value = record.map(Record::to_value);
        self.fields
            .iter()
            .map(|field| {
                let text = match &value {
                    Some(v) => field.text(lookup(v, field.name)),
                    None => field.default.unwrap_or_default().to_string(),
                };
                (field.name, text)
            })
            .collect()
    }

    fn styled(&self, name: &str, text: &str) -> String {
        match (self.kind, name) {
            (EntityKind::Task, "status") => render_task_status(&TaskStatus::from(text)),
            (EntityKind::Task, "priority") => render_priority(&TaskPriority::from(text)),
            (EntityKind::Lead, "status") => render_lead_status(&LeadStatus::from(text)),
            (EntityKind::Project, "status") => render_project_status(&ProjectStatus::from(text)),
            (EntityKind::Project, "progress") => text
                .parse::<f64>()
                .map(render_progress)
                .unwrap_or_else(|_| text.to_string()),
            (EntityKind::Contact, "type") => render_contact_type(&ContactType::from(text)),
            _ => text.to_string(),
        }
    }

    /// Renders the panel for `mode`: title, one line per field, footer.
    ///
    /// View panels show styled values and the record's id and timestamps;
    /// edit and create panels mark required fields and hint empty ones.
    pub fn render<R: Record>(&self, mode: PanelMode, record: Option<&R>) -> String {
        let width = self
            .fields
            .iter()
            .map(|f| f.label.chars().count() + 1)
            .max()
            .unwrap_or(0);

        let mut lines = vec![render_bold(&mode.title(self.kind.label())), render_separator()];
        for (field, (_, text)) in self.fields.iter().zip(self.prefill(record)) {
            let label = if field.required && mode.is_editable() {
                format!("{}*", field.label)
            } else {
                field.label.to_string()
            };
            let shown = match mode {
                PanelMode::View => self.styled(field.name, &text),
                _ if text.is_empty() => render_muted(&field.hint()),
                _ => text,
            };
            lines.push(format!("{label:>width$}  {shown}").trim_end().to_string());
        }

        if let (PanelMode::View, Some(record)) = (mode, record) {
            let meta = record.meta();
            lines.push(String::new());
            lines.push(render_muted(&format!("{:>width$}  {}", "ID", meta.id)));
            if let Some(created) = meta.created_at {
                lines.push(render_muted(&format!(
                    "{:>width$}  {}",
                    "Created",
                    created.format("%Y-%m-%d %H:%M")
                )));
            }
            if let Some(updated) = meta.updated_at {
                lines.push(render_muted(&format!(
                    "{:>width$}  {}",
                    "Updated",
                    updated.format("%Y-%m-%d %H:%M")
                )));
            }
        }

        lines.push(String::new());
        lines.push(
            match mode {
                PanelMode::View => "[Close]",
                PanelMode::Edit => "[Save]  [Cancel]",
                PanelMode::Create => "[Create]  [Cancel]",
            }
            .to_string(),
        );
        lines.join("\n")
    }
}
