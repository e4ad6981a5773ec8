//! Task records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{RelatedKind, TaskPriority, TaskStatus};
use crate::kind::EntityKind;
use crate::record::{Record, RecordMeta};
use crate::validation::{ValidationError, check_enum, require};

/// Soft link from a task to a lead, contact or project.
///
/// The target is not checked for existence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedTo {
    #[serde(rename = "type")]
    pub kind: RelatedKind,
    #[serde(default)]
    pub id: String,
}

/// A unit of work, optionally linked to another record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(flatten)]
    pub meta: RecordMeta,

    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub status: TaskStatus,

    #[serde(default)]
    pub priority: TaskPriority,

    #[serde(
        default,
        with = "crate::datetime::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_to: Option<RelatedTo>,
}

impl Task {
    /// Returns `true` once the task reached its final state.
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}

impl Record for Task {
    const KIND: EntityKind = EntityKind::Task;

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)?;
        check_enum(
            "status",
            self.status.as_str(),
            self.status.is_valid(),
            &TaskStatus::allowed(),
        )?;
        check_enum(
            "priority",
            self.priority.as_str(),
            self.priority.is_valid(),
            &TaskPriority::allowed(),
        )?;
        if let Some(related) = &self.related_to {
            check_enum(
                "relatedTo.type",
                related.kind.as_str(),
                related.kind.is_valid(),
                &RelatedKind::allowed(),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::into_fields;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn task(v: serde_json::Value) -> Result<Task, ValidationError> {
        Task::from_fields(into_fields(v).unwrap())
    }

    #[test]
    fn defaults_applied() {
        let t = task(json!({"title": "Call back"})).unwrap();
        assert_eq!(t.status, TaskStatus::New);
        assert_eq!(t.priority, TaskPriority::Medium);
        assert_eq!(t.related_to, None);
    }

    #[test]
    fn missing_title_rejected() {
        let err = task(json!({"description": "no title"})).unwrap_err();
        assert_eq!(err, ValidationError::Required { field: "title" });
        let err = task(json!({"title": "  "})).unwrap_err();
        assert_eq!(err, ValidationError::Required { field: "title" });
    }

    #[test]
    fn invalid_status_rejected() {
        let err = task(json!({"title": "x", "status": "Done"})).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidEnum { field: "status", ref value, .. } if value == "Done"
        ));
    }

    #[test]
    fn related_to_serializes_as_type_and_id() {
        let t = task(json!({
            "title": "Follow up",
            "relatedTo": {"type": "Lead", "id": "abc"},
            "dueDate": "2024-06-01"
        }))
        .unwrap();
        let v = t.to_value();
        assert_eq!(v["relatedTo"], json!({"type": "Lead", "id": "abc"}));
        assert_eq!(v["dueDate"], json!("2024-06-01T00:00:00.000Z"));
        assert_eq!(v["status"], json!("New"));
        assert!(v.get("_id").is_none());
    }

    #[test]
    fn related_to_unknown_kind_rejected() {
        let err = task(json!({"title": "x", "relatedTo": {"type": "Invoice", "id": "1"}}))
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidEnum { field: "relatedTo.type", .. }));
    }

    #[test]
    fn non_string_title_is_malformed() {
        let err = task(json!({"title": 42})).unwrap_err();
        assert!(matches!(err, ValidationError::Malformed(_)));
    }

    #[test]
    fn meta_round_trips() {
        let t = task(json!({
            "_id": "65920080aaaaaaaaaaaaaaaa",
            "createdAt": "2024-01-01T00:00:00.000Z",
            "updatedAt": "2024-01-02T00:00:00.000Z",
            "title": "x"
        }))
        .unwrap();
        assert_eq!(t.id(), "65920080aaaaaaaaaaaaaaaa");
        let v = t.to_value();
        assert_eq!(v["createdAt"], json!("2024-01-01T00:00:00.000Z"));
        assert_eq!(v["updatedAt"], json!("2024-01-02T00:00:00.000Z"));
    }
}
