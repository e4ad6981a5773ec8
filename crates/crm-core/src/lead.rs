//! Lead records: prospects moving through the sales pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::LeadStatus;
use crate::kind::EntityKind;
use crate::record::{Record, RecordMeta};
use crate::validation::{ValidationError, check_enum, require};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    #[serde(flatten)]
    pub meta: RecordMeta,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default)]
    pub status: LeadStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Estimated deal value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(
        default,
        with = "crate::datetime::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_contacted: Option<DateTime<Utc>>,
}

impl Lead {
    pub fn is_won(&self) -> bool {
        self.status == LeadStatus::Won
    }
}

impl Record for Lead {
    const KIND: EntityKind = EntityKind::Lead;

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        check_enum(
            "status",
            self.status.as_str(),
            self.status.is_valid(),
            &LeadStatus::allowed(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::into_fields;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn value_and_status_round_trip() {
        let lead = Lead::from_fields(
            into_fields(json!({"name": "Acme", "value": 5000, "status": "Qualified"})).unwrap(),
        )
        .unwrap();
        assert_eq!(lead.value, Some(5000.0));
        assert_eq!(lead.status, LeadStatus::Qualified);
        assert_eq!(lead.to_value()["status"], json!("Qualified"));
    }

    #[test]
    fn default_status_is_new() {
        let lead = Lead::from_fields(into_fields(json!({"name": "Globex"})).unwrap()).unwrap();
        assert_eq!(lead.status, LeadStatus::New);
        assert!(!lead.is_won());
    }

    #[test]
    fn unknown_status_rejected() {
        let err =
            Lead::from_fields(into_fields(json!({"name": "x", "status": "Closed"})).unwrap())
                .unwrap_err();
        assert!(err.to_string().contains("Closed"));
    }

    #[test]
    fn unknown_fields_are_dropped() {
        let lead =
            Lead::from_fields(into_fields(json!({"name": "x", "favouriteColour": "red"})).unwrap())
                .unwrap();
        assert!(lead.to_value().get("favouriteColour").is_none());
    }
}
