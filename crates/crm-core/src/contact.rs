//! Contact records.

use serde::{Deserialize, Serialize};

use crate::enums::ContactType;
use crate::kind::EntityKind;
use crate::record::{Record, RecordMeta, clean_list, deserialize_string_list};
use crate::validation::{ValidationError, check_enum, require};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(flatten)]
    pub meta: RecordMeta,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(rename = "type", default)]
    pub contact_type: ContactType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Ordered labels; accepted as an array or one comma-separated string.
    #[serde(default, deserialize_with = "deserialize_string_list")]
    pub tags: Vec<String>,
}

impl Contact {
    pub fn is_client(&self) -> bool {
        self.contact_type == ContactType::Client
    }
}

impl Record for Contact {
    const KIND: EntityKind = EntityKind::Contact;

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn normalize(&mut self) {
        self.tags = clean_list(std::mem::take(&mut self.tags));
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        check_enum(
            "type",
            self.contact_type.as_str(),
            self.contact_type.is_valid(),
            &ContactType::allowed(),
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
    fn tags_from_comma_string() {
        let c = Contact::from_fields(
            into_fields(json!({"name": "Ann", "tags": "vip, east"})).unwrap(),
        )
        .unwrap();
        assert_eq!(c.tags, vec!["vip", "east"]);
        assert_eq!(c.to_value()["tags"], json!(["vip", "east"]));
    }

    #[test]
    fn type_defaults_to_client() {
        let c = Contact::from_fields(into_fields(json!({"name": "Ann"})).unwrap()).unwrap();
        assert!(c.is_client());
        assert_eq!(c.to_value()["type"], json!("Client"));
    }

    #[test]
    fn invalid_type_rejected() {
        let err = Contact::from_fields(
            into_fields(json!({"name": "Ann", "type": "Friend"})).unwrap(),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidEnum { field: "type", .. }));
    }
}
