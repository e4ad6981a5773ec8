//! The `Record` trait shared by every entity type.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::fields::Fields;
use crate::kind::EntityKind;
use crate::validation::ValidationError;

/// Store-managed identity and timestamps, flattened into every record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordMeta {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    #[serde(
        rename = "createdAt",
        default,
        with = "crate::datetime::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(
        rename = "updatedAt",
        default,
        with = "crate::datetime::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A typed record of one entity kind.
///
/// Records are decoded from free-form [`Fields`]; unknown keys are dropped.
pub trait Record:
    Serialize + DeserializeOwned + Clone + fmt::Debug + PartialEq + Send + Sync + 'static
{
    const KIND: EntityKind;

    fn meta(&self) -> &RecordMeta;

    fn meta_mut(&mut self) -> &mut RecordMeta;

    /// Checks required fields and enum membership.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Canonicalises field values (aliases, clamping, list cleanup).
    fn normalize(&mut self) {}

    fn id(&self) -> &str {
        &self.meta().id
    }

    /// Decodes without normalising or validating.
    fn decode(fields: Fields) -> Result<Self, ValidationError> {
        serde_json::from_value(Value::Object(fields)).map_err(ValidationError::malformed)
    }

    /// Decodes, normalises and validates.
    fn from_fields(fields: Fields) -> Result<Self, ValidationError> {
        let mut record = Self::decode(fields)?;
        record.normalize();
        record.validate()?;
        Ok(record)
    }

    fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    fn to_fields(&self) -> Fields {
        match self.to_value() {
            Value::Object(map) => map,
            _ => Fields::new(),
        }
    }
}

/// Deserializes a list of strings from either a JSON array or one
/// comma-separated string. Entries are trimmed and empty ones dropped.
pub fn deserialize_string_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListOrString {
        List(Vec<String>),
        Joined(String),
    }

    let items = match Option::<ListOrString>::deserialize(deserializer)? {
        None => return Ok(Vec::new()),
        Some(ListOrString::List(items)) => items,
        Some(ListOrString::Joined(s)) => s.split(',').map(str::to_owned).collect(),
    };
    Ok(clean_list(items))
}

/// Trims entries and drops empty ones.
pub fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .collect()
}
