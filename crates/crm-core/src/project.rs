//! Project records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::ProjectStatus;
use crate::kind::EntityKind;
use crate::record::{Record, RecordMeta, clean_list, deserialize_string_list};
use crate::validation::{ValidationError, check_enum, require};

/// Bounds for `progress`, in percent.
pub const PROGRESS_MIN: f64 = 0.0;
pub const PROGRESS_MAX: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(flatten)]
    pub meta: RecordMeta,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(
        default,
        with = "crate::datetime::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<DateTime<Utc>>,

    #[serde(
        default,
        with = "crate::datetime::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub status: ProjectStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,

    /// Soft link to a contact or free-form client name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,

    #[serde(default, deserialize_with = "deserialize_string_list")]
    pub team: Vec<String>,

    /// Completion percentage, clamped to 0..=100.
    #[serde(default)]
    pub progress: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Project {
    pub fn is_in_progress(&self) -> bool {
        self.status == ProjectStatus::InProgress
    }
}

/// Clamps a progress value into range; NaN becomes 0.
pub fn clamp_progress(value: f64) -> f64 {
    if value.is_nan() {
        return PROGRESS_MIN;
    }
    value.clamp(PROGRESS_MIN, PROGRESS_MAX)
}

impl Record for Project {
    const KIND: EntityKind = EntityKind::Project;

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn normalize(&mut self) {
        self.status = std::mem::take(&mut self.status).normalize();
        self.progress = clamp_progress(self.progress);
        self.team = clean_list(std::mem::take(&mut self.team));
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        check_enum(
            "status",
            self.status.as_str(),
            self.status.is_valid(),
            &ProjectStatus::allowed(),
        )
    }
}
