//! The four record kinds and their naming.

use std::fmt;
use std::str::FromStr;

/// Identifies one of the record collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Task,
    Lead,
    Project,
    Contact,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Task,
        EntityKind::Lead,
        EntityKind::Project,
        EntityKind::Contact,
    ];

    /// Collection name in the store, also the URL segment under `/api`.
    pub fn collection(self) -> &'static str {
        match self {
            Self::Task => "tasks",
            Self::Lead => "leads",
            Self::Project => "projects",
            Self::Contact => "contacts",
        }
    }

    /// Singular display label, used in messages such as "Task not found".
    pub fn label(self) -> &'static str {
        match self {
            Self::Task => "Task",
            Self::Lead => "Lead",
            Self::Project => "Project",
            Self::Contact => "Contact",
        }
    }

    /// Plural display label.
    pub fn plural(self) -> &'static str {
        match self {
            Self::Task => "Tasks",
            Self::Lead => "Leads",
            Self::Project => "Projects",
            Self::Contact => "Contacts",
        }
    }

    /// Name of the field that must be present and non-empty.
    pub fn required_field(self) -> &'static str {
        match self {
            Self::Task => "title",
            _ => "name",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}

/// Error returned when parsing an unknown collection name.
#[derive(Debug, thiserror::Error)]
#[error("unknown entity kind: {0}")]
pub struct UnknownKind(pub String);

impl FromStr for EntityKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "task" | "tasks" => Ok(Self::Task),
            "lead" | "leads" => Ok(Self::Lead),
            "project" | "projects" => Ok(Self::Project),
            "contact" | "contacts" => Ok(Self::Contact),
            _ => Err(UnknownKind(s.to_owned())),
        }
    }
}
