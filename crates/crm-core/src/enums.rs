//! Enumerated fields of the crm records.
//!
//! Each enum has:
//! - Custom Serialize (as the exact display string, e.g. `"In Progress"`)
//! - Custom Deserialize (known variants + catch-all `Invalid(String)`)
//! - `as_str()`, `is_default()`, `Display` impl
//!
//! Unknown strings deserialize into the `Invalid` variant so that the
//! validator can report the offending value instead of a serde error.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ---------------------------------------------------------------------------
// Macro: defines an enum with known string variants + an Invalid(String) fallback.
// ---------------------------------------------------------------------------
macro_rules! define_enum {
    (
        $(#[$meta:meta])*
        $name:ident, default = $default:ident,
        variants: [
            $( ($variant:ident, $str:expr) ),+ $(,)?
        ]
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $variant, )+
            Invalid(String),
        }

        impl $name {
            /// Returns the string representation.
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $str, )+
                    Self::Invalid(s) => s.as_str(),
                }
            }

            /// Returns `true` if this is the default variant.
            pub fn is_default(&self) -> bool {
                *self == Self::$default
            }

            /// Returns `true` if this is one of the fixed values.
            pub fn is_valid(&self) -> bool {
                !matches!(self, Self::Invalid(_))
            }

            /// The accepted string values, for error messages and form selects.
            pub fn allowed() -> Vec<&'static str> {
                vec![ $( $str, )+ ]
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Ok(Self::from(s))
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                match s {
                    $( $str => Self::$variant, )+
                    other => Self::Invalid(other.to_owned()),
                }
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                match s.as_str() {
                    $( $str => Self::$variant, )+
                    _ => Self::Invalid(s),
                }
            }
        }
    };
}

define_enum! {
    /// Workflow state of a task.
    TaskStatus, default = New,
    variants: [
        (New, "New"),
        (InProgress, "In Progress"),
        (Review, "Review"),
        (Completed, "Completed"),
    ]
}

define_enum! {
    /// Urgency of a task.
    TaskPriority, default = Medium,
    variants: [
        (Low, "Low"),
        (Medium, "Medium"),
        (High, "High"),
    ]
}

define_enum! {
    /// Position of a lead in the sales pipeline.
    LeadStatus, default = New,
    variants: [
        (New, "New"),
        (Contacted, "Contacted"),
        (Qualified, "Qualified"),
        (Proposal, "Proposal"),
        (Negotiation, "Negotiation"),
        (Won, "Won"),
        (Lost, "Lost"),
    ]
}

define_enum! {
    /// Lifecycle state of a project.
    ProjectStatus, default = Planned,
    variants: [
        (Planned, "Planned"),
        (InProgress, "In Progress"),
        (OnHold, "On Hold"),
        (Completed, "Completed"),
        (Cancelled, "Cancelled"),
    ]
}

impl ProjectStatus {
    /// Maps legacy spellings to their canonical variant.
    ///
    /// Older data used `"Planning"` for the initial state.
    pub fn normalize(self) -> Self {
        if matches!(&self, Self::Invalid(s) if s == "Planning") {
            Self::Planned
        } else {
            self
        }
    }
}

define_enum! {
    /// Relationship of a contact to the business.
    ContactType, default = Client,
    variants: [
        (Client, "Client"),
        (Partner, "Partner"),
        (Vendor, "Vendor"),
        (Other, "Other"),
    ]
}

define_enum! {
    /// Entity kind a task may be linked to through `relatedTo`.
    RelatedKind, default = Lead,
    variants: [
        (Lead, "Lead"),
        (Contact, "Contact"),
        (Project, "Project"),
    ]
}
