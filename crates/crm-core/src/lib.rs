//! Core types for the crm system.
//!
//! Defines the four record kinds (tasks, leads, projects, contacts), their
//! enumerated fields, validation, identifier generation and the field-map
//! helpers used by create and update payloads.

pub mod contact;
pub mod datetime;
pub mod enums;
pub mod fields;
pub mod idgen;
pub mod kind;
pub mod lead;
pub mod message;
pub mod project;
pub mod record;
pub mod task;
pub mod validation;

pub use contact::Contact;
pub use fields::Fields;
pub use kind::EntityKind;
pub use lead::Lead;
pub use message::Message;
pub use project::Project;
pub use record::{Record, RecordMeta};
pub use task::{RelatedTo, Task};
pub use validation::ValidationError;
