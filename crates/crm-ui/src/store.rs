//! Client-side record lists and the pure reducer that reconciles them.
//!
//! Lists change only through [`ListAction`]s: a page never edits a list in
//! place, it applies the outcome of an API call.

use crm_client::DashboardData;
use crm_core::{Contact, EntityKind, Lead, Project, Record, Task};

/// One reconciliation step for a list of `R`.
#[derive(Debug, Clone, PartialEq)]
pub enum ListAction<R> {
    /// Replaces the list with a freshly fetched one.
    Loaded(Vec<R>),
    /// Appends a newly created record.
    Created(R),
    /// Replaces the record with the same id.
    Updated(R),
    /// Removes the record with this id.
    Deleted(String),
}

/// Applies `action` to `list` and returns the new list.
///
/// Records other than the one the action names are left as they were,
/// in the same order.
pub fn reduce<R: Record>(mut list: Vec<R>, action: ListAction<R>) -> Vec<R> {
    match action {
        ListAction::Loaded(records) => records,
        ListAction::Created(record) => {
            list.push(record);
            list
        }
        ListAction::Updated(record) => list
            .into_iter()
            .map(|existing| {
                if existing.id() == record.id() {
                    record.clone()
                } else {
                    existing
                }
            })
            .collect(),
        ListAction::Deleted(id) => {
            list.retain(|r| r.id() != id);
            list
        }
    }
}

/// The four record lists of a client session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordLists {
    pub tasks: Vec<Task>,
    pub leads: Vec<Lead>,
    pub projects: Vec<Project>,
    pub contacts: Vec<Contact>,
}

/// Record types that have a slot in [`RecordLists`].
pub trait Listed: Record {
    fn slot(lists: &RecordLists) -> &Vec<Self>;
    fn slot_mut(lists: &mut RecordLists) -> &mut Vec<Self>;
}

macro_rules! listed {
    ($ty:ty, $field:ident) => {
        impl Listed for $ty {
            fn slot(lists: &RecordLists) -> &Vec<Self> {
                &lists.$field
            }

            fn slot_mut(lists: &mut RecordLists) -> &mut Vec<Self> {
                &mut lists.$field
            }
        }
    };
}

listed!(Task, tasks);
listed!(Lead, leads);
listed!(Project, projects);
listed!(Contact, contacts);

impl RecordLists {
    pub fn get<R: Listed>(&self) -> &[R] {
        R::slot(self)
    }

    /// Runs `action` through [`reduce`] on the list of `R`.
    pub fn apply<R: Listed>(&mut self, action: ListAction<R>) {
        let slot = R::slot_mut(self);
        *slot = reduce(std::mem::take(slot), action);
    }

    pub fn len_of(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Task => self.tasks.len(),
            EntityKind::Lead => self.leads.len(),
            EntityKind::Project => self.projects.len(),
            EntityKind::Contact => self.contacts.len(),
        }
    }
}

impl From<DashboardData> for RecordLists {
    fn from(data: DashboardData) -> Self {
        Self {
            tasks: data.tasks,
            leads: data.leads,
            projects: data.projects,
            contacts: data.contacts,
        }
    }
}
