//! Concurrent snapshot of all four collections for the dashboard.

use crm_core::{Contact, Lead, Project, Record, Task};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::{ClientError, Result};

/// Every record of every kind, fetched together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub tasks: Vec<Task>,
    pub leads: Vec<Lead>,
    pub projects: Vec<Project>,
    pub contacts: Vec<Contact>,
}

fn join<T>(handle: std::thread::ScopedJoinHandle<'_, Result<T>>) -> Result<T> {
    handle
        .join()
        .map_err(|_| ClientError::Worker("fetch thread panicked".into()))?
}

impl ApiClient {
    /// Fetches the four lists concurrently and joins them.
    ///
    /// Any single failure fails the whole snapshot.
    pub fn fetch_dashboard(&self) -> Result<DashboardData> {
        let data = std::thread::scope(|s| {
            let tasks = s.spawn(|| self.try_list::<Task>());
            let leads = s.spawn(|| self.try_list::<Lead>());
            let projects = s.spawn(|| self.try_list::<Project>());
            let contacts = s.spawn(|| self.try_list::<Contact>());

            Ok::<_, ClientError>(DashboardData {
                tasks: join(tasks)?,
                leads: join(leads)?,
                projects: join(projects)?,
                contacts: join(contacts)?,
            })
        })?;
        debug!(
            tasks = data.tasks.len(),
            leads = data.leads.len(),
            projects = data.projects.len(),
            contacts = data.contacts.len(),
            "dashboard snapshot fetched"
        );
        Ok(data)
    }
}

impl DashboardData {
    /// Number of records of the given kind.
    pub fn count<R: Record>(&self) -> usize {
        match R::KIND {
            crm_core::EntityKind::Task => self.tasks.len(),
            crm_core::EntityKind::Lead => self.leads.len(),
            crm_core::EntityKind::Project => self.projects.len(),
            crm_core::EntityKind::Contact => self.contacts.len(),
        }
    }
}
