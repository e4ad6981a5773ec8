//! Dashboard: headline counts and status distributions over all records.

use crm_client::{ApiClient, ClientError, DashboardData};
use crm_core::enums::{LeadStatus, TaskStatus};
use serde::Serialize;
use tracing::error;

use crate::notify::{Notification, Notifier};
use crate::store::RecordLists;
use crate::styles::{bar, render_bold, render_category, render_muted};

/// Where a dashboard snapshot comes from.
pub trait DashboardSource {
    fn fetch_dashboard(&self) -> Result<DashboardData, ClientError>;
}

impl DashboardSource for ApiClient {
    fn fetch_dashboard(&self) -> Result<DashboardData, ClientError> {
        ApiClient::fetch_dashboard(self)
    }
}

/// Fetches every list at once. Any failure yields one error notification
/// and no data.
pub fn load_dashboard(
    source: &impl DashboardSource,
    notifier: &mut impl Notifier,
) -> Option<RecordLists> {
    match source.fetch_dashboard() {
        Ok(data) => Some(data.into()),
        Err(e) => {
            error!(error = %e, "Error fetching dashboard data");
            notifier.notify(Notification::dashboard_failed());
            None
        }
    }
}

/// One bar of a distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub name: &'static str,
    pub value: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub total_leads: usize,
    pub won_leads: usize,
    pub total_projects: usize,
    pub projects_in_progress: usize,
    pub total_contacts: usize,
    pub client_contacts: usize,
    pub task_status: Vec<Bucket>,
    pub lead_pipeline: Vec<Bucket>,
}

impl DashboardSummary {
    pub fn from_lists(lists: &RecordLists) -> Self {
        let task_status = TaskStatus::allowed()
            .into_iter()
            .map(|name| Bucket {
                name,
                value: lists.tasks.iter().filter(|t| t.status.as_str() == name).count(),
            })
            .collect();
        let lead_pipeline = LeadStatus::allowed()
            .into_iter()
            .map(|name| Bucket {
                name,
                value: lists.leads.iter().filter(|l| l.status.as_str() == name).count(),
            })
            .collect();

        Self {
            total_tasks: lists.tasks.len(),
            completed_tasks: lists.tasks.iter().filter(|t| t.is_completed()).count(),
            total_leads: lists.leads.len(),
            won_leads: lists.leads.iter().filter(|l| l.is_won()).count(),
            total_projects: lists.projects.len(),
            projects_in_progress: lists.projects.iter().filter(|p| p.is_in_progress()).count(),
            total_contacts: lists.contacts.len(),
            client_contacts: lists.contacts.iter().filter(|c| c.is_client()).count(),
            task_status,
            lead_pipeline,
        }
    }

    /// Four headline cards, then both distributions as bars `bar_width`
    /// cells wide.
    pub fn render(&self, bar_width: usize) -> String {
        let mut lines = Vec::new();
        let cards = [
            ("Total Tasks", self.total_tasks, self.completed_tasks, "completed"),
            ("Total Leads", self.total_leads, self.won_leads, "won"),
            ("Projects", self.total_projects, self.projects_in_progress, "in progress"),
            ("Contacts", self.total_contacts, self.client_contacts, "clients"),
        ];
        for (title, total, detail, what) in cards {
            lines.push(format!(
                "{}{}  {}",
                render_muted(&format!("{title:<12}")),
                render_bold(&format!("{total:>5}")),
                render_muted(&format!("{detail} {what}"))
            ));
        }

        for (title, buckets) in [
            ("Task Status", &self.task_status),
            ("Lead Pipeline", &self.lead_pipeline),
        ] {
            lines.push(String::new());
            lines.push(render_category(title));
            let max = buckets.iter().map(|b| b.value).max().unwrap_or(0) as f64;
            for bucket in buckets {
                lines.push(format!(
                    "{:<12} {} {}",
                    bucket.name,
                    bar(bucket.value as f64, max, bar_width),
                    bucket.value
                ));
            }
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_core::fields::into_fields;
    use crm_core::{Contact, Lead, Project, Record, Task};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    use crate::notify::CollectingNotifier;

    fn rec<R: Record>(v: Value) -> R {
        R::from_fields(into_fields(v).unwrap()).unwrap()
    }

    fn lists() -> RecordLists {
        RecordLists {
            tasks: vec![
                rec::<Task>(json!({"title": "a", "status": "Completed"})),
                rec::<Task>(json!({"title": "b", "status": "In Progress"})),
                rec::<Task>(json!({"title": "c"})),
            ],
            leads: vec![
                rec::<Lead>(json!({"name": "a", "status": "Won"})),
                rec::<Lead>(json!({"name": "b", "status": "Won"})),
                rec::<Lead>(json!({"name": "c", "status": "Lost"})),
            ],
            projects: vec![rec::<Project>(json!({"name": "p", "status": "In Progress"}))],
            contacts: vec![
                rec::<Contact>(json!({"name": "a"})),
                rec::<Contact>(json!({"name": "b", "type": "Vendor"})),
            ],
        }
    }

    struct Fixed(Option<DashboardData>);

    impl DashboardSource for Fixed {
        fn fetch_dashboard(&self) -> Result<DashboardData, ClientError> {
            self.0.clone().ok_or(ClientError::Status {
                url: "fixed".into(),
                status: 500,
            })
        }
    }

    #[test]
    fn headline_counts() {
        let summary = DashboardSummary::from_lists(&lists());
        assert_eq!(summary.total_tasks, 3);
        assert_eq!(summary.completed_tasks, 1);
        assert_eq!(summary.total_leads, 3);
        assert_eq!(summary.won_leads, 2);
        assert_eq!(summary.total_projects, 1);
        assert_eq!(summary.projects_in_progress, 1);
        assert_eq!(summary.total_contacts, 2);
        assert_eq!(summary.client_contacts, 1);
    }

    #[test]
    fn distributions_cover_every_status() {
        let summary = DashboardSummary::from_lists(&lists());
        let tasks: Vec<_> = summary.task_status.iter().map(|b| (b.name, b.value)).collect();
        assert_eq!(
            tasks,
            vec![("New", 1), ("In Progress", 1), ("Review", 0), ("Completed", 1)]
        );
        assert_eq!(summary.lead_pipeline.len(), 7);
        assert_eq!(summary.lead_pipeline[5], Bucket { name: "Won", value: 2 });
    }

    #[test]
    fn empty_lists_render() {
        let summary = DashboardSummary::from_lists(&RecordLists::default());
        assert_eq!(summary.total_tasks, 0);
        let text = summary.render(10);
        assert!(text.contains("Total Tasks"));
        assert!(text.contains("0 completed"));
    }

    #[test]
    fn failed_load_notifies_once() {
        let mut sink = CollectingNotifier::new();
        assert!(load_dashboard(&Fixed(None), &mut sink).is_none());
        assert_eq!(
            sink.notifications(),
            &[Notification::dashboard_failed()]
        );
    }

    #[test]
    fn successful_load_converts_lists() {
        let data = DashboardData {
            tasks: lists().tasks,
            ..DashboardData::default()
        };
        let mut sink = CollectingNotifier::new();
        let lists = load_dashboard(&Fixed(Some(data)), &mut sink).unwrap();
        assert_eq!(lists.tasks.len(), 3);
        assert!(sink.notifications().is_empty());
    }
}
