//! [`EntityPage`] -- the list of one entity kind, kept in step with the API.
//!
//! The page fetches its list once on mount. After that every mutation goes
//! to the API first and the list is reconciled from the response through
//! [`reduce`](crate::store::reduce). A failed call leaves the list as it
//! was and raises one error notification.

use std::marker::PhantomData;

use crm_client::RecordApi;
use crm_core::fields::Fields;
use tracing::{debug, error};

use crate::notify::{Action, Notification, Notifier};
use crate::panel::{PanelError, PanelMode, PanelSession};
use crate::store::{ListAction, Listed, RecordLists};
use crate::table::RowHandler;

pub struct EntityPage<R, A, N> {
    api: A,
    notifier: N,
    lists: RecordLists,
    _record: PhantomData<fn() -> R>,
}

impl<R, A, N> EntityPage<R, A, N>
where
    R: Listed,
    A: RecordApi<R>,
    N: Notifier,
{
    /// A page with an empty list. Nothing is fetched yet.
    pub fn new(api: A, notifier: N) -> Self {
        Self {
            api,
            notifier,
            lists: RecordLists::default(),
            _record: PhantomData,
        }
    }

    /// Creates the page and fetches its list.
    pub fn mount(api: A, notifier: N) -> Self {
        let mut page = Self::new(api, notifier);
        page.load();
        page
    }

    /// Refetches the list. On failure the current list is kept.
    pub fn load(&mut self) -> bool {
        match self.api.list_records() {
            Ok(records) => {
                debug!(kind = %R::KIND, count = records.len(), "list loaded");
                self.lists.apply(ListAction::Loaded(records));
                true
            }
            Err(e) => {
                error!(error = %e, "Error fetching {}", R::KIND.collection());
                self.fail(Action::Load);
                false
            }
        }
    }

    pub fn records(&self) -> &[R] {
        self.lists.get::<R>()
    }

    pub fn find(&self, id: &str) -> Option<&R> {
        self.records().iter().find(|r| r.id() == id)
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    fn fail(&mut self, action: Action) {
        self.notifier.notify(Notification::failed(action, R::KIND));
    }

    fn succeed(&mut self, action: Action) {
        self.notifier.notify(Notification::succeeded(action, R::KIND));
    }

    /// Creates a record and appends it to the list.
    pub fn create(&mut self, fields: &Fields) -> Option<R> {
        match self.api.create_record(fields) {
            Ok(record) => {
                self.lists.apply(ListAction::Created(record.clone()));
                self.succeed(Action::Create);
                Some(record)
            }
            Err(e) => {
                error!(error = %e, "Error creating {}", R::KIND.label());
                self.fail(Action::Create);
                None
            }
        }
    }

    /// Updates a record and replaces it in the list.
    pub fn update(&mut self, id: &str, fields: &Fields) -> Option<R> {
        match self.api.update_record(id, fields) {
            Ok(record) => {
                self.lists.apply(ListAction::Updated(record.clone()));
                self.succeed(Action::Update);
                Some(record)
            }
            Err(e) => {
                error!(error = %e, id, "Error updating {}", R::KIND.label());
                self.fail(Action::Update);
                None
            }
        }
    }

    /// Deletes a record and drops it from the list. A blank id is ignored.
    pub fn delete(&mut self, id: &str) -> bool {
        if id.is_empty() {
            return false;
        }
        match self.api.delete_record(id) {
            Ok(()) => {
                self.lists.apply::<R>(ListAction::Deleted(id.to_string()));
                self.succeed(Action::Delete);
                true
            }
            Err(e) => {
                error!(error = %e, id, "Error deleting {}", R::KIND.label());
                self.fail(Action::Delete);
                false
            }
        }
    }

    /// Submits an edit or create panel with `fields`.
    ///
    /// The panel closes only when the API call succeeds. An edit panel on a
    /// record without an id stays open without calling the API.
    pub fn submit(
        &mut self,
        panel: &mut PanelSession<R>,
        fields: &Fields,
    ) -> Result<Option<R>, PanelError> {
        let result = match (panel.mode(), panel.record()) {
            (Some(PanelMode::Create), _) => self.create(fields),
            (Some(PanelMode::Edit), Some(record)) if !record.id().is_empty() => {
                let id = record.id().to_string();
                self.update(&id, fields)
            }
            (Some(PanelMode::Edit), _) => None,
            _ => return Err(PanelError::NothingToSubmit),
        };
        panel.finish_submit(result.is_some())?;
        Ok(result)
    }
}

impl<R, A, N> RowHandler<R> for EntityPage<R, A, N>
where
    R: Listed,
    A: RecordApi<R>,
    N: Notifier,
{
    fn delete_requested(&mut self, row: &R) {
        let id = row.id().to_string();
        self.delete(&id);
    }
}
