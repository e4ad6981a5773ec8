//! [`ResourceService`] -- the per-entity list/create/get/update/delete contract.
//!
//! One generic implementation serves all four record kinds. Calls are
//! blocking; the HTTP layer runs them on tokio's blocking pool.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crm_core::fields::{Fields, merge_patch, sanitize};
use crm_core::{Message, Record};
use crm_storage::Storage;
use tracing::debug;

use crate::error::{ApiError, Result};

/// Resource operations for records of type `R`, backed by a shared store.
pub struct ResourceService<R> {
    store: Arc<dyn Storage>,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceService<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _record: PhantomData,
        }
    }
}

impl<R: Record> fmt::Debug for ResourceService<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceService")
            .field("collection", &R::KIND.collection())
            .finish_non_exhaustive()
    }
}

impl<R: Record> ResourceService<R> {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    fn collection(&self) -> &'static str {
        R::KIND.collection()
    }

    fn storage_err(err: crm_storage::StorageError) -> ApiError {
        ApiError::from_storage(R::KIND, err)
    }

    fn decode_stored(doc: Fields) -> Result<R> {
        R::decode(doc).map_err(|e| ApiError::Internal(format!("stored record unreadable: {e}")))
    }

    /// All records, newest created first.
    pub fn list(&self) -> Result<Vec<R>> {
        let docs = self.store.list(self.collection()).map_err(Self::storage_err)?;
        debug!(collection = self.collection(), count = docs.len(), "listed records");
        docs.into_iter().map(Self::decode_stored).collect()
    }

    /// Validates `fields`, stores a new record and returns it with its
    /// assigned id and timestamps.
    pub fn create(&self, fields: Fields) -> Result<R> {
        let record = R::from_fields(sanitize(fields))?;
        let stored = self
            .store
            .insert(self.collection(), record.to_fields())
            .map_err(Self::storage_err)?;
        let created = Self::decode_stored(stored)?;
        debug!(collection = self.collection(), id = created.id(), "created record");
        Ok(created)
    }

    pub fn get(&self, id: &str) -> Result<R> {
        let doc = self.store.get(self.collection(), id).map_err(Self::storage_err)?;
        Self::decode_stored(doc)
    }

    /// Merges `patch` onto the stored record, revalidates and saves it.
    ///
    /// Managed keys in the patch are ignored; `null` clears a field.
    pub fn update(&self, id: &str, patch: Fields) -> Result<R> {
        let mut doc = self.store.get(self.collection(), id).map_err(Self::storage_err)?;
        merge_patch(&mut doc, patch);
        let record = R::from_fields(doc)?;
        let stored = self
            .store
            .replace(self.collection(), id, record.to_fields())
            .map_err(Self::storage_err)?;
        debug!(collection = self.collection(), id, "updated record");
        Self::decode_stored(stored)
    }

    /// Removes the record and returns `"<Entity> deleted"`.
    pub fn delete(&self, id: &str) -> Result<Message> {
        self.store.delete(self.collection(), id).map_err(Self::storage_err)?;
        debug!(collection = self.collection(), id, "deleted record");
        Ok(Message::new(format!("{} deleted", R::KIND.label())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_core::enums::{
        ContactType, LeadStatus, ProjectStatus, RelatedKind, TaskPriority, TaskStatus,
    };
    use crm_core::fields::into_fields;
    use crm_core::{Contact, Lead, Project, RelatedTo, Task, ValidationError};
    use crm_storage::SqliteStore;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn store() -> Arc<dyn Storage> {
        Arc::new(SqliteStore::open_in_memory().unwrap())
    }

    fn fields(v: Value) -> Fields {
        into_fields(v).unwrap()
    }

    #[test]
    fn task_create_applies_defaults() {
        let svc = ResourceService::<Task>::new(store());
        let task = svc.create(fields(json!({"title": "Call back"}))).unwrap();
        assert_eq!(task.status, TaskStatus::New);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert_eq!(task.id().len(), 24);
        assert!(task.meta.created_at.is_some());
        assert_eq!(task.meta.created_at, task.meta.updated_at);
    }

    #[test]
    fn task_create_without_title_stores_nothing() {
        let svc = ResourceService::<Task>::new(store());
        let err = svc.create(fields(json!({"description": "x"}))).unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation(ValidationError::Required { field: "title" })
        ));
        assert!(svc.list().unwrap().is_empty());
    }

    #[test]
    fn lead_update_preserves_other_fields() {
        let svc = ResourceService::<Lead>::new(store());
        let lead = svc
            .create(fields(json!({"name": "Acme", "value": 5000})))
            .unwrap();
        let updated = svc
            .update(lead.id(), fields(json!({"status": "Qualified"})))
            .unwrap();
        assert_eq!(updated.status, LeadStatus::Qualified);
        assert_eq!(updated.name, "Acme");
        assert_eq!(updated.value, Some(5000.0));
        assert_eq!(updated.meta.created_at, lead.meta.created_at);
        assert!(updated.meta.updated_at > lead.meta.updated_at);
    }

    #[test]
    fn update_ignores_managed_keys() {
        let svc = ResourceService::<Lead>::new(store());
        let lead = svc.create(fields(json!({"name": "Acme"}))).unwrap();
        let updated = svc
            .update(
                lead.id(),
                fields(json!({"_id": "other", "createdAt": "2000-01-01", "name": "Acme Ltd"})),
            )
            .unwrap();
        assert_eq!(updated.id(), lead.id());
        assert_eq!(updated.meta.created_at, lead.meta.created_at);
    }

    #[test]
    fn update_null_clears_optional_field() {
        let svc = ResourceService::<Lead>::new(store());
        let lead = svc
            .create(fields(json!({"name": "Acme", "company": "Acme Inc"})))
            .unwrap();
        let updated = svc.update(lead.id(), fields(json!({"company": null}))).unwrap();
        assert_eq!(updated.company, None);
    }

    #[test]
    fn update_invalid_leaves_record_untouched() {
        let svc = ResourceService::<Lead>::new(store());
        let lead = svc.create(fields(json!({"name": "Acme"}))).unwrap();
        let err = svc
            .update(lead.id(), fields(json!({"status": "Closed"})))
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(svc.get(lead.id()).unwrap(), lead);

        let err = svc.update(lead.id(), fields(json!({"name": null}))).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn update_missing_is_not_found() {
        let svc = ResourceService::<Project>::new(store());
        let err = svc
            .update("000000000000000000000000", fields(json!({"name": "x"})))
            .unwrap_err();
        assert_eq!(err.to_string(), "Project not found");
    }

    #[test]
    fn contact_delete_then_get() {
        let svc = ResourceService::<Contact>::new(store());
        let contact = svc
            .create(fields(json!({"name": "Ann", "tags": "vip, east"})))
            .unwrap();
        assert_eq!(contact.contact_type, ContactType::Client);
        assert_eq!(contact.tags, vec!["vip", "east"]);

        let msg = svc.delete(contact.id()).unwrap();
        assert_eq!(msg.message, "Contact deleted");
        let err = svc.get(contact.id()).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert!(matches!(svc.delete(contact.id()).unwrap_err(), ApiError::NotFound(_)));
    }

    #[test]
    fn project_progress_clamped_and_alias() {
        let svc = ResourceService::<Project>::new(store());
        let p = svc
            .create(fields(json!({"name": "Site", "progress": 150, "status": "Planning"})))
            .unwrap();
        assert_eq!(p.progress, 100.0);
        assert_eq!(p.status, ProjectStatus::Planned);
        let p = svc.update(p.id(), fields(json!({"progress": -5}))).unwrap();
        assert_eq!(p.progress, 0.0);
    }

    #[test]
    fn list_newest_first() {
        let svc = ResourceService::<Task>::new(store());
        for title in ["a", "b", "c"] {
            svc.create(fields(json!({"title": title}))).unwrap();
        }
        let titles: Vec<_> = svc.list().unwrap().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["c", "b", "a"]);
    }

    #[test]
    fn create_then_get_keeps_strings_as_supplied() {
        let svc = ResourceService::<Task>::new(store());
        let created = svc
            .create(fields(json!({"title": "  Draft contract  ", "assignedTo": "   "})))
            .unwrap();
        assert_eq!(created.title, "  Draft contract  ");
        assert_eq!(created.assigned_to.as_deref(), Some("   "));
        assert_eq!(svc.get(created.id()).unwrap(), created);
    }

    #[test]
    fn lead_fractional_value_round_trips() {
        let svc = ResourceService::<Lead>::new(store());
        let lead = svc
            .create(fields(json!({"name": "Acme", "value": 1500.5})))
            .unwrap();
        assert_eq!(lead.value, Some(1500.5));
        assert_eq!(svc.get(lead.id()).unwrap().value, Some(1500.5));
        assert_eq!(lead.to_value()["value"], json!(1500.5));
    }

    #[test]
    fn contact_tags_from_comma_string() {
        let svc = ResourceService::<Contact>::new(store());
        let contact = svc
            .create(fields(json!({"name": "Ann", "tags": "a, b, c"})))
            .unwrap();
        assert_eq!(contact.tags, vec!["a", "b", "c"]);
        assert_eq!(svc.get(contact.id()).unwrap().to_value()["tags"], json!(["a", "b", "c"]));
    }

    #[test]
    fn creates_minus_deletes_newest_first() {
        let svc = ResourceService::<Contact>::new(store());
        let ids: Vec<String> = (0..6)
            .map(|i| {
                svc.create(fields(json!({"name": format!("c{i}")})))
                    .unwrap()
                    .id()
                    .to_string()
            })
            .collect();
        for id in [&ids[0], &ids[3]] {
            svc.delete(id).unwrap();
        }

        let names: Vec<_> = svc.list().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["c5", "c4", "c2", "c1"]);
    }

    #[test]
    fn update_changes_only_the_patched_field() {
        let svc = ResourceService::<Lead>::new(store());
        let lead = svc
            .create(fields(json!({
                "name": "Acme",
                "company": "Acme Inc",
                "email": "sales@acme.test",
                "phone": "555-0100",
                "source": "Referral",
                "value": 1500.5,
                "notes": "warm",
                "lastContacted": "2024-03-01"
            })))
            .unwrap();
        let updated = svc
            .update(lead.id(), fields(json!({"status": "Proposal"})))
            .unwrap();

        let mut before = lead.to_fields();
        let mut after = updated.to_fields();
        assert_eq!(after.remove("status"), Some(json!("Proposal")));
        before.remove("status");
        assert_ne!(after.remove("updatedAt"), before.remove("updatedAt"));
        assert_eq!(after, before);
    }

    #[test]
    fn partial_related_to_update_keeps_type() {
        let svc = ResourceService::<Task>::new(store());
        let task = svc
            .create(fields(json!({"title": "t", "relatedTo": {"type": "Contact", "id": "a"}})))
            .unwrap();
        let updated = svc
            .update(task.id(), fields(json!({"relatedTo": {"id": "b"}})))
            .unwrap();
        assert_eq!(
            updated.related_to,
            Some(RelatedTo {
                kind: RelatedKind::Contact,
                id: "b".to_string()
            })
        );
    }
}
