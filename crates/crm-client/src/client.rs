//! [`ApiClient`] -- typed blocking calls against the resource API.

use crm_core::fields::Fields;
use crm_core::{Message, Record};
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use ureq::Agent;

use crate::error::{ClientError, Result};

/// The operations an entity page needs, one implementation per transport.
///
/// [`ApiClient`] implements it over HTTP; tests substitute in-memory fakes.
pub trait RecordApi<R: Record> {
    fn list_records(&self) -> Result<Vec<R>>;
    fn get_record(&self, id: &str) -> Result<R>;
    fn create_record(&self, fields: &Fields) -> Result<R>;
    fn update_record(&self, id: &str, fields: &Fields) -> Result<R>;
    fn delete_record(&self, id: &str) -> Result<()>;
}

/// HTTP client for all four resources under one base URL.
#[derive(Clone)]
pub struct ApiClient {
    agent: Agent,
    base_url: String,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Creates a client for `base_url` (e.g. `http://localhost:5000/api`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            agent: Agent::new_with_defaults(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url<R: Record>(&self) -> String {
        format!("{}/{}", self.base_url, R::KIND.collection())
    }

    fn record_url<R: Record>(&self, id: &str) -> String {
        format!("{}/{}", self.collection_url::<R>(), id)
    }

    fn read<T: DeserializeOwned>(
        url: &str,
        result: std::result::Result<ureq::http::Response<ureq::Body>, ureq::Error>,
    ) -> Result<T> {
        let mut response = result.map_err(|e| ClientError::from_ureq(url, e))?;
        response
            .body_mut()
            .read_json::<T>()
            .map_err(|e| ClientError::from_ureq(url, e))
    }

    // -- Strict calls ---------------------------------------------------------

    pub fn try_list<R: Record>(&self) -> Result<Vec<R>> {
        let url = self.collection_url::<R>();
        debug!(%url, "GET");
        Self::read(&url, self.agent.get(&url).call())
    }

    pub fn try_get<R: Record>(&self, id: &str) -> Result<R> {
        let url = self.record_url::<R>(id);
        debug!(%url, "GET");
        Self::read(&url, self.agent.get(&url).call())
    }

    pub fn try_create<R: Record>(&self, fields: &Fields) -> Result<R> {
        let url = self.collection_url::<R>();
        debug!(%url, "POST");
        Self::read(&url, self.agent.post(&url).send_json(fields))
    }

    pub fn try_update<R: Record>(&self, id: &str, fields: &Fields) -> Result<R> {
        let url = self.record_url::<R>(id);
        debug!(%url, "PUT");
        Self::read(&url, self.agent.put(&url).send_json(fields))
    }

    pub fn try_delete<R: Record>(&self, id: &str) -> Result<Message> {
        let url = self.record_url::<R>(id);
        debug!(%url, "DELETE");
        Self::read(&url, self.agent.delete(&url).call())
    }

    // -- Lenient calls: log and return an empty/absent/false result -----------

    /// All records, or an empty list if the call fails.
    pub fn list<R: Record>(&self) -> Vec<R> {
        self.try_list().unwrap_or_else(|e| {
            error!(error = %e, "Error fetching {}", R::KIND.collection());
            Vec::new()
        })
    }

    pub fn get<R: Record>(&self, id: &str) -> Option<R> {
        self.try_get(id)
            .map_err(|e| error!(error = %e, id, "Error fetching {}", R::KIND.label()))
            .ok()
    }

    pub fn create<R: Record>(&self, fields: &Fields) -> Option<R> {
        self.try_create(fields)
            .map_err(|e| error!(error = %e, "Error creating {}", R::KIND.label()))
            .ok()
    }

    pub fn update<R: Record>(&self, id: &str, fields: &Fields) -> Option<R> {
        self.try_update(id, fields)
            .map_err(|e| error!(error = %e, id, "Error updating {}", R::KIND.label()))
            .ok()
    }

    pub fn delete<R: Record>(&self, id: &str) -> bool {
        match self.try_delete::<R>(id) {
            Ok(_) => true,
            Err(e) => {
                error!(error = %e, id, "Error deleting {}", R::KIND.label());
                false
            }
        }
    }

    /// Checks `GET /health` on the server root.
    pub fn health(&self) -> Result<()> {
        let root = self
            .base_url
            .strip_suffix("/api")
            .unwrap_or(&self.base_url);
        let url = format!("{root}/health");
        self.agent
            .get(&url)
            .call()
            .map(|_| ())
            .map_err(|e| ClientError::from_ureq(&url, e))
    }
}

impl<R: Record> RecordApi<R> for ApiClient {
    fn list_records(&self) -> Result<Vec<R>> {
        self.try_list()
    }

    fn get_record(&self, id: &str) -> Result<R> {
        self.try_get(id)
    }

    fn create_record(&self, fields: &Fields) -> Result<R> {
        self.try_create(fields)
    }

    fn update_record(&self, id: &str, fields: &Fields) -> Result<R> {
        self.try_update(id, fields)
    }

    fn delete_record(&self, id: &str) -> Result<()> {
        self.try_delete::<R>(id).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_core::Task;
    use pretty_assertions::assert_eq;

    #[test]
    fn urls_are_built_from_base() {
        let client = ApiClient::new("http://localhost:5000/api/");
        assert_eq!(client.base_url(), "http://localhost:5000/api");
        assert_eq!(client.collection_url::<Task>(), "http://localhost:5000/api/tasks");
        assert_eq!(client.record_url::<Task>("abc"), "http://localhost:5000/api/tasks/abc");
    }
}
