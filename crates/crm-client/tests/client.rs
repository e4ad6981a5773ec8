//! Client tests against a live API server on an ephemeral port.

use std::sync::Arc;
use std::thread::JoinHandle;

use crm_client::{ApiClient, ClientError, RecordApi};
use crm_core::enums::LeadStatus;
use crm_core::fields::{Fields, into_fields};
use crm_core::{Contact, Lead, Project, Record, Task};
use crm_storage::{SqliteStore, Storage};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tokio::sync::oneshot;

struct TestServer {
    api_url: String,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl TestServer {
    fn start() -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .unwrap();
        let listener = runtime
            .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
            .unwrap();
        let addr = listener.local_addr().unwrap();
        let store: Arc<dyn Storage> = Arc::new(SqliteStore::open_in_memory().unwrap());
        let (tx, rx) = oneshot::channel::<()>();

        let handle = std::thread::spawn(move || {
            runtime
                .block_on(crm_api::serve_with_shutdown(listener, store, async {
                    rx.await.ok();
                }))
                .unwrap();
        });

        Self {
            api_url: format!("http://{addr}/api"),
            shutdown: Some(tx),
            handle: Some(handle),
        }
    }

    fn client(&self) -> ApiClient {
        ApiClient::new(&self.api_url)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn fields(v: Value) -> Fields {
    into_fields(v).unwrap()
}

/// A base URL with nothing listening behind it.
fn dead_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api")
}

#[test]
fn health_check() {
    let server = TestServer::start();
    server.client().health().unwrap();
}

#[test]
fn create_list_update_delete_lead() {
    let server = TestServer::start();
    let client = server.client();

    assert!(client.list::<Lead>().is_empty());

    let lead: Lead = client
        .create(&fields(json!({"name": "Acme", "value": 5000})))
        .unwrap();
    assert_eq!(lead.status, LeadStatus::New);

    let updated: Lead = client
        .update(lead.id(), &fields(json!({"status": "Qualified"})))
        .unwrap();
    assert_eq!(updated.status, LeadStatus::Qualified);
    assert_eq!(updated.value, Some(5000.0));

    let listed = client.list::<Lead>();
    assert_eq!(listed, vec![updated.clone()]);

    assert!(client.delete::<Lead>(lead.id()));
    assert!(client.get::<Lead>(lead.id()).is_none());
    assert!(!client.delete::<Lead>(lead.id()));
}

#[test]
fn strict_calls_report_status() {
    let server = TestServer::start();
    let client = server.client();

    let err = client
        .try_create::<Task>(&fields(json!({"description": "no title"})))
        .unwrap_err();
    assert!(matches!(err, ClientError::Status { status: 400, .. }));

    let err = client
        .try_get::<Project>("000000000000000000000000")
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn lenient_create_returns_none_on_validation_failure() {
    let server = TestServer::start();
    let client = server.client();
    let created: Option<Contact> = client.create(&fields(json!({"type": "Client"})));
    assert!(created.is_none());
}

#[test]
fn record_api_trait_round_trip() {
    let server = TestServer::start();
    let client = server.client();

    let task: Task = RecordApi::<Task>::create_record(&client, &fields(json!({"title": "Call"})))
        .unwrap();
    let fetched: Task = RecordApi::<Task>::get_record(&client, task.id()).unwrap();
    assert_eq!(fetched, task);
    RecordApi::<Task>::delete_record(&client, task.id()).unwrap();
    let all: Vec<Task> = RecordApi::<Task>::list_records(&client).unwrap();
    assert!(all.is_empty());
}

#[test]
fn unreachable_server_yields_empty_and_false() {
    let client = ApiClient::new(dead_url());
    assert!(client.list::<Task>().is_empty());
    assert!(client.create::<Task>(&fields(json!({"title": "x"}))).is_none());
    assert!(!client.delete::<Task>("abc"));
    assert!(matches!(
        client.try_list::<Task>().unwrap_err(),
        ClientError::Transport { .. }
    ));
}

#[test]
fn dashboard_snapshot_collects_all_kinds() {
    let server = TestServer::start();
    let client = server.client();

    client
        .try_create::<Task>(&fields(json!({"title": "a", "status": "Completed"})))
        .unwrap();
    client
        .try_create::<Lead>(&fields(json!({"name": "b", "status": "Won"})))
        .unwrap();
    client
        .try_create::<Contact>(&fields(json!({"name": "c"})))
        .unwrap();

    let data = client.fetch_dashboard().unwrap();
    assert_eq!(data.tasks.len(), 1);
    assert_eq!(data.leads.len(), 1);
    assert_eq!(data.projects.len(), 0);
    assert_eq!(data.count::<Contact>(), 1);
}

#[test]
fn dashboard_fails_as_a_whole() {
    let client = ApiClient::new(dead_url());
    assert!(client.fetch_dashboard().is_err());
}
