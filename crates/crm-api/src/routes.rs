//! HTTP routes: one generic resource router, mounted once per entity.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use crm_core::fields::Fields;
use crm_core::{Contact, Lead, Message, Project, Record, Task};
use crm_storage::Storage;
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::{ApiError, Result};
use crate::service::ResourceService;

/// Runs a blocking store call on tokio's blocking pool.
async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(format!("worker task failed: {e}")))?
}

/// Accepts only JSON object bodies; everything else is a 400.
fn object_body(payload: std::result::Result<Json<Value>, JsonRejection>) -> Result<Fields> {
    match payload {
        Ok(Json(Value::Object(map))) => Ok(map),
        Ok(Json(_)) => Err(ApiError::BadRequest("request body must be a JSON object".into())),
        Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
    }
}

/// GET /
async fn list<R: Record>(State(svc): State<ResourceService<R>>) -> Result<Json<Vec<R>>> {
    let records = blocking(move || svc.list()).await?;
    Ok(Json(records))
}

/// POST /
async fn create<R: Record>(
    State(svc): State<ResourceService<R>>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<R>)> {
    let fields = object_body(payload)?;
    let record = blocking(move || svc.create(fields)).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /{id}
async fn show<R: Record>(
    State(svc): State<ResourceService<R>>,
    Path(id): Path<String>,
) -> Result<Json<R>> {
    let record = blocking(move || svc.get(&id)).await?;
    Ok(Json(record))
}

/// PUT /{id}
async fn update<R: Record>(
    State(svc): State<ResourceService<R>>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<R>> {
    let patch = object_body(payload)?;
    let record = blocking(move || svc.update(&id, patch)).await?;
    Ok(Json(record))
}

/// DELETE /{id}
async fn remove<R: Record>(
    State(svc): State<ResourceService<R>>,
    Path(id): Path<String>,
) -> Result<Json<Message>> {
    let message = blocking(move || svc.delete(&id)).await?;
    Ok(Json(message))
}

/// Builds the five routes for one entity kind.
pub fn resource_router<R: Record>(service: ResourceService<R>) -> Router {
    Router::new()
        .route("/", get(list::<R>).post(create::<R>))
        .route("/{id}", get(show::<R>).put(update::<R>).delete(remove::<R>))
        .with_state(service)
}

/// GET /health
async fn health() -> Json<Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn no_route() -> impl IntoResponse {
    ApiError::NoRoute
}

/// Path under which an entity kind is mounted (`/api/tasks`, ...).
pub fn mount_path<R: Record>() -> String {
    format!("/api/{}", R::KIND.collection())
}

/// Builds the complete application router over `store`.
pub fn create_router(store: Arc<dyn Storage>) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest(
            &mount_path::<Task>(),
            resource_router(ResourceService::<Task>::new(Arc::clone(&store))),
        )
        .nest(
            &mount_path::<Lead>(),
            resource_router(ResourceService::<Lead>::new(Arc::clone(&store))),
        )
        .nest(
            &mount_path::<Project>(),
            resource_router(ResourceService::<Project>::new(Arc::clone(&store))),
        )
        .nest(
            &mount_path::<Contact>(),
            resource_router(ResourceService::<Contact>::new(store)),
        )
        .fallback(no_route)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
