//! REST surface for the task service.
//!
//! # Design
//! Thin handlers over `TaskService`: extract, call, map. Error mapping is
//! centralized in the `IntoResponse` impl — validation failures become
//! 400 and unknown ids 404, both with a `{"error": ...}` body that carries
//! the service message and nothing about internals. Deleting an unknown id
//! answers 200 like any other delete; the operation is idempotent.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde::Serialize;
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::cors::CorsLayer;
use uuid::Uuid;

pub mod service;

pub use service::{Priority, ServiceError, Task, TaskForm, TaskService};

pub type SharedService = Arc<RwLock<TaskService>>;

pub fn app() -> Router {
    let service: SharedService = Arc::new(RwLock::new(TaskService::new()));
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", put(update_task).delete(delete_task))
        .layer(CorsLayer::permissive())
        .with_state(service)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Serialize)]
struct DeleteReply {
    message: String,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::EmptyTitle
            | ServiceError::InvalidPriority(_)
            | ServiceError::InvalidDueDate(_) => StatusCode::BAD_REQUEST,
        };
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

async fn list_tasks(State(service): State<SharedService>) -> Json<Vec<Task>> {
    Json(service.read().await.list())
}

async fn create_task(
    State(service): State<SharedService>,
    Json(form): Json<TaskForm>,
) -> Result<(StatusCode, Json<Task>), ServiceError> {
    let task = service.write().await.create(&form)?;
    tracing::debug!(id = %task.id, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

async fn update_task(
    State(service): State<SharedService>,
    Path(id): Path<Uuid>,
    Json(form): Json<TaskForm>,
) -> Result<Json<Task>, ServiceError> {
    let task = service.write().await.update(id, &form)?;
    tracing::debug!(%id, "task updated");
    Ok(Json(task))
}

async fn delete_task(
    State(service): State<SharedService>,
    Path(id): Path<Uuid>,
) -> Json<DeleteReply> {
    let removed = service.write().await.delete(id);
    if !removed {
        tracing::debug!(%id, "delete of unknown task treated as no-op");
    }
    Json(DeleteReply {
        message: "Task deleted successfully".to_string(),
    })
}
