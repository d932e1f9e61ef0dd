use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{post, put},
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    app_state::AppState,
    repositories::{NewTask, TaskRecord, TaskRepository},
    routes::ApiError,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_task))
        .route("/:id", put(toggle_task).delete(delete_task))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTaskPayload {
    project_id: i32,
    name: String,
    estimated_hours: Option<f64>,
}

#[instrument(name = "create_task", skip(app_state, body))]
async fn create_task(
    State(app_state): State<AppState>,
    Json(body): Json<CreateTaskPayload>,
) -> Result<(StatusCode, Json<TaskRecord>), ApiError> {
    if body.name.trim().is_empty() {
        return Err(ApiError::bad_request("Task name is required"));
    }
    if body.name.len() > 500 {
        return Err(ApiError::bad_request(
            "Task name must be at most 500 characters",
        ));
    }
    if body.estimated_hours.is_some_and(|h| h < 0.0) {
        return Err(ApiError::bad_request("Estimated hours cannot be negative"));
    }

    let new_task = NewTask {
        project_id: body.project_id,
        name: body.name,
        estimated_hours: body.estimated_hours,
    };
    let task = app_state.task_repo.create_task(&new_task).await?;

    Ok((StatusCode::CREATED, Json(task)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ToggleTaskPayload {
    completed: bool,
}

#[instrument(name = "toggle_task", skip(app_state))]
async fn toggle_task(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<ToggleTaskPayload>,
) -> Result<Json<TaskRecord>, ApiError> {
    let task = app_state
        .task_repo
        .set_completed(id, body.completed)
        .await?;

    Ok(Json(task))
}

#[instrument(name = "delete_task", skip(app_state))]
async fn delete_task(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    app_state.task_repo.delete_task(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
