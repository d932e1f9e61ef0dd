use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use axum_extra::extract::CookieJar;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use workload::ProjectStatus;

use crate::{
    app_state::AppState,
    domain::resolve_team,
    repositories::{
        NewProject, ProjectFilters, ProjectRecord, ProjectRepository, TaskRecord, TaskRepository,
        UpdateProject,
    },
    routes::ApiError,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route(
            "/:id",
            get(get_project).put(update_project).delete(delete_project),
        )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListProjectsQuery {
    designer: Option<String>,
    status: Option<String>,
}

#[instrument(name = "list_projects", skip(app_state, jar))]
async fn list_projects(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<ListProjectsQuery>,
) -> Result<Json<Vec<ProjectRecord>>, ApiError> {
    let team = resolve_team(&jar, &app_state.team_repo).await?;

    let status = query
        .status
        .as_deref()
        .map(|s| s.parse::<ProjectStatus>())
        .transpose()
        .map_err(|_| ApiError::bad_request("Invalid status filter"))?;

    let filters = ProjectFilters {
        designer: query.designer,
        status,
    };
    let projects = app_state
        .project_repo
        .get_projects(team.id, &filters)
        .await?;

    Ok(Json(projects))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateProjectPayload {
    title: String,
    client: String,
    instructional_designer: String,
    status: Option<ProjectStatus>,
    priority: Option<String>,
    due_date: NaiveDate,
    early_reminder_date: Option<NaiveDate>,
    estimated_scoped_hours: f64,
    media_budget: Option<String>,
    notes: Option<String>,
}

#[instrument(name = "create_project", skip(app_state, jar, body))]
async fn create_project(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<CreateProjectPayload>,
) -> Result<(StatusCode, Json<ProjectRecord>), ApiError> {
    validate_name("Title", &body.title)?;
    validate_name("Client", &body.client)?;
    validate_name("Designer", &body.instructional_designer)?;
    if body.estimated_scoped_hours < 0.5 {
        return Err(ApiError::bad_request("Hours must be at least 0.5"));
    }

    let team = resolve_team(&jar, &app_state.team_repo).await?;

    let new_project = NewProject {
        team_id: team.id,
        title: body.title,
        client: body.client,
        instructional_designer: body.instructional_designer,
        status: body.status.unwrap_or(ProjectStatus::Planning),
        priority: body.priority,
        due_date: body.due_date,
        early_reminder_date: body.early_reminder_date,
        estimated_scoped_hours: body.estimated_scoped_hours,
        media_budget: body.media_budget,
        notes: body.notes,
        // No auth yet, so every write is attributed the same way.
        created_by: "user".to_string(),
    };
    let project = app_state.project_repo.create_project(&new_project).await?;

    Ok((StatusCode::CREATED, Json(project)))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectWithTasks {
    #[serde(flatten)]
    project: ProjectRecord,
    tasks: Vec<TaskRecord>,
}

#[instrument(name = "get_project", skip(app_state, jar))]
async fn get_project(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i32>,
) -> Result<Json<ProjectWithTasks>, ApiError> {
    let team = resolve_team(&jar, &app_state.team_repo).await?;

    let project = app_state
        .project_repo
        .get_project(id, team.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Project not found"))?;
    let tasks = app_state.task_repo.tasks_for_project(id).await?;

    Ok(Json(ProjectWithTasks { project, tasks }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateProjectPayload {
    title: Option<String>,
    client: Option<String>,
    instructional_designer: Option<String>,
    status: Option<ProjectStatus>,
    priority: Option<String>,
    due_date: Option<NaiveDate>,
    early_reminder_date: Option<NaiveDate>,
    estimated_scoped_hours: Option<f64>,
    hours_worked: Option<f64>,
    media_budget: Option<String>,
    notes: Option<String>,
}

#[instrument(name = "update_project", skip(app_state, jar, body))]
async fn update_project(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i32>,
    Json(body): Json<UpdateProjectPayload>,
) -> Result<Json<ProjectRecord>, ApiError> {
    if let Some(title) = &body.title {
        validate_name("Title", title)?;
    }
    if let Some(client) = &body.client {
        validate_name("Client", client)?;
    }
    if let Some(designer) = &body.instructional_designer {
        validate_name("Designer", designer)?;
    }
    if body.estimated_scoped_hours.is_some_and(|h| h < 0.5) {
        return Err(ApiError::bad_request("Hours must be at least 0.5"));
    }
    if body.hours_worked.is_some_and(|h| h < 0.0) {
        return Err(ApiError::bad_request("Hours worked cannot be negative"));
    }

    let team = resolve_team(&jar, &app_state.team_repo).await?;

    let update = UpdateProject {
        title: body.title,
        client: body.client,
        instructional_designer: body.instructional_designer,
        status: body.status,
        priority: body.priority,
        due_date: body.due_date,
        early_reminder_date: body.early_reminder_date,
        estimated_scoped_hours: body.estimated_scoped_hours,
        hours_worked: body.hours_worked,
        media_budget: body.media_budget,
        notes: body.notes,
    };
    let project = app_state
        .project_repo
        .update_project(id, team.id, &update)
        .await?;

    Ok(Json(project))
}

#[instrument(name = "delete_project", skip(app_state, jar))]
async fn delete_project(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let team = resolve_team(&jar, &app_state.team_repo).await?;

    // Tasks and time entries go with the project via ON DELETE CASCADE.
    app_state.project_repo.delete_project(id, team.id).await?;

    Ok(StatusCode::NO_CONTENT)
}

fn validate_name(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::bad_request(format!("{field} is required")));
    }
    if value.len() > 200 {
        return Err(ApiError::bad_request(format!(
            "{field} must be at most 200 characters"
        )));
    }
    Ok(())
}
