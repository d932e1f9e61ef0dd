use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use tracing::instrument;

use crate::{
    app_state::AppState,
    domain::resolve_team,
    repositories::{CapacityRecord, CapacityRepository, NewCapacity},
    routes::ApiError,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_capacities).post(create_capacity))
        .route(
            "/:id",
            put(update_capacity).delete(delete_capacity),
        )
}

#[instrument(name = "list_capacities", skip(app_state, jar))]
async fn list_capacities(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<Vec<CapacityRecord>>, ApiError> {
    let team = resolve_team(&jar, &app_state.team_repo).await?;
    let capacities = app_state.capacity_repo.capacities_for_team(team.id).await?;

    Ok(Json(capacities))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateCapacityPayload {
    designer_name: String,
    weekly_available_hours: f64,
}

#[instrument(name = "create_capacity", skip(app_state, jar, body))]
async fn create_capacity(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<CreateCapacityPayload>,
) -> Result<(StatusCode, Json<CapacityRecord>), ApiError> {
    if body.designer_name.trim().is_empty() {
        return Err(ApiError::bad_request("Designer name is required"));
    }
    if body.designer_name.len() > 200 {
        return Err(ApiError::bad_request(
            "Designer name must be at most 200 characters",
        ));
    }
    validate_weekly_hours(body.weekly_available_hours)?;

    let team = resolve_team(&jar, &app_state.team_repo).await?;

    if app_state
        .capacity_repo
        .find_by_designer(team.id, &body.designer_name)
        .await?
        .is_some()
    {
        return Err(ApiError::conflict(format!(
            "Designer \"{}\" already exists",
            body.designer_name
        )));
    }

    let new_capacity = NewCapacity {
        team_id: team.id,
        designer_name: body.designer_name,
        weekly_available_hours: body.weekly_available_hours,
    };
    let capacity = app_state
        .capacity_repo
        .create_capacity(&new_capacity)
        .await?;

    Ok((StatusCode::CREATED, Json(capacity)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateCapacityPayload {
    weekly_available_hours: f64,
}

#[instrument(name = "update_capacity", skip(app_state, body))]
async fn update_capacity(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateCapacityPayload>,
) -> Result<Json<CapacityRecord>, ApiError> {
    validate_weekly_hours(body.weekly_available_hours)?;

    let capacity = app_state
        .capacity_repo
        .update_capacity(id, body.weekly_available_hours)
        .await?;

    Ok(Json(capacity))
}

#[instrument(name = "delete_capacity", skip(app_state))]
async fn delete_capacity(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    app_state.capacity_repo.delete_capacity(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

fn validate_weekly_hours(hours: f64) -> Result<(), ApiError> {
    if !(0.0..=168.0).contains(&hours) {
        return Err(ApiError::bad_request(
            "Weekly hours must be between 0 and 168",
        ));
    }
    Ok(())
}
