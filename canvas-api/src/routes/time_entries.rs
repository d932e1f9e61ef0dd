use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, put},
    Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    app_state::AppState,
    domain::TimerError,
    repositories::{NewTimeEntry, NewTimer, TimeEntryRecord, TimeEntryRepository},
    routes::ApiError,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_entries).post(create_entry))
        .route("/:id", delete(delete_entry))
        .route("/timer", get(active_timer).post(start_timer))
        .route("/timer/:id", put(stop_timer))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListEntriesQuery {
    project_id: i32,
}

#[instrument(name = "list_time_entries", skip(app_state))]
async fn list_entries(
    State(app_state): State<AppState>,
    Query(query): Query<ListEntriesQuery>,
) -> Result<Json<Vec<TimeEntryRecord>>, ApiError> {
    let entries = app_state
        .time_entry_repo
        .entries_for_project(query.project_id)
        .await?;

    Ok(Json(entries))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateEntryPayload {
    project_id: i32,
    designer_name: String,
    hours: f64,
    date: NaiveDate,
    description: Option<String>,
}

#[instrument(name = "create_time_entry", skip(app_state, body))]
async fn create_entry(
    State(app_state): State<AppState>,
    Json(body): Json<CreateEntryPayload>,
) -> Result<(StatusCode, Json<TimeEntryRecord>), ApiError> {
    if body.designer_name.trim().is_empty() {
        return Err(ApiError::bad_request("Designer name is required"));
    }
    if body.hours < 0.1 {
        return Err(ApiError::bad_request("Hours must be at least 0.1"));
    }

    let new_entry = NewTimeEntry {
        project_id: body.project_id,
        designer_name: body.designer_name,
        hours: body.hours,
        entry_date: body.date,
        description: body.description,
    };
    let entry = app_state.time_entry_repo.create_entry(&new_entry).await?;
    app_state
        .time_entry_repo
        .sync_project_hours(entry.project_id)
        .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

#[instrument(name = "delete_time_entry", skip(app_state))]
async fn delete_entry(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let entry = app_state
        .time_entry_repo
        .get_entry(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Time entry not found"))?;

    app_state.time_entry_repo.delete_entry(id).await?;
    app_state
        .time_entry_repo
        .sync_project_hours(entry.project_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActiveTimerQuery {
    designer: String,
}

#[instrument(name = "active_timer", skip(app_state))]
async fn active_timer(
    State(app_state): State<AppState>,
    Query(query): Query<ActiveTimerQuery>,
) -> Result<Json<Option<TimeEntryRecord>>, ApiError> {
    let timer = app_state
        .time_entry_repo
        .active_timer(&query.designer)
        .await?;

    Ok(Json(timer))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartTimerPayload {
    project_id: i32,
    designer_name: String,
    description: Option<String>,
}

#[instrument(name = "start_timer", skip(app_state, body))]
async fn start_timer(
    State(app_state): State<AppState>,
    Json(body): Json<StartTimerPayload>,
) -> Result<(StatusCode, Json<TimeEntryRecord>), ApiError> {
    if body.designer_name.trim().is_empty() {
        return Err(ApiError::bad_request("Designer name is required"));
    }

    // One running timer per designer.
    if app_state
        .time_entry_repo
        .active_timer(&body.designer_name)
        .await?
        .is_some()
    {
        return Err(TimerError::AlreadyRunning.into());
    }

    let new_timer = NewTimer {
        project_id: body.project_id,
        designer_name: body.designer_name,
        description: body.description,
        started_at: Utc::now(),
    };
    let timer = app_state.time_entry_repo.start_timer(&new_timer).await?;

    Ok((StatusCode::CREATED, Json(timer)))
}

#[instrument(name = "stop_timer", skip(app_state))]
async fn stop_timer(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TimeEntryRecord>, ApiError> {
    let entry = app_state
        .time_entry_repo
        .get_entry(id)
        .await?
        .ok_or(TimerError::NotFound)?;
    if !entry.is_timer_entry || entry.timer_ended_at.is_some() {
        return Err(TimerError::NotFound.into());
    }

    let now = Utc::now();
    let hours = elapsed_hours(entry.timer_started_at.unwrap_or(now), now);

    let stopped = app_state.time_entry_repo.stop_timer(id, now, hours).await?;
    app_state
        .time_entry_repo
        .sync_project_hours(entry.project_id)
        .await?;

    Ok(Json(stopped))
}

/// Elapsed timer hours, rounded to 2 decimals with a 0.1-hour floor so a
/// quickly stopped timer still registers.
fn elapsed_hours(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let hours = (end - start).num_seconds() as f64 / 3600.0;
    ((hours * 100.0).round() / 100.0).max(0.1)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, h, m, s).unwrap()
    }

    #[test]
    fn elapsed_hours_rounds_to_two_decimals() {
        // 1h 52m 30s = 1.875 hours, rounds to 1.88.
        assert_eq!(elapsed_hours(at(9, 0, 0), at(10, 52, 30)), 1.88);
    }

    #[test]
    fn elapsed_hours_has_a_minimum_charge() {
        assert_eq!(elapsed_hours(at(9, 0, 0), at(9, 0, 30)), 0.1);
    }

    #[test]
    fn elapsed_hours_whole_hours_stay_exact() {
        assert_eq!(elapsed_hours(at(9, 0, 0), at(11, 0, 0)), 2.0);
    }
}
