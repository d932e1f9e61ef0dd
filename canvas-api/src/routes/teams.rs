use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::{cookie::Cookie, CookieJar};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    app_state::AppState,
    domain::TEAM_COOKIE_NAME,
    repositories::{Team, TeamRepository},
    routes::ApiError,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_teams).post(create_team))
        .route("/select", post(select_team))
}

#[instrument(name = "list_teams", skip(app_state))]
async fn list_teams(State(app_state): State<AppState>) -> Result<Json<Vec<Team>>, ApiError> {
    let teams = app_state.team_repo.all_teams().await?;

    Ok(Json(teams))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTeamPayload {
    name: String,
}

#[instrument(name = "create_team", skip(app_state, body))]
async fn create_team(
    State(app_state): State<AppState>,
    Json(body): Json<CreateTeamPayload>,
) -> Result<(StatusCode, Json<Team>), ApiError> {
    if body.name.trim().is_empty() {
        return Err(ApiError::bad_request("Team name is required"));
    }

    let team = app_state.team_repo.create_team(&body.name).await?;

    Ok((StatusCode::CREATED, Json(team)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SelectTeamPayload {
    team_id: i32,
}

#[instrument(name = "select_team", skip(app_state, jar))]
async fn select_team(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<SelectTeamPayload>,
) -> Result<(CookieJar, StatusCode), ApiError> {
    let team = app_state
        .team_repo
        .get_team(body.team_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Team not found"))?;

    let jar = jar.add(Cookie::new(TEAM_COOKIE_NAME, team.id.to_string()));

    Ok((jar, StatusCode::OK))
}
