use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use tracing::instrument;
use workload::aggregate_team_workload;

use crate::{
    app_state::AppState,
    domain::{build_csv_report, resolve_team},
    repositories::{CapacityRepository, ProjectFilters, ProjectRepository},
    routes::ApiError,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/report.csv", get(export_report))
}

#[instrument(name = "export_report", skip(app_state, jar))]
async fn export_report(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let team = resolve_team(&jar, &app_state.team_repo).await?;

    let project_filters = ProjectFilters::default();
    let (project_records, capacity_records) = tokio::try_join!(
        app_state
            .project_repo
            .get_projects(team.id, &project_filters),
        app_state.capacity_repo.capacities_for_team(team.id),
    )?;

    let projects: Vec<_> = project_records.iter().map(|p| p.to_core()).collect();
    let capacities: Vec<_> = capacity_records.iter().map(|c| c.to_core()).collect();
    let workload =
        aggregate_team_workload(&projects, &capacities, app_state.default_weekly_capacity);

    let generated_at = Utc::now();
    let csv = build_csv_report(&project_records, &workload.designers, generated_at);

    let filename = format!("canvas-report-{}.csv", generated_at.date_naive());
    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                "text/csv; charset=utf-8".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    ))
}
