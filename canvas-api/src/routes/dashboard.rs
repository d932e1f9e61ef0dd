use axum::{extract::State, routing::get, Json, Router};
use axum_extra::extract::CookieJar;
use chrono::Local;
use itertools::Itertools;
use serde::Serialize;
use tracing::instrument;
use workload::{
    aggregate_team_workload, evaluate_risk, select_focus_project, Project, RiskFlags, RiskOptions,
    TeamWorkloadSummary,
};

use crate::{
    app_state::AppState,
    domain::resolve_team,
    repositories::{CapacityRepository, ProjectFilters, ProjectRepository},
    routes::ApiError,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(dashboard))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DesignerFocus {
    designer_name: String,
    project: Option<Project>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RiskyProject {
    project: Project,
    risk: RiskFlags,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardResponse {
    workload: TeamWorkloadSummary,
    focus: Vec<DesignerFocus>,
    risky_projects: Vec<RiskyProject>,
}

#[instrument(name = "dashboard", skip(app_state, jar))]
async fn dashboard(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<DashboardResponse>, ApiError> {
    let team = resolve_team(&jar, &app_state.team_repo).await?;

    let project_filters = ProjectFilters::default();
    let (project_records, capacity_records) = tokio::try_join!(
        app_state
            .project_repo
            .get_projects(team.id, &project_filters),
        app_state.capacity_repo.capacities_for_team(team.id),
    )?;

    let projects: Vec<Project> = project_records.iter().map(|p| p.to_core()).collect();
    let capacities: Vec<_> = capacity_records.iter().map(|c| c.to_core()).collect();
    let today = Local::now().date_naive();

    let workload =
        aggregate_team_workload(&projects, &capacities, app_state.default_weekly_capacity);

    // One focus card per designer, in first-appearance order. The project
    // list arrives due-date ascending, so score ties go to the earliest due.
    let focus = projects
        .iter()
        .map(|p| p.instructional_designer.as_str())
        .unique()
        .map(|designer| {
            let assigned: Vec<Project> = projects
                .iter()
                .filter(|p| p.instructional_designer == designer)
                .cloned()
                .collect();
            DesignerFocus {
                designer_name: designer.to_string(),
                project: select_focus_project(&assigned, today).cloned(),
            }
        })
        .collect();

    let risky_projects = projects
        .iter()
        .map(|project| RiskyProject {
            risk: evaluate_risk(project, today, RiskOptions::default()),
            project: project.clone(),
        })
        .filter(|entry| entry.risk.is_at_risk || entry.risk.is_over_budget)
        .collect();

    Ok(Json(DashboardResponse {
        workload,
        focus,
        risky_projects,
    }))
}
