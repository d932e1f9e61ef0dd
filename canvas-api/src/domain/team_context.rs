use axum_extra::extract::CookieJar;

use crate::repositories::{RepositoryError, Team, TeamRepository, TeamRepositoryImpl};

/// Cookie tracking the selected team until real auth lands.
pub const TEAM_COOKIE_NAME: &str = "selected-team-id";

/// Name given to the team that is auto-created on first use.
pub const DEFAULT_TEAM_NAME: &str = "Default Team";

/// Resolve the current team from the selection cookie.
///
/// A cookie pointing at a deleted team is ignored. Falls back to the first
/// team, creating a default one if none exists yet, so every team-scoped
/// handler always has a team to work with.
pub async fn resolve_team(
    jar: &CookieJar,
    team_repo: &TeamRepositoryImpl,
) -> Result<Team, RepositoryError> {
    if let Some(cookie) = jar.get(TEAM_COOKIE_NAME) {
        if let Ok(id) = cookie.value().parse::<i32>() {
            if let Some(team) = team_repo.get_team(id).await? {
                return Ok(team);
            }
        }
    }

    if let Some(team) = team_repo.first_team().await? {
        return Ok(team);
    }

    team_repo.create_team(DEFAULT_TEAM_NAME).await
}
