use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    config::Settings,
    repositories::{
        CapacityRepositoryImpl, ProjectRepositoryImpl, TaskRepositoryImpl, TeamRepositoryImpl,
        TimeEntryRepositoryImpl,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub team_repo: Arc<TeamRepositoryImpl>,
    pub project_repo: Arc<ProjectRepositoryImpl>,
    pub task_repo: Arc<TaskRepositoryImpl>,
    pub time_entry_repo: Arc<TimeEntryRepositoryImpl>,
    pub capacity_repo: Arc<CapacityRepositoryImpl>,
    pub default_weekly_capacity: f64,
}

impl AppState {
    pub fn new(db_pool: PgPool, config: &Settings) -> Self {
        Self {
            team_repo: Arc::new(TeamRepositoryImpl::new(db_pool.clone())),
            project_repo: Arc::new(ProjectRepositoryImpl::new(db_pool.clone())),
            task_repo: Arc::new(TaskRepositoryImpl::new(db_pool.clone())),
            time_entry_repo: Arc::new(TimeEntryRepositoryImpl::new(db_pool.clone())),
            capacity_repo: Arc::new(CapacityRepositoryImpl::new(db_pool)),
            default_weekly_capacity: config.dashboard.default_weekly_capacity,
        }
    }
}
