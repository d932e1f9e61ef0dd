use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::PgPool;
use workload::{ProjectId, ProjectStatus};

use super::repo_error::RepositoryError;

/// A project row as stored, including the bookkeeping fields the workload
/// calculations never see.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: i32,
    pub team_id: i32,
    pub title: String,
    pub client: String,
    pub instructional_designer: String,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
    pub priority: Option<String>,
    pub due_date: NaiveDate,
    pub early_reminder_date: Option<NaiveDate>,
    pub estimated_scoped_hours: f64,
    pub hours_worked: f64,
    pub media_budget: Option<String>,
    pub notes: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectRecord {
    /// Core view of this record for the workload calculations.
    pub fn to_core(&self) -> workload::Project {
        workload::Project {
            id: ProjectId::new(self.id),
            title: self.title.clone(),
            client: self.client.clone(),
            instructional_designer: self.instructional_designer.clone(),
            status: self.status,
            due_date: self.due_date,
            estimated_scoped_hours: self.estimated_scoped_hours,
            hours_worked: self.hours_worked,
        }
    }
}

#[derive(Debug, Default)]
pub struct ProjectFilters {
    pub designer: Option<String>,
    pub status: Option<ProjectStatus>,
}

pub struct NewProject {
    pub team_id: i32,
    pub title: String,
    pub client: String,
    pub instructional_designer: String,
    pub status: ProjectStatus,
    pub priority: Option<String>,
    pub due_date: NaiveDate,
    pub early_reminder_date: Option<NaiveDate>,
    pub estimated_scoped_hours: f64,
    pub media_budget: Option<String>,
    pub notes: Option<String>,
    pub created_by: String,
}

#[derive(Debug, Default)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub client: Option<String>,
    pub instructional_designer: Option<String>,
    pub status: Option<ProjectStatus>,
    pub priority: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub early_reminder_date: Option<NaiveDate>,
    pub estimated_scoped_hours: Option<f64>,
    pub hours_worked: Option<f64>,
    pub media_budget: Option<String>,
    pub notes: Option<String>,
}

pub trait ProjectRepository {
    async fn get_projects(
        &self,
        team_id: i32,
        filters: &ProjectFilters,
    ) -> Result<Vec<ProjectRecord>, RepositoryError>;
    async fn get_project(
        &self,
        id: i32,
        team_id: i32,
    ) -> Result<Option<ProjectRecord>, RepositoryError>;
    async fn create_project(&self, project: &NewProject) -> Result<ProjectRecord, RepositoryError>;
    async fn update_project(
        &self,
        id: i32,
        team_id: i32,
        update: &UpdateProject,
    ) -> Result<ProjectRecord, RepositoryError>;
    async fn delete_project(&self, id: i32, team_id: i32) -> Result<(), RepositoryError>;
}

pub struct ProjectRepositoryImpl {
    pool: PgPool,
}

impl ProjectRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ProjectRepository for ProjectRepositoryImpl {
    async fn get_projects(
        &self,
        team_id: i32,
        filters: &ProjectFilters,
    ) -> Result<Vec<ProjectRecord>, RepositoryError> {
        let projects = sqlx::query_as::<_, ProjectRecord>(
            r#"
            SELECT *
            FROM projects
            WHERE team_id = $1
              AND ($2::text IS NULL OR instructional_designer = $2)
              AND ($3::text IS NULL OR status = $3)
            ORDER BY due_date
            "#,
        )
        .bind(team_id)
        .bind(filters.designer.as_deref())
        .bind(filters.status.map(|s| s.to_string()))
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    async fn get_project(
        &self,
        id: i32,
        team_id: i32,
    ) -> Result<Option<ProjectRecord>, RepositoryError> {
        let project = sqlx::query_as::<_, ProjectRecord>(
            r#"
            SELECT *
            FROM projects
            WHERE id = $1 AND team_id = $2
            "#,
        )
        .bind(id)
        .bind(team_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    async fn create_project(&self, project: &NewProject) -> Result<ProjectRecord, RepositoryError> {
        let created = sqlx::query_as::<_, ProjectRecord>(
            r#"
            INSERT INTO projects (
                team_id, title, client, instructional_designer, status, priority,
                due_date, early_reminder_date, estimated_scoped_hours,
                media_budget, notes, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(project.team_id)
        .bind(&project.title)
        .bind(&project.client)
        .bind(&project.instructional_designer)
        .bind(project.status.to_string())
        .bind(&project.priority)
        .bind(project.due_date)
        .bind(project.early_reminder_date)
        .bind(project.estimated_scoped_hours)
        .bind(&project.media_budget)
        .bind(&project.notes)
        .bind(&project.created_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update_project(
        &self,
        id: i32,
        team_id: i32,
        update: &UpdateProject,
    ) -> Result<ProjectRecord, RepositoryError> {
        let updated = sqlx::query_as::<_, ProjectRecord>(
            r#"
            UPDATE projects
            SET title = COALESCE($3, title),
                client = COALESCE($4, client),
                instructional_designer = COALESCE($5, instructional_designer),
                status = COALESCE($6, status),
                priority = COALESCE($7, priority),
                due_date = COALESCE($8, due_date),
                early_reminder_date = COALESCE($9, early_reminder_date),
                estimated_scoped_hours = COALESCE($10, estimated_scoped_hours),
                hours_worked = COALESCE($11, hours_worked),
                media_budget = COALESCE($12, media_budget),
                notes = COALESCE($13, notes),
                updated_at = NOW()
            WHERE id = $1 AND team_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(team_id)
        .bind(&update.title)
        .bind(&update.client)
        .bind(&update.instructional_designer)
        .bind(update.status.map(|s| s.to_string()))
        .bind(&update.priority)
        .bind(update.due_date)
        .bind(update.early_reminder_date)
        .bind(update.estimated_scoped_hours)
        .bind(update.hours_worked)
        .bind(&update.media_budget)
        .bind(&update.notes)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("project {id}")))?;

        Ok(updated)
    }

    async fn delete_project(&self, id: i32, team_id: i32) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            DELETE FROM projects
            WHERE id = $1 AND team_id = $2
            "#,
        )
        .bind(id)
        .bind(team_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("project {id}")));
        }

        Ok(())
    }
}
