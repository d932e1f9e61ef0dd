use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::PgPool;

use super::repo_error::RepositoryError;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntryRecord {
    pub id: i32,
    pub project_id: i32,
    pub designer_name: String,
    pub hours: f64,
    pub entry_date: NaiveDate,
    pub description: Option<String>,
    pub is_timer_entry: bool,
    pub timer_started_at: Option<DateTime<Utc>>,
    pub timer_ended_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

pub struct NewTimeEntry {
    pub project_id: i32,
    pub designer_name: String,
    pub hours: f64,
    pub entry_date: NaiveDate,
    pub description: Option<String>,
}

pub struct NewTimer {
    pub project_id: i32,
    pub designer_name: String,
    pub description: Option<String>,
    pub started_at: DateTime<Utc>,
}

pub trait TimeEntryRepository {
    async fn entries_for_project(
        &self,
        project_id: i32,
    ) -> Result<Vec<TimeEntryRecord>, RepositoryError>;
    async fn get_entry(&self, id: i32) -> Result<Option<TimeEntryRecord>, RepositoryError>;
    async fn create_entry(&self, entry: &NewTimeEntry)
        -> Result<TimeEntryRecord, RepositoryError>;
    async fn delete_entry(&self, id: i32) -> Result<(), RepositoryError>;
    async fn active_timer(
        &self,
        designer_name: &str,
    ) -> Result<Option<TimeEntryRecord>, RepositoryError>;
    async fn start_timer(&self, timer: &NewTimer) -> Result<TimeEntryRecord, RepositoryError>;
    async fn stop_timer(
        &self,
        id: i32,
        ended_at: DateTime<Utc>,
        hours: f64,
    ) -> Result<TimeEntryRecord, RepositoryError>;
    async fn sync_project_hours(&self, project_id: i32) -> Result<(), RepositoryError>;
}

pub struct TimeEntryRepositoryImpl {
    pool: PgPool,
}

impl TimeEntryRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl TimeEntryRepository for TimeEntryRepositoryImpl {
    async fn entries_for_project(
        &self,
        project_id: i32,
    ) -> Result<Vec<TimeEntryRecord>, RepositoryError> {
        let entries = sqlx::query_as::<_, TimeEntryRecord>(
            r#"
            SELECT *
            FROM time_entries
            WHERE project_id = $1
            ORDER BY entry_date DESC, created_at DESC
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    async fn get_entry(&self, id: i32) -> Result<Option<TimeEntryRecord>, RepositoryError> {
        let entry = sqlx::query_as::<_, TimeEntryRecord>(
            r#"
            SELECT *
            FROM time_entries
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    async fn create_entry(
        &self,
        entry: &NewTimeEntry,
    ) -> Result<TimeEntryRecord, RepositoryError> {
        let created = sqlx::query_as::<_, TimeEntryRecord>(
            r#"
            INSERT INTO time_entries (project_id, designer_name, hours, entry_date, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(entry.project_id)
        .bind(&entry.designer_name)
        .bind(entry.hours)
        .bind(entry.entry_date)
        .bind(&entry.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn delete_entry(&self, id: i32) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            DELETE FROM time_entries
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("time entry {id}")));
        }

        Ok(())
    }

    async fn active_timer(
        &self,
        designer_name: &str,
    ) -> Result<Option<TimeEntryRecord>, RepositoryError> {
        let timer = sqlx::query_as::<_, TimeEntryRecord>(
            r#"
            SELECT *
            FROM time_entries
            WHERE designer_name = $1
              AND is_timer_entry = TRUE
              AND timer_ended_at IS NULL
            "#,
        )
        .bind(designer_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(timer)
    }

    async fn start_timer(&self, timer: &NewTimer) -> Result<TimeEntryRecord, RepositoryError> {
        let created = sqlx::query_as::<_, TimeEntryRecord>(
            r#"
            INSERT INTO time_entries (
                project_id, designer_name, hours, entry_date, description,
                is_timer_entry, timer_started_at
            )
            VALUES ($1, $2, 0, $3, $4, TRUE, $5)
            RETURNING *
            "#,
        )
        .bind(timer.project_id)
        .bind(&timer.designer_name)
        .bind(timer.started_at.date_naive())
        .bind(&timer.description)
        .bind(timer.started_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn stop_timer(
        &self,
        id: i32,
        ended_at: DateTime<Utc>,
        hours: f64,
    ) -> Result<TimeEntryRecord, RepositoryError> {
        let stopped = sqlx::query_as::<_, TimeEntryRecord>(
            r#"
            UPDATE time_entries
            SET timer_ended_at = $2,
                hours = $3
            WHERE id = $1
              AND is_timer_entry = TRUE
              AND timer_ended_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(ended_at)
        .bind(hours)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("running timer {id}")))?;

        Ok(stopped)
    }

    async fn sync_project_hours(&self, project_id: i32) -> Result<(), RepositoryError> {
        // hours_worked is derived data: always the sum of the project's entries.
        sqlx::query(
            r#"
            UPDATE projects
            SET hours_worked = COALESCE(
                    (SELECT SUM(hours) FROM time_entries WHERE project_id = $1),
                    0
                ),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(project_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
