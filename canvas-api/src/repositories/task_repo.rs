use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use super::repo_error::RepositoryError;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: i32,
    pub project_id: i32,
    pub name: String,
    pub estimated_hours: Option<f64>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

pub struct NewTask {
    pub project_id: i32,
    pub name: String,
    pub estimated_hours: Option<f64>,
}

pub trait TaskRepository {
    async fn tasks_for_project(&self, project_id: i32) -> Result<Vec<TaskRecord>, RepositoryError>;
    async fn create_task(&self, task: &NewTask) -> Result<TaskRecord, RepositoryError>;
    async fn set_completed(&self, id: i32, completed: bool)
        -> Result<TaskRecord, RepositoryError>;
    async fn delete_task(&self, id: i32) -> Result<(), RepositoryError>;
}

pub struct TaskRepositoryImpl {
    pool: PgPool,
}

impl TaskRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl TaskRepository for TaskRepositoryImpl {
    async fn tasks_for_project(&self, project_id: i32) -> Result<Vec<TaskRecord>, RepositoryError> {
        let tasks = sqlx::query_as::<_, TaskRecord>(
            r#"
            SELECT id, project_id, name, estimated_hours, completed, created_at
            FROM tasks
            WHERE project_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn create_task(&self, task: &NewTask) -> Result<TaskRecord, RepositoryError> {
        let created = sqlx::query_as::<_, TaskRecord>(
            r#"
            INSERT INTO tasks (project_id, name, estimated_hours)
            VALUES ($1, $2, $3)
            RETURNING id, project_id, name, estimated_hours, completed, created_at
            "#,
        )
        .bind(task.project_id)
        .bind(&task.name)
        .bind(task.estimated_hours)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn set_completed(
        &self,
        id: i32,
        completed: bool,
    ) -> Result<TaskRecord, RepositoryError> {
        let updated = sqlx::query_as::<_, TaskRecord>(
            r#"
            UPDATE tasks
            SET completed = $2
            WHERE id = $1
            RETURNING id, project_id, name, estimated_hours, completed, created_at
            "#,
        )
        .bind(id)
        .bind(completed)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("task {id}")))?;

        Ok(updated)
    }

    async fn delete_task(&self, id: i32) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            DELETE FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("task {id}")));
        }

        Ok(())
    }
}
