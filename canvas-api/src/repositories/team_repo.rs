use serde::Serialize;
use sqlx::PgPool;

use super::repo_error::RepositoryError;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: i32,
    pub name: String,
}

pub trait TeamRepository {
    async fn get_team(&self, id: i32) -> Result<Option<Team>, RepositoryError>;
    async fn first_team(&self) -> Result<Option<Team>, RepositoryError>;
    async fn all_teams(&self) -> Result<Vec<Team>, RepositoryError>;
    async fn create_team(&self, name: &str) -> Result<Team, RepositoryError>;
}

pub struct TeamRepositoryImpl {
    pool: PgPool,
}

impl TeamRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl TeamRepository for TeamRepositoryImpl {
    async fn get_team(&self, id: i32) -> Result<Option<Team>, RepositoryError> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            SELECT id, name
            FROM teams
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(team)
    }

    async fn first_team(&self) -> Result<Option<Team>, RepositoryError> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            SELECT id, name
            FROM teams
            ORDER BY id
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(team)
    }

    async fn all_teams(&self) -> Result<Vec<Team>, RepositoryError> {
        let teams = sqlx::query_as::<_, Team>(
            r#"
            SELECT id, name
            FROM teams
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(teams)
    }

    async fn create_team(&self, name: &str) -> Result<Team, RepositoryError> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            INSERT INTO teams (name)
            VALUES ($1)
            RETURNING id, name
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(team)
    }
}
