use serde::Serialize;
use sqlx::PgPool;
use workload::DesignerCapacity;

use super::repo_error::RepositoryError;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CapacityRecord {
    pub id: i32,
    pub team_id: i32,
    pub designer_name: String,
    pub weekly_available_hours: f64,
}

impl CapacityRecord {
    /// Core view of this record for the workload calculations.
    pub fn to_core(&self) -> DesignerCapacity {
        DesignerCapacity::new(&self.designer_name, self.weekly_available_hours)
    }
}

pub struct NewCapacity {
    pub team_id: i32,
    pub designer_name: String,
    pub weekly_available_hours: f64,
}

pub trait CapacityRepository {
    async fn capacities_for_team(
        &self,
        team_id: i32,
    ) -> Result<Vec<CapacityRecord>, RepositoryError>;
    async fn find_by_designer(
        &self,
        team_id: i32,
        designer_name: &str,
    ) -> Result<Option<CapacityRecord>, RepositoryError>;
    async fn create_capacity(
        &self,
        capacity: &NewCapacity,
    ) -> Result<CapacityRecord, RepositoryError>;
    async fn update_capacity(
        &self,
        id: i32,
        weekly_available_hours: f64,
    ) -> Result<CapacityRecord, RepositoryError>;
    async fn delete_capacity(&self, id: i32) -> Result<(), RepositoryError>;
}

pub struct CapacityRepositoryImpl {
    pool: PgPool,
}

impl CapacityRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CapacityRepository for CapacityRepositoryImpl {
    async fn capacities_for_team(
        &self,
        team_id: i32,
    ) -> Result<Vec<CapacityRecord>, RepositoryError> {
        let capacities = sqlx::query_as::<_, CapacityRecord>(
            r#"
            SELECT id, team_id, designer_name, weekly_available_hours
            FROM designer_capacities
            WHERE team_id = $1
            ORDER BY designer_name
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(capacities)
    }

    async fn find_by_designer(
        &self,
        team_id: i32,
        designer_name: &str,
    ) -> Result<Option<CapacityRecord>, RepositoryError> {
        let capacity = sqlx::query_as::<_, CapacityRecord>(
            r#"
            SELECT id, team_id, designer_name, weekly_available_hours
            FROM designer_capacities
            WHERE team_id = $1 AND designer_name = $2
            "#,
        )
        .bind(team_id)
        .bind(designer_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(capacity)
    }

    async fn create_capacity(
        &self,
        capacity: &NewCapacity,
    ) -> Result<CapacityRecord, RepositoryError> {
        let created = sqlx::query_as::<_, CapacityRecord>(
            r#"
            INSERT INTO designer_capacities (team_id, designer_name, weekly_available_hours)
            VALUES ($1, $2, $3)
            RETURNING id, team_id, designer_name, weekly_available_hours
            "#,
        )
        .bind(capacity.team_id)
        .bind(&capacity.designer_name)
        .bind(capacity.weekly_available_hours)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update_capacity(
        &self,
        id: i32,
        weekly_available_hours: f64,
    ) -> Result<CapacityRecord, RepositoryError> {
        let updated = sqlx::query_as::<_, CapacityRecord>(
            r#"
            UPDATE designer_capacities
            SET weekly_available_hours = $2
            WHERE id = $1
            RETURNING id, team_id, designer_name, weekly_available_hours
            "#,
        )
        .bind(id)
        .bind(weekly_available_hours)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("capacity record {id}")))?;

        Ok(updated)
    }

    async fn delete_capacity(&self, id: i32) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            DELETE FROM designer_capacities
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("capacity record {id}")));
        }

        Ok(())
    }
}
