use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::master_dto::{CreateStationRequest, UpdateStationRequest};
use crate::models::master::Station;
use crate::utils::errors::{AppError, AppResult};

pub struct StationRepository {
    pool: PgPool,
}

impl StationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Station>> {
        let stations = sqlx::query_as::<_, Station>("SELECT * FROM stations ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(stations)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Station>> {
        let station = sqlx::query_as::<_, Station>("SELECT * FROM stations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(station)
    }

    pub async fn create(&self, req: CreateStationRequest) -> AppResult<Station> {
        let station = sqlx::query_as::<_, Station>(
            r#"
            INSERT INTO stations (id, name, location)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(req.name.trim())
        .bind(req.location.trim())
        .fetch_one(&self.pool)
        .await?;

        Ok(station)
    }

    pub async fn update(&self, id: Uuid, req: UpdateStationRequest) -> AppResult<Station> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Station not found".to_string()))?;

        let station = sqlx::query_as::<_, Station>(
            r#"
            UPDATE stations SET name = $2, location = $3, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(req.name.unwrap_or(current.name))
        .bind(req.location.unwrap_or(current.location))
        .fetch_one(&self.pool)
        .await?;

        Ok(station)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM stations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
