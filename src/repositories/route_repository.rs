use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::master_dto::{CreateRouteRequest, UpdateRouteRequest};
use crate::models::master::Route;
use crate::utils::errors::{AppError, AppResult};

pub struct RouteRepository {
    pool: PgPool,
}

impl RouteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, depot_cd: Option<&str>) -> AppResult<Vec<Route>> {
        let routes = sqlx::query_as::<_, Route>(
            r#"
            SELECT * FROM routes
            WHERE ($1::text IS NULL OR depot_cd = $1)
            ORDER BY name
            "#,
        )
        .bind(depot_cd)
        .fetch_all(&self.pool)
        .await?;

        Ok(routes)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Route>> {
        let route = sqlx::query_as::<_, Route>("SELECT * FROM routes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(route)
    }

    pub async fn create(&self, req: CreateRouteRequest) -> AppResult<Route> {
        let route = sqlx::query_as::<_, Route>(
            r#"
            INSERT INTO routes (id, name, depot_cd, station_ids)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(req.name.trim())
        .bind(req.depot_cd)
        .bind(req.station_ids)
        .fetch_one(&self.pool)
        .await?;

        Ok(route)
    }

    pub async fn update(&self, id: Uuid, req: UpdateRouteRequest) -> AppResult<Route> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Route not found".to_string()))?;

        let route = sqlx::query_as::<_, Route>(
            r#"
            UPDATE routes
            SET name = $2, depot_cd = $3, station_ids = $4, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(req.name.unwrap_or(current.name))
        .bind(req.depot_cd.unwrap_or(current.depot_cd))
        .bind(req.station_ids.unwrap_or(current.station_ids))
        .fetch_one(&self.pool)
        .await?;

        Ok(route)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM routes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
