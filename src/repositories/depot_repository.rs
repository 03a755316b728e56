use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::master_dto::{CreateDepotRequest, UpdateDepotRequest};
use crate::models::master::Depot;
use crate::utils::errors::{AppError, AppResult};

pub struct DepotRepository {
    pool: PgPool,
}

impl DepotRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Depot>> {
        let depots = sqlx::query_as::<_, Depot>("SELECT * FROM depots ORDER BY depot_cd")
            .fetch_all(&self.pool)
            .await?;

        Ok(depots)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Depot>> {
        let depot = sqlx::query_as::<_, Depot>("SELECT * FROM depots WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(depot)
    }

    pub async fn create(&self, req: CreateDepotRequest) -> AppResult<Depot> {
        let depot = sqlx::query_as::<_, Depot>(
            r#"
            INSERT INTO depots (id, depot_cd, depot_name, depot_add1, depot_add2, depot_add3,
                                depot_area, city, pin, state_cd, gstin, contact_no, email,
                                contact_name, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(req.depot_cd)
        .bind(req.depot_name)
        .bind(req.depot_add1)
        .bind(req.depot_add2)
        .bind(req.depot_add3)
        .bind(req.depot_area)
        .bind(req.city)
        .bind(req.pin)
        .bind(req.state_cd)
        .bind(req.gstin.map(|g| g.to_uppercase()))
        .bind(req.contact_no)
        .bind(req.email)
        .bind(req.contact_name)
        .bind(req.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(depot)
    }

    /// Actualización parcial: los campos ausentes conservan su valor
    pub async fn update(&self, id: Uuid, req: UpdateDepotRequest) -> AppResult<Depot> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Depot not found".to_string()))?;

        let depot = sqlx::query_as::<_, Depot>(
            r#"
            UPDATE depots
            SET depot_name = $2, depot_add1 = $3, depot_add2 = $4, depot_add3 = $5,
                depot_area = $6, city = $7, pin = $8, state_cd = $9, gstin = $10,
                contact_no = $11, email = $12, contact_name = $13, status = $14,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(req.depot_name.unwrap_or(current.depot_name))
        .bind(req.depot_add1.or(current.depot_add1))
        .bind(req.depot_add2.or(current.depot_add2))
        .bind(req.depot_add3.or(current.depot_add3))
        .bind(req.depot_area.or(current.depot_area))
        .bind(req.city.or(current.city))
        .bind(req.pin.or(current.pin))
        .bind(req.state_cd.or(current.state_cd))
        .bind(req.gstin.map(|g| g.to_uppercase()).or(current.gstin))
        .bind(req.contact_no.or(current.contact_no))
        .bind(req.email.or(current.email))
        .bind(req.contact_name.or(current.contact_name))
        .bind(req.status.unwrap_or(current.status))
        .fetch_one(&self.pool)
        .await?;

        Ok(depot)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM depots WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
